use interview_rush_core::{Command, Event, Rules, Screen};
use interview_rush_rendering::{FrameControl, FrameInput, Scene};
use interview_rush_system_analytics::{RunAnalytics, RunReport};
use interview_rush_system_bootstrap::Bootstrap;
use interview_rush_system_session::{Session, SessionFlow};
use interview_rush_world::{self as world, World};

use crate::scene;

/// Owns the world and the systems that drive it, one frame at a time.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    session: Session,
    analytics: RunAnalytics,
    bootstrap: Bootstrap,
    commands: Vec<Command>,
    events: Vec<Event>,
    finished_runs: Vec<RunReport>,
}

impl Simulation {
    pub(crate) fn new(rules: Rules, seed: u64) -> anyhow::Result<Self> {
        Ok(Self {
            world: World::new(rules, seed)?,
            session: Session::new(),
            analytics: RunAnalytics::new(),
            bootstrap: Bootstrap,
            commands: Vec::new(),
            events: Vec::new(),
            finished_runs: Vec::new(),
        })
    }

    /// Advances one simulation frame and redraws `scene`.
    pub(crate) fn step(&mut self, input: FrameInput, scene: &mut Scene) -> FrameControl {
        self.commands.clear();
        if self.session.handle(&input.events, &mut self.commands) == SessionFlow::Exit {
            return FrameControl::Exit;
        }

        self.events.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        self.session.observe(&self.events);
        self.analytics.handle(&self.events, &mut self.finished_runs);
        for report in self.finished_runs.drain(..) {
            log::info!("run finished: {}", report.summary());
        }

        self.populate(scene);
        FrameControl::Continue
    }

    /// Redraws `scene` from the current state without advancing it.
    pub(crate) fn populate(&self, scene: &mut Scene) {
        let summary: Vec<String> = self
            .analytics
            .last_finished()
            .filter(|_| self.session.screen() == Screen::GameOver)
            .map(|report| vec![report.summary()])
            .unwrap_or_default();
        scene::populate(
            scene,
            &self.world,
            self.session.screen(),
            &self.bootstrap,
            &summary,
        );
    }

    #[cfg(test)]
    fn screen(&self) -> Screen {
        self.session.screen()
    }

    #[cfg(test)]
    fn world(&self) -> &World {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_rush_core::{Direction, InputEvent};
    use interview_rush_world::query;

    fn input(events: &[InputEvent]) -> FrameInput {
        FrameInput {
            events: events.to_vec(),
        }
    }

    fn simulation() -> (Simulation, Scene) {
        let simulation = Simulation::new(Rules::default(), 99).expect("default rules are valid");
        let scene = Scene::new(1280.0, 720.0).expect("valid surface");
        (simulation, scene)
    }

    #[test]
    fn invalid_rules_fail_construction() {
        let rules = Rules {
            frames_per_second: 0,
            ..Rules::default()
        };

        assert!(Simulation::new(rules, 1).is_err());
    }

    #[test]
    fn intro_frames_leave_the_world_idle() {
        let (mut simulation, mut scene) = simulation();

        for _ in 0..5 {
            assert_eq!(
                simulation.step(FrameInput::default(), &mut scene),
                FrameControl::Continue
            );
        }

        assert_eq!(simulation.screen(), Screen::Intro);
        assert_eq!(query::frame(simulation.world()), 0);
        assert!(scene.sprites.is_empty());
    }

    #[test]
    fn start_then_move_reaches_the_world() {
        let (mut simulation, mut scene) = simulation();

        let _ = simulation.step(input(&[InputEvent::Start]), &mut scene);
        let _ = simulation.step(input(&[InputEvent::Move(Direction::Right)]), &mut scene);

        assert_eq!(simulation.screen(), Screen::Playing);
        assert_eq!(query::frame(simulation.world()), 2);
        assert_eq!(query::player(simulation.world()).position().x, 768.0);
        assert!(!scene.lanes.is_empty());
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut simulation, mut scene) = simulation();
        let _ = simulation.step(input(&[InputEvent::Start]), &mut scene);

        assert_eq!(
            simulation.step(input(&[InputEvent::Quit]), &mut scene),
            FrameControl::Exit
        );
    }
}
