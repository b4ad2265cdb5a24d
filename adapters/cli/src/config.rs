use std::{fs, path::Path};

use anyhow::{Context, Result};
use interview_rush_core::Rules;

/// Loads gameplay rules from an optional TOML file.
///
/// Fields missing from the file keep their defaults. The merged rules are
/// validated before they are returned.
pub(crate) fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let rules = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config at {}", path.display()))?;
            parse_rules(&contents)
                .with_context(|| format!("invalid config at {}", path.display()))?
        }
        None => Rules::default(),
    };

    Ok(rules)
}

fn parse_rules(contents: &str) -> Result<Rules> {
    let rules: Rules = toml::from_str(contents).context("failed to parse config toml contents")?;
    rules.validate()?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_uses_defaults() {
        let rules = load_rules(None).expect("defaults are valid");

        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn partial_files_override_only_named_fields() {
        let rules = parse_rules("starting_lives = 3\nmax_speed = 9\n").expect("valid config");

        assert_eq!(rules.starting_lives, 3);
        assert_eq!(rules.max_speed, 9);
        assert_eq!(rules.screen_width, 1280.0);
    }

    #[test]
    fn invalid_values_are_rejected_with_context() {
        let error = parse_rules("min_speed = 8\nmax_speed = 2\n").expect_err("empty speed range");

        assert!(format!("{error:#}").contains("speed"));
    }

    #[test]
    fn negative_height_step_is_rejected() {
        let error = parse_rules("height_step = -64.0\n").expect_err("surface cannot shrink");

        assert!(format!("{error:#}").contains("height_step"));
    }

    #[test]
    fn unreadable_files_name_the_path() {
        let error = load_rules(Some(Path::new("definitely/missing/rules.toml")))
            .expect_err("missing file must fail");

        assert!(format!("{error:#}").contains("definitely/missing/rules.toml"));
    }
}
