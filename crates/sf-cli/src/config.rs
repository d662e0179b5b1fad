//! Field configuration loading: defaults, then an optional TOML file.
//! The file comes from `--config`, falling back to `SF_CONFIG`.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use sf_core::FieldConfig;

pub const CONFIG_ENV: &str = "SF_CONFIG";

pub fn resolve_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| env::var(CONFIG_ENV).ok().filter(|s| !s.is_empty()).map(PathBuf::from))
}

pub fn parse(content: &str) -> Result<FieldConfig> {
    let config: FieldConfig = toml::from_str(content).context("malformed field config")?;
    config.validate().context("invalid field config")?;
    Ok(config)
}

pub fn load(flag: Option<&Path>) -> Result<FieldConfig> {
    let Some(path) = resolve_path(flag) else {
        tracing::debug!("no config file, using defaults");
        return Ok(FieldConfig::default());
    };
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("in {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = config.count, coupling = config.coupling, "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_table() {
        let cfg = parse(
            r#"
count = 12
coupling = 3.5

[repulsion]
radius = 60.0
"#,
        )
        .unwrap();
        assert_eq!(cfg.count, 12);
        assert_eq!(cfg.coupling, 3.5);
        assert_eq!(cfg.repulsion.radius, 60.0);
        assert_eq!(cfg.time_step, FieldConfig::default().time_step);
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(parse("").unwrap(), FieldConfig::default());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse("count = 0").unwrap_err();
        assert!(format!("{err:#}").contains("at least 1"), "got: {err:#}");
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(parse("cuopling = 1.0").is_err());
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&FieldConfig::default()).unwrap();
        assert_eq!(parse(&text).unwrap(), FieldConfig::default());
    }

    #[test]
    fn test_flag_wins_over_env() {
        let p = resolve_path(Some(Path::new("/tmp/explicit.toml")));
        assert_eq!(p, Some(PathBuf::from("/tmp/explicit.toml")));
    }
}
