//! Config loading shared by command handlers.

use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::error::Result;
use crate::infrastructure::config::{validate_scenario, Config};

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub budget: Option<f64>,
    pub sites: Option<usize>,
}

/// Load the config file, apply overrides and re-validate the scenario.
///
/// # Errors
///
/// Returns a config error if the file is unreadable or invalid, or if an
/// override puts the scenario out of range.
pub fn load_config(path: &Path, overrides: &Overrides) -> Result<Config> {
    let mut config = Config::load(path)?;

    if let Some(dir) = &overrides.data {
        config.data.dir.clone_from(dir);
    }
    if let Some(budget) = overrides.budget {
        config.scenario.budget_limit = budget;
    }
    if let Some(sites) = overrides.sites {
        config.scenario.site_count = sites;
    }
    validate_scenario(&config.scenario)?;

    Ok(config)
}

/// Initialize logging, raising the level for `-v` / `-vv`.
pub fn init_logging(config: &mut Config) {
    match output::verbosity() {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    config.init_logging();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};

    fn write_config(dir: &Path) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[data]
dir = "records"

[scenario]
target_facilities = ["MED_CENTER"]
target_warehouses = ["WH_NORTH", "WH_SOUTH"]
budget_limit = 1000000
"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn overrides_replace_configured_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path());
        let overrides = Overrides {
            data: Some(PathBuf::from("/srv/records")),
            budget: Some(750_000.0),
            sites: Some(1),
        };

        let config = load_config(&path, &overrides).unwrap();

        assert_eq!(config.data.dir, PathBuf::from("/srv/records"));
        assert_eq!(config.scenario.budget_limit, 750_000.0);
        assert_eq!(config.scenario.site_count, 1);
    }

    #[test]
    fn relative_data_dir_resolves_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path());

        let config = load_config(&path, &Overrides::default()).unwrap();

        assert_eq!(config.data.dir, dir.path().join("records"));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path());
        let overrides = Overrides {
            sites: Some(0),
            ..Overrides::default()
        };

        let err = load_config(&path, &overrides).unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "site_count",
                ..
            })
        ));
    }
}
