use std::path::Path;

use serde_json::json;

use crate::cli::load::{load_config, Overrides};
use crate::cli::output;
use crate::error::Result;

/// Validate a configuration file without loading any data.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = load_config(path, &Overrides::default())?;
    let scenario = &config.scenario;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "valid": true,
            "config": path.display().to_string(),
            "data_dir": config.data.dir.display().to_string(),
            "scenario": scenario,
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Scenario");
    output::field("Data directory", config.data.dir.display());
    output::field("Facilities", scenario.target_facilities.len());
    output::field("Warehouses", scenario.target_warehouses.len());
    output::field("Sites to open", scenario.site_count);
    output::field("Budget limit", output::money(scenario.budget_limit));
    output::field("Days per year", scenario.days_per_year);
    output::field("Amortization", format!("{} years", scenario.amortization_years));

    if scenario.site_count > scenario.target_warehouses.len() {
        output::warning(&format!(
            "site count {} exceeds the {} candidate warehouses",
            scenario.site_count,
            scenario.target_warehouses.len()
        ));
    }

    Ok(())
}
