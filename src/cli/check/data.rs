use serde_json::json;

use crate::adapter::input::CsvRecordSource;
use crate::application::prepare;
use crate::cli::command::DataArgs;
use crate::cli::load::{init_logging, load_config, Overrides};
use crate::cli::output;
use crate::error::Result;

/// Load input records and build the model without solving it.
///
/// Every pre-solve check runs, so a clean result means `solve` will reach
/// the solver.
pub fn execute_data(args: &DataArgs) -> Result<()> {
    let overrides = Overrides {
        data: args.data.clone(),
        ..Overrides::default()
    };
    let mut config = load_config(&args.config, &overrides)?;
    init_logging(&mut config);

    let records = CsvRecordSource::new(&config.data.dir).load()?;
    let instance = prepare(&records, &config.scenario)?;
    let data = instance.data();
    let problem = instance.problem();

    if output::is_json() {
        output::json_output(json!({
            "command": "check.data",
            "valid": true,
            "data_dir": config.data.dir.display().to_string(),
            "facilities": data.facilities.len(),
            "warehouses": data.warehouses.len(),
            "lanes": instance.costs().len(),
            "variables": problem.num_vars(),
            "integer_variables": problem.integer_vars().len(),
            "constraints": problem.constraints.len(),
            "total_demand": data.total_demand(),
            "total_capacity": data.total_capacity(),
        }));
        return Ok(());
    }

    output::section("Data Check");
    output::field("Data directory", config.data.dir.display());
    output::success("Records normalized and model built");

    output::section("Model");
    output::field("Facilities", data.facilities.len());
    output::field("Warehouses", data.warehouses.len());
    output::field("Lanes", instance.costs().len());
    output::field("Variables", problem.num_vars());
    output::field("Binary", problem.integer_vars().len());
    output::field("Constraints", problem.constraints.len());
    output::field("Annual demand", format!("{:.0}", data.total_demand()));
    output::field("Annual capacity", format!("{:.0}", data.total_capacity()));

    Ok(())
}
