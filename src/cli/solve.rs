//! `siteplan solve`: run a scenario end to end and report the plan.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::input::CsvRecordSource;
use crate::adapter::output::{network_map, write_network_map};
use crate::adapter::solver::HiGHSSolver;
use crate::application::{PlanOutcome, Planner};
use crate::cli::command::SolveArgs;
use crate::cli::load::{init_logging, load_config, Overrides};
use crate::cli::output;
use crate::domain::{Plan, RecordSet, Scenario};
use crate::error::Result;
use crate::port::SolutionStatus;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Warehouse")]
    warehouse: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Capacity/yr")]
    capacity: String,
    #[tabled(rename = "Shipped/yr")]
    shipped: String,
    #[tabled(rename = "Utilization")]
    utilization: String,
}

#[derive(Tabled)]
struct ShipmentRow {
    #[tabled(rename = "From")]
    warehouse: String,
    #[tabled(rename = "To")]
    facility: String,
    #[tabled(rename = "Units/yr")]
    units: String,
    #[tabled(rename = "Unit cost")]
    unit_cost: String,
    #[tabled(rename = "Annual cost")]
    cost: String,
}

/// Run the planner against the configured scenario.
///
/// Returns the final solve status; data and configuration problems are
/// errors.
pub fn execute(args: &SolveArgs) -> Result<SolutionStatus> {
    let overrides = Overrides {
        data: args.data.clone(),
        budget: args.budget,
        sites: args.sites,
    };
    let mut config = load_config(&args.config, &overrides)?;
    init_logging(&mut config);

    let records = CsvRecordSource::new(&config.data.dir).load()?;
    let planner = Planner::new(Arc::new(HiGHSSolver::new()));
    let outcome = planner.plan(&records, &config.scenario)?;

    match &outcome {
        PlanOutcome::Planned(plan) => {
            if let Some(path) = &args.map {
                export_map(plan, &records, &config.scenario, path)?;
            }
            if output::is_json() {
                output::json_output(json!({
                    "command": "solve",
                    "status": outcome.status(),
                    "solver": planner.solver_name(),
                    "plan": plan,
                    "map": args.map.as_ref().map(|p| p.display().to_string()),
                }));
            } else {
                render_plan(plan, planner.solver_name(), args.map.as_deref());
            }
        }
        PlanOutcome::Unsolved { status, detail } => {
            if output::is_json() {
                output::json_output(json!({
                    "command": "solve",
                    "status": status,
                    "solver": planner.solver_name(),
                    "detail": detail,
                }));
            } else {
                render_unsolved(*status, detail.as_deref(), &config.scenario);
            }
        }
    }

    Ok(outcome.status())
}

fn export_map(plan: &Plan, records: &RecordSet, scenario: &Scenario, path: &Path) -> Result<()> {
    let map = network_map(plan, records, scenario);
    write_network_map(&map, path)
}

fn render_plan(plan: &Plan, solver: &str, map: Option<&Path>) {
    output::header(env!("CARGO_PKG_VERSION"));

    output::section("Solution");
    output::field("Status", output::positive(SolutionStatus::Optimal));
    output::field("Solver", solver);
    output::field("Sites opened", plan.open_count());

    output::section("Financial summary");
    output::field("Total annual cost", output::highlight(output::money(plan.costs.total)));
    output::field("Fixed costs", output::money(plan.costs.fixed));
    output::field("Transport costs", output::money(plan.costs.transport));
    output::field("Budget limit", output::money(plan.budget_limit));
    let headroom = output::money(plan.budget_headroom);
    if plan.budget_headroom >= 0.0 {
        output::field("Remaining budget", output::positive(headroom));
    } else {
        output::field("Remaining budget", output::negative(headroom));
    }

    output::section("Warehouse selection");
    let sites: Vec<SiteRow> = plan
        .sites
        .iter()
        .map(|site| SiteRow {
            warehouse: site.warehouse.to_string(),
            status: if site.open { "open" } else { "closed" },
            capacity: format!("{:.0}", site.capacity),
            shipped: format!("{:.0}", site.shipped),
            utilization: site
                .utilization
                .map_or_else(|| "n/a".to_string(), output::percent),
        })
        .collect();
    output::lines(&Table::new(sites).to_string());

    output::section("Shipments");
    if plan.shipments.is_empty() {
        output::hint("no lane carries flow");
    } else {
        let shipments: Vec<ShipmentRow> = plan
            .shipments
            .iter()
            .map(|s| ShipmentRow {
                warehouse: s.warehouse.to_string(),
                facility: s.facility.to_string(),
                units: format!("{:.1}", s.units),
                unit_cost: format!("{:.2}", s.unit_cost),
                cost: output::money(s.cost),
            })
            .collect();
        output::lines(&Table::new(shipments).to_string());
    }

    if let Some(path) = map {
        output::success(&format!("Network map written to {}", path.display()));
    }
}

fn render_unsolved(status: SolutionStatus, detail: Option<&str>, scenario: &Scenario) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Solution");
    output::field("Status", output::negative(status));
    output::warning(&format!("No optimal plan found ({status})"));
    if let Some(detail) = detail {
        output::field("Detail", detail);
    }

    if status == SolutionStatus::Infeasible {
        output::hint(&format!(
            "no choice of {} sites meets demand within {}; raise the budget or change the site count",
            scenario.site_count,
            output::money(scenario.budget_limit)
        ));
    }
}
