//! Reference campus scenario and record builders.
//!
//! Six facilities, three candidate warehouses where any two cover total
//! demand, and a generous budget:
//!
//! | warehouse | cap/day | construction | op/day | annual fixed |
//! |-----------|---------|--------------|--------|--------------|
//! | WH_NORTH  | 300     | 2,000,000    | 300    | 309,500      |
//! | WH_SOUTH  | 280     | 1,800,000    | 280    | 282,200      |
//! | WH_EAST   | 260     | 1,500,000    | 350    | 277,750      |
//!
//! Total daily demand is 500 units (182,500 per year).

use crate::domain::{FacilityRecord, LaneRecord, RecordSet, Scenario, WarehouseRecord};

pub const FACILITIES: [&str; 6] = [
    "MED_CENTER",
    "ENG_BUILDING",
    "SCIENCE_HALL",
    "DORM_A",
    "DORM_B",
    "LIBRARY",
];

pub const WAREHOUSES: [&str; 3] = ["WH_NORTH", "WH_SOUTH", "WH_EAST"];

pub const BUDGET_LIMIT: f64 = 1_500_000.0;

/// Cheapest pair of fixed costs (WH_SOUTH + WH_EAST), before any transport.
pub const CHEAPEST_PAIR_FIXED: f64 = 559_950.0;

/// Sites opened by the optimal K = 2 plan.
pub const OPTIMAL_SITES: [&str; 2] = ["WH_SOUTH", "WH_EAST"];

/// Annual transport cost of the optimal K = 2 plan.
pub const OPTIMAL_TRANSPORT: f64 = 156_585.0;

/// Total annual cost of the optimal K = 2 plan.
pub const OPTIMAL_TOTAL: f64 = 716_535.0;

const DAILY_DEMAND: [f64; 6] = [120.0, 80.0, 60.0, 100.0, 90.0, 50.0];

const LANE_COSTS: [[f64; 6]; 3] = [
    [1.20, 0.80, 0.95, 1.50, 1.65, 0.70],
    [0.90, 1.40, 1.25, 0.75, 0.85, 1.30],
    [1.10, 1.00, 0.60, 1.35, 1.20, 0.95],
];

const FACILITY_COORDS: [(f64, f64); 6] = [
    (40.0076, -105.2659),
    (40.0068, -105.2630),
    (40.0090, -105.2680),
    (40.0025, -105.2560),
    (40.0010, -105.2600),
    (40.0083, -105.2705),
];

const WAREHOUSE_COORDS: [(f64, f64); 3] = [
    (40.0150, -105.2650),
    (39.9950, -105.2600),
    (40.0060, -105.2500),
];

/// Raw records of the reference scenario, including a few rows outside the
/// target sets.
pub fn campus_records() -> RecordSet {
    let mut facilities: Vec<FacilityRecord> = FACILITIES
        .iter()
        .zip(DAILY_DEMAND)
        .zip(FACILITY_COORDS)
        .map(|((&id, demand), (lat, lon))| FacilityRecord::new(id, demand).with_location(lat, lon))
        .collect();
    facilities.push(FacilityRecord::new("GYM", 40.0));

    let mut warehouses = vec![
        WarehouseRecord::new("WH_NORTH", 300.0, 2_000_000.0, 300.0),
        WarehouseRecord::new("WH_SOUTH", 280.0, 1_800_000.0, 280.0),
        WarehouseRecord::new("WH_EAST", 260.0, 1_500_000.0, 350.0),
    ];
    for (record, (lat, lon)) in warehouses.iter_mut().zip(WAREHOUSE_COORDS) {
        record.latitude = Some(lat);
        record.longitude = Some(lon);
    }
    warehouses.push(WarehouseRecord::new("WH_WEST", 500.0, 100.0, 1.0));

    let mut lanes = Vec::new();
    for (w, &warehouse) in WAREHOUSES.iter().enumerate() {
        for (f, &facility) in FACILITIES.iter().enumerate() {
            lanes.push(LaneRecord::new(warehouse, facility, LANE_COSTS[w][f]));
        }
        lanes.push(LaneRecord::new(warehouse, "GYM", 0.1));
    }
    lanes.push(LaneRecord::new("WH_WEST", "DORM_A", 0.1));

    RecordSet {
        facilities,
        warehouses,
        lanes,
    }
}

/// The reference scenario: K = 2 with a generous budget.
pub fn campus_scenario() -> Scenario {
    Scenario::new(FACILITIES, WAREHOUSES, BUDGET_LIMIT)
}

/// Drop one lane from a record set.
pub fn without_lane(mut records: RecordSet, warehouse: &str, facility: &str) -> RecordSet {
    records
        .lanes
        .retain(|l| !(l.from_warehouse.as_str() == warehouse && l.to_facility.as_str() == facility));
    records
}
