//! CSV record loader.
//!
//! Reads a data directory laid out as:
//!
//! | file                       | columns                                                   |
//! |----------------------------|-----------------------------------------------------------|
//! | `demands.csv`              | `facility_id, daily_demand`                               |
//! | `warehouses.csv`           | `warehouse_id, capacity, construction_cost, operational_cost, latitude, longitude` |
//! | `transportation_costs.csv` | `from_warehouse, to_facility, cost_per_unit`              |
//! | `facilities.csv` (opt.)    | `facility_id, latitude, longitude`                        |
//!
//! Extra columns are ignored.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{FacilityId, FacilityRecord, LaneRecord, RecordSet, WarehouseRecord};
use crate::error::{InputError, Result};

pub const DEMANDS_FILE: &str = "demands.csv";
pub const WAREHOUSES_FILE: &str = "warehouses.csv";
pub const LANES_FILE: &str = "transportation_costs.csv";
pub const FACILITIES_FILE: &str = "facilities.csv";

#[derive(Debug, Deserialize)]
struct FacilityLocation {
    facility_id: FacilityId,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Loads a [`RecordSet`] from a directory of CSV files.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    dir: PathBuf,
}

impl CsvRecordSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read all record files.
    ///
    /// Facility coordinates are joined from `facilities.csv` when present.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] naming the file that could not be opened or
    /// holds a malformed row.
    pub fn load(&self) -> Result<RecordSet> {
        let mut facilities: Vec<FacilityRecord> = read_records(&self.dir.join(DEMANDS_FILE))?;
        let warehouses: Vec<WarehouseRecord> = read_records(&self.dir.join(WAREHOUSES_FILE))?;
        let lanes: Vec<LaneRecord> = read_records(&self.dir.join(LANES_FILE))?;

        let locations_path = self.dir.join(FACILITIES_FILE);
        if locations_path.exists() {
            let locations: Vec<FacilityLocation> = read_records(&locations_path)?;
            attach_locations(&mut facilities, locations);
        }

        debug!(
            dir = %self.dir.display(),
            facilities = facilities.len(),
            warehouses = warehouses.len(),
            lanes = lanes.len(),
            "Loaded input records"
        );

        Ok(RecordSet {
            facilities,
            warehouses,
            lanes,
        })
    }
}

fn attach_locations(facilities: &mut [FacilityRecord], locations: Vec<FacilityLocation>) {
    let by_id: HashMap<FacilityId, FacilityLocation> = locations
        .into_iter()
        .map(|loc| (loc.facility_id.clone(), loc))
        .collect();

    for facility in facilities.iter_mut() {
        if let Some(loc) = by_id.get(&facility.facility_id) {
            facility.latitude = facility.latitude.or(loc.latitude);
            facility.longitude = facility.longitude.or(loc.longitude);
        }
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| InputError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record = row.map_err(|source| InputError::Record {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn write_required(dir: &Path) {
        write(dir, DEMANDS_FILE, "facility_id,daily_demand\nDORM_A,100\nLIBRARY, 50\n");
        write(
            dir,
            WAREHOUSES_FILE,
            "warehouse_id,capacity,construction_cost,operational_cost,latitude,longitude\n\
             WH_NORTH,300,2000000,300,40.01,-105.27\n",
        );
        write(
            dir,
            LANES_FILE,
            "from_warehouse,to_facility,cost_per_unit\nWH_NORTH,DORM_A,1.5\nWH_NORTH,LIBRARY,0.8\n",
        );
    }

    #[test]
    fn loads_required_files() {
        let dir = tempfile::tempdir().unwrap();
        write_required(dir.path());

        let records = CsvRecordSource::new(dir.path()).load().unwrap();

        assert_eq!(records.facilities.len(), 2);
        assert_eq!(records.facilities[1].daily_demand, 50.0);
        assert_eq!(records.facilities[0].latitude, None);
        assert_eq!(records.warehouses[0].daily_capacity, 300.0);
        assert_eq!(records.warehouses[0].longitude, Some(-105.27));
        assert_eq!(records.lanes[1].cost_per_unit, 0.8);
    }

    #[test]
    fn joins_facility_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        write_required(dir.path());
        write(
            dir.path(),
            FACILITIES_FILE,
            "facility_id,name,latitude,longitude\nDORM_A,Dorm A,40.0,-105.0\n",
        );

        let records = CsvRecordSource::new(dir.path()).load().unwrap();

        assert_eq!(records.facilities[0].latitude, Some(40.0));
        assert_eq!(records.facilities[1].latitude, None);
    }

    #[test]
    fn missing_file_is_named() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DEMANDS_FILE, "facility_id,daily_demand\n");

        let err = CsvRecordSource::new(dir.path()).load().unwrap_err();

        match err {
            Error::Input(InputError::Open { path, .. }) => {
                assert!(path.ends_with(WAREHOUSES_FILE));
            }
            other => panic!("expected open error, got {other}"),
        }
    }

    #[test]
    fn malformed_row_is_named() {
        let dir = tempfile::tempdir().unwrap();
        write_required(dir.path());
        write(dir.path(), DEMANDS_FILE, "facility_id,daily_demand\nDORM_A,lots\n");

        let err = CsvRecordSource::new(dir.path()).load().unwrap_err();

        assert!(matches!(err, Error::Input(InputError::Record { .. })));
        assert!(err.to_string().contains(DEMANDS_FILE));
    }
}
