//! Raw record ingestion.

mod csv_source;

pub use csv_source::{
    CsvRecordSource, DEMANDS_FILE, FACILITIES_FILE, LANES_FILE, WAREHOUSES_FILE,
};
