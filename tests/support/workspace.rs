//! On-disk scenario directories for config and CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use siteplan::adapter::input::{DEMANDS_FILE, LANES_FILE, WAREHOUSES_FILE};
use siteplan::domain::RecordSet;
use siteplan::testkit::domain::{campus_records, BUDGET_LIMIT, FACILITIES, WAREHOUSES};
use tempfile::TempDir;

/// A temp directory holding `config.toml` and a `data/` directory.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// The reference campus scenario with default budget and site count.
    pub fn campus() -> Self {
        Self::with_records(&campus_records())
    }

    pub fn with_records(records: &RecordSet) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let data = dir.path().join("data");
        fs::create_dir(&data).expect("create data dir");

        write_csv(&data.join(DEMANDS_FILE), &records.facilities);
        write_csv(&data.join(WAREHOUSES_FILE), &records.warehouses);
        write_csv(&data.join(LANES_FILE), &records.lanes);

        let workspace = Self { dir };
        workspace.write_config(&campus_config(BUDGET_LIMIT, 2));
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn write_config(&self, contents: &str) {
        fs::write(self.config_path(), contents).expect("write config");
    }
}

/// Config text for the campus targets.
pub fn campus_config(budget_limit: f64, site_count: usize) -> String {
    format!(
        r#"[data]
dir = "data"

[scenario]
target_facilities = {facilities:?}
target_warehouses = {warehouses:?}
budget_limit = {budget_limit:.1}
site_count = {site_count}

[logging]
level = "warn"
"#,
        facilities = FACILITIES,
        warehouses = WAREHOUSES,
    )
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) {
    let mut writer = csv::Writer::from_path(path).expect("open csv for writing");
    for row in rows {
        writer.serialize(row).expect("write csv row");
    }
    writer.flush().expect("flush csv");
}
