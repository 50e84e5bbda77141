//! On-disk artifacts, keyed by the run's capture timestamp:
//! `cb_account_<ts>.json`, `cb_stations_<ts>.json`,
//! `cb_trips_<ts>.json`/`.csv`, `cb_trips_full_<ts>.json`/`.csv`.
//!
//! JSON artifacts reload exactly; the CSVs carry a header row of the
//! record's field names in field order and are write-only.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use bikeshare_portal::types::{Account, RawTrip};

use crate::export::Export;
use crate::hydrate::FullTrip;
use crate::stations::StationSet;
use crate::ExportError;

pub struct Archive {
    data_dir: PathBuf,
}

impl Archive {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn artifact(&self, kind: &str, ts: i64, ext: &str) -> PathBuf {
        self.data_dir.join(format!("cb_{}_{}.{}", kind, ts, ext))
    }

    /// Writes every artifact of a successful run.
    pub fn save(&self, export: &Export) -> Result<(), ExportError> {
        self.save_account(&export.account, export.ts)?;
        self.save_stations(&export.stations, export.ts)?;
        self.save_trips(&export.trips, export.ts)?;
        if let Some(full) = &export.trips_full {
            self.save_trips_full(full, export.ts)?;
        }
        Ok(())
    }

    pub fn save_account(&self, account: &Account, ts: i64) -> Result<PathBuf, ExportError> {
        let path = self.artifact("account", ts, "json");
        tracing::info!(path = %path.display(), "writing account json");
        self.write_json(&path, account)?;
        Ok(path)
    }

    pub fn save_stations(&self, stations: &StationSet, ts: i64) -> Result<PathBuf, ExportError> {
        let path = self.artifact("stations", ts, "json");
        tracing::info!(path = %path.display(), "writing stations json");
        self.write_json(&path, stations)?;
        Ok(path)
    }

    pub fn save_trips(&self, trips: &[RawTrip], ts: i64) -> Result<(), ExportError> {
        let json = self.artifact("trips", ts, "json");
        tracing::info!(path = %json.display(), "writing trips json");
        self.write_json(&json, trips)?;
        let csv = self.artifact("trips", ts, "csv");
        tracing::info!(path = %csv.display(), "writing trips csv");
        self.write_csv(&csv, trips)
    }

    pub fn save_trips_full(&self, trips: &[FullTrip], ts: i64) -> Result<(), ExportError> {
        let json = self.artifact("trips_full", ts, "json");
        tracing::info!(path = %json.display(), "writing trips full json");
        self.write_json(&json, trips)?;
        let csv = self.artifact("trips_full", ts, "csv");
        tracing::info!(path = %csv.display(), "writing trips full csv");
        self.write_csv(&csv, trips)
    }

    pub fn load_account(&self, ts: i64) -> Result<Account, ExportError> {
        self.read_json(&self.artifact("account", ts, "json"))
    }

    pub fn load_stations(&self, ts: i64) -> Result<StationSet, ExportError> {
        self.read_json(&self.artifact("stations", ts, "json"))
    }

    pub fn load_trips(&self, ts: i64) -> Result<Vec<RawTrip>, ExportError> {
        self.read_json(&self.artifact("trips", ts, "json"))
    }

    pub fn load_trips_full(&self, ts: i64) -> Result<Vec<FullTrip>, ExportError> {
        self.read_json(&self.artifact("trips_full", ts, "json"))
    }

    /// Reloads the account, trips, and stations of a cached run.
    pub fn load_run(&self, ts: i64) -> Result<(Account, Vec<RawTrip>, StationSet), ExportError> {
        Ok((
            self.load_account(ts)?,
            self.load_trips(ts)?,
            self.load_stations(ts)?,
        ))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), ExportError> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    fn write_csv<T: Serialize>(&self, path: &Path, rows: &[T]) -> Result<(), ExportError> {
        fs::create_dir_all(&self.data_dir)?;
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<T, ExportError> {
        tracing::debug!(path = %path.display(), "loading artifact");
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
