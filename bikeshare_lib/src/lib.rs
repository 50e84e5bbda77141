//! Library layer for the bikeshare exporter: station directory, trip
//! enrichment, run orchestration, and the on-disk archive.
//!
//! Wraps the `bikeshare_portal` crate's scraping client with the station
//! join (hydrate), the JSON/CSV artifact writers, and the one-pass run
//! driver the CLI calls into.

pub mod archive;
pub mod error;
pub mod export;
pub mod hydrate;
pub mod stations;

pub use bikeshare_portal;
pub use bikeshare_portal::types;

pub use archive::Archive;
pub use error::ExportError;
pub use export::{Export, ExportConfig, Exporter};
pub use hydrate::{dollars_to_float, hydrate, str_to_secs, Cell, FullTrip};
pub use stations::{Station, StationSet};
