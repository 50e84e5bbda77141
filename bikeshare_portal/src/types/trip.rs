//! One row of the trip-history table.

use serde::{Deserialize, Serialize};

/// A trip as it appears on a history page, before station enrichment.
///
/// Field order is the wire order of the exported CSV/JSON rows. Time texts
/// keep the portal's `MM/DD/YYYY HH:MM:SS AM/PM` rendering (US/Eastern);
/// the points fields are best-effort parses defaulting to 0.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RawTrip {
    pub start_name: String,
    pub end_name: String,
    pub start_time: String,
    pub end_time: String,
    pub start_points: i64,
    pub end_points: i64,
    pub points: i64,
    pub billed: String,
    pub duration: String,
}
