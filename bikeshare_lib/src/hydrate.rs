//! Enrichment: join each raw trip against the station directory and derive
//! fee, duration, and timestamp fields.
//!
//! The two sides of a trip join independently and all-or-nothing: any
//! failure inside a side's block (unknown station, malformed fee/duration/
//! time text) takes that side's whole fallback. The fallbacks are not
//! symmetric, and the `dollars`/`seconds` pair is recomputed by the end
//! side, so its outcome is the one emitted. Both behaviors are part of the
//! exported row contract and must not be normalized away.

use chrono::NaiveDateTime;
use chrono_tz::US::Eastern;
use serde::{Deserialize, Serialize};

use crate::stations::StationSet;
use bikeshare_portal::types::RawTrip;

/// Portal timestamp rendering on trip pages, US/Eastern wall clock.
pub const TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Placeholder for fields that depend on an unresolved station.
const DASH: &str = "-";

/// A derived column that is numeric when its side resolved and the `"-"`
/// placeholder when it did not.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    fn dash() -> Self {
        Cell::Text(DASH.to_string())
    }
}

/// A hydrated trip row: account and capture context, the nine raw fields,
/// then the station-join and derived columns. Field order is the CSV
/// column order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FullTrip {
    pub account_id: String,
    pub observed: i64,
    pub start_name: String,
    pub end_name: String,
    pub start_time: String,
    pub end_time: String,
    pub start_points: i64,
    pub end_points: i64,
    pub points: i64,
    pub billed: String,
    pub duration: String,
    pub start_id: String,
    pub end_id: String,
    pub start_terminal: String,
    pub end_terminal: String,
    pub start_lon: Cell,
    pub start_lat: Cell,
    pub end_lon: Cell,
    pub end_lat: Cell,
    pub dollars: f64,
    pub seconds: i64,
    pub start_epoch: Cell,
    pub end_epoch: Cell,
    pub start_iso8601: String,
    pub end_iso8601: String,
}

/// Joins every raw trip against the directory, in order. Pure over its
/// inputs: the same trips and stations always produce the same rows.
pub fn hydrate(
    account_id: &str,
    observed: i64,
    trips: &[RawTrip],
    stations: &StationSet,
) -> Vec<FullTrip> {
    tracing::info!(trips = trips.len(), "hydrating trip data");
    trips
        .iter()
        .map(|trip| hydrate_one(account_id, observed, trip, stations))
        .collect()
}

struct SideJoin {
    id: String,
    terminal: String,
    lon: f64,
    lat: f64,
    epoch: i64,
    iso: String,
    dollars: f64,
    seconds: i64,
}

/// One side's all-or-nothing block, in the original evaluation order:
/// station lookup, fee, duration, timestamp, coordinates.
fn join_side(
    name: &str,
    time_text: &str,
    billed: &str,
    duration: &str,
    stations: &StationSet,
) -> Option<SideJoin> {
    let station = stations.by_name(name)?;
    let dollars = dollars_to_float(billed)?;
    let seconds = str_to_secs(duration)?;
    let (epoch, iso) = eastern_timestamp(time_text)?;
    let [lon, lat] = station.geometry.coordinates;
    Some(SideJoin {
        id: station.properties.station_id.clone(),
        terminal: station.properties.terminal.clone(),
        lon,
        lat,
        epoch,
        iso,
        dollars,
        seconds,
    })
}

fn hydrate_one(
    account_id: &str,
    observed: i64,
    trip: &RawTrip,
    stations: &StationSet,
) -> FullTrip {
    // Start stations go missing when docks are retired from the feed. The
    // placeholder covers the station columns only; the epoch/iso pair comes
    // from the trip's own time text and is still computed.
    let start = join_side(
        &trip.start_name,
        &trip.start_time,
        &trip.billed,
        &trip.duration,
        stations,
    );
    let (start_id, start_terminal, start_lon, start_lat, start_epoch, start_iso8601) = match start {
        Some(s) => (
            s.id,
            s.terminal,
            Cell::Float(s.lon),
            Cell::Float(s.lat),
            Cell::Int(s.epoch),
            s.iso,
        ),
        None => {
            tracing::debug!(station = %trip.start_name, "start station not resolved");
            let (epoch, iso) = match eastern_timestamp(&trip.start_time) {
                Some((epoch, iso)) => (Cell::Int(epoch), iso),
                None => (Cell::dash(), DASH.to_string()),
            };
            (
                DASH.to_string(),
                DASH.to_string(),
                Cell::dash(),
                Cell::dash(),
                epoch,
                iso,
            )
        }
    };

    // End stations go missing on trips that never closed properly. This
    // side's fallback keeps nothing, and its block recomputes the shared
    // dollars/seconds pair, so the emitted pair reflects this side alone.
    let end = join_side(
        &trip.end_name,
        &trip.end_time,
        &trip.billed,
        &trip.duration,
        stations,
    );
    let (end_id, end_terminal, end_lon, end_lat, end_epoch, end_iso8601, dollars, seconds) =
        match end {
            Some(e) => (
                e.id,
                e.terminal,
                Cell::Float(e.lon),
                Cell::Float(e.lat),
                Cell::Int(e.epoch),
                e.iso,
                e.dollars,
                e.seconds,
            ),
            None => {
                tracing::debug!(station = %trip.end_name, "end station not resolved");
                (
                    DASH.to_string(),
                    DASH.to_string(),
                    Cell::dash(),
                    Cell::dash(),
                    Cell::dash(),
                    DASH.to_string(),
                    0.0,
                    0,
                )
            }
        };

    FullTrip {
        account_id: account_id.to_string(),
        observed,
        start_name: trip.start_name.clone(),
        end_name: trip.end_name.clone(),
        start_time: trip.start_time.clone(),
        end_time: trip.end_time.clone(),
        start_points: trip.start_points,
        end_points: trip.end_points,
        points: trip.points,
        billed: trip.billed.clone(),
        duration: trip.duration.clone(),
        start_id,
        end_id,
        start_terminal,
        end_terminal,
        start_lon,
        start_lat,
        end_lon,
        end_lat,
        dollars,
        seconds,
        start_epoch,
        end_epoch,
        start_iso8601,
        end_iso8601,
    }
}

/// `"<m> <unit> <s> <unit>"` to whole seconds. The text must split into
/// exactly four space-separated tokens; longer renderings (hours) are not
/// supported and fall through to the caller's default.
pub fn str_to_secs(text: &str) -> Option<i64> {
    let parts: Vec<&str> = text.split(' ').collect();
    if parts.len() != 4 {
        return None;
    }
    let minutes: i64 = parts[0].parse().ok()?;
    let seconds: i64 = parts[2].parse().ok()?;
    Some(minutes * 60 + seconds)
}

/// US currency text to float by skipping a fixed two-character prefix and
/// parsing the remainder. Exactly two characters, not a currency-aware
/// scan: `"$ 0.00"` parses as 0.0, `"$2.50"` as 0.5.
pub fn dollars_to_float(text: &str) -> Option<f64> {
    let rest: String = text.chars().skip(2).collect();
    rest.trim().parse().ok()
}

/// Parses a portal time text as US/Eastern wall clock and returns the unix
/// epoch with the RFC 3339 rendering. Ambiguous fall-back times map to the
/// earlier instant.
fn eastern_timestamp(text: &str) -> Option<(i64, String)> {
    let naive = NaiveDateTime::parse_from_str(text, TIME_FORMAT).ok()?;
    let localized = naive.and_local_timezone(Eastern).earliest()?;
    Some((localized.timestamp(), localized.to_rfc3339()))
}
