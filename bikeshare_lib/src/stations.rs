//! Station directory: the public station-location feed and its lookups.
//!
//! The feed is a GeoJSON-shaped `FeatureCollection`. Only the join keys are
//! typed; everything else rides along in flattened maps so a fetched feed
//! written to disk reloads structurally identical.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ExportError;

/// The full station feed, immutable for the duration of a run.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StationSet {
    pub features: Vec<Station>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One dock location with its stable identifiers and coordinates.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Station {
    pub properties: StationProperties,
    pub geometry: Geometry,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StationProperties {
    pub name: String,
    pub station_id: String,
    pub terminal: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GeoJSON point geometry, `[lon, lat]`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub coordinates: [f64; 2],
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StationSet {
    /// Fetches the live feed.
    pub async fn fetch(
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, ExportError> {
        tracing::debug!(%url, "getting stations feed");
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        let resp = client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "station feed fetch failed");
            return Err(ExportError::StationFeed {
                status: status.as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    /// Loads a previously saved feed.
    pub fn from_file(path: &Path) -> Result<Self, ExportError> {
        tracing::debug!(path = %path.display(), "loading stations from file");
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// First station whose name matches exactly. The primary join key for
    /// enrichment; station counts are in the low thousands, so these stay
    /// linear scans.
    pub fn by_name(&self, name: &str) -> Option<&Station> {
        self.features.iter().find(|s| s.properties.name == name)
    }

    pub fn by_id(&self, id: &str) -> Option<&Station> {
        self.features.iter().find(|s| s.properties.station_id == id)
    }

    pub fn by_coordinates(&self, coordinates: [f64; 2]) -> Option<&Station> {
        self.features
            .iter()
            .find(|s| s.geometry.coordinates == coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": {
            "name": "10 Ave & W 28 St",
            "station_id": "66db2ed8-0aca-11e7-82f6-3863bb44ef7c",
            "terminal": "6432.09",
            "bikesAvailable": 7
          },
          "geometry": { "type": "Point", "coordinates": [-74.00283, 40.75047] }
        },
        {
          "type": "Feature",
          "properties": {
            "name": "W 52 St & 11 Ave",
            "station_id": "66db237e-0aca-11e7-82f6-3863bb44ef7c",
            "terminal": "6926.01"
          },
          "geometry": { "type": "Point", "coordinates": [-73.99393, 40.76727] }
        },
        {
          "type": "Feature",
          "properties": {
            "name": "W 52 St & 11 Ave",
            "station_id": "duplicate-entry",
            "terminal": "0000.00"
          },
          "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
        }
      ]
    }"#;

    #[test]
    fn by_name_finds_unique_station() {
        let stations = StationSet::from_json(FEED).unwrap();
        let found = stations.by_name("10 Ave & W 28 St").unwrap();
        assert_eq!(found.properties.terminal, "6432.09");
        assert_eq!(found.geometry.coordinates, [-74.00283, 40.75047]);
    }

    #[test]
    fn by_name_missing_is_none() {
        let stations = StationSet::from_json(FEED).unwrap();
        assert!(stations.by_name("Nowhere & Nothing").is_none());
    }

    #[test]
    fn duplicate_names_first_occurrence_wins() {
        let stations = StationSet::from_json(FEED).unwrap();
        let found = stations.by_name("W 52 St & 11 Ave").unwrap();
        assert_eq!(found.properties.terminal, "6926.01");
    }

    #[test]
    fn by_id_and_by_coordinates() {
        let stations = StationSet::from_json(FEED).unwrap();
        assert_eq!(
            stations
                .by_id("66db237e-0aca-11e7-82f6-3863bb44ef7c")
                .unwrap()
                .properties
                .name,
            "W 52 St & 11 Ave"
        );
        assert_eq!(
            stations
                .by_coordinates([-74.00283, 40.75047])
                .unwrap()
                .properties
                .name,
            "10 Ave & W 28 St"
        );
        assert!(stations.by_id("absent").is_none());
        assert!(stations.by_coordinates([1.0, 2.0]).is_none());
    }

    #[test]
    fn feed_round_trips_through_json_with_extras() {
        let stations = StationSet::from_json(FEED).unwrap();
        let json = serde_json::to_string(&stations).unwrap();
        let reloaded = StationSet::from_json(&json).unwrap();
        assert_eq!(stations, reloaded);

        // unknown keys survive
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["properties"]["bikesAvailable"], 7);
        assert_eq!(value["features"][0]["geometry"]["type"], "Point");
    }
}
