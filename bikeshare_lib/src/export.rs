//! Run orchestration: one linear pass from login to archived artifacts.
//!
//! Network calls form a strict serial chain — login, profile, N trip
//! pages, station feed — with nothing in flight concurrently. Artifacts
//! are written only after every stage succeeded; a failed run persists
//! nothing.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

use bikeshare_portal::types::{Account, RawTrip};
use bikeshare_portal::{extract_profile, trips_link, Client, ClientConfig};

use crate::archive::Archive;
use crate::hydrate::{hydrate, FullTrip};
use crate::stations::StationSet;
use crate::ExportError;

/// Everything a run needs: credentials, endpoints, and the run flags.
pub struct ExportConfig {
    pub username: String,
    pub password: String,
    pub member_url: String,
    pub stations_url: String,
    pub user_agent: String,
    pub http_timeout: Duration,
    /// Pre-authenticated cookies, one `name=value` string per entry.
    pub cookies: Vec<String>,
    /// Extract bike-angels statistics and hydrate trips.
    pub extended: bool,
    /// Bound the run to the most recent trips page and skip page-count
    /// discovery.
    pub recent_only: bool,
    /// Load stations from this file instead of the live feed.
    pub stations_file: Option<PathBuf>,
    /// Write `cb_*` artifacts into this directory after a successful run.
    pub keep: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            member_url: "https://member.citibikenyc.com".to_string(),
            stations_url: "https://layer.bicyclesharing.net/map/v1/nyc/stations".to_string(),
            user_agent: "curl".to_string(),
            http_timeout: Duration::from_secs(60),
            cookies: Vec::new(),
            extended: false,
            recent_only: false,
            stations_file: None,
            keep: None,
        }
    }
}

/// The in-memory result of a successful run.
#[derive(Debug)]
pub struct Export {
    /// Capture timestamp the artifacts are keyed by.
    pub ts: i64,
    pub account: Account,
    pub trips: Vec<RawTrip>,
    pub stations: StationSet,
    /// Hydrated rows, present on extended runs.
    pub trips_full: Option<Vec<FullTrip>>,
}

/// Drives the portal client through a run.
pub struct Exporter {
    config: ExportConfig,
    client: Client,
    ts: i64,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Result<Self, ExportError> {
        let client = Client::new(ClientConfig {
            member_url: config.member_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.http_timeout,
            cookies: config.cookies.clone(),
        })?;
        Ok(Self {
            config,
            client,
            ts: Utc::now().timestamp(),
        })
    }

    /// The run's capture timestamp, fixed at construction.
    pub fn ts(&self) -> i64 {
        self.ts
    }

    /// Full export: account, every trip page (or just page 1 on bounded
    /// runs), the station directory, and — on extended runs — the
    /// hydrated rows.
    pub async fn export_trips(&self) -> Result<Export, ExportError> {
        self.client
            .login(&self.config.username, &self.config.password)
            .await?;

        let profile_html = self.client.profile_html().await?;
        let mut account = extract_profile(&profile_html, self.config.extended, self.ts);

        let link = trips_link(&profile_html)
            .ok_or(bikeshare_portal::Error::Extraction("trips menu link"))?;
        tracing::info!(path = %link.path, "trips link");
        account.id.push(link.account_id.clone());
        let trips_url = format!("{}{}", self.client.member_url(), link.path);

        let last_page = if self.config.recent_only {
            1
        } else {
            self.client.discover_page_count(&trips_url).await?
        };
        let trips = self.client.fetch_trip_pages(&trips_url, 1, last_page).await?;

        let stations = self.load_stations().await?;

        let trips_full = self
            .config
            .extended
            .then(|| hydrate(&link.account_id, self.ts, &trips, &stations));

        let export = Export {
            ts: self.ts,
            account,
            trips,
            stations,
            trips_full,
        };

        if let Some(dir) = &self.config.keep {
            Archive::new(dir.clone()).save(&export)?;
        }
        Ok(export)
    }

    /// Account-only run: login and profile extraction, no pagination.
    pub async fn export_account(&self) -> Result<Account, ExportError> {
        self.client
            .login(&self.config.username, &self.config.password)
            .await?;

        let profile_html = self.client.profile_html().await?;
        let account = extract_profile(&profile_html, self.config.extended, self.ts);

        if let Some(dir) = &self.config.keep {
            Archive::new(dir.clone()).save_account(&account, self.ts)?;
        }
        Ok(account)
    }

    /// Station-directory fetch, no login round trip.
    pub async fn export_stations(&self) -> Result<StationSet, ExportError> {
        let stations = self.load_stations().await?;
        if let Some(dir) = &self.config.keep {
            Archive::new(dir.clone()).save_stations(&stations, self.ts)?;
        }
        Ok(stations)
    }

    async fn load_stations(&self) -> Result<StationSet, ExportError> {
        match &self.config.stations_file {
            Some(path) => StationSet::from_file(path),
            None => {
                StationSet::fetch(
                    &self.config.stations_url,
                    &self.config.user_agent,
                    self.config.http_timeout,
                )
                .await
            }
        }
    }
}
