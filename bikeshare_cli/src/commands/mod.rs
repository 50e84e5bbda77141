pub mod account;
pub mod stations;
pub mod trips;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bikeshare_lib::ExportConfig;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Builds the run config from the environment plus the shared flags.
///
/// Credentials come from `BIKESHARE_USERNAME`/`BIKESHARE_PASSWORD`; a
/// cookie file stands in for them on pre-authenticated runs.
pub fn export_config(
    cookies_file: Option<&PathBuf>,
    keep: Option<&PathBuf>,
    need_credentials: bool,
) -> Result<ExportConfig> {
    let username = std::env::var("BIKESHARE_USERNAME").unwrap_or_default();
    let password = std::env::var("BIKESHARE_PASSWORD").unwrap_or_default();
    let cookies = match cookies_file {
        Some(path) => load_cookies(path)?,
        None => Vec::new(),
    };
    if need_credentials && cookies.is_empty() && (username.is_empty() || password.is_empty()) {
        bail!("set BIKESHARE_USERNAME and BIKESHARE_PASSWORD, or pass --cookies");
    }

    let timeout = std::env::var("BIKESHARE_HTTP_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60);

    Ok(ExportConfig {
        username,
        password,
        member_url: env_or("BIKESHARE_MEMBER_URL", "https://member.citibikenyc.com"),
        stations_url: env_or(
            "BIKESHARE_STATIONS_URL",
            "https://layer.bicyclesharing.net/map/v1/nyc/stations",
        ),
        user_agent: env_or("BIKESHARE_USER_AGENT", "curl"),
        http_timeout: Duration::from_secs(timeout),
        cookies,
        keep: keep.cloned(),
        ..ExportConfig::default()
    })
}

/// One `name=value` cookie string per line; blank lines and `#` comments
/// are skipped.
fn load_cookies(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading cookie file {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
