//! Error types for the portal client.

/// Errors that can occur while talking to the member portal.
///
/// Field-level extraction failures on the profile and trip pages never
/// surface here; those degrade to `None`/defaults at the call site. Only
/// authentication failures, mid-pagination fetch failures, and the few
/// markup lookups the run cannot proceed without are run-level errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed outright (network error or timeout).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The configured member base URL is not a valid URL.
    #[error("invalid member base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    /// A page request returned a non-success status outside the login and
    /// trip-page flows, which have their own classifications below.
    #[error("request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The login POST returned 303, which the portal serves for
    /// bot-challenge interstitials rather than bad credentials.
    #[error("login rejected with 303, likely a challenge interstitial")]
    LoginRejected,
    /// The login POST returned a status other than 200 or 303.
    #[error("login failed with status {status}")]
    LoginFailed { status: u16 },
    /// A markup node the run depends on was absent from the page.
    #[error("expected markup missing: {0}")]
    Extraction(&'static str),
    /// A trip page returned a non-success status; the remaining pages are
    /// not fetched.
    #[error("trip page {page} fetch failed with status {status}")]
    PageFetch { page: i64, status: u16 },
}
