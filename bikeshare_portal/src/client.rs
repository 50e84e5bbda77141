//! HTTP client for the member portal: session cookies, CSRF login, and the
//! sequential profile/trip-page fetches.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::REFERER;
use reqwest::redirect::Policy;
use url::Url;

use crate::extract;
use crate::types::RawTrip;
use crate::Error;

/// Connection settings for a portal session.
pub struct ClientConfig {
    /// Member portal base URL, without a trailing slash.
    pub member_url: String,
    /// Sent on every request. The portal is indifferent to it.
    pub user_agent: String,
    /// Fixed per-request timeout. There are no retries.
    pub timeout: Duration,
    /// Pre-authenticated session cookies, one `name=value` string per
    /// entry. When non-empty, `login` skips the credential POST.
    pub cookies: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            member_url: "https://member.citibikenyc.com".to_string(),
            user_agent: "curl".to_string(),
            timeout: Duration::from_secs(60),
            cookies: Vec::new(),
        }
    }
}

/// Portal client holding the run's cookie session.
///
/// All requests go through one shared cookie jar; the login POST uses a
/// separate no-redirect client on the same jar so the 303-vs-200 outcome
/// stays observable.
pub struct Client {
    member_url: String,
    http: reqwest::Client,
    post: reqwest::Client,
    preauthenticated: bool,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let member_url = config.member_url.trim_end_matches('/').to_string();
        let jar = Arc::new(Jar::default());

        let preauthenticated = !config.cookies.is_empty();
        if preauthenticated {
            let base: Url = member_url.parse()?;
            for cookie in &config.cookies {
                jar.add_cookie_str(cookie, &base);
            }
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .cookie_provider(jar.clone())
            .build()?;
        let post = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .cookie_provider(jar)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            member_url,
            http,
            post,
            preauthenticated,
        })
    }

    pub fn member_url(&self) -> &str {
        &self.member_url
    }

    pub fn profile_url(&self) -> String {
        format!("{}/profile/", self.member_url)
    }

    fn login_url(&self) -> String {
        format!("{}/profile/login", self.member_url)
    }

    fn login_check_url(&self) -> String {
        format!("{}/profile/login_check", self.member_url)
    }

    fn page_url(trips_url: &str, page: i64) -> String {
        format!("{}?pageNumber={}", trips_url, page)
    }

    /// Authenticates the session.
    ///
    /// Always fetches the login page once to pull the CSRF token out of its
    /// hidden input; a missing token is fatal. A client seeded with cookies
    /// is already authenticated and returns without POSTing. Otherwise the
    /// credential POST, with redirects disabled, classifies as: 200 ok,
    /// 303 [`Error::LoginRejected`], anything else [`Error::LoginFailed`].
    pub async fn login(&self, username: &str, password: &str) -> Result<(), Error> {
        let login_url = self.login_url();
        tracing::info!("login");
        let body = self.http.get(&login_url).send().await?.text().await?;
        let csrf =
            extract::csrf_token(&body).ok_or(Error::Extraction("login CSRF token input"))?;
        tracing::debug!("found login CSRF token");

        if self.preauthenticated {
            return Ok(());
        }

        let form = [
            ("_username", username),
            ("_password", password),
            ("_login_csrf_security_token", csrf.as_str()),
        ];
        let resp = self
            .post
            .post(self.login_check_url())
            .form(&form)
            .header(REFERER, &login_url)
            .send()
            .await?;

        match resp.status().as_u16() {
            200 => Ok(()),
            303 => {
                tracing::warn!("login POST returned 303, probably a challenge");
                Err(Error::LoginRejected)
            }
            status => {
                tracing::warn!(status, "login POST failed");
                Err(Error::LoginFailed { status })
            }
        }
    }

    /// Fetches the rendered profile page for the authenticated member.
    pub async fn profile_html(&self) -> Result<String, Error> {
        let url = self.profile_url();
        let resp = self.http.get(&url).header(REFERER, &url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "profile fetch failed");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        Ok(body)
    }

    /// Reads the total page count from the pagination control on page 1.
    ///
    /// Discovered once per run; callers bounding the run to the most recent
    /// page skip this entirely.
    pub async fn discover_page_count(&self, trips_url: &str) -> Result<i64, Error> {
        let html = self
            .fetch_trip_page(trips_url, 1, &self.profile_url())
            .await?;
        let last = extract::trips::last_page_number(&html)
            .ok_or(Error::Extraction("last page navigation link"))?;
        tracing::info!(pages = last, "discovered trip page count");
        Ok(last)
    }

    /// Fetches pages `from..=to` strictly in order, one request in flight,
    /// accumulating rows in page order. Each request carries the previous
    /// page's URL as referer (page 1 carries the profile URL). Any non-2xx
    /// aborts the remaining pages with [`Error::PageFetch`].
    pub async fn fetch_trip_pages(
        &self,
        trips_url: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<RawTrip>, Error> {
        let mut referer = if from <= 1 {
            self.profile_url()
        } else {
            Self::page_url(trips_url, from - 1)
        };

        let mut trips = Vec::new();
        for page in from..=to {
            tracing::info!(page, "get trips page");
            let html = self.fetch_trip_page(trips_url, page, &referer).await?;
            trips.extend(extract::trips::extract_trip_data(&html));
            referer = Self::page_url(trips_url, page);
        }
        tracing::info!(total = trips.len(), "collected trips");
        Ok(trips)
    }

    async fn fetch_trip_page(
        &self,
        trips_url: &str,
        page: i64,
        referer: &str,
    ) -> Result<String, Error> {
        let url = Self::page_url(trips_url, page);
        tracing::debug!(%url, "GET trips page");
        let resp = self.http.get(&url).header(REFERER, referer).send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(page, status = status.as_u16(), "trip page fetch failed");
            return Err(Error::PageFetch {
                page,
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...[truncated]", &body[..cut])
    }
}
