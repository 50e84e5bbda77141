//! Per-page extraction: each page kind gets a module of field extractors
//! that turn rendered portal markup into the typed model.

pub mod profile;
pub mod trips;

use scraper::{Html, Selector};

/// Pulls the one-time login token out of the login form's hidden input.
///
/// This is the only markup lookup the login flow cannot recover from, so
/// the caller treats `None` as fatal.
pub fn csrf_token(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse(r#"input[name="_login_csrf_security_token"]"#).ok()?;
    doc.select(&sel)
        .next()?
        .value()
        .attr("value")
        .map(str::to_string)
}
