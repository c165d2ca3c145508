//! Websites and the predicate that decides whether one matches a query.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::text::normalize;

/// URL prefixes that can ever match a query.
const MATCHABLE_SCHEMES: [&str; 3] = ["http://", "https://", "file:///"];

/// Favicon lookup service. Takes the page origin as `domain_url`.
const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const FAVICON_SIZE: u32 = 32;

/// Used when the page URL cannot be parsed.
const FALLBACK_PROTOCOL: &str = "https:";
const FALLBACK_DOMAIN: &str = "example.com";

/// A leading unread counter such as "(3) " or "(99+) ".
static NOTIFICATION_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d+\+?\)\s*").expect("valid notification count pattern"));

/// A page identified by its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub title: String,
    pub url: String,
}

impl Website {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Whether the URL uses a scheme that search results may point at.
    ///
    /// Only `http://`, `https://` and `file:///` qualify; `chrome://` and
    /// every other scheme never match.
    pub fn has_matchable_scheme(&self) -> bool {
        MATCHABLE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }

    /// Check the website against a set of normalized keywords.
    ///
    /// Every keyword must be found in the normalized title or the normalized
    /// URL (not necessarily the same field for each keyword), and the URL
    /// scheme must be matchable.
    pub fn matches(&self, keywords: &[String]) -> bool {
        self.has_matchable_scheme() && self.matches_keywords(keywords)
    }

    /// Keyword half of [`Website::matches`], without the scheme filter.
    pub fn matches_keywords(&self, keywords: &[String]) -> bool {
        let title = normalize(&self.title);
        let url = normalize(&self.url);

        keywords
            .iter()
            .all(|keyword| title.contains(keyword.as_str()) || url.contains(keyword.as_str()))
    }

    /// Host part of the URL, or an empty string when it has none.
    pub fn domain(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Favicon URL for this website.
    pub fn favicon_url(&self) -> String {
        favicon_url(&self.url)
    }

    /// Drop a leading notification counter from the title.
    pub fn without_notification_count(mut self) -> Self {
        self.title = remove_notification_count_from_title(&self.title);
        self
    }
}

/// Strip a leading unread counter like "(12) " from a page title.
pub fn remove_notification_count_from_title(title: &str) -> String {
    NOTIFICATION_COUNT.replace(title, "").into_owned()
}

/// Build the favicon lookup URL for a page.
///
/// Unparseable page URLs fall back to a fixed protocol and domain instead of
/// failing.
pub fn favicon_url(page_url: &str) -> String {
    let origin = match Url::parse(page_url) {
        Ok(url) => match url.host_str() {
            Some(host) => format!("{}://{}", url.scheme(), host),
            None => fallback_origin(),
        },
        Err(e) => {
            tracing::debug!(url = page_url, error = %e, "favicon lookup for unparseable url");
            fallback_origin()
        }
    };

    format!(
        "{}?sz={}&domain_url={}",
        FAVICON_SERVICE,
        FAVICON_SIZE,
        urlencoding::encode(&origin)
    )
}

fn fallback_origin() -> String {
    format!("{}//{}", FALLBACK_PROTOCOL, FALLBACK_DOMAIN)
}
