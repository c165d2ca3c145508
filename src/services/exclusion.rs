//! Search exclusion rules from preferences.
//!
//! Applied to open tabs, bookmarks and history before their results are
//! capped. Favorites, search engines and built-in pages are never excluded.

use crate::preferences::SearchExclusion;
use crate::text::normalize;
use crate::website::Website;

/// Compiled exclusion rules. The default excludes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExclusionFilter {
    domains: Vec<String>,
    keywords: Vec<String>,
    bookmark_folders: Vec<String>,
}

impl ExclusionFilter {
    pub fn from_preferences(exclusion: &SearchExclusion) -> Self {
        if !exclusion.enable {
            return Self::default();
        }

        Self {
            domains: clean(&exclusion.by_domains, |d| d.trim().to_lowercase()),
            keywords: clean(&exclusion.by_keywords, normalize),
            bookmark_folders: clean(&exclusion.by_bookmark_folders, |f| f.trim().to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.keywords.is_empty() && self.bookmark_folders.is_empty()
    }

    /// Whether `website` is hidden by a domain or keyword rule.
    ///
    /// A domain rule covers the domain itself and all of its subdomains.
    pub fn excludes(&self, website: &Website) -> bool {
        if self.is_empty() {
            return false;
        }

        let host = website.domain().to_lowercase();
        let by_domain = !host.is_empty()
            && self.domains.iter().any(|domain| {
                host == *domain || host.ends_with(&format!(".{}", domain))
            });
        if by_domain {
            return true;
        }

        if self.keywords.is_empty() {
            return false;
        }
        let title = normalize(&website.title);
        let url = normalize(&website.url);
        self.keywords
            .iter()
            .any(|keyword| title.contains(keyword.as_str()) || url.contains(keyword.as_str()))
    }

    /// Whether a bookmark folder (and everything below it) is hidden.
    pub fn excludes_folder(&self, title: &str) -> bool {
        let title = title.trim();
        self.bookmark_folders.iter().any(|folder| folder == title)
    }
}

fn clean(values: &[String], map: impl Fn(&str) -> String) -> Vec<String> {
    values
        .iter()
        .map(|v| map(v))
        .filter(|v| !v.is_empty())
        .collect()
}
