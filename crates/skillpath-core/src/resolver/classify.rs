//! URL categorization rules.
//!
//! Classification is a fixed, ordered table of substring patterns so it can
//! be audited and tested without any search call. Patterns are matched
//! against the lowercased URL.

use crate::model::ResourceKind;

/// Coarse class of a URL, as judged by its text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlClass {
    /// A video page.
    Video,
    /// Official or reference documentation.
    Documentation,
    /// A site or path known to host articles and blog posts.
    ArticleSource,
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct UrlRule {
    pub pattern: &'static str,
    pub class: UrlClass,
}

const fn rule(pattern: &'static str, class: UrlClass) -> UrlRule {
    UrlRule { pattern, class }
}

/// The rule table, highest priority first.
pub const URL_RULES: &[UrlRule] = &[
    rule("youtube.com", UrlClass::Video),
    rule("docs.", UrlClass::Documentation),
    rule("documentation", UrlClass::Documentation),
    rule("official", UrlClass::Documentation),
    rule("medium.com", UrlClass::ArticleSource),
    rule("dev.to", UrlClass::ArticleSource),
    rule("towardsdatascience.com", UrlClass::ArticleSource),
    rule("blog", UrlClass::ArticleSource),
    rule("article", UrlClass::ArticleSource),
];

/// Class of the first rule matching `url`, if any.
pub fn classify_url(url: &str) -> Option<UrlClass> {
    let url = url.to_ascii_lowercase();
    URL_RULES
        .iter()
        .find(|r| url.contains(r.pattern))
        .map(|r| r.class)
}

/// Whether any rule of `class` matches `url`, regardless of priority.
pub fn has_class(url: &str, class: UrlClass) -> bool {
    let url = url.to_ascii_lowercase();
    URL_RULES
        .iter()
        .any(|r| r.class == class && url.contains(r.pattern))
}

pub fn is_video(url: &str) -> bool {
    has_class(url, UrlClass::Video)
}

/// Kind for a hit from the documentation query: videos stay videos,
/// documentation markers win next, anything else is a generic resource.
pub fn documentation_kind(url: &str) -> ResourceKind {
    match classify_url(url) {
        Some(UrlClass::Video) => ResourceKind::YouTube,
        Some(UrlClass::Documentation) => ResourceKind::Documentation,
        Some(UrlClass::ArticleSource) | None => ResourceKind::Resource,
    }
}
