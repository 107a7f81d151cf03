use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Kinds of resources a page can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Image files (`img src`)
    Image,
    /// Audio files (`audio src`)
    Audio,
    /// Linked PDF documents (`a href`)
    Pdf,
    /// Linked plain-text documents (`a href`)
    Text,
    /// Scripts (`script src`)
    Script,
    /// Stylesheets (`link rel="stylesheet" href`)
    Stylesheet,
}

impl ResourceKind {
    /// Subdirectory of the snapshot that holds resources of this kind
    pub fn subdir(&self) -> &'static str {
        match self {
            ResourceKind::Image => "images",
            ResourceKind::Audio => "audio",
            ResourceKind::Pdf => "pdfs",
            ResourceKind::Text => "text",
            ResourceKind::Script => "js",
            ResourceKind::Stylesheet => "css",
        }
    }
}

/// A single detection rule: which tag and attribute carry references of a
/// given kind, with optional conditions on the `rel` attribute and on the
/// resolved URL path.
#[derive(Debug)]
pub struct ResourceRule {
    /// Element tag name the rule applies to
    pub tag: &'static str,
    /// Attribute holding the reference
    pub attribute: &'static str,
    /// Kind assigned to matching references
    pub kind: ResourceKind,
    required_rel: Option<&'static str>,
    path_pattern: Option<Regex>,
}

impl ResourceRule {
    fn new(tag: &'static str, attribute: &'static str, kind: ResourceKind) -> Self {
        Self {
            tag,
            attribute,
            kind,
            required_rel: None,
            path_pattern: None,
        }
    }

    fn with_rel(mut self, rel: &'static str) -> Self {
        self.required_rel = Some(rel);
        self
    }

    fn with_path_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.path_pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Check the `rel` condition against an element's `rel` attribute.
    ///
    /// The attribute is a space-separated list, so `rel="preload stylesheet"`
    /// still matches.
    pub fn rel_matches(&self, rel: Option<&str>) -> bool {
        match self.required_rel {
            None => true,
            Some(required) => rel.is_some_and(|value| {
                value
                    .split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case(required))
            }),
        }
    }

    /// Check the path condition against a resolved URL path
    pub fn path_matches(&self, path: &str) -> bool {
        match &self.path_pattern {
            None => true,
            Some(pattern) => pattern.is_match(path),
        }
    }
}

/// The enumerated mapping of tag+attribute to resource kind.
///
/// Keeping the rules as one auditable table makes it obvious which parts of
/// a page are downloaded and where they end up.
#[derive(Debug)]
pub struct ResourceRules {
    rules: Vec<ResourceRule>,
}

impl Default for ResourceRules {
    fn default() -> Self {
        Self::new().expect("Default rule patterns should be valid")
    }
}

impl ResourceRules {
    /// Build the default rule table
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            rules: vec![
                ResourceRule::new("img", "src", ResourceKind::Image),
                ResourceRule::new("audio", "src", ResourceKind::Audio),
                ResourceRule::new("a", "href", ResourceKind::Pdf)
                    .with_path_pattern(r"(?i)\.pdf$")?,
                ResourceRule::new("a", "href", ResourceKind::Text)
                    .with_path_pattern(r"(?i)\.txt$")?,
                ResourceRule::new("script", "src", ResourceKind::Script),
                ResourceRule::new("link", "href", ResourceKind::Stylesheet)
                    .with_rel("stylesheet"),
            ],
        })
    }

    /// All rules, in the order they are applied
    pub fn rules(&self) -> &[ResourceRule] {
        &self.rules
    }
}

/// Resolve a raw reference against the page's base URL.
///
/// Returns `None` when the result is not an absolute http(s) URL with a
/// host, e.g. for `data:`, `mailto:` or `javascript:` references.
pub fn resolve_reference(base: &Url, raw: &str) -> Option<Url> {
    let resolved = base.join(raw).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    resolved.host_str()?;
    Some(resolved)
}
