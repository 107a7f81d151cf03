use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::parsers::ResourceRef;
use crate::resources::{ResourceRule, ResourceRules, resolve_reference};

/// Parses HTML text into a document tree.
///
/// Parsing is lenient: malformed input still yields a best-effort tree
/// rather than an error.
pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extracts the page title, if the document has a non-empty one
pub fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").unwrap();

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Visits every element attribute matching the detection rules.
///
/// Both reference discovery and attribute rewriting go through this single
/// walk, so an attribute is rewritten if and only if it was discovered, and
/// both see matches in the same order: rule by rule, document order within
/// each rule. Attributes that fail a rule's `rel` or path condition, or do
/// not resolve to an absolute http(s) URL, are never visited.
pub fn visit_references<F>(document: &Html, rules: &ResourceRules, base: &Url, mut visit: F)
where
    F: FnMut(ElementRef<'_>, &ResourceRule, Url),
{
    for rule in rules.rules() {
        let selector = Selector::parse(rule.tag).unwrap();

        for element in document.select(&selector) {
            if !rule.rel_matches(element.value().attr("rel")) {
                continue;
            }

            let Some(raw) = element.value().attr(rule.attribute) else {
                continue;
            };

            let Some(resolved) = resolve_reference(base, raw) else {
                ::log::debug!("Skipping unresolvable reference: {}", raw);
                continue;
            };

            if !rule.path_matches(resolved.path()) {
                continue;
            }

            visit(element, rule, resolved);
        }
    }
}

/// Walks the document and collects every resource reference matching the
/// detection rules, in visit order.
pub fn discover_references(
    document: &Html,
    rules: &ResourceRules,
    base: &Url,
) -> Vec<ResourceRef> {
    let mut references = Vec::new();

    visit_references(document, rules, base, |element, rule, resolved| {
        references.push(ResourceRef {
            kind: rule.kind,
            tag: rule.tag,
            attribute: rule.attribute,
            raw: element
                .value()
                .attr(rule.attribute)
                .unwrap_or_default()
                .to_string(),
            resolved,
        });
    });

    ::log::debug!("Discovered {} resource references", references.len());
    if !references.is_empty() {
        ::log::debug!(
            "First few references: {:?}",
            references
                .iter()
                .take(5)
                .map(|r| r.resolved.as_str())
                .collect::<Vec<_>>()
        );
    }

    references
}
