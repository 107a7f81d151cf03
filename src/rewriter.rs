use scraper::{Html, Node};
use url::Url;

use crate::parsers::html;
use crate::resources::ResourceRules;

/// Rewrites resource references in place and returns the serialized page.
///
/// `replacements` is aligned with the references returned by
/// `discover_references` for the same document: the i-th visited reference
/// gets the i-th replacement — a local relative path for saved resources,
/// or the resolved absolute URL for downloads that failed or were skipped.
/// Edits are applied per node, so an attribute no detection rule matched is
/// never touched, even when its value coincides with a rewritten reference.
pub fn rewrite_references(
    document: &mut Html,
    rules: &ResourceRules,
    base: &Url,
    replacements: &[String],
) -> String {
    // First pass: re-run the shared reference walk to pair each visited
    // node with its replacement while the tree is borrowed immutably
    let mut edits = Vec::new();
    let mut index = 0;

    html::visit_references(document, rules, base, |element, rule, _resolved| {
        if let Some(replacement) = replacements.get(index) {
            edits.push((element.id(), rule.attribute, replacement.clone()));
        }
        index += 1;
    });

    let edit_count = edits.len();

    // Second pass: apply the edits through mutable tree access
    for (id, attribute, replacement) in edits {
        if let Some(mut node) = document.tree.get_mut(id) {
            if let Node::Element(element) = node.value() {
                for (name, value) in element.attrs.iter_mut() {
                    if &*name.local == attribute {
                        *value = replacement.as_str().into();
                    }
                }
            }
        }
    }

    ::log::debug!("Rewrote {} attribute values", edit_count);

    document.html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html;

    /// Runs discovery and rewrite the way the pipeline does, mapping each
    /// discovered reference to a replacement by its raw value; references
    /// without an entry degrade to their resolved absolute URL.
    fn rewrite(page: &str, base: &str, by_raw: &[(&str, &str)]) -> String {
        let mut document = html::parse(page);
        let rules = ResourceRules::default();
        let base = Url::parse(base).unwrap();

        let references = html::discover_references(&document, &rules, &base);
        let replacements: Vec<String> = references
            .iter()
            .map(|reference| {
                by_raw
                    .iter()
                    .find(|(raw, _)| *raw == reference.raw)
                    .map(|(_, to)| to.to_string())
                    .unwrap_or_else(|| reference.resolved.to_string())
            })
            .collect();

        rewrite_references(&mut document, &rules, &base, &replacements)
    }

    #[test]
    fn test_rewrites_image_source() {
        let output = rewrite(
            r#"<html><body><img src="photo.png"></body></html>"#,
            "https://example.com/",
            &[("photo.png", "images/photo.png")],
        );
        assert!(output.contains(r#"src="images/photo.png""#));
        assert!(!output.contains(r#"src="photo.png""#));
    }

    #[test]
    fn test_rewrites_every_rule_kind() {
        let page = r#"<html><head>
            <link rel="stylesheet" href="main.css">
            <script src="app.js"></script>
        </head><body>
            <img src="a.png">
            <audio src="b.mp3"></audio>
            <a href="c.pdf">doc</a>
        </body></html>"#;

        let output = rewrite(
            page,
            "https://example.com/",
            &[
                ("main.css", "css/main.css"),
                ("app.js", "js/app.js"),
                ("a.png", "images/a.png"),
                ("b.mp3", "audio/b.mp3"),
                ("c.pdf", "pdfs/c.pdf"),
            ],
        );

        assert!(output.contains(r#"href="css/main.css""#));
        assert!(output.contains(r#"src="js/app.js""#));
        assert!(output.contains(r#"src="images/a.png""#));
        assert!(output.contains(r#"src="audio/b.mp3""#));
        assert!(output.contains(r#"href="pdfs/c.pdf""#));
    }

    #[test]
    fn test_anchor_sharing_a_resource_value_is_not_rewritten() {
        // The anchor's path is neither .pdf nor .txt, so no rule matches it;
        // it must keep its original href even though the image with the
        // same value is rewritten.
        let page = r#"<html><body>
            <img src="shared.bin">
            <a href="shared.bin">download</a>
        </body></html>"#;

        let output = rewrite(
            page,
            "https://example.com/",
            &[("shared.bin", "images/shared.bin")],
        );

        assert!(output.contains(r#"src="images/shared.bin""#));
        assert!(output.contains(r#"href="shared.bin""#));
    }

    #[test]
    fn test_same_value_in_different_kinds_rewritten_independently() {
        // img and audio referencing the same URL are separate references;
        // each node gets its own kind's local path.
        let page = r#"<html><body>
            <img src="/asset">
            <audio src="/asset"></audio>
        </body></html>"#;

        let mut document = html::parse(page);
        let rules = ResourceRules::default();
        let base = Url::parse("https://example.com/").unwrap();

        let references = html::discover_references(&document, &rules, &base);
        assert_eq!(references.len(), 2);

        let replacements = vec!["images/asset".to_string(), "audio/asset".to_string()];
        let output = rewrite_references(&mut document, &rules, &base, &replacements);

        assert!(output.contains(r#"<img src="images/asset""#));
        assert!(output.contains(r#"<audio src="audio/asset""#));
    }

    #[test]
    fn test_failed_download_degrades_to_absolute_url() {
        let output = rewrite(
            r#"<html><body><img src="missing.png"></body></html>"#,
            "https://example.com/",
            &[],
        );
        assert!(output.contains(r#"src="https://example.com/missing.png""#));
    }

    #[test]
    fn test_duplicate_references_all_rewritten() {
        let output = rewrite(
            r#"<html><body><img src="twice.png"><img src="twice.png"></body></html>"#,
            "https://example.com/",
            &[("twice.png", "images/twice.png")],
        );
        assert_eq!(output.matches(r#"src="images/twice.png""#).count(), 2);
    }

    #[test]
    fn test_page_without_references_roundtrips_content() {
        let page = "<html><head><title>T</title></head><body><p>Hello</p></body></html>";
        let output = rewrite(page, "https://example.com/", &[]);
        assert!(output.contains("<title>T</title>"));
        assert!(output.contains("<p>Hello</p>"));
    }
}
