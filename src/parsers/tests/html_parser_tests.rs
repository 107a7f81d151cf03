use crate::parsers::html;

#[test]
fn test_extract_title() {
    let document = html::parse("<html><head><title> My Page </title></head><body></body></html>");
    assert_eq!(html::extract_title(&document), Some("My Page".to_string()));
}

#[test]
fn test_extract_title_missing() {
    let document = html::parse("<html><body><p>No title here</p></body></html>");
    assert_eq!(html::extract_title(&document), None);
}

#[test]
fn test_extract_title_empty_is_none() {
    let document = html::parse("<html><head><title>   </title></head></html>");
    assert_eq!(html::extract_title(&document), None);
}

#[test]
fn test_malformed_html_still_parses() {
    // Unclosed tags and stray brackets should not prevent parsing
    let document = html::parse("<html><body><p>Broken <div><img src=\"x.png\">< </body>");
    let rendered = document.html();
    assert!(rendered.contains("Broken"));
    assert!(rendered.contains("x.png"));
}

#[test]
fn test_plain_text_input_yields_tree() {
    let document = html::parse("just some text, not html at all");
    assert!(document.html().contains("just some text"));
}
