use super::*;

fn names(filters: &[TagFilter]) -> Vec<String> {
    filters.iter().map(|f| f.to_string()).collect()
}

#[test]
fn test_parse_wildcard() {
    assert_eq!(TagFilter::from("*"), TagFilter::Any);
    assert_eq!(TagFilter::from(" * "), TagFilter::Any);
    assert!(TagFilter::Any.is_wildcard());
}

#[test]
fn test_parse_normalizes_case() {
    assert_eq!(TagFilter::from("BUTTON"), TagFilter::Tag("button".to_string()));
    assert!(!TagFilter::tag("a").is_wildcard());
}

#[test]
fn test_selector() {
    assert_eq!(TagFilter::tag("img").selector(), "img");
    assert_eq!(TagFilter::Any.selector(), "*");
}

#[test]
fn test_defaults_order() {
    assert_eq!(names(&TagFilter::defaults()), vec!["img", "input", "button", "a"]);
}

#[test]
fn test_with_defaults_deduplicates_keeping_first() {
    let priority = vec![TagFilter::tag("button"), TagFilter::tag("img")];
    let filters = TagFilter::with_defaults(&priority);
    assert_eq!(names(&filters), vec!["button", "img", "input", "a"]);
}

#[test]
fn test_with_defaults_empty_priority() {
    let filters = TagFilter::with_defaults(&[]);
    assert_eq!(filters, TagFilter::defaults());
}

#[test]
fn test_with_defaults_duplicate_priority_entries() {
    let priority = vec![
        TagFilter::tag("select"),
        TagFilter::tag("SELECT"),
        TagFilter::tag("a"),
    ];
    let filters = TagFilter::with_defaults(&priority);
    assert_eq!(names(&filters), vec!["select", "a", "img", "input", "button"]);
}

#[test]
fn test_serde_as_string() {
    let filters: Vec<TagFilter> = serde_json::from_str(r#"["button", "*"]"#).unwrap();
    assert_eq!(filters, vec![TagFilter::tag("button"), TagFilter::Any]);
    let json = serde_json::to_string(&filters).unwrap();
    assert_eq!(json, r#"["button","*"]"#);
}
