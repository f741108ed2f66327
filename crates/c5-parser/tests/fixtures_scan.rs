//! Region and marker discovery over whole-page fixtures.

use c5_core::{C5Error, FragmentRegistry};
use c5_parser::{find_fragment_markers, find_regions, parse_markup};
use pretty_assertions::assert_eq;

const INDEX: &str = include_str!("fixtures/index.html");

#[test]
fn index_regions_are_outside_fragments_and_in_order() {
    let tree = parse_markup(INDEX);
    let regions = find_regions(&tree.root()).unwrap();

    let summary: Vec<_> = regions
        .iter()
        .map(|r| (r.name.as_str(), r.is_global, r.uses_grid, r.is_editable))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Header Nav", true, false, false),
            ("Main", false, true, true),
            ("Sidebar", false, false, true),
        ]
    );

    for region in &regions {
        let text = &INDEX[region.span()];
        assert!(text.starts_with("<c5-area"), "{text}");
        assert!(text.ends_with("</c5-area>"), "{text}");
    }
}

#[test]
fn index_fragments_close_in_the_same_document() {
    let tree = parse_markup(INDEX);
    let mut registry = FragmentRegistry::new();
    let seen = find_fragment_markers(&tree.root(), INDEX, "index.html", &mut registry).unwrap();

    assert_eq!(seen, 4);
    let names: Vec<_> = registry.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Header", "Footer"]);

    let header = registry.get("Header").unwrap();
    assert!(header.content().unwrap().contains("<header class=\"site-header\">"));
    assert!(!header.content().unwrap().contains("C5 End"));

    let footer = registry.get("Footer").unwrap();
    assert_eq!(footer.output_path, "elements/Footer");
    assert!(footer.content().unwrap().trim().starts_with("<footer>"));
}

#[test]
fn invalid_area_fixture_fails() {
    let source = include_str!("fixtures/invalid_area.html");
    let tree = parse_markup(source);
    assert_eq!(find_regions(&tree.root()), Err(C5Error::InvalidRegion));
}

#[test]
fn unmatched_end_fixture_fails_with_label() {
    let source = include_str!("fixtures/unmatched_end.html");
    let tree = parse_markup(source);
    let mut registry = FragmentRegistry::new();
    let err = find_fragment_markers(&tree.root(), source, "index.html", &mut registry).unwrap_err();
    assert_eq!(err.to_string(), "Invalid Element - No Start Tag : Header");
}

#[test]
fn unmatched_start_fixture_fails_on_read() {
    let source = include_str!("fixtures/unmatched_start.html");
    let tree = parse_markup(source);
    let mut registry = FragmentRegistry::new();
    find_fragment_markers(&tree.root(), source, "index.html", &mut registry).unwrap();

    let err = registry.get("Header").unwrap().content().unwrap_err();
    assert_eq!(err.to_string(), "Invalid Element - No End Tag : Header");
}
