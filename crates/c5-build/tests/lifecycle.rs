//! End-to-end build lifecycle over the HTML fixtures.

use c5_build::{BuildState, DocumentStatus, MemorySink, OutputSink, ThemeBuild};
use c5_codegen::{PAGE_PREAMBLE, THEME_FILE_NAME, render, with_preamble};
use c5_config::BuildConfig;
use pretty_assertions::assert_eq;

const INDEX: &str = include_str!("fixtures/index.html");
const ABOUT: &str = include_str!("fixtures/about.html");
const BROKEN: &str = include_str!("fixtures/broken.html");
const LAYOUT_OPEN: &str = include_str!("fixtures/layout_open.html");
const LAYOUT_CLOSE: &str = include_str!("fixtures/layout_close.html");

const HEADER_INCLUDE: &str = "<?php $view->inc('elements/header.php'); ?>";
const LAYOUT_INCLUDE: &str = "<?php $view->inc('elements/layout.php'); ?>";

/// Drive a whole build the way a build tool would: register each HTML
/// artifact, hand it over, finalize it, then complete the build.
fn run(config: BuildConfig, documents: &[(&str, &str)]) -> MemorySink {
    let mut build = ThemeBuild::new(config).unwrap();
    let mut sink = MemorySink::new();
    for (name, html) in documents {
        sink.register_output(name, (*html).to_string());
        build.document_ready(name, html, &mut sink);
        build.document_finalized(name, &mut sink);
    }
    build.build_complete(&mut sink);
    sink
}

fn names(sink: &MemorySink) -> Vec<&str> {
    sink.names().collect()
}

#[test]
fn keeps_html_and_aliases_default_page() {
    let sink = run(
        BuildConfig::default(),
        &[("index.html", INDEX), ("about.html", ABOUT)],
    );

    assert_eq!(
        names(&sink),
        vec![
            "about.html",
            "about.php",
            "default.php",
            "elements/header.php",
            "index.html",
            "index.php",
            "page_theme.php",
        ]
    );
    assert!(sink.diagnostics().is_empty());
    assert_eq!(sink.get("index.html"), Some(INDEX));
    assert_eq!(sink.get("default.php"), sink.get("index.php"));

    let index = sink.get("index.php").unwrap();
    assert!(index.starts_with(PAGE_PREAMBLE));
    assert!(index.contains(HEADER_INCLUDE));
    assert!(index.contains("$area->enableGridContainer();"));
    assert!(!index.contains("c5-area"));
    assert!(!index.contains("C5 Begin"));
    assert!(!index.contains("C5 End"));

    let about = sink.get("about.php").unwrap();
    assert!(about.contains(HEADER_INCLUDE));
    assert!(about.contains("$area = new  \\Concrete\\Core\\Area\\Area('About');\n$area->disableControls();"));
}

#[test]
fn shared_fragment_is_emitted_once() {
    let sink = run(
        BuildConfig::default(),
        &[("index.html", INDEX), ("about.html", ABOUT)],
    );

    let header = sink.get("elements/header.php").unwrap();
    assert_eq!(
        header,
        with_preamble(
            "\n<header><?php \n$area = new \\Concrete\\Core\\Area\\GlobalArea('Logo');\n$area->display($c);\n?></header>\n"
        )
    );
}

#[test]
fn theme_file_matches_renderer() {
    let config = BuildConfig {
        description: Some("Fixture theme".to_string()),
        ..BuildConfig::from_display_name("Fixture Theme")
    };
    let expected = render(&config.theme_options()).unwrap();

    let sink = run(config, &[("about.html", ABOUT)]);
    assert_eq!(sink.get(THEME_FILE_NAME), Some(expected.as_str()));
}

#[test]
fn delete_source_html_keeps_only_php() {
    let config = BuildConfig {
        delete_source_html: true,
        ..BuildConfig::default()
    };
    let sink = run(config, &[("index.html", INDEX), ("about.html", ABOUT)]);

    assert_eq!(
        names(&sink),
        vec![
            "about.php",
            "default.php",
            "elements/header.php",
            "page_theme.php",
        ]
    );
}

#[test]
fn delete_source_html_renames_processed_document() {
    let config = BuildConfig {
        delete_source_html: true,
        ..BuildConfig::default()
    };
    let mut build = ThemeBuild::new(config).unwrap();
    let mut sink = MemorySink::new();

    let index = build.document_ready("Index.html", INDEX, &mut sink);
    let about = build.document_ready("About.html", ABOUT, &mut sink);

    assert_eq!(index.name, "default.php");
    assert_eq!(about.name, "about.php");
    assert_eq!(sink.get("about.php"), Some(about.html.as_str()));
}

#[test]
fn skipped_primary_page_registers_nothing() {
    let config = BuildConfig {
        skip_primary_page: true,
        ..BuildConfig::default()
    };
    let mut build = ThemeBuild::new(config).unwrap();
    let mut sink = MemorySink::new();
    sink.register_output("INDEX.html", INDEX.to_string());

    let processed = build.document_ready("INDEX.html", INDEX, &mut sink);
    assert_eq!(processed.html, INDEX);
    assert_eq!(build.status("INDEX.html"), Some(DocumentStatus::Skipped));
    assert_eq!(names(&sink), vec!["INDEX.html"]);

    build.document_finalized("INDEX.html", &mut sink);
    build.document_ready("about.html", ABOUT, &mut sink);
    build.build_complete(&mut sink);

    assert_eq!(
        names(&sink),
        vec!["about.php", "elements/header.php", "page_theme.php"]
    );
}

#[test]
fn failing_document_passes_through_and_build_continues() {
    let sink = run(
        BuildConfig::default(),
        &[("broken.html", BROKEN), ("about.html", ABOUT)],
    );

    assert_eq!(sink.diagnostics().len(), 1);
    assert_eq!(sink.diagnostics()[0].document, "broken.html");
    assert_eq!(
        sink.diagnostics()[0].message,
        "Invalid Element - No Start Tag : Footer"
    );
    assert_eq!(sink.get("broken.html"), Some(BROKEN));
    assert!(!sink.contains("broken.php"));
    assert!(sink.contains("about.php"));
    assert!(sink.contains(THEME_FILE_NAME));
}

#[test]
fn fragment_spanning_two_documents() {
    let mut build = ThemeBuild::new(BuildConfig::default()).unwrap();
    let mut sink = MemorySink::new();

    build.document_ready("a.html", LAYOUT_OPEN, &mut sink);
    assert_eq!(build.status("a.html"), Some(DocumentStatus::Deferred));
    assert!(!sink.contains("a.php"));

    build.document_ready("b.html", LAYOUT_CLOSE, &mut sink);
    assert_eq!(
        sink.get("elements/layout.php"),
        Some(with_preamble("<div>top</div>\n<p>bottom</p>").as_str())
    );
    assert_eq!(
        sink.get("b.php"),
        Some(with_preamble(&format!("{LAYOUT_INCLUDE}</body>\n")).as_str())
    );

    build.build_complete(&mut sink);
    assert_eq!(
        sink.get("a.php"),
        Some(with_preamble(&format!("<body>{LAYOUT_INCLUDE}")).as_str())
    );
    assert!(sink.diagnostics().is_empty());
    assert_eq!(build.state(), BuildState::Done);
}

#[test]
fn fragment_never_closed_is_reported_at_completion() {
    let sink = run(BuildConfig::default(), &[("a.html", LAYOUT_OPEN)]);

    assert_eq!(sink.diagnostics().len(), 1);
    assert_eq!(
        sink.diagnostics()[0].message,
        "Invalid Element - No End Tag : Layout"
    );
    assert!(!sink.contains("a.php"));
    assert!(!sink.contains("elements/layout.php"));
    assert_eq!(sink.get("a.html"), Some(LAYOUT_OPEN));
}

#[test]
fn reprocessing_a_document_is_idempotent() {
    let mut build = ThemeBuild::new(BuildConfig::default()).unwrap();
    let mut once = MemorySink::new();
    build.document_ready("about.html", ABOUT, &mut once);

    let mut twice = MemorySink::new();
    build.document_ready("about.html", ABOUT, &mut twice);

    // The second pass only re-emits the page; fragment and theme are done.
    assert_eq!(names(&twice), vec!["about.php"]);
    assert_eq!(twice.get("about.php"), once.get("about.php"));
}

#[test]
fn new_build_starts_after_completion() {
    let mut build = ThemeBuild::new(BuildConfig::default()).unwrap();
    let mut first = MemorySink::new();
    build.document_ready("about.html", ABOUT, &mut first);
    build.build_complete(&mut first);

    let mut second = MemorySink::new();
    build.document_ready("about.html", ABOUT, &mut second);
    assert_eq!(build.state(), BuildState::Collecting);
    assert_eq!(first.outputs(), second.outputs());
}

#[test]
fn deferred_document_renders_before_label_is_reused() {
    let mut build = ThemeBuild::new(BuildConfig::default()).unwrap();
    let mut sink = MemorySink::new();
    let include = "<?php $view->inc('elements/h.php'); ?>";

    build.document_ready("a.html", "<body><!--C5 Begin H-->top", &mut sink);
    build.document_ready("b.html", "bot<!--C5 End H--></body>", &mut sink);
    assert_eq!(build.status("a.html"), Some(DocumentStatus::Transformed));
    assert_eq!(
        sink.get("elements/h.php"),
        Some(with_preamble("topbot").as_str())
    );

    build.document_ready("c.html", "<!--C5 Begin H-->other<!--C5 End H-->", &mut sink);
    build.build_complete(&mut sink);

    assert!(sink.diagnostics().is_empty());
    assert_eq!(
        sink.get("a.php"),
        Some(with_preamble(&format!("<body>{include}")).as_str())
    );
    assert_eq!(
        sink.get("b.php"),
        Some(with_preamble(&format!("{include}</body>")).as_str())
    );
    assert_eq!(sink.get("c.php"), Some(with_preamble(include).as_str()));
    for page in ["a.php", "b.php", "c.php"] {
        let text = sink.get(page).unwrap();
        assert!(!text.contains("C5 Begin") && !text.contains("C5 End"), "{page}");
    }
}

#[test]
fn deferred_document_html_is_removed_once_rendered() {
    let config = BuildConfig {
        delete_source_html: true,
        ..BuildConfig::default()
    };
    let sink = run(
        config,
        &[("a.html", LAYOUT_OPEN), ("b.html", LAYOUT_CLOSE)],
    );

    assert_eq!(
        names(&sink),
        vec!["a.php", "b.php", "elements/layout.php", "page_theme.php"]
    );
}

#[test]
fn pages_and_fragments_share_one_preamble() {
    let keep = run(
        BuildConfig::default(),
        &[("index.html", INDEX), ("about.html", ABOUT)],
    );
    let delete = run(
        BuildConfig {
            delete_source_html: true,
            ..BuildConfig::default()
        },
        &[("index.html", INDEX), ("about.html", ABOUT)],
    );

    for (sink, page) in [
        (&keep, "index.php"),
        (&keep, "about.php"),
        (&keep, "elements/header.php"),
        (&delete, "default.php"),
        (&delete, "about.php"),
        (&delete, "elements/header.php"),
    ] {
        let text = sink.get(page).unwrap();
        assert!(text.starts_with(PAGE_PREAMBLE), "{page}");
        assert!(text.contains("PageView $view */"), "{page}");
        assert!(!text.contains("PageView  $view"), "{page}");
    }
}
