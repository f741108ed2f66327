//! Page-level PHP: preamble, fragment includes and output file names.

use c5_core::Fragment;

/// Prefix of every generated page and fragment file.
pub const PAGE_PREAMBLE: &str = "<?php\n\
defined('C5_EXECUTE') or die('Access Denied.');\n\
/* @var \\Concrete\\Core\\Page\\View\\PageView $view */\n\
$c = \\Concrete\\Core\\Page\\Page::getCurrentPage();?>\n";

/// Alias emitted for the default page.
pub const DEFAULT_PAGE_FILE: &str = "default.php";

const PHP_EXT: &str = ".php";
const HTML_EXT: &str = ".html";

/// Prepend [`PAGE_PREAMBLE`] to generated markup.
#[must_use]
pub fn with_preamble(body: &str) -> String {
    let mut out = String::with_capacity(PAGE_PREAMBLE.len() + body.len());
    out.push_str(PAGE_PREAMBLE);
    out.push_str(body);
    out
}

/// Generated file name for a page: lower-cased, `.html` swapped for `.php`.
#[must_use]
pub fn page_file_name(document: &str) -> String {
    let lower = document.to_lowercase();
    let stem = lower.strip_suffix(HTML_EXT).unwrap_or(&lower);
    format!("{stem}{PHP_EXT}")
}

/// Generated file name for a fragment: its lower-cased output path plus `.php`.
#[must_use]
pub fn fragment_file_name(fragment: &Fragment) -> String {
    format!("{}{PHP_EXT}", fragment.output_path.to_lowercase())
}

/// The directive that replaces an excised fragment.
#[must_use]
pub fn include_directive(fragment: &Fragment) -> String {
    format!("<?php $view->inc('{}'); ?>", fragment_file_name(fragment))
}
