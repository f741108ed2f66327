//! # c5-codegen
//!
//! Text generators for the PHP side of a concrete5 theme:
//! - [`theme`]: the `page_theme.php` class rendered from [`ThemeOptions`]
//! - [`area`]: the block that replaces a `<c5-area>` tag
//! - [`page`]: page preamble, fragment include directive and output naming

pub mod area;
pub mod page;
pub mod theme;

pub use area::region_code;
pub use page::{
    DEFAULT_PAGE_FILE, PAGE_PREAMBLE, fragment_file_name, include_directive, page_file_name,
    with_preamble,
};
pub use theme::{THEME_FILE_NAME, ThemeOptions, ThemeRenderer, camel_case, php_literal, render};
