//! `page_theme.php` generation.

use std::sync::LazyLock;

use c5_core::{C5Error, HandleRole};
use regex::Regex;

/// File name of the generated theme class.
pub const THEME_FILE_NAME: &str = "page_theme.php";

/// Name used when the configured theme name is empty.
pub const DEFAULT_THEME_NAME: &str = "Concrete5 Theme";

const PACKAGE_ROOT: &str = "Concrete\\Core";

static HANDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9]+_?)+$").expect("handle pattern is valid"));

/// Inputs to the theme class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOptions {
    pub name: String,
    pub handle: String,
    pub description: Option<String>,
    /// Handle of the package the theme ships in, if any.
    pub parent_handle: Option<String>,
}

/// Validated renderer for one [`ThemeOptions`].
#[derive(Debug, Clone)]
pub struct ThemeRenderer {
    options: ThemeOptions,
}

impl ThemeRenderer {
    /// Validate `options`.
    ///
    /// # Errors
    /// Returns [`C5Error::InvalidHandle`] when the theme handle, or the parent
    /// handle if present, is not alphanumeric with single underscores.
    pub fn new(options: ThemeOptions) -> Result<Self, C5Error> {
        check_handle(&options.handle, HandleRole::Theme)?;
        if let Some(parent) = options.parent_handle.as_deref() {
            check_handle(parent, HandleRole::Package)?;
        }
        Ok(Self { options })
    }

    #[must_use]
    pub const fn options(&self) -> &ThemeOptions {
        &self.options
    }

    /// Namespace of the theme class.
    #[must_use]
    pub fn namespace(&self) -> String {
        let theme = camel_case(&self.options.handle);
        match self.options.parent_handle.as_deref() {
            Some(parent) => format!(
                "{PACKAGE_ROOT}\\Package\\{}\\Themes\\{theme}",
                camel_case(parent)
            ),
            None => format!("Application\\Themes\\{theme}"),
        }
    }

    /// Render the full `page_theme.php` source.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("<?php\n");
        out.push_str(&format!("namespace {};\n", self.namespace()));
        out.push_str("// Auto-Generated by c5t\n");

        out.push('\n');
        out.push_str("use Concrete\\Core\\Area\\Layout\\Preset\\Provider\\ThemeProviderInterface;\n");
        out.push_str("use Concrete\\Core\\Page\\Theme\\Theme;\n");
        out.push('\n');

        out.push_str("class PageTheme extends Theme implements ThemeProviderInterface\n");
        out.push_str("{\n\n");
        let name = if self.options.name.is_empty() {
            DEFAULT_THEME_NAME
        } else {
            &self.options.name
        };
        out.push_str(&accessor("getThemeName", name));
        if let Some(description) = self.options.description.as_deref().filter(|d| !d.is_empty()) {
            out.push('\n');
            out.push_str(&accessor("getThemeDescription", description));
            out.push('\n');
        }
        out.push('\n');
        out.push_str("}\n");
        out
    }
}

/// Validate and render `options` in one step.
///
/// # Errors
/// See [`ThemeRenderer::new`].
pub fn render(options: &ThemeOptions) -> Result<String, C5Error> {
    Ok(ThemeRenderer::new(options.clone())?.render())
}

fn check_handle(handle: &str, role: HandleRole) -> Result<(), C5Error> {
    if HANDLE_PATTERN.is_match(handle) {
        Ok(())
    } else {
        Err(C5Error::InvalidHandle {
            role,
            value: handle.to_string(),
        })
    }
}

fn accessor(method: &str, value: &str) -> String {
    format!(
        "    public function {method}()\n    {{\n        return t('{}');\n    }}\n",
        php_literal(value)
    )
}

/// `my_theme` -> `MyTheme`. The input is lower-cased first, then each
/// underscore-separated segment gets an upper-case first character.
#[must_use]
pub fn camel_case(word: &str) -> String {
    word.to_lowercase()
        .split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

/// Escape text for a single-quoted PHP string.
#[must_use]
pub fn php_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
