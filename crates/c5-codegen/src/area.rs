//! Area block generation.

use c5_core::Region;

use crate::theme::php_literal;

/// PHP that constructs, configures and displays the area for `region`.
///
/// Statement order is fixed: construct, disable controls (non-editable
/// only), enable the grid container (grid only), display.
#[must_use]
pub fn region_code(region: &Region) -> String {
    let name = php_literal(&region.name);
    let mut code = String::from("<?php \n");
    if region.is_global {
        code.push_str(&format!(
            "$area = new \\Concrete\\Core\\Area\\GlobalArea('{name}');\n"
        ));
    } else {
        code.push_str(&format!("$area = new  \\Concrete\\Core\\Area\\Area('{name}');\n"));
    }

    if !region.is_editable {
        code.push_str("$area->disableControls();\n");
    }
    if region.uses_grid {
        code.push_str("$area->enableGridContainer();\n");
    }

    code.push_str("$area->display($c);\n");
    code.push_str("?>");
    code
}
