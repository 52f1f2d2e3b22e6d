//! Stylesheet for pdpkg's step echoes and plan rendering.

use owo_colors::Style;

/// Styles applied to pdpkg's own lines. Everything defaults to plain
/// text; [`Styles::colorize`] switches the palette on.
#[derive(Default, Clone)]
pub struct Styles {
    /// Completed steps (green)
    pub success: Style,
    /// Caveats (yellow)
    pub warning: Style,
    /// Failures (red)
    pub error: Style,
    /// Steps in progress (cyan)
    pub info: Style,
    /// Plan keys and secondary text
    pub dim: Style,
    /// Section headers in plan output
    pub header: Style,
}

impl Styles {
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().cyan();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold();
    }
}
