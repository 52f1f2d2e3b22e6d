//! Progress echoes for the packaging flow.
//!
//! fpm inherits the terminal, so pdpkg's own output is limited to short
//! glyph-prefixed lines that read well interleaved with it. `--quiet`
//! silences everything except errors.

pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

pub struct OutputContext {
    /// Stylesheet, plain unless color is enabled.
    pub styles: Styles,
    /// Suppress everything except errors.
    pub quiet: bool,
}

impl OutputContext {
    /// Build the context from the CLI flags. Color is enabled only when
    /// stdout is a terminal and neither `--no-color` nor `NO_COLOR` is set.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let use_colors =
            !no_color && Term::stdout().is_term() && std::env::var("NO_COLOR").is_err();
        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }
        Self { styles, quiet }
    }

    /// A completed step.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "✓".style(self.styles.success));
        }
    }

    /// A step that went ahead with a caveat.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// A failure, on stderr. Not subject to `--quiet`.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "✗".style(self.styles.error));
    }

    /// A step in progress.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// A section header in plan output.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.style(self.styles.header));
        }
    }

    /// An aligned key-value line under a header.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            let key = format!("{key:<6}");
            println!("  {}{value}", key.style(self.styles.dim));
        }
    }
}
