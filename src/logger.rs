//! Colored status lines on stderr.
//!
//! stdout carries the modified document, so nothing here ever writes to it.
//!
//! ```ignore
//! log!("save"; "{} ({} bytes)", path.display(), len);
//! debug!("ruby"; "`{}`: {} occurrence(s)", target, n);
//! ```

use owo_colors::OwoColorize;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

use crate::markup::Diagnostic;

/// Set by `--verbose`; gates `debug!`.
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Macros
// ============================================================================

/// Print `[module] message` to stderr.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, but only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Output
// ============================================================================

#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// One `[parse]` line per parser diagnostic, in the order they were raised.
pub fn diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        log("parse", &format!("{} ({:?})", diagnostic, diagnostic.kind));
    }
}

/// Prefix color by operation family.
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "load" | "save" => prefix.bright_blue().bold().to_string(),
        "class" | "alt" => prefix.bright_green().bold().to_string(),
        "ruby" => prefix.bright_magenta().bold().to_string(),
        "remove" => prefix.bright_cyan().bold().to_string(),
        "error" | "parse" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_contains_module() {
        for module in ["ruby", "Error", "recipe"] {
            assert!(colorize_prefix(module).contains(&format!("[{module}]")));
        }
    }

    #[test]
    fn test_verbose_toggle() {
        let before = is_verbose();
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(before);
    }
}
