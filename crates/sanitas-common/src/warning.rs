//! Sanitizer warnings with colored terminal output.
//!
//! Provides deduplication so a hostile document cannot flood stderr with the
//! same diagnostic. Used by the tokenizer, the sanitizer and the CLI to report
//! recoverable problems.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Output switch; embedders that have their own diagnostics can turn this off.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "duplicate-attribute parse error");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if !ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[sanitas {component}] ⚠ {message}").yellow());
    }
}

/// Turn warning output on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Returns true if warnings are currently printed.
#[must_use]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}
