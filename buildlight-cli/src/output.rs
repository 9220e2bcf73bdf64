//! Diagnostic printing
//!
//! Renders the compiler's structured diagnostics as the human-readable
//! progress lines on stdout.

use buildlight_core::diagnostics::{Diagnostic, Severity};
use colored::*;

/// Print diagnostics in emission order.
///
/// Warnings get a yellow `Warning:` prefix; informational lines are
/// indented plain text mirroring per-job status output.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity() {
            Severity::Warning => println!("{}", format!("Warning: {}", diagnostic).yellow()),
            Severity::Info => println!("  {}", diagnostic),
        }
    }
}
