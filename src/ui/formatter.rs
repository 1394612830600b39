//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the version about to be released.
///
/// # Arguments
/// * `current` - Tag of the latest release (None when the version was given explicitly)
/// * `next` - The tag being proposed
pub fn display_proposed_version(current: Option<&str>, next: &str) {
    match current {
        Some(current) => {
            println!("\n{}", style("Proposed Release:").bold());
            println!("  From: {}", style(current).red());
            println!("  To:   {}", style(next).green());
        }
        None => {
            println!("\n{}", style("Explicit Release:").bold());
            println!("  New tag: {}", style(next).green());
        }
    }
}

/// Display versions, one per line, in the order given.
pub fn display_versions(versions: &[String]) {
    println!("{}", style("Versions (oldest first):").bold());
    for version in versions {
        println!("  - {}", version);
    }
}
