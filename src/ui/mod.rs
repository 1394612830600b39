//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_proposed_version, display_status,
    display_success, display_versions,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Default is "no" if user presses Enter.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    read_confirmation(&mut io::stdin().lock())
}

/// Reads one line of input and interprets it as a yes/no answer.
pub fn read_confirmation<R: BufRead>(input: &mut R) -> Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;

    let response = line.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Asks whether the computed tag should be created and pushed.
pub fn confirm_release(tag: &str, remote: &str) -> Result<bool> {
    confirm_action(&format!("Create tag '{}' and push it to '{}'?", tag, remote))
}
