//! Command implementations.

pub mod calculate;
pub mod item;
pub mod prefer;
pub mod rank;

pub use calculate::{execute_calculate, execute_hide};
pub use item::execute_item;
pub use prefer::execute_prefer;
pub use rank::execute_rank;

use crate::cli::Command;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::Workspace;
use std::io::{self, Write};

/// Longest accepted rank or item name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Run one command against the workspace.
///
/// Mutating commands persist the workspace before returning.
pub fn execute(command: Command, workspace: &mut Workspace, formatter: &Formatter) -> Result<()> {
    match command {
        Command::Rank(args) => execute_rank(args, workspace, formatter),
        Command::Item(args) => execute_item(args, workspace, formatter),
        Command::Prefer(args) => execute_prefer(args, workspace, formatter),
        Command::Calculate(args) => execute_calculate(args, workspace, formatter),
        Command::Hide(args) => execute_hide(args, workspace, formatter),
        Command::Repl => Err(CliError::InvalidInput("Already in the REPL".to_string())),
    }
}

/// Check a rank or item name and return it trimmed.
pub fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CliError::InvalidInput("Name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CliError::InvalidInput(format!(
            "Name cannot be longer than {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(trimmed)
}

/// Ask a yes/no question on stdin. Anything but `y` is a no.
fn confirm(formatter: &Formatter, question: &str) -> Result<bool> {
    println!("{}", formatter.warning(question));
    print!("Continue? [y/N] ");
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}

/// Report a completed mutation: the affected id in quiet mode, a status line otherwise.
fn report(formatter: &Formatter, id: &str, message: &str) {
    match formatter.format() {
        OutputFormat::Quiet => println!("{}", id),
        OutputFormat::Json => println!("{}", serde_json::json!({ "id": id, "message": message })),
        OutputFormat::Table => println!("{}", formatter.success(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Fruits ").unwrap(), "Fruits");
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(matches!(validate_name("   "), Err(CliError::InvalidInput(_))));
        assert!(matches!(validate_name(""), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_name_counts_characters() {
        let fifty = "é".repeat(50);
        assert!(validate_name(&fifty).is_ok());

        let fifty_one = "a".repeat(51);
        assert!(matches!(validate_name(&fifty_one), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_repl_inside_repl_is_rejected() {
        let mut workspace = Workspace::in_memory(Default::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert!(execute(Command::Repl, &mut workspace, &formatter).is_err());
    }
}
