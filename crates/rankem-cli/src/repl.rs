//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{Command, ItemAction, ItemArgs, PreferArgs, RankAction, RankArgs, RankRef};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::Workspace;
use rankem_domain::Preference;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Run the interactive REPL.
///
/// `config_path` is the config file given on the command line, if any; the
/// history file is kept next to it.
pub fn run_repl(
    workspace: &mut Workspace,
    config: &Config,
    config_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", formatter.info("Rankem REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(readline_error)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(readline_error)?;

    // Load history
    let history_path = get_history_path(config_path)?;
    if let Err(e) = editor.load_history(&history_path) {
        debug!("No history loaded: {}", e);
    }

    loop {
        match editor.readline("rankem> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                // Parse command
                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Command(cmd)) => {
                        if let Err(e) = commands::execute(cmd, workspace, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts = split_args(line)?;
    let args: Vec<&str> = parts.iter().map(String::as_str).collect();

    let Some((&first, rest)) = args.split_first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match first {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "rank" => parse_rank_command(rest),
        "ranks" | "ls" => Ok(rank_command(RankAction::List)),
        "item" => parse_item_command(rest),
        "prefer" => parse_prefer_command(rest),
        "calculate" | "calc" => {
            let rank = single_arg(rest, "Usage: calculate <rank>")?;
            Ok(ReplCommand::Command(Command::Calculate(RankRef { rank })))
        }
        "hide" => {
            let rank = single_arg(rest, "Usage: hide <rank>")?;
            Ok(ReplCommand::Command(Command::Hide(RankRef { rank })))
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            first
        ))),
    }
}

// Simple command parsers for REPL (minimal argument parsing)

fn rank_command(action: RankAction) -> ReplCommand {
    ReplCommand::Command(Command::Rank(RankArgs { action }))
}

fn item_command(action: ItemAction) -> ReplCommand {
    ReplCommand::Command(Command::Item(ItemArgs { action }))
}

fn parse_rank_command(args: &[&str]) -> Result<ReplCommand> {
    let Some((&action, rest)) = args.split_first() else {
        return Ok(rank_command(RankAction::List));
    };

    let action = match action {
        "list" | "ls" => RankAction::List,
        "create" | "new" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: rank create <name>".to_string()));
            }
            RankAction::Create { name: rest.join(" ") }
        }
        "show" => RankAction::Show {
            rank: single_arg(rest, "Usage: rank show <rank>")?,
        },
        "delete" | "rm" => {
            let (rest, yes) = take_yes_flag(rest);
            RankAction::Delete {
                rank: single_arg(&rest, "Usage: rank delete <rank> [-y]")?,
                yes,
            }
        }
        _ => return Err(CliError::InvalidInput(format!("Unknown rank action: {}", action))),
    };

    Ok(rank_command(action))
}

fn parse_item_command(args: &[&str]) -> Result<ReplCommand> {
    let Some((&action, rest)) = args.split_first() else {
        return Err(CliError::InvalidInput("Usage: item <add|remove|show> ...".to_string()));
    };

    let action = match action {
        "add" => match rest {
            [rank, name @ ..] if !name.is_empty() => ItemAction::Add {
                rank: rank.to_string(),
                name: name.join(" "),
            },
            _ => return Err(CliError::InvalidInput("Usage: item add <rank> <name>".to_string())),
        },
        "remove" | "rm" => {
            let (rest, yes) = take_yes_flag(rest);
            match rest.as_slice() {
                [rank, item] => ItemAction::Remove {
                    rank: rank.to_string(),
                    item: item.to_string(),
                    yes,
                },
                _ => {
                    return Err(CliError::InvalidInput(
                        "Usage: item remove <rank> <item> [-y]".to_string(),
                    ))
                }
            }
        }
        "show" => match rest {
            [rank, item] => ItemAction::Show {
                rank: rank.to_string(),
                item: item.to_string(),
            },
            _ => return Err(CliError::InvalidInput("Usage: item show <rank> <item>".to_string())),
        },
        _ => return Err(CliError::InvalidInput(format!("Unknown item action: {}", action))),
    };

    Ok(item_command(action))
}

fn parse_prefer_command(args: &[&str]) -> Result<ReplCommand> {
    let [rank, item, other, preference] = args else {
        return Err(CliError::InvalidInput(
            "Usage: prefer <rank> <item> <other> <better|worse|none>".to_string(),
        ));
    };

    let preference = Preference::parse(preference).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown preference: {}. Use better, worse or none.",
            preference
        ))
    })?;

    Ok(ReplCommand::Command(Command::Prefer(PreferArgs {
        rank: rank.to_string(),
        item: item.to_string(),
        other: other.to_string(),
        preference: preference.into(),
    })))
}

fn single_arg(args: &[&str], usage: &str) -> Result<String> {
    match args {
        [arg] => Ok(arg.to_string()),
        _ => Err(CliError::InvalidInput(usage.to_string())),
    }
}

/// Strip `-y` / `--yes` from the arguments, reporting whether it was present.
fn take_yes_flag<'a>(args: &[&'a str]) -> (Vec<&'a str>, bool) {
    let rest: Vec<&str> = args
        .iter()
        .copied()
        .filter(|arg| *arg != "-y" && *arg != "--yes")
        .collect();
    let yes = rest.len() != args.len();
    (rest, yes)
}

/// Split a line into arguments on whitespace, keeping double-quoted runs together.
fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CliError::InvalidInput("Unterminated quote".to_string()));
    }
    if has_token {
        args.push(current);
    }

    Ok(args)
}

fn readline_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

fn get_history_path(config_path: Option<&Path>) -> Result<PathBuf> {
    let dir = match config_path {
        Some(path) => match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
        None => Config::dir()?,
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  rank list                          - List ranks");
    println!("  rank create <name>                 - Create a rank");
    println!("  rank show <rank>                   - Show the items of a rank");
    println!("  rank delete <rank> [-y]            - Delete a rank");
    println!("  item add <rank> <name>             - Add an item to a rank");
    println!("  item remove <rank> <item> [-y]     - Remove an item");
    println!("  item show <rank> <item>            - Show how an item compares to the others");
    println!("  prefer <rank> <item> <other> <p>   - Record a judgment");
    println!("    p: better | worse | none");
    println!("  calculate <rank>                   - Compute scores and show the ranking");
    println!("  hide <rank>                        - Hide scores until the next calculate");
    println!("  help, ?                            - Show this help");
    println!("  exit, quit, q                      - Exit REPL");
    println!();
    println!("  <rank> and <item> take an id, an id prefix or a name.");
    println!("  Quote names that contain spaces: item show Books \"War and Peace\"");
    println!();
}
