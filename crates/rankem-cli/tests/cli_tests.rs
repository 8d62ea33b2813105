//! End-to-end tests for the rankem CLI
//!
//! The library tests drive commands through a `Workspace` on disk and check
//! what survives a reopen. The binary tests run `rankem` itself with `HOME`
//! pointed at a temporary directory.

use rankem_cli::cli::{Command, ItemAction, ItemArgs, PreferArgs, PreferenceArg, RankAction, RankArgs, RankRef};
use rankem_cli::config::OutputFormat;
use rankem_cli::{commands, CliError, Formatter, Workspace};
use rankem_domain::RatingEngine;
use rankem_store::{SqliteStateStore, StoreError};
use std::path::Path;
use std::process::Command as Process;
use tempfile::tempdir;

fn run(path: &Path, command: Command) -> rankem_cli::Result<()> {
    let mut workspace = Workspace::open(path, RatingEngine::default())?;
    let formatter = Formatter::new(OutputFormat::Quiet, false);
    commands::execute(command, &mut workspace, &formatter)
}

fn add_item(rank: &str, name: &str) -> Command {
    Command::Item(ItemArgs {
        action: ItemAction::Add {
            rank: rank.into(),
            name: name.into(),
        },
    })
}

#[test]
fn test_every_command_persists() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("rankem.db");

    run(
        &db,
        Command::Rank(RankArgs {
            action: RankAction::Create { name: "Fruits".into() },
        }),
    )
    .unwrap();
    for name in ["A", "B", "C"] {
        run(&db, add_item("Fruits", name)).unwrap();
    }
    run(
        &db,
        Command::Prefer(PreferArgs {
            rank: "Fruits".into(),
            item: "A".into(),
            other: "B".into(),
            preference: PreferenceArg::Better,
        }),
    )
    .unwrap();
    run(&db, Command::Calculate(RankRef { rank: "Fruits".into() })).unwrap();

    let workspace = Workspace::open(&db, RatingEngine::default()).unwrap();
    let rank = workspace.rank("Fruits").unwrap();
    assert!(rank.sorted);
    let scores: Vec<(String, f64)> = rank
        .display_order()
        .into_iter()
        .map(|item| (item.name.clone(), item.score))
        .collect();
    assert_eq!(
        scores,
        vec![
            ("A".to_string(), 1016.0),
            ("C".to_string(), 1000.0),
            ("B".to_string(), 984.0)
        ]
    );
}

#[test]
fn test_adding_item_hides_persisted_ranking() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("rankem.db");

    run(
        &db,
        Command::Rank(RankArgs {
            action: RankAction::Create { name: "Fruits".into() },
        }),
    )
    .unwrap();
    run(&db, add_item("Fruits", "A")).unwrap();
    run(&db, Command::Calculate(RankRef { rank: "Fruits".into() })).unwrap();
    run(&db, add_item("Fruits", "B")).unwrap();

    let workspace = Workspace::open(&db, RatingEngine::default()).unwrap();
    assert!(!workspace.rank("Fruits").unwrap().sorted);
}

#[test]
fn test_failed_command_changes_nothing() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("rankem.db");

    let result = run(&db, add_item("Nowhere", "A"));
    assert!(matches!(result, Err(CliError::NotFound(_))));

    let workspace = Workspace::open(&db, RatingEngine::default()).unwrap();
    assert!(matches!(workspace.rank("Nowhere"), Err(CliError::NotFound(_))));
}

#[test]
fn test_failed_save_keeps_state_until_next_commit() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("rankem.db");
    let mut workspace = Workspace::open(&db, RatingEngine::default()).unwrap();
    let formatter = Formatter::new(OutputFormat::Quiet, false);

    // Break the database underneath the open workspace
    rusqlite::Connection::open(&db)
        .unwrap()
        .execute_batch("DROP TABLE snapshots")
        .unwrap();

    let result = commands::execute(
        Command::Rank(RankArgs {
            action: RankAction::Create { name: "Fruits".into() },
        }),
        &mut workspace,
        &formatter,
    );

    assert!(matches!(result, Err(CliError::Store(StoreError::Database(_)))));
    assert_eq!(workspace.rank("Fruits").unwrap().name, "Fruits");

    // Opening the database again recreates the table
    drop(SqliteStateStore::new(&db).unwrap());
    workspace.commit().unwrap();

    let reopened = Workspace::open(&db, RatingEngine::default()).unwrap();
    assert_eq!(reopened.rank("Fruits").unwrap().name, "Fruits");
}

fn rankem(home: &Path, db: &Path, args: &[&str]) -> std::process::Output {
    Process::new(env!("CARGO_BIN_EXE_rankem"))
        .env("HOME", home)
        .env_remove("RANKEM_DATABASE")
        .arg("--database")
        .arg(db)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_binary_round_trip() {
    let home = tempdir().unwrap();
    let db = home.path().join("ranks.db");

    let output = rankem(home.path(), &db, &["--format", "quiet", "rank", "create", "Books"]);
    assert!(output.status.success());
    let id = String::from_utf8(output.stdout).unwrap().trim().to_string();
    assert_eq!(id.len(), 36);

    let output = rankem(home.path(), &db, &["--format", "json", "rank", "list"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["id"], id.as_str());
    assert_eq!(json[0]["name"], "Books");

    // First run writes a default config
    assert!(home.path().join(".rankem").join("config.toml").exists());
}

#[test]
fn test_binary_reports_errors() {
    let home = tempdir().unwrap();
    let db = home.path().join("ranks.db");

    let output = rankem(home.path(), &db, &["rank", "show", "Missing"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: Not found: rank 'Missing'"));
}
