//! Terminal host for the TickStack board.
//!
//! # Responsibility
//! - Resolve config from command-line arguments, start logging and open the board.
//! - Translate stdin lines into board actions and print the resulting list.

mod command;

use clap::Parser;
use command::{parse_command, parse_edit_line, Command, EditInput};
use log::{debug, error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tickstack_core::{
    init_logging_for, AppConfig, EditKey, EditOutcome, StorageMode, TaskBoard, TaskId,
};

#[derive(Debug, Parser)]
#[command(name = "tickstack")]
#[command(version)]
#[command(about = "Terminal to-do list backed by a local SQLite file")]
struct Args {
    /// Directory holding the database and logs [default: <temp>/tickstack]
    data_dir: Option<PathBuf>,
    /// Log level
    #[arg(long, value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,
    /// Storage slot holding the task list
    #[arg(long)]
    slot: Option<String>,
}

fn main() -> ExitCode {
    let config = match resolve_config(Args::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("cannot resolve data directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_for(&config) {
        eprintln!("logging disabled: {err}");
    }

    let mut board = TaskBoard::open(&config);
    if board.storage_mode() == StorageMode::SessionOnly {
        println!("warning: storage unavailable, changes will not be saved");
    }
    println!("tickstack {}", tickstack_core::core_version());
    render(&board);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        prompt("> ");
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                error!("event=stdin_read module=cli status=error error={err}");
                break;
            }
            None => break,
        };

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::List)) => render(&board),
            Ok(Some(Command::Add { words })) => {
                if board.submit(&words.join(" ")).is_some() {
                    render(&board);
                } else {
                    println!("nothing to add");
                }
            }
            Ok(Some(Command::Toggle { row })) => {
                if let Some(id) = row_id(&board, row) {
                    board.toggle(&id);
                    render(&board);
                }
            }
            Ok(Some(Command::Remove { row })) => {
                if let Some(id) = row_id(&board, row) {
                    board.delete(&id);
                    render(&board);
                }
            }
            Ok(Some(Command::Edit { row })) => {
                if let Some(id) = row_id(&board, row) {
                    edit_row(&mut board, &id, &mut lines);
                    render(&board);
                }
            }
            Err(err) => {
                if let Err(print_err) = err.print() {
                    debug!("event=command_print module=cli status=error error={print_err}");
                }
            }
        }
    }

    info!("event=app_exit module=cli status=ok tasks={}", board.tasks().len());
    ExitCode::SUCCESS
}

fn resolve_config(args: Args) -> io::Result<AppConfig> {
    let mut config = match args.data_dir.filter(|path| !path.as_os_str().is_empty()) {
        Some(path) if path.is_absolute() => AppConfig::new(path),
        Some(path) => AppConfig::new(std::env::current_dir()?.join(path)),
        None => AppConfig::default(),
    };
    if let Some(level) = args.log_level {
        config = config.with_log_level(level);
    }
    if let Some(slot) = args.slot.filter(|slot| !slot.trim().is_empty()) {
        config = config.with_slot_key(slot);
    }
    Ok(config)
}

fn edit_row(
    board: &mut TaskBoard,
    id: &TaskId,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) {
    if !board.begin_edit(id) {
        println!("completed tasks cannot be edited");
        return;
    }
    if let Some(current) = board.display_text(id) {
        println!("editing: {current}");
    }
    prompt("new text> ");

    let input = match lines.next() {
        Some(Ok(line)) => parse_edit_line(&line),
        _ => EditInput::Cancel,
    };
    let key = match input {
        EditInput::Confirm(text) => {
            board.set_draft(id, text);
            EditKey::Confirm
        }
        EditInput::Cancel => EditKey::Escape,
    };

    match board.handle_key(id, key) {
        EditOutcome::Committed | EditOutcome::NotEditing => {}
        EditOutcome::Cancelled => println!("edit cancelled"),
        EditOutcome::Rejected => {
            println!("description cannot be blank");
            board.handle_key(id, EditKey::Escape);
        }
    }
}

fn row_id(board: &TaskBoard, row: usize) -> Option<TaskId> {
    let id = board.tasks().get(row - 1).map(|task| task.id.clone());
    if id.is_none() {
        println!("no task at row {row}");
    }
    id
}

fn render(board: &TaskBoard) {
    let tasks = board.tasks();
    if tasks.is_empty() {
        println!("Your list is empty. Add a task with `add <text>`.");
        return;
    }

    println!("{} ({}%)", board.summary(), board.summary().progress_percent());
    for (index, task) in tasks.iter().enumerate() {
        let mark = if task.is_completed { "x" } else { " " };
        println!("{:>3}. [{mark}] {}", index + 1, task.description);
    }
}

fn prompt(text: &str) {
    prompt_to(&mut io::stdout(), text);
}

fn prompt_to(out: &mut impl Write, text: &str) {
    if let Err(err) = write!(out, "{text}").and_then(|()| out.flush()) {
        debug!("event=prompt_write module=cli status=error error={err}");
    }
}
