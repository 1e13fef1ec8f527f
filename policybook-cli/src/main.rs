mod cli;
mod display;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io::{self, BufRead, IsTerminal};

use policybook_core::{
    determine_book_path, get_prefs_path, parse_command, Command, Model, Storage, UserPrefs,
    ViewKind,
};

use crate::cli::Cli;

/// What the session should do after a line was handled
#[derive(Debug, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Failed,
    Exit,
}

struct Session {
    model: Model,
    storage: Storage,
    interactive: bool,
}

impl Session {
    fn run_line(&mut self, line: &str) -> LineOutcome {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                display::print_error(&e.to_string());
                return LineOutcome::Failed;
            }
        };

        if matches!(command, Command::Clear(_)) && self.interactive && !self.model.book().is_empty()
        {
            match prompts::confirm_clear(self.model.book().len()) {
                Ok(true) => {}
                Ok(false) => {
                    display::print_feedback("Clear cancelled.");
                    return LineOutcome::Continue;
                }
                Err(e) => {
                    display::print_error(&format!("{:#}", e));
                    return LineOutcome::Failed;
                }
            }
        }

        let result = match command.execute(&mut self.model) {
            Ok(result) => result,
            Err(e) => {
                display::print_error(&e.to_string());
                return LineOutcome::Failed;
            }
        };

        display::print_feedback(&result.feedback);

        if command.mutates_book() {
            if let Err(e) = self.storage.save(self.model.book()) {
                display::print_error(&format!(
                    "Could not save to {:?}: {}",
                    self.storage.path(),
                    e
                ));
                return LineOutcome::Failed;
            }
        }

        if result.exit {
            return LineOutcome::Exit;
        }
        if !result.show_help {
            display::print_view(&self.model, result.view);
        }
        LineOutcome::Continue
    }

    fn run_interactive(&mut self) -> Result<()> {
        display::print_view(&self.model, ViewKind::Persons);

        if io::stdin().is_terminal() {
            while let Some(line) = prompts::prompt_command_line()? {
                if line.trim().is_empty() {
                    continue;
                }
                if self.run_line(&line) == LineOutcome::Exit {
                    break;
                }
            }
        } else {
            // Piped input: one command per line until EOF
            for line in io::stdin().lock().lines() {
                let line = line.context("Failed to read command from stdin")?;
                if line.trim().is_empty() {
                    continue;
                }
                if self.run_line(&line) == LineOutcome::Exit {
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Confirmation prompts need a terminal; one-shot and piped sessions skip them
fn wants_confirmation(one_shot: bool, stdin_is_terminal: bool) -> bool {
    !one_shot && stdin_is_terminal
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let prefs_path = get_prefs_path()?;
    let prefs = UserPrefs::load_or_create(&prefs_path)?;
    debug!("Using preferences from {:?}", prefs_path);

    // Determine which policy book file to use
    let book_path = determine_book_path(cli.file.as_deref(), &prefs);
    let storage = Storage::new(&book_path);
    let book = storage
        .load()
        .with_context(|| format!("Failed to load policy book from {:?}", book_path))?;
    info!("Policy book {:?} holds {} persons", book_path, book.len());

    let command_line = cli.command_line();
    let mut session = Session {
        model: Model::new(book).with_renewal_window(prefs.renewal_window_days),
        storage,
        interactive: wants_confirmation(command_line.is_some(), io::stdin().is_terminal()),
    };

    match command_line {
        Some(line) => {
            if session.run_line(&line) == LineOutcome::Failed {
                std::process::exit(1);
            }
        }
        None => session.run_interactive()?,
    }

    Ok(())
}
