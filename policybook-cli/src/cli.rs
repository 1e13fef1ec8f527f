use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "A policy book for tracking clients and their insurance renewals")]
pub struct Cli {
    /// Path to the policy book data file
    #[clap(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Show debug logging (RUST_LOG still takes precedence)
    #[clap(long, short = 'v')]
    pub verbose: bool,

    /// A command line to run once, e.g. `find n/alice`; omit for an interactive session
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// The one-shot command line, if any words were given
    pub fn command_line(&self) -> Option<String> {
        if self.command.is_empty() {
            None
        } else {
            Some(self.command.join(" "))
        }
    }
}
