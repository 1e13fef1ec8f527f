use anyhow::Result;
use inquire::{Confirm, InquireError, Text};

/// Reads the next command line; `None` when the user cancels or interrupts
pub fn prompt_command_line() -> Result<Option<String>> {
    match Text::new("policybook>").prompt() {
        Ok(line) => Ok(Some(line)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Asks before emptying the whole book
pub fn confirm_clear(count: usize) -> Result<bool> {
    let answer = Confirm::new(&format!("Delete all {} persons from the policy book?", count))
        .with_default(false)
        .prompt()?;
    Ok(answer)
}
