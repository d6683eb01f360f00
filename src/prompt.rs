use std::io::{self, BufRead, Write};

use log::{error, info, warn};

/// Reports the outcome of an action to the user.
pub trait Notify {
    fn success(&mut self, message: &str);
    fn failure(&mut self, message: &str);
}

/// Blocking yes/no question asked before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Routes notifications through the logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn success(&mut self, message: &str) {
        info!("{}", message);
    }
    fn failure(&mut self, message: &str) {
        error!("{}", message);
    }
}

/// Asks on stdin, or answers yes when `assume_yes` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm {
    assume_yes: bool,
}

impl StdinConfirm {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let stdin = io::stdin();
        ask(&mut stdin.lock(), &mut io::stderr(), question).unwrap_or_else(|e| {
            warn!("Could not read an answer: {}", e);
            false
        })
    }
}

fn ask(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
