//! Operator interaction seam
//!
//! The catalog manager never talks to a UI directly. Confirmation prompts
//! and blocking acknowledgements go through [`OperatorPrompt`].

use std::io::{BufRead, Write};

use tokio::runtime::{Handle, RuntimeFlavor};

/// Blocking acknowledgement shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Failure(msg) => msg,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}

pub trait OperatorPrompt: Send + Sync {
    /// Yes/no question; `false` aborts the pending action
    fn confirm(&self, message: &str) -> bool;

    fn notify(&self, notice: Notice);
}

/// Headless prompt: approves everything and logs notices
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl OperatorPrompt for AutoConfirm {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!("Auto-confirmed: {}", message);
        true
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(msg) => tracing::info!("{}", msg),
            Notice::Failure(msg) => tracing::warn!("{}", msg),
        }
    }
}

/// Terminal prompt reading answers from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioPrompt;

impl OperatorPrompt for StdioPrompt {
    fn confirm(&self, message: &str) -> bool {
        off_runtime(|| {
            let mut stdout = std::io::stdout();
            if write!(stdout, "{} [y/N] ", message).and_then(|_| stdout.flush()).is_err() {
                return false;
            }
            let mut answer = String::new();
            if std::io::stdin().lock().read_line(&mut answer).is_err() {
                return false;
            }
            is_affirmative(&answer)
        })
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(msg) => println!("{}", msg),
            Notice::Failure(msg) => eprintln!("{}", msg),
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Run blocking terminal IO without holding up other tasks
///
/// On a multi-thread runtime the worker hands its queue to another thread
/// first. `block_in_place` panics on a current-thread runtime, so there the
/// closure just runs.
fn off_runtime<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}
