//! Gild confirmation: the terminal prompt and its non-interactive stand-ins.

use std::cell::RefCell;
use std::collections::VecDeque;

use console::Term;

use super::Confirm;

/// Check an operator answer against the accepted list.
///
/// Only the line terminator is stripped; everything else must match one
/// entry exactly, so `" y"` and `"Yes"` are refusals with the default list.
pub fn is_affirmative(answer: &str, accept: &[String]) -> bool {
    let answer = answer
        .strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(answer);
    accept.iter().any(|yes| yes == answer)
}

/// Asks on the terminal and reads the answer from stdin
pub struct TerminalConfirm {
    term: Term,
    accept: Vec<String>,
}

impl TerminalConfirm {
    /// Prompt on stdout
    pub fn new(accept: Vec<String>) -> Self {
        Self {
            term: Term::stdout(),
            accept,
        }
    }

    /// Prompt on stderr, keeping stdout free for machine-readable output
    pub fn on_stderr(accept: Vec<String>) -> Self {
        Self {
            term: Term::stderr(),
            accept,
        }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if let Err(e) = self.term.write_str(prompt).and_then(|_| self.term.flush()) {
            log::warn!("failed to write prompt: {}", e);
        }

        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) => {
                log::debug!("stdin closed, treating as no");
                false
            }
            Ok(_) => is_affirmative(&line, &self.accept),
            Err(e) => {
                log::warn!("failed to read answer: {}", e);
                false
            }
        }
    }
}

/// Answers from a queue of canned responses; refuses once it runs dry
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<String>>,
    accept: Vec<String>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new<I, S>(answers: I, accept: Vec<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            accept,
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Prompts issued so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(answer) => is_affirmative(&answer, &self.accept),
            None => false,
        }
    }
}

/// Gives the same answer every time (`--gild always` / `--gild never`)
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirm(pub bool);

impl Confirm for FixedConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
