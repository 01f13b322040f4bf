use std::io::{BufRead, Write};

use chrono::NaiveDate;
use history_core::models::DateRange;
use history_core::settings::Settings;
use history_core::time_utils::parse_date;

pub const START_PROMPT: &str = "Startdatum (im Format YYYY-MM-DD): ";
pub const END_PROMPT: &str = "Enddatum (im Format YYYY-MM-DD): ";
pub const LINES_PROMPT: &str = "Sollen auch die Strecken (Linien) hinzugefügt werden? (ja/nein): ";

/// Affirmative answer to the line prompt.
const YES: &str = "ja";

/// What the run needs from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub range: DateRange,
    pub include_lines: bool,
}

/// Interactive console used for values missing from the command line.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one line of input, without the line ending.
    pub fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            anyhow::bail!("Eingabe beendet bei: {}", question.trim_end());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn ask_date(&mut self, question: &str) -> anyhow::Result<NaiveDate> {
        let answer = self.ask(question)?;
        Ok(parse_date(&answer)?)
    }

    pub fn ask_yes_no(&mut self, question: &str) -> anyhow::Result<bool> {
        Ok(is_affirmative(&self.ask(question)?))
    }

    /// Fill in whatever `settings` leaves open, in prompt order start date,
    /// end date, line toggle.
    pub fn resolve(&mut self, settings: &Settings) -> anyhow::Result<RunRequest> {
        let start = match settings.start {
            Some(d) => d,
            None => self.ask_date(START_PROMPT)?,
        };
        let end = match settings.end {
            Some(d) => d,
            None => self.ask_date(END_PROMPT)?,
        };
        let include_lines = match settings.include_lines() {
            Some(b) => b,
            None => self.ask_yes_no(LINES_PROMPT)?,
        };

        Ok(RunRequest {
            range: DateRange::new(start, end),
            include_lines,
        })
    }
}

/// `true` for `ja` in any letter case.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase() == YES
}

// ── Tests ──────────────────────────────────────────────────────────────────────
