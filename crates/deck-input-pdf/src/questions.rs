//! Reconstruct question records from `pdftotext -layout` output.
//!
//! The question PDF renders each question as
//!
//! ```text
//! 12) Abbildung 7: Welche Wolkenform ist
//!     abgebildet?
//! A) Cumulus
//! B) Stratus
//!    humilis
//! C) Cirrus
//! D) Altocumulus
//!
//! ```
//!
//! Parsing is a six-state machine. [`step`] is the pure transition function;
//! [`QuestionParser`] applies the resulting actions to the record under
//! construction and checks that the record has the shape the state expects.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use deck_core::error::{DeckError, Result};
use deck_core::record::{QuestionRecord, OPTION_COUNT, OPTION_LETTERS};
use deck_utils::text::collapse_whitespace;

static QUESTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\) (.*)$").unwrap());
static FIGURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Abbildung (\d+): *(.*)$").unwrap());
static OPTION_RES: Lazy<[Regex; OPTION_COUNT]> = Lazy::new(|| {
    OPTION_LETTERS.map(|letter| Regex::new(&format!(r"^{}\) *(.*)$", letter)).unwrap())
});

/// Where the parser is within the question grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    BetweenQuestions,
    QuestionText,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
}

impl State {
    /// State reached after seeding option `index` (0 = A).
    fn option(index: usize) -> Self {
        match index {
            0 => State::OptionA,
            1 => State::OptionB,
            2 => State::OptionC,
            _ => State::OptionD,
        }
    }

    /// Number of options the record under construction holds in this state.
    fn filled_options(self) -> usize {
        match self {
            State::BetweenQuestions | State::QuestionText => 0,
            State::OptionA => 1,
            State::OptionB => 2,
            State::OptionC => 3,
            State::OptionD => 4,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::BetweenQuestions => "between questions",
            State::QuestionText => "question text",
            State::OptionA => "option A",
            State::OptionB => "option B",
            State::OptionC => "option C",
            State::OptionD => "option D",
        };
        f.write_str(name)
    }
}

/// Side effect of consuming one normalized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Line carries nothing for us.
    Skip,
    /// A new question header.
    Start {
        number: u32,
        image_ref: Option<u32>,
        seed: String,
    },
    /// Continuation of the question text.
    AppendText(String),
    /// First line of the next option.
    SeedOption(String),
    /// Continuation of the current option.
    AppendOption(String),
    /// Blank line after option D.
    Close,
}

/// Transition function: `(state, normalized line) → (next state, action)`.
pub fn step(state: State, line: &str) -> (State, Action) {
    match state {
        State::BetweenQuestions => match parse_header(line) {
            Some((number, image_ref, seed)) => (
                State::QuestionText,
                Action::Start {
                    number,
                    image_ref,
                    seed,
                },
            ),
            None => (State::BetweenQuestions, Action::Skip),
        },
        State::OptionD if line.is_empty() => (State::BetweenQuestions, Action::Close),
        State::OptionD => (State::OptionD, Action::AppendOption(line.to_string())),
        State::QuestionText | State::OptionA | State::OptionB | State::OptionC => {
            let next = state.filled_options();
            match OPTION_RES[next].captures(line) {
                Some(caps) => (State::option(next), Action::SeedOption(caps[1].to_string())),
                None if state == State::QuestionText => {
                    (state, Action::AppendText(line.to_string()))
                }
                None => (state, Action::AppendOption(line.to_string())),
            }
        }
    }
}

/// Split `"<n>) [Abbildung <m>: ]<text>"` into its parts.
fn parse_header(line: &str) -> Option<(u32, Option<u32>, String)> {
    let caps = QUESTION_RE.captures(line)?;
    let number = caps[1].parse().ok()?;
    let rest = &caps[2];
    match FIGURE_RE.captures(rest) {
        Some(fig) => {
            let image = fig[1].parse().ok()?;
            Some((number, Some(image), fig[2].to_string()))
        }
        None => Some((number, None, rest.to_string())),
    }
}

/// A question whose options are still being read.
#[derive(Debug)]
struct Draft {
    section: u32,
    number: u32,
    text: String,
    image_ref: Option<u32>,
    options: Vec<String>,
}

impl Draft {
    fn finish(self) -> QuestionRecord {
        let mut options = self.options.into_iter();
        let mut next = || options.next().unwrap_or_default();
        QuestionRecord {
            section: self.section,
            local_number: self.number,
            text: self.text,
            image_ref: self.image_ref,
            options: [next(), next(), next(), next()],
        }
    }
}

/// Line-by-line question parser.
#[derive(Debug)]
pub struct QuestionParser {
    state: State,
    section: u32,
    last_number: u32,
    line_no: usize,
    draft: Option<Draft>,
    records: Vec<QuestionRecord>,
}

impl Default for QuestionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionParser {
    pub fn new() -> Self {
        Self {
            state: State::BetweenQuestions,
            section: 1,
            last_number: 0,
            line_no: 0,
            draft: None,
            records: Vec::new(),
        }
    }

    /// Consume one raw line of `pdftotext` output.
    pub fn feed(&mut self, raw: &str) -> Result<()> {
        self.line_no += 1;
        let line = collapse_whitespace(raw);
        self.check_shape()?;

        let (next, action) = step(self.state, &line);
        if action != Action::Skip {
            log::trace!("line {}: {} -> {} ({:?})", self.line_no, self.state, next, action);
        }
        self.apply(action)?;
        self.state = next;
        Ok(())
    }

    /// End of input: close a record that is complete but lacks the trailing
    /// blank line, and reject one that stops short.
    pub fn finish(mut self) -> Result<Vec<QuestionRecord>> {
        self.check_shape()?;
        match self.state {
            State::BetweenQuestions => {}
            State::OptionD => self.apply(Action::Close)?,
            state => {
                let number = self.draft.as_ref().map(|d| d.number).unwrap_or(0);
                return Err(DeckError::TruncatedQuestion {
                    number,
                    state: state.to_string(),
                });
            }
        }
        log::info!(
            "Parsed {} questions in {} sections",
            self.records.len(),
            self.records.last().map(|r| r.section).unwrap_or(0)
        );
        Ok(self.records)
    }

    /// The draft must exist exactly when inside a question and hold as many
    /// options as the state implies.
    fn check_shape(&self) -> Result<()> {
        let ok = match (&self.draft, self.state) {
            (None, State::BetweenQuestions) => true,
            (Some(draft), state) if state != State::BetweenQuestions => {
                draft.options.len() == state.filled_options()
            }
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(self.fault(format!(
                "state {} with {} buffered options",
                self.state,
                self.draft.as_ref().map(|d| d.options.len()).unwrap_or(0)
            )))
        }
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Skip => {}
            Action::Start {
                number,
                image_ref,
                seed,
            } => {
                if self.draft.is_some() {
                    return Err(self.fault("question started inside another question".into()));
                }
                if number < self.last_number {
                    self.section += 1;
                    log::debug!("Section {} starts at line {}", self.section, self.line_no);
                }
                self.last_number = number;
                self.draft = Some(Draft {
                    section: self.section,
                    number,
                    text: format!("{}.{}. {}", self.section, number, seed),
                    image_ref,
                    options: Vec::with_capacity(OPTION_COUNT),
                });
            }
            Action::AppendText(line) => {
                let draft = self.draft_mut()?;
                draft.text.push(' ');
                draft.text.push_str(&line);
            }
            Action::SeedOption(line) => {
                self.draft_mut()?.options.push(line);
            }
            Action::AppendOption(line) => {
                let line_no = self.line_no;
                let option = self
                    .draft_mut()?
                    .options
                    .last_mut()
                    .ok_or_else(|| DeckError::ParserState {
                        line: line_no,
                        message: "option continuation before any option".into(),
                    })?;
                option.push(' ');
                option.push_str(&line);
            }
            Action::Close => {
                let draft = self.draft.take().ok_or_else(|| self.fault("close without question".into()))?;
                if draft.options.len() != OPTION_COUNT {
                    return Err(self.fault(format!(
                        "question {} closed with {} options",
                        draft.number,
                        draft.options.len()
                    )));
                }
                self.records.push(draft.finish());
            }
        }
        Ok(())
    }

    fn draft_mut(&mut self) -> Result<&mut Draft> {
        let line = self.line_no;
        self.draft.as_mut().ok_or_else(|| DeckError::ParserState {
            line,
            message: "continuation outside a question".into(),
        })
    }

    fn fault(&self, message: String) -> DeckError {
        DeckError::ParserState {
            line: self.line_no,
            message,
        }
    }
}

/// Parse a whole `pdftotext -layout` document.
pub fn parse_questions(text: &str) -> Result<Vec<QuestionRecord>> {
    let mut parser = QuestionParser::new();
    for line in text.lines() {
        parser.feed(line)?;
    }
    parser.finish()
}
