//! Line-oriented terminal host.
//!
//! Commands:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `1`..`5` | answer with that option |
//! | `r` | play again after a completed session |
//! | `c <category>` | toggle a category in the filter |
//! | `t <tag>` | toggle a tag in the filter |
//! | `f` | refetch contacts |
//! | `h` | help |
//! | `q` | quit |

use std::fmt::Write as _;

use rolodex_domain::{ContactCategory, Tag};
use rolodex_shared::{OptionFeedback, QuizPhaseData, QuizSnapshot};

pub const HELP: &str = "\
Commands:
  1-5           answer with that option
  r             play again after a completed session
  c <category>  toggle a category (family, friend, work, community, other)
  t <tag>       toggle a tag
  f             refetch contacts
  h             show this help
  q             quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// One-based option number as typed
    Answer(usize),
    Replay,
    ToggleCategory(ContactCategory),
    ToggleTag(Tag),
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("Empty input")]
    Empty,
    #[error("Unknown command: {0} (h for help)")]
    Unknown(String),
    #[error("{0}")]
    Invalid(String),
}

impl TerminalCommand {
    pub fn parse(line: &str) -> Result<Self, ParseCommandError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "r" | "replay" => Ok(Self::Replay),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            "h" | "help" | "?" => Ok(Self::Help),
            "f" | "refresh" => Ok(Self::Refresh),
            "c" | "category" => rest
                .parse::<ContactCategory>()
                .map(Self::ToggleCategory)
                .map_err(|e| ParseCommandError::Invalid(e.to_string())),
            "t" | "tag" => Tag::new(rest)
                .map(Self::ToggleTag)
                .map_err(|e| ParseCommandError::Invalid(e.to_string())),
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Self::Answer(n)),
                _ => Err(ParseCommandError::Unknown(other.to_string())),
            },
        }
    }
}

/// Render a snapshot as plain text.
pub fn render_snapshot(snapshot: &QuizSnapshot) -> String {
    let mut out = String::new();
    match snapshot.phase {
        QuizPhaseData::Idle => {
            let _ = write!(
                out,
                "Not enough people to quiz yet ({} of {} needed). Pick categories with `c <category>`.",
                snapshot.pool_size, snapshot.min_pool_size
            );
        }
        QuizPhaseData::Loading => out.push_str("Loading..."),
        QuizPhaseData::Complete => {
            let _ = write!(
                out,
                "Session complete: {}/{}. Press r to play again.",
                snapshot.score, snapshot.total_rounds
            );
        }
        QuizPhaseData::Unknown => {}
        QuizPhaseData::AwaitingAnswer
        | QuizPhaseData::FeedbackCorrect
        | QuizPhaseData::FeedbackIncorrect => render_round(snapshot, &mut out),
    }
    out
}

fn render_round(snapshot: &QuizSnapshot, out: &mut String) {
    let _ = writeln!(
        out,
        "Round {}/{}  Score {}",
        snapshot.round_number(),
        snapshot.total_rounds,
        snapshot.score
    );
    if let Some(prompt) = &snapshot.prompt {
        match (&prompt.photo_ref, &prompt.hint) {
            (Some(photo), Some(hint)) => {
                let _ = writeln!(out, "Who is this? [photo: {}] Hint: {}", photo, hint);
            }
            (Some(photo), None) => {
                let _ = writeln!(out, "Who is this? [photo: {}]", photo);
            }
            (None, Some(hint)) => {
                let _ = writeln!(out, "Who is this? Hint: {}", hint);
            }
            (None, None) => {
                let _ = writeln!(out, "Who is this?");
            }
        }
    }
    for (i, option) in snapshot.options.iter().enumerate() {
        let marker = match option.feedback {
            Some(OptionFeedback::Correct) => "  <- correct!",
            Some(OptionFeedback::Incorrect) => "  <- not quite",
            None => "",
        };
        let _ = writeln!(out, "  {}) {}{}", i + 1, option.display_name, marker);
    }
    if snapshot.phase == QuizPhaseData::FeedbackIncorrect {
        out.push_str("Try again in a moment.");
    }
}
