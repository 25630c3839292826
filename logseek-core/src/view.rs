//! View derivation for the search page.
//!
//! [`render`] is a pure function of the session snapshot. Exactly one result
//! block is chosen per snapshot; terminal and plain-text frontends only lay
//! the chosen block out.

use std::fmt;

use logseek_search::{NanoTimestamp, SearchOutcome};

use crate::session::{SessionSnapshot, SessionState};

/// Page title.
pub const PAGE_TITLE: &str = "Search Engine";

/// Placeholder shown in an empty input field.
pub const INPUT_PLACEHOLDER: &str = "Enter search keywords";

/// Text of the loading indicator.
pub const LOADING_TEXT: &str = "Loading...";

/// Everything a frontend needs to draw the search page.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Input field content
    pub query: String,
    /// The single result block to show
    pub block: ResultBlock,
}

/// The mutually exclusive result blocks of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultBlock {
    /// Nothing below the input: idle, or a success without result records
    Empty,
    /// Request in flight
    Loading,
    /// Last search failed
    Error { message: String },
    /// Last search returned result records
    Results {
        summary: String,
        items: Vec<ResultItem>,
    },
}

/// One rendered result record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub event_id: String,
    pub message: String,
    pub timestamp: NanoTimestamp,
}

/// Derives the view for a snapshot.
pub fn render(snapshot: &SessionSnapshot) -> View {
    let block = match &snapshot.state {
        SessionState::Idle => ResultBlock::Empty,
        SessionState::Pending => ResultBlock::Loading,
        SessionState::Failed(message) => ResultBlock::Error {
            message: message.clone(),
        },
        SessionState::Success(outcome) if outcome.has_results() => results_block(outcome),
        // An empty success shows no block at all, same as Idle
        SessionState::Success(_) => ResultBlock::Empty,
    };

    View {
        query: snapshot.query.clone(),
        block,
    }
}

fn results_block(outcome: &SearchOutcome) -> ResultBlock {
    ResultBlock::Results {
        summary: summary_line(outcome),
        items: outcome
            .results
            .iter()
            .map(|result| ResultItem {
                event_id: result.event_id.to_string(),
                message: result.message.clone(),
                timestamp: result.timestamp,
            })
            .collect(),
    }
}

/// `Found {count} results in {time_ms}ms`, with count and time as reported.
pub fn summary_line(outcome: &SearchOutcome) -> String {
    format!("Found {} results in {}ms", outcome.count, outcome.time_ms)
}

impl fmt::Display for ResultItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Event ID: {}", self.event_id)?;
        writeln!(f, "Message: {}", self.message)?;
        write!(f, "Timestamp: {}", self.timestamp)
    }
}

impl fmt::Display for ResultBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultBlock::Empty => Ok(()),
            ResultBlock::Loading => write!(f, "{LOADING_TEXT}"),
            ResultBlock::Error { message } => write!(f, "Error: {message}"),
            ResultBlock::Results { summary, items } => {
                write!(f, "{summary}")?;
                for item in items {
                    write!(f, "\n\n{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PAGE_TITLE}")?;
        if self.query.is_empty() {
            write!(f, "> [{INPUT_PLACEHOLDER}]")?;
        } else {
            write!(f, "> {}", self.query)?;
        }
        if self.block != ResultBlock::Empty {
            write!(f, "\n\n{}", self.block)?;
        }
        Ok(())
    }
}
