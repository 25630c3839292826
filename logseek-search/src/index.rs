//! In-memory inverted index over event records.
//!
//! Backs the search service and the development-mode demo provider. Matching
//! is a conjunction of lowercase whitespace-separated terms over the message,
//! identifier and timestamp of each record; matches are returned newest first.

use std::collections::HashMap;
use std::time::Instant;

use crate::types::{EventId, NanoTimestamp, SearchOutcome, SearchResult};

/// Inverted index mapping lowercase terms to record positions.
#[derive(Debug, Default, Clone)]
pub struct EventIndex {
    records: Vec<SearchResult>,
    postings: HashMap<String, Vec<usize>>,
}

impl EventIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index holding the given records.
    pub fn from_records(records: impl IntoIterator<Item = SearchResult>) -> Self {
        let mut index = Self::new();
        index.add_records(records);
        index
    }

    /// Built-in sample events used by the demo provider.
    pub fn sample() -> Self {
        let base = 1_700_000_000_000_000_000_i64;
        let events = [
            ("evt-1001", "User alice logged in from 10.0.0.12"),
            ("evt-1002", "Disk usage on /var reached 91 percent"),
            ("evt-1003", "User bob failed login: invalid password"),
            ("evt-1004", "Scheduled backup completed in 312 seconds"),
            ("evt-1005", "User alice logged out"),
            ("evt-1006", "Connection timeout talking to payments service"),
            ("evt-1007", "Disk usage on /home reached 75 percent"),
            ("evt-1008", "User carol failed login: account locked"),
        ];

        Self::from_records(events.into_iter().enumerate().map(|(i, (id, message))| {
            SearchResult {
                event_id: EventId::from(id),
                message: message.to_string(),
                timestamp: NanoTimestamp(base + i as i64 * 1_000_000_000),
            }
        }))
    }

    /// Adds records and indexes their terms.
    pub fn add_records(&mut self, records: impl IntoIterator<Item = SearchResult>) {
        for record in records {
            let position = self.records.len();
            let text = format!(
                "{} {} {}",
                record.message, record.event_id, record.timestamp
            );

            for term in tokenize(&text) {
                let posting = self.postings.entry(term).or_default();
                // Positions are appended in increasing order, so a repeated
                // term in one record only needs a check against the tail.
                if posting.last() != Some(&position) {
                    posting.push(position);
                }
            }

            self.records.push(record);
        }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns records matching every term of the query, newest first.
    ///
    /// A query without terms matches nothing and reports zero elapsed time.
    pub fn search(&self, query: &str) -> SearchOutcome {
        let started = Instant::now();
        let terms = tokenize(query);

        let Some((first, rest)) = terms.split_first() else {
            return SearchOutcome::empty();
        };

        let mut positions = self.postings.get(first).cloned().unwrap_or_default();
        for term in rest {
            if positions.is_empty() {
                break;
            }
            let other = self.postings.get(term).map(Vec::as_slice).unwrap_or(&[]);
            positions = intersect(&positions, other);
        }

        let mut results: Vec<SearchResult> = positions
            .into_iter()
            .map(|position| self.records[position].clone())
            .collect();
        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        SearchOutcome::new(results, elapsed_ms)
    }
}

/// Splits text into lowercase whitespace-separated terms.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|term| term.to_lowercase())
        .collect()
}

/// Intersects two ascending position lists.
fn intersect(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }

    result
}
