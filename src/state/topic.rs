//! Chat topic with change provenance.

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Timestamp layout used when describing a topic, e.g. `20:45:13, 04. Mar. 10`.
pub const TOPIC_TIME_FORMAT: &str = "%H:%M:%S, %d. %b. %y";

/// A topic as set by one user at one moment.
///
/// An empty `text` records that `author` removed the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub text: String,
    pub author: String,
    pub changed_at: DateTime<Local>,
}

impl Topic {
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        changed_at: DateTime<Local>,
    ) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            changed_at,
        }
    }

    /// Whether this change removed the topic.
    pub fn is_removal(&self) -> bool {
        self.text.is_empty()
    }

    /// `Topic is: <text> (set by <author> at <time>)`
    pub fn describe(&self) -> String {
        format!(
            "Topic is: {} (set by {} at {})",
            self.text,
            self.author,
            self.changed_at.format(TOPIC_TIME_FORMAT)
        )
    }
}

/// The current topic plus a bounded log of the ones it replaced.
#[derive(Debug, Clone)]
pub struct TopicBoard {
    current: Option<Topic>,
    history: VecDeque<Topic>,
    history_limit: usize,
}

impl TopicBoard {
    pub fn new(history_limit: usize) -> Self {
        Self {
            current: None,
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// The latest change, including a removal. `None` if never set.
    pub fn current(&self) -> Option<&Topic> {
        self.current.as_ref()
    }

    /// True only when a non-empty topic is in place.
    pub fn has_topic(&self) -> bool {
        self.current.as_ref().is_some_and(|t| !t.is_removal())
    }

    /// Current topic text, empty when unset or removed.
    pub fn text(&self) -> &str {
        self.current.as_ref().map_or("", |t| t.text.as_str())
    }

    /// Replace the whole record. Returns `false` and records nothing if the
    /// same author sets the same text again, whatever the timestamp.
    pub fn change(&mut self, topic: Topic) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|t| t.text == topic.text && t.author == topic.author)
        {
            return false;
        }

        if let Some(previous) = self.current.replace(topic)
            && self.history_limit > 0
        {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(previous);
        }
        true
    }

    /// Previous topics, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Topic> {
        self.history.iter()
    }
}
