//! Story sinks: where published records go.
//!
//! A sink only ever receives records. There is no update, delete or lookup
//! on the publishing side; observers read an [`EventLog`] directly.

use std::io::Write;

use crate::schema::story::{CollectorStory, CreatorStory, StoryEvent};
use crate::schema::token::TokenId;

/// One-way destination for published story records.
pub trait StorySink {
    fn publish(&mut self, event: StoryEvent);
}

/// Discards everything. For deployments where only the returned record matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StorySink for NullSink {
    fn publish(&mut self, _event: StoryEvent) {}
}

/// Append-only, in-memory event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<StoryEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in publication order.
    pub fn iter(&self) -> impl Iterator<Item = &StoryEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&StoryEvent> {
        self.events.last()
    }

    pub fn creator_stories(&self) -> impl Iterator<Item = &CreatorStory> {
        self.events.iter().filter_map(|event| match event {
            StoryEvent::CreatorStory(record) => Some(record),
            StoryEvent::CollectorStory(_) => None,
        })
    }

    pub fn collector_stories(&self) -> impl Iterator<Item = &CollectorStory> {
        self.events.iter().filter_map(|event| match event {
            StoryEvent::CollectorStory(record) => Some(record),
            StoryEvent::CreatorStory(_) => None,
        })
    }

    /// Rebuild the history of one token from the log.
    pub fn for_token(&self, token_id: TokenId) -> impl Iterator<Item = &StoryEvent> {
        self.events
            .iter()
            .filter(move |event| event.token_id() == token_id)
    }

    /// Write every event as one JSON object per line.
    pub fn write_json_lines<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for event in &self.events {
            serde_json::to_writer(&mut out, event)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl StorySink for EventLog {
    fn publish(&mut self, event: StoryEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::token::Address;

    fn creator_event(token: u64) -> StoryEvent {
        StoryEvent::CreatorStory(CreatorStory {
            token_id: TokenId(token),
            creator_address: Address::from_index(1),
            creator_name: "XCOPY".to_string(),
            story: "I AM XCOPY".to_string(),
        })
    }

    fn collector_event(token: u64) -> StoryEvent {
        StoryEvent::CollectorStory(CollectorStory {
            token_id: TokenId(token),
            collector_address: Address::from_index(2),
            collector_name: "NOT XCOPY".to_string(),
            story: "I AM NOT XCOPY".to_string(),
        })
    }

    #[test]
    fn log_keeps_publication_order() {
        let mut log = EventLog::new();
        log.publish(creator_event(1));
        log.publish(collector_event(2));
        log.publish(creator_event(1));

        let tokens: Vec<u64> = log.iter().map(|e| e.token_id().0).collect();
        assert_eq!(tokens, vec![1, 2, 1]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.last(), Some(&creator_event(1)));
    }

    #[test]
    fn filters_by_kind_and_token() {
        let mut log = EventLog::new();
        log.publish(creator_event(1));
        log.publish(collector_event(1));
        log.publish(collector_event(2));

        assert_eq!(log.creator_stories().count(), 1);
        assert_eq!(log.collector_stories().count(), 2);
        assert_eq!(log.for_token(TokenId(1)).count(), 2);
        assert_eq!(log.for_token(TokenId(3)).count(), 0);
    }

    #[test]
    fn json_lines_export() {
        let mut log = EventLog::new();
        log.publish(creator_event(1));
        log.publish(collector_event(2));

        let mut buf = Vec::new();
        log.write_json_lines(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"CreatorStory":"#));
        assert!(lines[1].starts_with(r#"{"Story":"#));

        let parsed: StoryEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, collector_event(2));
    }
}
