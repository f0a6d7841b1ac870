use serde::{Deserialize, Serialize};

use super::token::{Address, TokenId};

/// A narrative published by the collection creator about one token.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorStory {
    pub token_id: TokenId,
    pub creator_address: Address,
    /// Display label chosen by the caller. Not checked against anything.
    pub creator_name: String,
    pub story: String,
}

/// A narrative published by the current owner of one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorStory {
    pub token_id: TokenId,
    pub collector_address: Address,
    pub collector_name: String,
    pub story: String,
}

/// A published record, as seen by anything observing the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryEvent {
    CreatorStory(CreatorStory),
    #[serde(rename = "Story")]
    CollectorStory(CollectorStory),
}

impl StoryEvent {
    /// Event name used on the wire: `CreatorStory` or `Story`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatorStory(_) => "CreatorStory",
            Self::CollectorStory(_) => "Story",
        }
    }

    pub fn token_id(&self) -> TokenId {
        match self {
            Self::CreatorStory(record) => record.token_id,
            Self::CollectorStory(record) => record.token_id,
        }
    }

    /// The account that wrote the story.
    pub fn author(&self) -> Address {
        match self {
            Self::CreatorStory(record) => record.creator_address,
            Self::CollectorStory(record) => record.collector_address,
        }
    }

    pub fn story(&self) -> &str {
        match self {
            Self::CreatorStory(record) => &record.story,
            Self::CollectorStory(record) => &record.story,
        }
    }
}

impl From<CreatorStory> for StoryEvent {
    fn from(record: CreatorStory) -> Self {
        Self::CreatorStory(record)
    }
}

impl From<CollectorStory> for StoryEvent {
    fn from(record: CollectorStory) -> Self {
        Self::CollectorStory(record)
    }
}
