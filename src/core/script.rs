//! Replay scripts: a RON list of actions run against a collection.
//!
//! ```ron
//! [
//!     Mint(3, "0x0000000000000000000000000000000000000001"),
//!     Transfer("0x...01", "0x...02", 2, "0x...01"),
//!     CreatorStory("0x...01", 1, "XCOPY", "I AM XCOPY"),
//!     Story("0x...02", 2, "NOT XCOPY", "I AM NOT XCOPY"),
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::collection::{CollectionError, ConfigError, StoryCollection};
use crate::schema::story::StoryEvent;
use crate::schema::token::{Address, TokenId};

/// One step of a replay script. Addresses come first where a caller is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// `(count, caller)`
    Mint(u64, Address),
    /// `(from, to, token_id, caller)`
    Transfer(Address, Address, TokenId, Address),
    /// `(caller, token_id, creator_name, story)`
    CreatorStory(Address, TokenId, String, String),
    /// `(caller, token_id, collector_name, story)`
    Story(Address, TokenId, String, String),
}

/// What a successful action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Minted(Vec<TokenId>),
    Transferred,
    Published(StoryEvent),
}

impl Action {
    pub fn apply(&self, collection: &mut StoryCollection) -> Result<Outcome, CollectionError> {
        match self {
            Action::Mint(count, caller) => Ok(Outcome::Minted(collection.mint(*count, *caller)?)),
            Action::Transfer(from, to, token_id, caller) => {
                collection.transfer_from(*from, *to, *token_id, *caller)?;
                Ok(Outcome::Transferred)
            }
            Action::CreatorStory(caller, token_id, name, story) => {
                let record =
                    collection.add_creator_story(*caller, *token_id, name.as_str(), story.as_str())?;
                Ok(Outcome::Published(record.into()))
            }
            Action::Story(caller, token_id, name, story) => {
                let record = collection.add_story(*caller, *token_id, name.as_str(), story.as_str())?;
                Ok(Outcome::Published(record.into()))
            }
        }
    }
}

pub fn load_script(path: &Path) -> Result<Vec<Action>, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_script(&contents)
}

pub fn parse_script(input: &str) -> Result<Vec<Action>, ConfigError> {
    Ok(ron::from_str(input)?)
}

/// Run every action in order. A failing action is reported and skipped;
/// it never stops the rest of the script.
pub fn replay(
    collection: &mut StoryCollection,
    actions: &[Action],
) -> Vec<Result<Outcome, CollectionError>> {
    actions.iter().map(|action| action.apply(collection)).collect()
}
