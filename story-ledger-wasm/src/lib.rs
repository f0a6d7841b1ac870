//! WASM bindings for story-ledger: powers the interactive web demo.

use wasm_bindgen::prelude::*;

use story_ledger::core::collection::{DeploymentConfig, StoryCollection};
use story_ledger::schema::interface::InterfaceId;
use story_ledger::schema::story::StoryEvent;
use story_ledger::schema::token::{Address, TokenId};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
struct StoryInput {
    caller: String,
    token_id: u64,
    name: String,
    story: String,
}

#[derive(serde::Serialize)]
struct TokenInfo {
    token_id: u64,
    owner: String,
}

#[derive(serde::Serialize)]
struct CollectionInfo {
    name: String,
    symbol: String,
    creator: String,
    story_enabled: bool,
    tokens: Vec<TokenInfo>,
}

/// Outcome of a story call, tagged so the page can branch on `kind`.
#[derive(serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum StoryResult {
    Published { event: StoryEvent },
    Rejected { kind: String, message: String },
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn parse_address(s: &str) -> Result<Address, JsError> {
    s.parse()
        .map_err(|e| JsError::new(&format!("Invalid address {s:?}: {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// StoryDemo: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct StoryDemo {
    collection: StoryCollection,
}

#[wasm_bindgen]
impl StoryDemo {
    /// Deploy a fresh collection owned by `creator`.
    #[wasm_bindgen(constructor)]
    pub fn new(creator: &str, story_enabled: bool) -> Result<StoryDemo, JsError> {
        let creator = parse_address(creator)?;
        Ok(StoryDemo {
            collection: StoryCollection::deploy(DeploymentConfig {
                creator,
                story_enabled,
                name: "Story Demo".to_string(),
                symbol: "STORY".to_string(),
            }),
        })
    }

    /// Deploy from a RON deployment config string.
    pub fn from_ron(config: &str) -> Result<StoryDemo, JsError> {
        let config = DeploymentConfig::parse_ron(config)
            .map_err(|e| JsError::new(&format!("Config parse error: {e}")))?;
        Ok(StoryDemo {
            collection: StoryCollection::deploy(config),
        })
    }

    /// Demo account `n` as an address string, for filling in the page.
    pub fn account(n: u64) -> String {
        Address::from_index(n).to_string()
    }

    /// Mint `count` tokens. Returns a JSON array of the new token ids.
    pub fn mint(&mut self, count: u64, caller: &str) -> Result<String, JsError> {
        let caller = parse_address(caller)?;
        let minted = self
            .collection
            .mint(count, caller)
            .map_err(|e| JsError::new(&format!("Mint error: {e}")))?;
        to_json(&minted)
    }

    pub fn transfer(&mut self, from: &str, to: &str, token_id: u64) -> Result<(), JsError> {
        let from = parse_address(from)?;
        let to = parse_address(to)?;
        self.collection
            .transfer_from(from, to, TokenId(token_id), from)
            .map_err(|e| JsError::new(&format!("Transfer error: {e}")))
    }

    pub fn story_enabled(&self) -> bool {
        self.collection.story_enabled()
    }

    /// Add a creator story. Input JSON shape:
    /// ```json
    /// { "caller": "0x…", "token_id": 1, "name": "XCOPY", "story": "I AM XCOPY" }
    /// ```
    /// Returns `{"status":"published",...}` or `{"status":"rejected",...}`.
    pub fn add_creator_story(&mut self, input_json: &str) -> Result<String, JsError> {
        let input: StoryInput = serde_json::from_str(input_json)
            .map_err(|e| JsError::new(&format!("Invalid story JSON: {e}")))?;
        let caller = parse_address(&input.caller)?;
        let result = match self.collection.add_creator_story(
            caller,
            TokenId(input.token_id),
            input.name,
            input.story,
        ) {
            Ok(record) => StoryResult::Published {
                event: record.into(),
            },
            Err(e) => StoryResult::Rejected {
                kind: format!("{:?}", e.kind()),
                message: e.to_string(),
            },
        };
        to_json(&result)
    }

    /// Add a collector story. Same JSON shapes as `add_creator_story`.
    pub fn add_story(&mut self, input_json: &str) -> Result<String, JsError> {
        let input: StoryInput = serde_json::from_str(input_json)
            .map_err(|e| JsError::new(&format!("Invalid story JSON: {e}")))?;
        let caller = parse_address(&input.caller)?;
        let result = match self.collection.add_story(
            caller,
            TokenId(input.token_id),
            input.name,
            input.story,
        ) {
            Ok(record) => StoryResult::Published {
                event: record.into(),
            },
            Err(e) => StoryResult::Rejected {
                kind: format!("{:?}", e.kind()),
                message: e.to_string(),
            },
        };
        to_json(&result)
    }

    /// `interface_id` as hex text, e.g. `"0x0d23ecb9"`.
    pub fn supports_interface(&self, interface_id: &str) -> Result<bool, JsError> {
        let id: InterfaceId = interface_id
            .parse()
            .map_err(|e| JsError::new(&format!("Invalid interface id: {e}")))?;
        Ok(self.collection.supports_interface(id))
    }

    /// JSON array of every published event, oldest first.
    pub fn events(&self) -> Result<String, JsError> {
        let events: Vec<&StoryEvent> = self.collection.events().iter().collect();
        to_json(&events)
    }

    /// JSON description of the collection and who owns each token.
    pub fn get_collection(&self) -> Result<String, JsError> {
        let registry = self.collection.registry();
        let tokens = (1..=registry.total_supply())
            .filter_map(|id| {
                self.collection
                    .owner_of(TokenId(id))
                    .ok()
                    .map(|owner| TokenInfo {
                        token_id: id,
                        owner: owner.to_string(),
                    })
            })
            .collect();

        let info = CollectionInfo {
            name: self.collection.name().to_string(),
            symbol: self.collection.symbol().to_string(),
            creator: self.collection.creator().to_string(),
            story_enabled: self.collection.story_enabled(),
            tokens,
        };
        to_json(&info)
    }
}
