//! A deployed collection: token registry and story ledger wired together.
//!
//! Built via `StoryCollection::builder()`, optionally from a RON deployment file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::core::ledger::{StoryError, StoryLedger};
use crate::core::registry::{MemoryRegistry, RegistryError, TokenRegistry};
use crate::core::sink::EventLog;
use crate::schema::interface::InterfaceId;
use crate::schema::story::{CollectorStory, CreatorStory};
use crate::schema::token::{Address, TokenId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("no creator address configured")]
    MissingCreator,
}

/// Deployment parameters, as written in a RON file:
///
/// ```ron
/// (
///     creator: "0x0000000000000000000000000000000000000001",
///     story_enabled: true,
///     name: "Example",
///     symbol: "EX",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub creator: Address,
    pub story_enabled: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl DeploymentConfig {
    pub fn load_from_ron(path: &Path) -> Result<DeploymentConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<DeploymentConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}

/// Either half of a collection call can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error(transparent)]
    Story(#[from] StoryError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A token collection with the story extension attached.
#[derive(Debug, Clone)]
pub struct StoryCollection {
    name: String,
    symbol: String,
    registry: MemoryRegistry,
    ledger: StoryLedger<EventLog>,
}

/// Builder for constructing a `StoryCollection`.
#[derive(Debug, Default)]
pub struct StoryCollectionBuilder {
    config_path: Option<PathBuf>,
    creator: Option<Address>,
    story_enabled: Option<bool>,
    name: Option<String>,
    symbol: Option<String>,
}

impl StoryCollection {
    pub fn builder() -> StoryCollectionBuilder {
        StoryCollectionBuilder::default()
    }

    /// Deploy straight from a parsed config.
    pub fn deploy(config: DeploymentConfig) -> Self {
        info!(
            creator = %config.creator,
            story_enabled = config.story_enabled,
            name = %config.name,
            "collection deployed"
        );
        Self {
            name: config.name,
            symbol: config.symbol,
            registry: MemoryRegistry::new(config.creator),
            ledger: StoryLedger::new(config.story_enabled, EventLog::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn creator(&self) -> Address {
        self.registry.creator_of()
    }

    pub fn registry(&self) -> &MemoryRegistry {
        &self.registry
    }

    /// Everything published so far, for observers.
    pub fn events(&self) -> &EventLog {
        self.ledger.sink()
    }

    pub fn mint(&mut self, count: u64, caller: Address) -> Result<Vec<TokenId>, CollectionError> {
        Ok(self.registry.mint(count, caller)?)
    }

    pub fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: TokenId,
        caller: Address,
    ) -> Result<(), CollectionError> {
        Ok(self.registry.transfer_from(from, to, token_id, caller)?)
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, CollectionError> {
        Ok(self.registry.owner_of(token_id)?)
    }

    pub fn story_enabled(&self) -> bool {
        self.ledger.story_enabled()
    }

    pub fn add_creator_story(
        &mut self,
        caller: Address,
        token_id: TokenId,
        creator_name: impl Into<String>,
        story: impl Into<String>,
    ) -> Result<CreatorStory, StoryError> {
        self.ledger
            .add_creator_story(&self.registry, caller, token_id, creator_name, story)
    }

    pub fn add_story(
        &mut self,
        caller: Address,
        token_id: TokenId,
        collector_name: impl Into<String>,
        story: impl Into<String>,
    ) -> Result<CollectorStory, StoryError> {
        self.ledger
            .add_story(&self.registry, caller, token_id, collector_name, story)
    }

    pub fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        self.ledger.supports_interface(&self.registry, interface_id)
    }
}

impl StoryCollectionBuilder {
    /// Read defaults from a RON deployment file. Values set directly on the
    /// builder take precedence.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn creator(mut self, creator: Address) -> Self {
        self.creator = Some(creator);
        self
    }

    pub fn story_enabled(mut self, enabled: bool) -> Self {
        self.story_enabled = Some(enabled);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    pub fn build(self) -> Result<StoryCollection, ConfigError> {
        let file = match self.config_path {
            Some(ref path) => Some(DeploymentConfig::load_from_ron(path)?),
            None => None,
        };

        let creator = self
            .creator
            .or_else(|| file.as_ref().map(|c| c.creator))
            .ok_or(ConfigError::MissingCreator)?;
        let story_enabled = self
            .story_enabled
            .or_else(|| file.as_ref().map(|c| c.story_enabled))
            .unwrap_or(false);
        let name = self
            .name
            .or_else(|| file.as_ref().map(|c| c.name.clone()))
            .unwrap_or_default();
        let symbol = self
            .symbol
            .or_else(|| file.as_ref().map(|c| c.symbol.clone()))
            .unwrap_or_default();

        Ok(StoryCollection::deploy(DeploymentConfig {
            creator,
            story_enabled,
            name,
            symbol,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"(
        creator: "0x0000000000000000000000000000000000000001",
        story_enabled: true,
        name: "Example",
        symbol: "EX",
    )"#;

    #[test]
    fn parse_deployment_config() {
        let config = DeploymentConfig::parse_ron(CONFIG).unwrap();
        assert_eq!(config.creator, Address::from_index(1));
        assert!(config.story_enabled);
        assert_eq!(config.name, "Example");
        assert_eq!(config.symbol, "EX");
    }

    #[test]
    fn name_and_symbol_are_optional() {
        let config = DeploymentConfig::parse_ron(
            r#"(creator: "0x0000000000000000000000000000000000000001", story_enabled: false)"#,
        )
        .unwrap();
        assert!(config.name.is_empty());
        assert!(!config.story_enabled);
    }

    #[test]
    fn bad_address_in_config_is_rejected() {
        let err = DeploymentConfig::parse_ron(r#"(creator: "0x12", story_enabled: true)"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn builder_requires_creator() {
        let err = StoryCollection::builder().story_enabled(true).build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCreator));
    }

    #[test]
    fn builder_defaults_to_disabled() {
        let collection = StoryCollection::builder()
            .creator(Address::from_index(1))
            .build()
            .unwrap();
        assert!(!collection.story_enabled());
        assert_eq!(collection.creator(), Address::from_index(1));
    }

    #[test]
    fn builder_missing_config_file_is_io_error() {
        let err = StoryCollection::builder()
            .config_file("does/not/exist.ron")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn collection_round_trip() {
        let creator = Address::from_index(1);
        let buyer = Address::from_index(2);
        let mut collection = StoryCollection::deploy(DeploymentConfig::parse_ron(CONFIG).unwrap());
        collection.mint(2, creator).unwrap();
        collection
            .transfer_from(creator, buyer, TokenId(2), creator)
            .unwrap();

        collection
            .add_creator_story(creator, TokenId(1), "XCOPY", "I AM XCOPY")
            .unwrap();
        collection
            .add_story(buyer, TokenId(2), "NOT XCOPY", "I AM NOT XCOPY")
            .unwrap();

        assert_eq!(collection.events().len(), 2);
        assert_eq!(collection.owner_of(TokenId(2)), Ok(buyer));
        assert!(collection.supports_interface(InterfaceId::STORY));
    }

    #[test]
    fn registry_errors_surface_through_collection() {
        let mut collection = StoryCollection::deploy(DeploymentConfig::parse_ron(CONFIG).unwrap());
        let err = collection.mint(1, Address::from_index(5)).unwrap_err();
        assert!(matches!(
            err,
            CollectionError::Registry(RegistryError::NotCreator(_))
        ));
    }
}
