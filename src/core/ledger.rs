//! Story ledger: authorization and publication of creator and collector stories.
//!
//! The ledger keeps no per-token state. Every call reads the registry fresh,
//! runs its checks in a fixed order, and on success hands one record to the
//! sink.

use thiserror::Error;
use tracing::{debug, info};

use crate::core::registry::TokenRegistry;
use crate::core::sink::StorySink;
use crate::schema::interface::InterfaceId;
use crate::schema::story::{CollectorStory, CreatorStory, StoryEvent};
use crate::schema::token::{Address, TokenId};

/// Which authorization check a caller failed.
///
/// Diagnostic only. Both checks surface as [`StoryError::NotTokenOwner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationCheck {
    /// Caller had to be the collection creator.
    Creator,
    /// Caller had to own the token at call time.
    CurrentOwner,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    #[error("story addition is not enabled")]
    StoryNotEnabled,
    #[error("token does not exist: {0}")]
    TokenDoesNotExist(TokenId),
    #[error("caller is not token owner: {caller} for token {token_id}")]
    NotTokenOwner {
        token_id: TokenId,
        caller: Address,
        check: AuthorizationCheck,
    },
}

/// The three failure kinds, without context, for branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryErrorKind {
    StoryNotEnabled,
    TokenDoesNotExist,
    NotTokenOwner,
}

impl StoryError {
    pub fn kind(&self) -> StoryErrorKind {
        match self {
            Self::StoryNotEnabled => StoryErrorKind::StoryNotEnabled,
            Self::TokenDoesNotExist(_) => StoryErrorKind::TokenDoesNotExist,
            Self::NotTokenOwner { .. } => StoryErrorKind::NotTokenOwner,
        }
    }
}

/// Gatekeeper in front of a [`StorySink`].
#[derive(Debug, Clone)]
pub struct StoryLedger<S> {
    enabled: bool,
    sink: S,
}

impl<S: StorySink> StoryLedger<S> {
    /// `enabled` is fixed for the lifetime of the ledger.
    pub fn new(enabled: bool, sink: S) -> Self {
        Self { enabled, sink }
    }

    pub fn story_enabled(&self) -> bool {
        self.enabled
    }

    /// Publish a story written by the collection creator.
    ///
    /// Checks, first failure wins: enablement, token existence, caller is
    /// the registry's creator.
    pub fn add_creator_story<R: TokenRegistry + ?Sized>(
        &mut self,
        registry: &R,
        caller: Address,
        token_id: TokenId,
        creator_name: impl Into<String>,
        story: impl Into<String>,
    ) -> Result<CreatorStory, StoryError> {
        let creator_address = self
            .authorize(registry, caller, token_id, AuthorizationCheck::Creator)
            .inspect_err(|e| {
                debug!(token_id = token_id.0, %caller, kind = ?e.kind(), "creator story rejected");
            })?;

        let record = CreatorStory {
            token_id,
            creator_address,
            creator_name: creator_name.into(),
            story: story.into(),
        };
        info!(
            token_id = token_id.0,
            creator = %creator_address,
            story_len = record.story.len(),
            "creator story published"
        );
        self.sink.publish(StoryEvent::CreatorStory(record.clone()));
        Ok(record)
    }

    /// Publish a story written by the token's current owner.
    ///
    /// Ownership is read at call time, so authorization follows transfers
    /// immediately.
    pub fn add_story<R: TokenRegistry + ?Sized>(
        &mut self,
        registry: &R,
        caller: Address,
        token_id: TokenId,
        collector_name: impl Into<String>,
        story: impl Into<String>,
    ) -> Result<CollectorStory, StoryError> {
        let collector_address = self
            .authorize(registry, caller, token_id, AuthorizationCheck::CurrentOwner)
            .inspect_err(|e| {
                debug!(token_id = token_id.0, %caller, kind = ?e.kind(), "collector story rejected");
            })?;

        let record = CollectorStory {
            token_id,
            collector_address,
            collector_name: collector_name.into(),
            story: story.into(),
        };
        info!(
            token_id = token_id.0,
            collector = %collector_address,
            story_len = record.story.len(),
            "collector story published"
        );
        self.sink.publish(StoryEvent::CollectorStory(record.clone()));
        Ok(record)
    }

    /// True for the story extension id and anything the registry advertises.
    /// Independent of the enablement flag.
    pub fn supports_interface<R: TokenRegistry + ?Sized>(
        &self,
        registry: &R,
        interface_id: InterfaceId,
    ) -> bool {
        if interface_id == InterfaceId::INVALID {
            return false;
        }
        interface_id == InterfaceId::STORY || registry.supports_interface(interface_id)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs the shared check sequence and returns the resolved author.
    fn authorize<R: TokenRegistry + ?Sized>(
        &self,
        registry: &R,
        caller: Address,
        token_id: TokenId,
        check: AuthorizationCheck,
    ) -> Result<Address, StoryError> {
        if !self.enabled {
            return Err(StoryError::StoryNotEnabled);
        }
        if !registry.exists(token_id) {
            return Err(StoryError::TokenDoesNotExist(token_id));
        }

        let authorized = match check {
            AuthorizationCheck::Creator => registry.creator_of(),
            // The token was just seen to exist; a failure here means it
            // vanished between the two reads, which is still "does not exist".
            AuthorizationCheck::CurrentOwner => registry
                .owner_of(token_id)
                .map_err(|_| StoryError::TokenDoesNotExist(token_id))?,
        };
        if caller != authorized {
            return Err(StoryError::NotTokenOwner {
                token_id,
                caller,
                check,
            });
        }
        Ok(authorized)
    }
}
