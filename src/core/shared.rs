//! Single-writer handle for driving one collection from many threads.
//!
//! Each call holds the lock for its whole duration, so a story call sees
//! ownership exactly as it stood when the call began and no transfer can
//! interleave with its checks.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::collection::{CollectionError, StoryCollection};
use crate::core::ledger::StoryError;
use crate::schema::interface::InterfaceId;
use crate::schema::story::{CollectorStory, CreatorStory, StoryEvent};
use crate::schema::token::{Address, TokenId};

#[derive(Debug, Clone)]
pub struct SharedCollection {
    inner: Arc<Mutex<StoryCollection>>,
}

impl SharedCollection {
    pub fn new(collection: StoryCollection) -> Self {
        Self {
            inner: Arc::new(Mutex::new(collection)),
        }
    }

    pub fn mint(&self, count: u64, caller: Address) -> Result<Vec<TokenId>, CollectionError> {
        self.inner.lock().mint(count, caller)
    }

    pub fn transfer_from(
        &self,
        from: Address,
        to: Address,
        token_id: TokenId,
        caller: Address,
    ) -> Result<(), CollectionError> {
        self.inner.lock().transfer_from(from, to, token_id, caller)
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, CollectionError> {
        self.inner.lock().owner_of(token_id)
    }

    pub fn story_enabled(&self) -> bool {
        self.inner.lock().story_enabled()
    }

    pub fn add_creator_story(
        &self,
        caller: Address,
        token_id: TokenId,
        creator_name: impl Into<String>,
        story: impl Into<String>,
    ) -> Result<CreatorStory, StoryError> {
        self.inner
            .lock()
            .add_creator_story(caller, token_id, creator_name, story)
    }

    pub fn add_story(
        &self,
        caller: Address,
        token_id: TokenId,
        collector_name: impl Into<String>,
        story: impl Into<String>,
    ) -> Result<CollectorStory, StoryError> {
        self.inner
            .lock()
            .add_story(caller, token_id, collector_name, story)
    }

    pub fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        self.inner.lock().supports_interface(interface_id)
    }

    /// Copy of the event log as it stands now.
    pub fn events(&self) -> Vec<StoryEvent> {
        self.inner.lock().events().iter().cloned().collect()
    }

    /// Run `f` with exclusive access, for multi-step sequences that must not
    /// interleave with other callers.
    pub fn with<T>(&self, f: impl FnOnce(&mut StoryCollection) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}
