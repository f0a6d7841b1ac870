//! Token registry: the ownership ledger stories are validated against.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::schema::interface::InterfaceId;
use crate::schema::token::{Address, TokenId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("token does not exist: {0}")]
    TokenDoesNotExist(TokenId),
    #[error("caller is not the collection creator: {0}")]
    NotCreator(Address),
    #[error("transfer of token {token_id} from incorrect owner {from}")]
    TransferFromIncorrectOwner { token_id: TokenId, from: Address },
    #[error("caller {caller} is not the owner of token {token_id}")]
    CallerNotOwner { token_id: TokenId, caller: Address },
    #[error("transfer to the zero address")]
    TransferToZeroAddress,
    #[error("minting {count} more tokens would exhaust the token id space")]
    SupplyOverflow { count: u64 },
}

/// What the story ledger needs to know about a token collection.
///
/// Every call is a fresh read. Implementations must not hand out answers
/// that were cached across ownership changes.
pub trait TokenRegistry {
    fn exists(&self, token_id: TokenId) -> bool;

    /// Current owner of `token_id`.
    fn owner_of(&self, token_id: TokenId) -> Result<Address, RegistryError>;

    /// The single creator of the whole collection.
    fn creator_of(&self) -> Address;

    /// Capabilities the base registry advertises on its own.
    fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        interface_id == InterfaceId::ERC165
    }
}

/// In-memory ERC-721 style collection with a single creator.
///
/// Token ids are assigned sequentially from 1. Only the creator may mint,
/// and only the current owner may transfer.
#[derive(Debug, Clone)]
pub struct MemoryRegistry {
    creator: Address,
    owners: FxHashMap<TokenId, Address>,
    balances: FxHashMap<Address, u64>,
    next_token_id: u64,
}

impl MemoryRegistry {
    pub fn new(creator: Address) -> Self {
        Self {
            creator,
            owners: FxHashMap::default(),
            balances: FxHashMap::default(),
            next_token_id: 1,
        }
    }

    /// Mint `count` tokens to the creator. Returns the ids minted, in order.
    pub fn mint(&mut self, count: u64, caller: Address) -> Result<Vec<TokenId>, RegistryError> {
        if caller != self.creator {
            return Err(RegistryError::NotCreator(caller));
        }

        let first = self.next_token_id;
        let next = first
            .checked_add(count)
            .ok_or(RegistryError::SupplyOverflow { count })?;
        let minted: Vec<TokenId> = (first..next).map(TokenId).collect();
        for &token_id in &minted {
            self.owners.insert(token_id, self.creator);
        }
        *self.balances.entry(self.creator).or_insert(0) += count;
        self.next_token_id = next;

        debug!(first = first, count = count, "minted tokens");
        Ok(minted)
    }

    /// Move `token_id` from `from` to `to`. `caller` must be the current owner.
    pub fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: TokenId,
        caller: Address,
    ) -> Result<(), RegistryError> {
        let owner = self.owner_of(token_id)?;
        if owner != from {
            return Err(RegistryError::TransferFromIncorrectOwner { token_id, from });
        }
        if caller != owner {
            return Err(RegistryError::CallerNotOwner { token_id, caller });
        }
        if to.is_zero() {
            return Err(RegistryError::TransferToZeroAddress);
        }

        self.owners.insert(token_id, to);
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance -= 1;
        }
        *self.balances.entry(to).or_insert(0) += 1;

        debug!(token_id = token_id.0, %from, %to, "transferred token");
        Ok(())
    }

    pub fn balance_of(&self, owner: Address) -> u64 {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u64 {
        self.next_token_id - 1
    }
}

impl TokenRegistry for MemoryRegistry {
    fn exists(&self, token_id: TokenId) -> bool {
        self.owners.contains_key(&token_id)
    }

    fn owner_of(&self, token_id: TokenId) -> Result<Address, RegistryError> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or(RegistryError::TokenDoesNotExist(token_id))
    }

    fn creator_of(&self) -> Address {
        self.creator
    }

    fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        interface_id == InterfaceId::ERC165
            || interface_id == InterfaceId::ERC721
            || interface_id == InterfaceId::ERC721_METADATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator() -> Address {
        Address::from_index(1)
    }

    #[test]
    fn mint_assigns_sequential_ids() {
        let mut registry = MemoryRegistry::new(creator());
        let first = registry.mint(3, creator()).unwrap();
        let second = registry.mint(2, creator()).unwrap();
        assert_eq!(first, vec![TokenId(1), TokenId(2), TokenId(3)]);
        assert_eq!(second, vec![TokenId(4), TokenId(5)]);
        assert_eq!(registry.total_supply(), 5);
        assert_eq!(registry.balance_of(creator()), 5);
    }

    #[test]
    fn mint_restricted_to_creator() {
        let mut registry = MemoryRegistry::new(creator());
        let err = registry.mint(1, Address::from_index(2)).unwrap_err();
        assert_eq!(err, RegistryError::NotCreator(Address::from_index(2)));
        assert_eq!(registry.total_supply(), 0);
    }

    #[test]
    fn zero_mint_is_a_no_op() {
        let mut registry = MemoryRegistry::new(creator());
        assert!(registry.mint(0, creator()).unwrap().is_empty());
        assert!(!registry.exists(TokenId(1)));
    }

    #[test]
    fn mint_past_id_space_is_rejected() {
        let mut registry = MemoryRegistry::new(creator());
        registry.mint(1, creator()).unwrap();
        let err = registry.mint(u64::MAX, creator()).unwrap_err();
        assert_eq!(err, RegistryError::SupplyOverflow { count: u64::MAX });
        assert_eq!(registry.total_supply(), 1);
        assert_eq!(registry.balance_of(creator()), 1);
        assert_eq!(registry.mint(1, creator()).unwrap(), vec![TokenId(2)]);
    }

    #[test]
    fn owner_of_missing_token() {
        let registry = MemoryRegistry::new(creator());
        assert_eq!(
            registry.owner_of(TokenId(1)),
            Err(RegistryError::TokenDoesNotExist(TokenId(1)))
        );
        assert!(!registry.exists(TokenId(0)));
    }

    #[test]
    fn transfer_moves_ownership_and_balances() {
        let mut registry = MemoryRegistry::new(creator());
        registry.mint(2, creator()).unwrap();
        let buyer = Address::from_index(2);
        registry
            .transfer_from(creator(), buyer, TokenId(2), creator())
            .unwrap();
        assert_eq!(registry.owner_of(TokenId(2)), Ok(buyer));
        assert_eq!(registry.balance_of(creator()), 1);
        assert_eq!(registry.balance_of(buyer), 1);
    }

    #[test]
    fn transfer_rejects_wrong_from() {
        let mut registry = MemoryRegistry::new(creator());
        registry.mint(1, creator()).unwrap();
        let other = Address::from_index(2);
        let err = registry
            .transfer_from(other, Address::from_index(3), TokenId(1), other)
            .unwrap_err();
        assert!(matches!(err, RegistryError::TransferFromIncorrectOwner { .. }));
    }

    #[test]
    fn transfer_rejects_non_owner_caller() {
        let mut registry = MemoryRegistry::new(creator());
        registry.mint(1, creator()).unwrap();
        let thief = Address::from_index(9);
        let err = registry
            .transfer_from(creator(), thief, TokenId(1), thief)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::CallerNotOwner {
                token_id: TokenId(1),
                caller: thief
            }
        );
        assert_eq!(registry.owner_of(TokenId(1)), Ok(creator()));
    }

    #[test]
    fn transfer_rejects_zero_address() {
        let mut registry = MemoryRegistry::new(creator());
        registry.mint(1, creator()).unwrap();
        let err = registry
            .transfer_from(creator(), Address::ZERO, TokenId(1), creator())
            .unwrap_err();
        assert_eq!(err, RegistryError::TransferToZeroAddress);
    }

    #[test]
    fn advertises_erc721_interfaces() {
        let registry = MemoryRegistry::new(creator());
        assert!(registry.supports_interface(InterfaceId::ERC165));
        assert!(registry.supports_interface(InterfaceId::ERC721));
        assert!(registry.supports_interface(InterfaceId::ERC721_METADATA));
        assert!(!registry.supports_interface(InterfaceId::STORY));
        assert!(!registry.supports_interface(InterfaceId::INVALID));
    }
}
