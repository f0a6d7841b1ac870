pub mod collection;
pub mod ledger;
pub mod registry;
pub mod script;
pub mod shared;
pub mod sink;
