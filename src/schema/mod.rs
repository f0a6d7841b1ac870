pub mod interface;
pub mod story;
pub mod token;
