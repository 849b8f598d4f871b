//! Tags

pub mod collection;
pub mod token;
