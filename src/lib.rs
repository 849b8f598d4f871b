//! Tag Input
//!
//! Tag Input is the state machine behind a free-text tag field: it splits raw
//! input on delimiters, deduplicates, enforces a maximum tag count and keeps
//! a rendering collaborator in sync through an observer.

pub mod config;
pub mod errors;
pub mod input;
pub mod observer;
pub mod prelude;
pub mod render;
pub mod session;
pub mod tags;
pub mod widget;
