//! Tag Input prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    config::{ConfigError, DEFAULT_CHIP_TEMPLATE, TagInputConfig},
    errors::{ModeError, TagError},
    input::{normalize_delimiters, split_candidates},
    observer::{EventLog, NoopObserver, TagEvent, TagObserver},
    render::{Chip, ChipTemplate, ChipView},
    session::{Command, Flow, Session},
    tags::{collection::TagCollection, token::Token},
    widget::{AddOutcome, Mode, Submission, TagInput},
};
