//! Tag Input
//!
//! The tag input state machine: a bounded [`TagCollection`], an
//! enabled/disabled [`Mode`] and the last validation error, driving a
//! [`TagObserver`] as it changes.

use std::{fmt, num::NonZeroUsize};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    errors::{ModeError, TagError},
    input::split_candidates,
    observer::{NoopObserver, TagObserver},
    tags::{collection::TagCollection, token::Token},
};

/// Whether the widget accepts mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Tags can be added and removed.
    #[default]
    Enabled,

    /// Read-only display; every mutating operation returns [`ModeError::Disabled`].
    Disabled,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Enabled => f.write_str("enabled"),
            Mode::Disabled => f.write_str("disabled"),
        }
    }
}

/// Result of offering a single token to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The token was appended.
    Added,

    /// The token was blank after trimming and was skipped.
    Ignored,

    /// The token failed validation; the collection is unchanged.
    Rejected(TagError),
}

/// Result of a [`TagInput::submit`] or [`TagInput::bulk_set`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The raw input was blank; nothing was attempted.
    EmptyInput,

    /// Each candidate token, trimmed, with what happened to it.
    Processed(SmallVec<[(String, AddOutcome); 5]>),
}

impl Submission {
    /// Tokens that were appended, in order.
    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.outcomes()
            .iter()
            .filter(|(_, outcome)| *outcome == AddOutcome::Added)
            .map(|(token, _)| token.as_str())
    }

    /// Validation errors raised while processing, in order.
    pub fn errors(&self) -> impl Iterator<Item = &TagError> {
        self.outcomes().iter().filter_map(|(_, outcome)| match outcome {
            AddOutcome::Rejected(error) => Some(error),
            AddOutcome::Added | AddOutcome::Ignored => None,
        })
    }

    /// Per-candidate outcomes; empty for [`Submission::EmptyInput`].
    pub fn outcomes(&self) -> &[(String, AddOutcome)] {
        match self {
            Submission::EmptyInput => &[],
            Submission::Processed(outcomes) => outcomes,
        }
    }
}

/// A tag input widget instance.
///
/// The caller owns the instance directly and routes user actions to it:
/// submit key or button to [`submit`](Self::submit), chip delete to
/// [`remove`](Self::remove).
#[derive(Debug)]
pub struct TagInput<O = NoopObserver> {
    tags: TagCollection,
    mode: Mode,
    last_error: Option<TagError>,
    observer: O,
}

impl TagInput<NoopObserver> {
    /// Create an enabled, empty widget with no observer.
    #[must_use]
    pub fn new(limit: NonZeroUsize) -> Self {
        Self::with_observer(limit, NoopObserver)
    }
}

impl<O: TagObserver> TagInput<O> {
    /// Create an enabled, empty widget that notifies `observer`.
    pub fn with_observer(limit: NonZeroUsize, observer: O) -> Self {
        Self {
            tags: TagCollection::new(limit),
            mode: Mode::Enabled,
            last_error: None,
            observer,
        }
    }

    /// Current tags, in insertion order.
    pub fn tags(&self) -> &[Token] {
        self.tags.as_slice()
    }

    /// The underlying collection.
    pub fn collection(&self) -> &TagCollection {
        &self.tags
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether mutations are currently rejected.
    pub fn is_disabled(&self) -> bool {
        self.mode == Mode::Disabled
    }

    /// Outcome of the most recent validation, if it failed.
    pub fn last_error(&self) -> Option<&TagError> {
        self.last_error.as_ref()
    }

    /// The message to display, or an empty string when there is none.
    pub fn last_error_message(&self) -> String {
        self.last_error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the widget, returning its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Switch modes. Stored tags are untouched.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }

        debug!(%mode, "tag input mode changed");

        self.mode = mode;
        self.observer.on_mode_changed(mode);
    }

    /// Make the widget editable.
    pub fn enable(&mut self) {
        self.set_mode(Mode::Enabled);
    }

    /// Make the widget read-only.
    pub fn disable(&mut self) {
        self.set_mode(Mode::Disabled);
    }

    /// Split raw user input on the tag delimiters and add every candidate.
    ///
    /// Blank input only sets [`TagError::EmptyInput`]. Otherwise the error
    /// is cleared first and each candidate is passed through the same rules
    /// as [`add_one`](Self::add_one), in order, so later duplicates within one
    /// submission are caught against the growing collection.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Disabled`] without touching any state while the
    /// widget is disabled.
    pub fn submit(&mut self, raw: &str) -> Result<Submission, ModeError> {
        self.ensure_enabled()?;

        if raw.trim().is_empty() {
            debug!("empty tag input submitted");
            self.set_error(Some(TagError::EmptyInput));

            return Ok(Submission::EmptyInput);
        }

        self.set_error(None);

        let outcomes = split_candidates(raw)
            .into_iter()
            .map(|candidate| {
                let outcome = self.add_candidate(&candidate);
                (candidate, outcome)
            })
            .collect();

        Ok(Submission::Processed(outcomes))
    }

    /// Add a single token.
    ///
    /// Blank tokens are ignored without touching the last error. Duplicates
    /// and tokens beyond the limit are rejected and recorded as the last
    /// error; a successful add clears it.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Disabled`] while the widget is disabled.
    pub fn add_one(&mut self, token: &str) -> Result<AddOutcome, ModeError> {
        self.ensure_enabled()?;

        Ok(self.add_candidate(token))
    }

    /// Add each token in order, keeping the tags already present.
    ///
    /// This accumulates: calling it twice with different lists keeps the
    /// tags from both calls (up to the limit).
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Disabled`] while the widget is disabled.
    pub fn bulk_set<I, S>(&mut self, tokens: I) -> Result<Submission, ModeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_enabled()?;

        let outcomes = tokens
            .into_iter()
            .map(|token| {
                let token = token.as_ref();
                (token.trim().to_string(), self.add_candidate(token))
            })
            .collect();

        Ok(Submission::Processed(outcomes))
    }

    /// Remove `tag` if present. Removing an unknown tag does nothing.
    ///
    /// The last error is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Disabled`] while the widget is disabled.
    pub fn remove(&mut self, tag: &str) -> Result<bool, ModeError> {
        self.ensure_enabled()?;

        if !self.tags.remove(tag) {
            trace!(tag, "remove ignored; tag not present");
            return Ok(false);
        }

        debug!(tag, remaining = self.tags.len(), "tag removed");
        self.observer.on_tag_removed(tag);

        Ok(true)
    }

    /// Remove every tag and clear the last error.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Disabled`] while the widget is disabled.
    pub fn clear(&mut self) -> Result<(), ModeError> {
        self.ensure_enabled()?;

        debug!(removed = self.tags.len(), "tags cleared");

        self.tags.clear();
        self.set_error(None);
        self.observer.on_view_cleared();
        self.observer.on_input_cleared();

        Ok(())
    }

    fn ensure_enabled(&self) -> Result<(), ModeError> {
        match self.mode {
            Mode::Enabled => Ok(()),
            Mode::Disabled => {
                debug!("mutation rejected; tag input is disabled");
                Err(ModeError::Disabled)
            }
        }
    }

    fn add_candidate(&mut self, raw: &str) -> AddOutcome {
        let Some(token) = Token::parse(raw) else {
            trace!("blank tag candidate ignored");
            return AddOutcome::Ignored;
        };

        let tag = token.as_str().to_string();

        match self.tags.try_add(token) {
            Ok(()) => {
                debug!(%tag, count = self.tags.len(), "tag added");

                self.set_error(None);
                self.observer.on_tag_added(&tag);
                self.observer.on_input_cleared();

                AddOutcome::Added
            }
            Err(error) => {
                debug!(%tag, %error, "tag rejected");

                self.set_error(Some(error.clone()));

                AddOutcome::Rejected(error)
            }
        }
    }

    fn set_error(&mut self, error: Option<TagError>) {
        if self.last_error == error {
            return;
        }

        self.last_error = error;

        let message = self.last_error_message();
        self.observer.on_error_changed(&message);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::observer::{EventLog, TagEvent};

    use super::*;

    fn widget(limit: usize) -> Result<TagInput<EventLog>, &'static str> {
        let limit = NonZeroUsize::new(limit).ok_or("limit must be non-zero")?;

        Ok(TagInput::with_observer(limit, EventLog::new()))
    }

    fn tags<O: TagObserver>(input: &TagInput<O>) -> Vec<&str> {
        input.tags().iter().map(Token::as_str).collect()
    }

    #[test]
    fn starts_enabled_and_empty() -> TestResult {
        let input = widget(5)?;

        assert_eq!(input.mode(), Mode::Enabled);
        assert!(input.tags().is_empty());
        assert_eq!(input.last_error(), None);
        assert_eq!(input.last_error_message(), "");

        Ok(())
    }

    #[test]
    fn add_one_appends_and_notifies() -> TestResult {
        let mut input = widget(5)?;

        assert_eq!(input.add_one("a")?, AddOutcome::Added);

        assert_eq!(tags(&input), ["a"]);
        assert_eq!(
            input.observer().events(),
            [TagEvent::TagAdded("a".to_string()), TagEvent::InputCleared]
        );

        Ok(())
    }

    #[test]
    fn add_one_ignores_blank_without_touching_error() -> TestResult {
        let mut input = widget(5)?;
        input.add_one("a")?;
        input.add_one("a")?;
        input.observer_mut().drain();

        assert_eq!(input.add_one("   ")?, AddOutcome::Ignored);

        assert_eq!(tags(&input), ["a"]);
        assert_eq!(
            input.last_error(),
            Some(&TagError::DuplicateTag("a".to_string()))
        );
        assert!(input.observer().events().is_empty());

        Ok(())
    }

    #[test]
    fn add_one_stores_trimmed_token() -> TestResult {
        let mut input = widget(5)?;

        input.add_one("  rust ")?;

        assert_eq!(tags(&input), ["rust"]);
        assert_eq!(
            input.add_one("rust")?,
            AddOutcome::Rejected(TagError::DuplicateTag("rust".to_string()))
        );

        Ok(())
    }

    #[test]
    fn success_clears_previous_error() -> TestResult {
        let mut input = widget(5)?;
        input.add_one("a")?;
        input.add_one("a")?;
        input.observer_mut().drain();

        input.add_one("b")?;

        assert_eq!(input.last_error(), None);
        assert_eq!(
            input.observer().events(),
            [
                TagEvent::ErrorChanged(String::new()),
                TagEvent::TagAdded("b".to_string()),
                TagEvent::InputCleared,
            ]
        );

        Ok(())
    }

    #[test]
    fn submit_empty_input_sets_error() -> TestResult {
        let mut input = widget(5)?;

        let submission = input.submit("  \t ")?;

        assert_eq!(submission, Submission::EmptyInput);
        assert_eq!(input.last_error(), Some(&TagError::EmptyInput));
        assert!(input.tags().is_empty());
        assert_eq!(
            input.observer().events(),
            [TagEvent::ErrorChanged("input must not be empty".to_string())]
        );

        Ok(())
    }

    #[test]
    fn submit_dedupes_within_one_submission() -> TestResult {
        let mut input = widget(5)?;

        let submission = input.submit("a;b；a")?;

        assert_eq!(tags(&input), ["a", "b"]);
        assert_eq!(submission.added().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(
            submission.errors().collect::<Vec<_>>(),
            [&TagError::DuplicateTag("a".to_string())]
        );
        assert_eq!(input.last_error(), Some(&TagError::DuplicateTag("a".to_string())));

        Ok(())
    }

    #[test]
    fn submit_clears_error_before_processing() -> TestResult {
        let mut input = widget(5)?;
        input.submit("")?;

        input.submit(",")?;

        assert_eq!(input.last_error(), None);
        assert!(input.tags().is_empty());

        Ok(())
    }

    #[test]
    fn submit_reports_outcome_per_candidate() -> TestResult {
        let mut input = widget(2)?;

        let submission = input.submit("a, ,b,c")?;

        assert_eq!(
            submission.outcomes(),
            [
                ("a".to_string(), AddOutcome::Added),
                (String::new(), AddOutcome::Ignored),
                ("b".to_string(), AddOutcome::Added),
                (
                    "c".to_string(),
                    AddOutcome::Rejected(TagError::LimitExceeded { limit: 2 })
                ),
            ]
        );

        Ok(())
    }

    #[test]
    fn bulk_set_accumulates() -> TestResult {
        let mut input = widget(5)?;

        input.bulk_set(["a", "b"])?;
        input.bulk_set(["c", "a"])?;

        assert_eq!(tags(&input), ["a", "b", "c"]);
        assert_eq!(input.last_error(), Some(&TagError::DuplicateTag("a".to_string())));

        Ok(())
    }

    #[test]
    fn remove_notifies_only_when_present() -> TestResult {
        let mut input = widget(5)?;
        input.bulk_set(["a", "b"])?;
        input.observer_mut().drain();

        assert!(input.remove("a")?);
        assert!(!input.remove("zzz")?);

        assert_eq!(tags(&input), ["b"]);
        assert_eq!(
            input.observer().events(),
            [TagEvent::TagRemoved("a".to_string())]
        );

        Ok(())
    }

    #[test]
    fn remove_keeps_last_error() -> TestResult {
        let mut input = widget(1)?;
        input.bulk_set(["a", "b"])?;

        input.remove("a")?;

        assert_eq!(input.last_error(), Some(&TagError::LimitExceeded { limit: 1 }));

        Ok(())
    }

    #[test]
    fn clear_empties_and_resets_error() -> TestResult {
        let mut input = widget(2)?;
        input.bulk_set(["a", "b", "c"])?;
        input.observer_mut().drain();

        input.clear()?;

        assert!(input.tags().is_empty());
        assert_eq!(input.last_error(), None);
        assert_eq!(
            input.observer().events(),
            [
                TagEvent::ErrorChanged(String::new()),
                TagEvent::ViewCleared,
                TagEvent::InputCleared,
            ]
        );

        Ok(())
    }

    #[test]
    fn disabled_rejects_every_mutation() -> TestResult {
        let mut input = widget(5)?;
        input.bulk_set(["a"])?;
        input.disable();
        input.observer_mut().drain();

        assert_eq!(input.submit("b"), Err(ModeError::Disabled));
        assert_eq!(input.submit(""), Err(ModeError::Disabled));
        assert_eq!(input.add_one("b"), Err(ModeError::Disabled));
        assert_eq!(input.bulk_set(["b"]), Err(ModeError::Disabled));
        assert_eq!(input.remove("a"), Err(ModeError::Disabled));
        assert_eq!(input.clear(), Err(ModeError::Disabled));

        assert_eq!(tags(&input), ["a"]);
        assert_eq!(input.last_error(), None);
        assert!(input.observer().events().is_empty());

        Ok(())
    }

    #[test]
    fn mode_changes_are_reported_once() -> TestResult {
        let mut input = widget(5)?;

        input.disable();
        input.disable();
        input.enable();

        assert_eq!(
            input.observer().events(),
            [
                TagEvent::ModeChanged(Mode::Disabled),
                TagEvent::ModeChanged(Mode::Enabled),
            ]
        );
        assert!(!input.is_disabled());

        Ok(())
    }

    #[test]
    fn reenabling_restores_mutations() -> TestResult {
        let mut input = widget(5)?;
        input.disable();
        input.set_mode(Mode::Enabled);

        assert_eq!(input.add_one("a")?, AddOutcome::Added);

        Ok(())
    }
}
