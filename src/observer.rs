//! Tag Observer
//!
//! The rendering collaborator of a [`TagInput`](crate::widget::TagInput).

use smallvec::SmallVec;

use crate::widget::Mode;

/// Observer trait notified of every visible change to a tag input.
///
/// The widget calls these hooks synchronously, after its own state has been
/// updated, so an observer reading back through the widget always sees the
/// post-change state. Implementations typically keep a rendered view in sync:
/// append a chip on [`on_tag_added`](Self::on_tag_added), drop it on
/// [`on_tag_removed`](Self::on_tag_removed), empty the view on
/// [`on_view_cleared`](Self::on_view_cleared) and show the current message on
/// [`on_error_changed`](Self::on_error_changed).
///
/// # Zero Overhead
///
/// Widgets built without an observer use [`NoopObserver`], and the calls are
/// optimized away via monomorphization.
pub trait TagObserver {
    /// Called after `tag` was appended to the collection.
    fn on_tag_added(&mut self, tag: &str);

    /// Called after `tag` was removed from the collection.
    fn on_tag_removed(&mut self, tag: &str);

    /// Called when the raw input source should be emptied.
    ///
    /// Fired after every successful add and on clear.
    fn on_input_cleared(&mut self) {}

    /// Called after the collection was emptied; all chips should go.
    fn on_view_cleared(&mut self);

    /// Called when the displayed error message changes.
    ///
    /// An empty `message` means the error should be hidden.
    fn on_error_changed(&mut self, message: &str);

    /// Called when the widget switches between enabled and disabled.
    fn on_mode_changed(&mut self, _mode: Mode) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TagObserver for NoopObserver {
    fn on_tag_added(&mut self, _tag: &str) {}

    fn on_tag_removed(&mut self, _tag: &str) {}

    fn on_view_cleared(&mut self) {}

    fn on_error_changed(&mut self, _message: &str) {}
}

impl<O: TagObserver + ?Sized> TagObserver for &mut O {
    fn on_tag_added(&mut self, tag: &str) {
        (**self).on_tag_added(tag);
    }

    fn on_tag_removed(&mut self, tag: &str) {
        (**self).on_tag_removed(tag);
    }

    fn on_input_cleared(&mut self) {
        (**self).on_input_cleared();
    }

    fn on_view_cleared(&mut self) {
        (**self).on_view_cleared();
    }

    fn on_error_changed(&mut self, message: &str) {
        (**self).on_error_changed(message);
    }

    fn on_mode_changed(&mut self, mode: Mode) {
        (**self).on_mode_changed(mode);
    }
}

/// Fan notifications out to two observers, first `.0` then `.1`.
impl<A: TagObserver, B: TagObserver> TagObserver for (A, B) {
    fn on_tag_added(&mut self, tag: &str) {
        self.0.on_tag_added(tag);
        self.1.on_tag_added(tag);
    }

    fn on_tag_removed(&mut self, tag: &str) {
        self.0.on_tag_removed(tag);
        self.1.on_tag_removed(tag);
    }

    fn on_input_cleared(&mut self) {
        self.0.on_input_cleared();
        self.1.on_input_cleared();
    }

    fn on_view_cleared(&mut self) {
        self.0.on_view_cleared();
        self.1.on_view_cleared();
    }

    fn on_error_changed(&mut self, message: &str) {
        self.0.on_error_changed(message);
        self.1.on_error_changed(message);
    }

    fn on_mode_changed(&mut self, mode: Mode) {
        self.0.on_mode_changed(mode);
        self.1.on_mode_changed(mode);
    }
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// A tag was appended.
    TagAdded(String),

    /// A tag was removed.
    TagRemoved(String),

    /// The raw input should be emptied.
    InputCleared,

    /// Every chip should be removed.
    ViewCleared,

    /// The error message changed; empty when cleared.
    ErrorChanged(String),

    /// The widget was enabled or disabled.
    ModeChanged(Mode),
}

/// Observer that records every notification as a [`TagEvent`].
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: SmallVec<[TagEvent; 8]>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[TagEvent] {
        &self.events
    }

    /// Take every recorded event, leaving the log empty.
    pub fn drain(&mut self) -> SmallVec<[TagEvent; 8]> {
        std::mem::take(&mut self.events)
    }
}

impl TagObserver for EventLog {
    fn on_tag_added(&mut self, tag: &str) {
        self.events.push(TagEvent::TagAdded(tag.to_string()));
    }

    fn on_tag_removed(&mut self, tag: &str) {
        self.events.push(TagEvent::TagRemoved(tag.to_string()));
    }

    fn on_input_cleared(&mut self) {
        self.events.push(TagEvent::InputCleared);
    }

    fn on_view_cleared(&mut self) {
        self.events.push(TagEvent::ViewCleared);
    }

    fn on_error_changed(&mut self, message: &str) {
        self.events.push(TagEvent::ErrorChanged(message.to_string()));
    }

    fn on_mode_changed(&mut self, mode: Mode) {
        self.events.push(TagEvent::ModeChanged(mode));
    }
}
