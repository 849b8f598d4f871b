//! Chip rendering
//!
//! A headless implementation of the rendering side of the tag input: it keeps
//! one rendered chip per tag as markup, plus the error text, in step with the
//! widget's notifications.

use html_escape::encode_quoted_attribute;
use smallvec::SmallVec;

use crate::{config::TagInputConfig, observer::TagObserver, widget::Mode};

/// Placeholder replaced by the escaped tag value.
pub const VALUE_PLACEHOLDER: &str = "{{value}}";

/// Placeholder replaced by the chip CSS classes.
pub const CLASS_PLACEHOLDER: &str = "{{class}}";

/// Class added to every chip while the widget is disabled.
pub const DISABLED_CLASS: &str = "tag-item--disabled";

/// Chip markup template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipTemplate {
    template: String,
    tag_class: Option<String>,
}

impl ChipTemplate {
    /// Build a template from the widget configuration.
    #[must_use]
    pub fn from_config(config: &TagInputConfig) -> Self {
        Self {
            template: config.chip_template.clone(),
            tag_class: config.tag_class.clone(),
        }
    }

    /// Render one chip for `value`.
    ///
    /// Placeholders are filled in one pass over the template, so a value or
    /// class containing `{{value}}` or `{{class}}` is emitted literally.
    pub fn render(&self, value: &str, mode: Mode) -> String {
        let mut classes = self
            .tag_class
            .as_deref()
            .map(|class| encode_quoted_attribute(class).into_owned())
            .unwrap_or_default();

        if mode == Mode::Disabled {
            if !classes.is_empty() {
                classes.push(' ');
            }
            classes.push_str(DISABLED_CLASS);
        }

        let value = encode_quoted_attribute(value);

        let mut markup = String::with_capacity(self.template.len() + value.len() + classes.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            let (head, tail) = rest.split_at(start);
            markup.push_str(head);

            rest = if let Some(after) = tail.strip_prefix(VALUE_PLACEHOLDER) {
                markup.push_str(&value);
                after
            } else if let Some(after) = tail.strip_prefix(CLASS_PLACEHOLDER) {
                markup.push_str(&classes);
                after
            } else {
                markup.push('{');
                tail.get(1..).unwrap_or_default()
            };
        }

        markup.push_str(rest);
        markup
    }
}

/// A rendered chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    /// The tag the chip displays.
    pub value: String,

    /// Rendered markup.
    pub markup: String,
}

/// Observer that maintains the rendered chips and error message.
#[derive(Debug, Clone)]
pub struct ChipView {
    template: ChipTemplate,
    chips: SmallVec<[Chip; 5]>,
    error: String,
    mode: Mode,
    input_cleared: bool,
}

impl ChipView {
    /// Create an empty view rendering chips with `template`.
    #[must_use]
    pub fn new(template: ChipTemplate) -> Self {
        Self {
            template,
            chips: SmallVec::new(),
            error: String::new(),
            mode: Mode::Enabled,
            input_cleared: false,
        }
    }

    /// Chips currently shown, in insertion order.
    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    /// The error message currently shown; empty when hidden.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Whether the input source was asked to clear since the last call to
    /// [`take_input_cleared`](Self::take_input_cleared).
    pub fn take_input_cleared(&mut self) -> bool {
        std::mem::take(&mut self.input_cleared)
    }

    /// All chip markup concatenated, as it would appear in the view area.
    pub fn html(&self) -> String {
        self.chips.iter().map(|chip| chip.markup.as_str()).collect()
    }
}

impl TagObserver for ChipView {
    fn on_tag_added(&mut self, tag: &str) {
        self.chips.push(Chip {
            value: tag.to_string(),
            markup: self.template.render(tag, self.mode),
        });
    }

    fn on_tag_removed(&mut self, tag: &str) {
        self.chips.retain(|chip| chip.value != tag);
    }

    fn on_input_cleared(&mut self) {
        self.input_cleared = true;
    }

    fn on_view_cleared(&mut self) {
        self.chips.clear();
    }

    fn on_error_changed(&mut self, message: &str) {
        message.clone_into(&mut self.error);
    }

    fn on_mode_changed(&mut self, mode: Mode) {
        self.mode = mode;

        for chip in &mut self.chips {
            chip.markup = self.template.render(&chip.value, mode);
        }
    }
}
