mod consts;
mod options;
mod prelude;
mod types;

pub use consts::*;
pub use options::{OptionsError, YearOption, YearOptions};
pub use types::{SchoolClass, Year, year_span_for};

use crate::prelude::*;

/// Keeps a year selector consistent with a class selector.
/// The class value picks a year span (3 for lower secondary, 5 for upper
/// secondary, 5 as the default for anything else) and the year control's
/// option list is rebuilt as `1..=span` on every synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synchronizer<C, Y> {
    class: C,
    year: Y,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Unknown class value: {_0}")]
    UnknownClass(String),
    #[display(fmt = "Invalid year: {year} (must be 1-{span})")]
    InvalidYear { year: u8, span: u8 },
    #[display(fmt = "Empty class value")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Read side of the class selector. The host page owns the control; this
/// crate only ever reads its current value.
pub trait ClassControl {
    /// Currently selected class value. An empty string means nothing is
    /// selected yet.
    fn selected_value(&self) -> &str;
}

/// Write side of the year selector. The option list is replaced wholesale
/// on every synchronization; implementations must discard whatever they
/// held before.
pub trait YearControl {
    fn replace_options(&mut self, options: YearOptions);
}

impl<C, Y> Synchronizer<C, Y>
where
    C: ClassControl,
    Y: YearControl,
{
    /// Creates a synchronizer over the two controls. Taking both handles
    /// here makes "the controls exist" a structural precondition rather
    /// than a runtime lookup that can fail.
    pub const fn new(class: C, year: Y) -> Self {
        Self { class, year }
    }

    /// Performs the initial synchronization. Call once, after which the
    /// host routes every change notification from the class control to
    /// [`Self::class_changed`].
    pub fn initialize(&mut self) {
        self.synchronize();
    }

    /// Entry point for the class control's change notification
    pub fn class_changed(&mut self) {
        self.synchronize();
    }

    /// Reads the current class value and rebuilds the year control's
    /// options as exactly `1..=span` for that value. Unrecognized values
    /// silently get the default span; this never fails.
    pub fn synchronize(&mut self) {
        let options = YearOptions::for_value(self.class.selected_value());
        self.year.replace_options(options);
    }

    /// Returns the class control
    pub const fn class_control(&self) -> &C {
        &self.class
    }

    /// Returns a mutable handle to the class control, for hosts that drive
    /// selection changes through the synchronizer. Call
    /// [`Self::class_changed`] after mutating.
    pub const fn class_control_mut(&mut self) -> &mut C {
        &mut self.class
    }

    /// Returns the year control
    pub const fn year_control(&self) -> &Y {
        &self.year
    }

    /// Consumes the synchronizer, returning both controls
    pub fn into_parts(self) -> (C, Y) {
        (self.class, self.year)
    }
}

/// In-memory class selector: holds the raw form value the user picked.
/// Doubles as the reference [`ClassControl`] implementation for hosts that
/// keep form state outside any UI runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSelect {
    value: String,
}

impl ClassSelect {
    /// Creates a class selector with an initial value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Records a new selection. The host still has to deliver the change
    /// notification by calling `class_changed` on the synchronizer.
    pub fn select(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Returns the current raw value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl ClassControl for ClassSelect {
    fn selected_value(&self) -> &str {
        &self.value
    }
}

/// In-memory year selector: empty until the first synchronization, then
/// always holding the complete option set for the current class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSelect {
    options: Option<YearOptions>,
}

impl YearSelect {
    /// Creates an empty year selector
    pub const fn new() -> Self {
        Self { options: None }
    }

    /// Returns the current option set, or `None` before the first
    /// synchronization
    pub const fn options(&self) -> Option<&YearOptions> {
        self.options.as_ref()
    }

    /// Returns the selectable year values, empty before the first
    /// synchronization
    pub fn values(&self) -> Vec<u8> {
        self.options
            .as_ref()
            .map(YearOptions::values)
            .unwrap_or_default()
    }
}

impl YearControl for YearSelect {
    fn replace_options(&mut self, options: YearOptions) {
        self.options = Some(options);
    }
}
