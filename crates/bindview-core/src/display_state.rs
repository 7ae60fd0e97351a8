#![forbid(unsafe_code)]

//! The display-state view-model.
//!
//! [`DisplayState`] holds six settable fields and derives four more on read.
//! Writes are equality-gated: a value equal to the stored one is dropped
//! without notification. An accepted write announces the field, then every
//! entry of [`Field::dependents`], to all listeners in registration order.
//!
//! Dependents are announced on every accepted write of their source, even
//! when the derived value itself did not change (rating 11 -> 12 still
//! announces `showSmiley` and `smileyText`). Consumers may treat the
//! announcement as a refresh signal rather than a value delta.
//!
//! # Failure Modes
//!
//! - **Listener writes back into the record**: allowed. No borrow is held
//!   while listeners run, so the nested write notifies recursively before the
//!   outer broadcast continues. A listener that writes unconditionally
//!   recurses without bound.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rust_decimal::Decimal;

use crate::field::{Field, FieldValue};
use crate::notifier::{Notifier, Subscription};

/// Rating that earns the smiley.
pub const PERFECT_RATING: i32 = 10;

/// Deduction at or above which the warning is shown.
pub const WARNING_THRESHOLD: Decimal = Decimal::ONE_THOUSAND;

/// Progress writes closer than this to the stored value are ignored.
pub const PROGRESS_TOLERANCE: f64 = 0.01;

pub const SMILEY_TEXT: &str = "😊 Perfekte Bewertung!";
pub const WARNING_TEXT: &str = "⚠️ WARNUNG: Hohe Abbuchung!";

/// A typed write to one settable field.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    UserName(String),
    PostRating(i32),
    BankDeduction(Decimal),
    IsActive(bool),
    ProgressValue(f64),
    DisplayMessage(String),
}

impl Assignment {
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Assignment::UserName(_) => Field::UserName,
            Assignment::PostRating(_) => Field::PostRating,
            Assignment::BankDeduction(_) => Field::BankDeduction,
            Assignment::IsActive(_) => Field::IsActive,
            Assignment::ProgressValue(_) => Field::ProgressValue,
            Assignment::DisplayMessage(_) => Field::DisplayMessage,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Values {
    user_name: String,
    post_rating: i32,
    bank_deduction: Decimal,
    is_active: bool,
    progress_value: f64,
    display_message: String,
}

impl Values {
    /// Store the assignment if it differs from the current value.
    fn apply(&mut self, assignment: Assignment) -> bool {
        match assignment {
            Assignment::UserName(v) => replace_if_changed(&mut self.user_name, v),
            Assignment::PostRating(v) => replace_if_changed(&mut self.post_rating, v),
            Assignment::BankDeduction(v) => replace_if_changed(&mut self.bank_deduction, v),
            Assignment::IsActive(v) => replace_if_changed(&mut self.is_active, v),
            Assignment::ProgressValue(v) => {
                if (self.progress_value - v).abs() > PROGRESS_TOLERANCE {
                    self.progress_value = v;
                    true
                } else {
                    false
                }
            }
            Assignment::DisplayMessage(v) => replace_if_changed(&mut self.display_message, v),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

struct Inner {
    values: RefCell<Values>,
    notifier: Notifier<Field>,
}

/// Observable view-model for one view session.
///
/// Cloning a `DisplayState` creates a new handle to the **same** record.
/// Listeners that need to read the record should capture a
/// [`WeakDisplayState`] to avoid keeping it alive through its own registry.
#[derive(Clone)]
pub struct DisplayState {
    inner: Rc<Inner>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayState")
            .field("values", &*self.inner.values.borrow())
            .field("listeners", &self.inner.notifier.listener_count())
            .finish()
    }
}

impl DisplayState {
    /// Empty strings, zero numbers, `isActive == false`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                values: RefCell::new(Values::default()),
                notifier: Notifier::new(),
            }),
        }
    }

    /// Register a listener for change notifications.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(Field) + 'static) -> Subscription {
        self.inner.notifier.subscribe(listener)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.notifier.listener_count()
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakDisplayState {
        WeakDisplayState {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Apply `assignment` if it changes the stored value, then notify.
    ///
    /// Returns whether the write was accepted.
    pub fn set(&self, assignment: Assignment) -> bool {
        let field = assignment.field();
        // Release the borrow before listeners run; they may read or write.
        let accepted = self.inner.values.borrow_mut().apply(assignment);
        if accepted {
            tracing::trace!(message = "display_state.set", field = field.name());
            self.inner.notifier.broadcast_all(field.affected());
        }
        accepted
    }

    pub fn set_user_name(&self, value: impl Into<String>) -> bool {
        self.set(Assignment::UserName(value.into()))
    }

    pub fn set_post_rating(&self, value: i32) -> bool {
        self.set(Assignment::PostRating(value))
    }

    pub fn set_bank_deduction(&self, value: Decimal) -> bool {
        self.set(Assignment::BankDeduction(value))
    }

    pub fn set_is_active(&self, value: bool) -> bool {
        self.set(Assignment::IsActive(value))
    }

    pub fn set_progress_value(&self, value: f64) -> bool {
        self.set(Assignment::ProgressValue(value))
    }

    pub fn set_display_message(&self, value: impl Into<String>) -> bool {
        self.set(Assignment::DisplayMessage(value.into()))
    }

    /// Read any field, settable or computed.
    #[must_use]
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::UserName => FieldValue::Text(self.user_name()),
            Field::PostRating => FieldValue::Integer(self.post_rating()),
            Field::BankDeduction => FieldValue::Decimal(self.bank_deduction()),
            Field::IsActive => FieldValue::Bool(self.is_active()),
            Field::ProgressValue => FieldValue::Float(self.progress_value()),
            Field::DisplayMessage => FieldValue::Text(self.display_message()),
            Field::ShowSmiley => FieldValue::Bool(self.show_smiley()),
            Field::SmileyText => FieldValue::Text(self.smiley_text().to_string()),
            Field::ShowWarning => FieldValue::Bool(self.show_warning()),
            Field::WarningText => FieldValue::Text(self.warning_text().to_string()),
        }
    }

    #[must_use]
    pub fn user_name(&self) -> String {
        self.inner.values.borrow().user_name.clone()
    }

    #[must_use]
    pub fn post_rating(&self) -> i32 {
        self.inner.values.borrow().post_rating
    }

    #[must_use]
    pub fn bank_deduction(&self) -> Decimal {
        self.inner.values.borrow().bank_deduction
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.values.borrow().is_active
    }

    #[must_use]
    pub fn progress_value(&self) -> f64 {
        self.inner.values.borrow().progress_value
    }

    #[must_use]
    pub fn display_message(&self) -> String {
        self.inner.values.borrow().display_message.clone()
    }

    #[must_use]
    pub fn show_smiley(&self) -> bool {
        self.post_rating() == PERFECT_RATING
    }

    #[must_use]
    pub fn smiley_text(&self) -> &'static str {
        if self.show_smiley() { SMILEY_TEXT } else { "" }
    }

    #[must_use]
    pub fn show_warning(&self) -> bool {
        self.bank_deduction() >= WARNING_THRESHOLD
    }

    #[must_use]
    pub fn warning_text(&self) -> &'static str {
        if self.show_warning() { WARNING_TEXT } else { "" }
    }
}

/// Non-owning handle to a [`DisplayState`].
#[derive(Clone, Debug)]
pub struct WeakDisplayState {
    inner: Weak<Inner>,
}

impl WeakDisplayState {
    #[must_use]
    pub fn upgrade(&self) -> Option<DisplayState> {
        self.inner.upgrade().map(|inner| DisplayState { inner })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
