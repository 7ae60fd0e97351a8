#![forbid(unsafe_code)]

//! Observable display state for a single view session.
//!
//! - [`DisplayState`]: the view-model record. Six settable fields, four
//!   computed fields, synchronous change notification.
//! - [`Notifier`] / [`Subscription`]: ordered listener registry with RAII
//!   unsubscription.
//! - [`Binding`]: pushes edits from a view into the record, either on every
//!   change or only on an explicit [`Binding::commit`].
//! - [`BoolToColor`]: one-way conversion of the active flag to an indicator
//!   color.
//!
//! # Invariants
//!
//! 1. A write that is equal to the stored value (per the field's equality
//!    rule) changes nothing and notifies nobody.
//! 2. An accepted write notifies the field itself first, then its dependent
//!    computed fields in declaration order.
//! 3. Listeners are invoked in registration order.
//! 4. Computed fields are derived on read and can never disagree with their
//!    source field.

pub mod binding;
pub mod convert;
pub mod display_state;
pub mod error;
pub mod field;
pub mod notifier;

pub use binding::{Binding, UpdateTrigger};
pub use convert::{BoolToColor, Rgb, ValueConverter};
pub use display_state::{
    Assignment, DisplayState, PERFECT_RATING, PROGRESS_TOLERANCE, SMILEY_TEXT, WARNING_TEXT,
    WARNING_THRESHOLD, WeakDisplayState,
};
pub use error::{ConvertError, FieldParseError};
pub use field::{Field, FieldValue};
pub use notifier::{Notifier, Subscription, SubscriptionId};
