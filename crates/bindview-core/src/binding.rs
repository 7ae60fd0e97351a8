#![forbid(unsafe_code)]

//! View-to-record bindings.
//!
//! A [`Binding`] connects an editable view element to one settable field of
//! a [`DisplayState`]. With [`UpdateTrigger::OnChange`] every edit is pushed
//! into the record immediately. With [`UpdateTrigger::Explicit`] edits are
//! staged and only pushed by [`Binding::commit`], e.g. from an "apply"
//! button next to a slider.

use crate::display_state::DisplayState;
use crate::field::Field;

/// When edits flow from the view into the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateTrigger {
    /// Push on every edit.
    #[default]
    OnChange,
    /// Push only on [`Binding::commit`].
    Explicit,
}

/// Two-way binding between a view element and one record field.
pub struct Binding<T> {
    state: DisplayState,
    field: Field,
    trigger: UpdateTrigger,
    read: fn(&DisplayState) -> T,
    write: fn(&DisplayState, T) -> bool,
    pending: Option<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("field", &self.field)
            .field("trigger", &self.trigger)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<T: Clone> Binding<T> {
    fn new(
        state: &DisplayState,
        field: Field,
        trigger: UpdateTrigger,
        read: fn(&DisplayState) -> T,
        write: fn(&DisplayState, T) -> bool,
    ) -> Self {
        Self {
            state: state.clone(),
            field,
            trigger,
            read,
            write,
            pending: None,
        }
    }

    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    #[must_use]
    pub fn trigger(&self) -> UpdateTrigger {
        self.trigger
    }

    /// Accept an edit from the view.
    ///
    /// Returns whether the record changed, which is always `false` for an
    /// explicit binding.
    pub fn edit(&mut self, value: T) -> bool {
        match self.trigger {
            UpdateTrigger::OnChange => (self.write)(&self.state, value),
            UpdateTrigger::Explicit => {
                self.pending = Some(value);
                false
            }
        }
    }

    /// Push the staged edit into the record.
    ///
    /// Returns whether the record accepted a change. The staged edit is
    /// cleared either way.
    pub fn commit(&mut self) -> bool {
        let Some(value) = self.pending.take() else {
            return false;
        };
        let accepted = (self.write)(&self.state, value);
        tracing::debug!(
            message = "binding.commit",
            field = self.field.name(),
            accepted
        );
        accepted
    }

    /// Drop the staged edit without touching the record.
    pub fn discard(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }

    /// Value the view should display: the staged edit if any, otherwise the
    /// record's current value.
    #[must_use]
    pub fn value(&self) -> T {
        match &self.pending {
            Some(value) => value.clone(),
            None => (self.read)(&self.state),
        }
    }

    /// The record's current value, ignoring any staged edit.
    #[must_use]
    pub fn source_value(&self) -> T {
        (self.read)(&self.state)
    }
}

impl Binding<String> {
    #[must_use]
    pub fn user_name(state: &DisplayState, trigger: UpdateTrigger) -> Self {
        Self::new(
            state,
            Field::UserName,
            trigger,
            DisplayState::user_name,
            |s, v| s.set_user_name(v),
        )
    }

    #[must_use]
    pub fn display_message(state: &DisplayState, trigger: UpdateTrigger) -> Self {
        Self::new(
            state,
            Field::DisplayMessage,
            trigger,
            DisplayState::display_message,
            |s, v| s.set_display_message(v),
        )
    }
}

impl Binding<i32> {
    #[must_use]
    pub fn post_rating(state: &DisplayState, trigger: UpdateTrigger) -> Self {
        Self::new(
            state,
            Field::PostRating,
            trigger,
            DisplayState::post_rating,
            DisplayState::set_post_rating,
        )
    }
}

impl Binding<rust_decimal::Decimal> {
    #[must_use]
    pub fn bank_deduction(state: &DisplayState, trigger: UpdateTrigger) -> Self {
        Self::new(
            state,
            Field::BankDeduction,
            trigger,
            DisplayState::bank_deduction,
            DisplayState::set_bank_deduction,
        )
    }
}

impl Binding<bool> {
    #[must_use]
    pub fn is_active(state: &DisplayState, trigger: UpdateTrigger) -> Self {
        Self::new(
            state,
            Field::IsActive,
            trigger,
            DisplayState::is_active,
            DisplayState::set_is_active,
        )
    }
}

impl Binding<f64> {
    #[must_use]
    pub fn progress_value(state: &DisplayState, trigger: UpdateTrigger) -> Self {
        Self::new(
            state,
            Field::ProgressValue,
            trigger,
            DisplayState::progress_value,
            DisplayState::set_progress_value,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(state: &DisplayState) -> (Rc<RefCell<Vec<Field>>>, crate::Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = state.subscribe(move |field| sink.borrow_mut().push(field));
        (log, sub)
    }

    #[test]
    fn on_change_pushes_every_edit() {
        let state = DisplayState::new();
        let (log, _sub) = recording(&state);
        let mut name = Binding::user_name(&state, UpdateTrigger::OnChange);

        assert!(name.edit("A".to_string()));
        assert!(name.edit("Ab".to_string()));
        assert_eq!(state.user_name(), "Ab");
        assert!(!name.is_dirty());
        assert_eq!(*log.borrow(), vec![Field::UserName, Field::UserName]);
    }

    #[test]
    fn explicit_waits_for_commit() {
        let state = DisplayState::new();
        let (log, _sub) = recording(&state);
        let mut progress = Binding::progress_value(&state, UpdateTrigger::Explicit);

        assert!(!progress.edit(30.0));
        assert!(!progress.edit(60.0));
        assert_eq!(state.progress_value(), 0.0);
        assert!(log.borrow().is_empty());
        assert_eq!(progress.pending(), Some(&60.0));
        assert_eq!(progress.value(), 60.0);
        assert_eq!(progress.source_value(), 0.0);

        assert!(progress.commit());
        assert_eq!(state.progress_value(), 60.0);
        assert_eq!(*log.borrow(), vec![Field::ProgressValue]);
        assert!(!progress.is_dirty());
    }

    #[test]
    fn commit_without_pending_is_noop() {
        let state = DisplayState::new();
        let mut progress = Binding::progress_value(&state, UpdateTrigger::Explicit);
        assert!(!progress.commit());
    }

    #[test]
    fn commit_within_tolerance_is_rejected_and_cleared() {
        let state = DisplayState::new();
        state.set_progress_value(50.0);
        let mut progress = Binding::progress_value(&state, UpdateTrigger::Explicit);

        progress.edit(50.005);
        assert!(!progress.commit());
        assert!(!progress.is_dirty());
        assert_eq!(state.progress_value(), 50.0);
    }

    #[test]
    fn discard_drops_staged_edit() {
        let state = DisplayState::new();
        let mut rating = Binding::post_rating(&state, UpdateTrigger::Explicit);
        rating.edit(10);
        rating.discard();
        assert!(!rating.commit());
        assert_eq!(state.post_rating(), 0);
        assert_eq!(rating.value(), 0);
    }

    #[test]
    fn value_tracks_source_when_clean() {
        let state = DisplayState::new();
        let deduction = Binding::bank_deduction(&state, UpdateTrigger::OnChange);
        state.set_bank_deduction(dec!(1234.56));
        assert_eq!(deduction.value(), dec!(1234.56));
    }

    #[test]
    fn explicit_rating_commit_announces_dependents() {
        let state = DisplayState::new();
        let (log, _sub) = recording(&state);
        let mut rating = Binding::post_rating(&state, UpdateTrigger::Explicit);
        rating.edit(10);
        assert!(rating.commit());
        assert!(state.show_smiley());
        assert_eq!(
            *log.borrow(),
            vec![Field::PostRating, Field::ShowSmiley, Field::SmileyText]
        );
    }

    #[test]
    fn constructors_target_their_field() {
        let state = DisplayState::new();
        let t = UpdateTrigger::default();
        assert_eq!(t, UpdateTrigger::OnChange);
        assert_eq!(Binding::user_name(&state, t).field(), Field::UserName);
        assert_eq!(Binding::post_rating(&state, t).field(), Field::PostRating);
        assert_eq!(
            Binding::bank_deduction(&state, t).field(),
            Field::BankDeduction
        );
        assert_eq!(Binding::is_active(&state, t).field(), Field::IsActive);
        assert_eq!(
            Binding::progress_value(&state, t).field(),
            Field::ProgressValue
        );
        assert_eq!(
            Binding::display_message(&state, t).field(),
            Field::DisplayMessage
        );
    }

    #[test]
    fn toggle_and_message_bindings() {
        let state = DisplayState::new();
        let mut active = Binding::is_active(&state, UpdateTrigger::OnChange);
        let mut message = Binding::display_message(&state, UpdateTrigger::Explicit);

        assert!(active.edit(true));
        assert!(!active.edit(true));
        assert!(state.is_active());

        message.edit("saved".to_string());
        assert_eq!(state.display_message(), "");
        assert!(message.commit());
        assert_eq!(state.display_message(), "saved");
    }
}
