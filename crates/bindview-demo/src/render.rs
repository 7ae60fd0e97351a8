#![forbid(unsafe_code)]

//! Plain-text view over a [`DisplayState`].
//!
//! The view subscribes on attach and keeps every notified field in order, so
//! the demo can show exactly what a bound UI would have refreshed.

use std::cell::RefCell;
use std::rc::Rc;

use bindview_core::{BoolToColor, DisplayState, Field, Subscription, ValueConverter};

/// Cells in the progress bar.
pub const PROGRESS_CELLS: usize = 20;

pub struct TextView {
    state: DisplayState,
    refreshed: Rc<RefCell<Vec<Field>>>,
    indicator: BoolToColor,
    _subscription: Subscription,
}

impl TextView {
    #[must_use]
    pub fn attach(state: &DisplayState) -> Self {
        let refreshed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&refreshed);
        let subscription = state.subscribe(move |field| {
            tracing::debug!(message = "view.refresh", field = field.name());
            sink.borrow_mut().push(field);
        });
        Self {
            state: state.clone(),
            refreshed,
            indicator: BoolToColor::default(),
            _subscription: subscription,
        }
    }

    /// Fields announced since the view was attached, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Field> {
        self.refreshed.borrow().clone()
    }

    #[must_use]
    pub fn render(&self) -> String {
        let state = &self.state;
        let color = self
            .indicator
            .convert(Some(&state.get(Field::IsActive)));

        let lines = [
            format!("User:      {}", state.user_name()),
            with_badge(format!("Rating:    {}", state.post_rating()), state.smiley_text()),
            with_badge(
                format!("Deduction: {}", state.bank_deduction()),
                state.warning_text(),
            ),
            format!(
                "Active:    {} ({color})",
                if state.is_active() { "yes" } else { "no" }
            ),
            format!(
                "Progress:  [{}] {:.1}%",
                progress_bar(state.progress_value()),
                state.progress_value()
            ),
            format!("Message:   {}", state.display_message()),
        ];

        let mut out = String::new();
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

fn with_badge(line: String, badge: &str) -> String {
    if badge.is_empty() {
        line
    } else {
        format!("{line}  {badge}")
    }
}

/// Clamped to 0–100 for drawing only; the record keeps the raw value.
#[must_use]
pub fn progress_bar(value: f64) -> String {
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    };
    let filled = ((clamped / 100.0) * PROGRESS_CELLS as f64).round() as usize;
    let filled = filled.min(PROGRESS_CELLS);
    format!("{}{}", "#".repeat(filled), ".".repeat(PROGRESS_CELLS - filled))
}
