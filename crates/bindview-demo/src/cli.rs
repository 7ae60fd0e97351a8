use bindview_core::{Binding, DisplayState, UpdateTrigger};
use clap::Parser;
use rust_decimal::Decimal;

use crate::error::{DemoError, Result};
use crate::logging;
use crate::render::TextView;

#[derive(Debug, Parser)]
#[command(
    name = "bindview-demo",
    about = "Apply values to a display state and print the bound view",
    version
)]
pub struct Cli {
    /// User name shown in the header.
    #[arg(long, env = "BINDVIEW_USER_NAME")]
    pub user_name: Option<String>,

    /// Post rating; 10 earns the smiley.
    #[arg(long, env = "BINDVIEW_RATING", allow_negative_numbers = true)]
    pub rating: Option<i32>,

    /// Bank deduction as an exact decimal; 1000 or more shows the warning.
    #[arg(long, env = "BINDVIEW_DEDUCTION", allow_negative_numbers = true)]
    pub deduction: Option<String>,

    /// Active flag (true/false).
    #[arg(long, env = "BINDVIEW_ACTIVE")]
    pub active: Option<bool>,

    /// Progress slider value, staged until committed.
    #[arg(long, env = "BINDVIEW_PROGRESS", allow_negative_numbers = true)]
    pub progress: Option<f64>,

    /// Free-form message line.
    #[arg(long, env = "BINDVIEW_MESSAGE")]
    pub message: Option<String>,

    /// Leave the progress edit staged instead of committing it.
    #[arg(long)]
    pub no_commit: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "BINDVIEW_LOG", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(&cli.log_level, cli.log_json)?;
    print!("{}", report(&cli)?);
    Ok(())
}

/// Drive a fresh display state from `cli` and render the outcome.
pub fn report(cli: &Cli) -> Result<String> {
    let deduction = cli
        .deduction
        .as_deref()
        .map(parse_decimal)
        .transpose()?;

    let state = DisplayState::new();
    let view = TextView::attach(&state);

    if let Some(name) = &cli.user_name {
        state.set_user_name(name.clone());
    }
    if let Some(rating) = cli.rating {
        state.set_post_rating(rating);
    }
    if let Some(amount) = deduction {
        state.set_bank_deduction(amount);
    }
    if let Some(active) = cli.active {
        state.set_is_active(active);
    }
    if let Some(message) = &cli.message {
        state.set_display_message(message.clone());
    }

    let mut progress = Binding::progress_value(&state, UpdateTrigger::Explicit);
    if let Some(value) = cli.progress {
        progress.edit(value);
        if !cli.no_commit {
            progress.commit();
        }
    }

    let mut out = view.render();
    if let Some(pending) = progress.pending() {
        out.push_str(&format!("Pending:   progress {pending} (not committed)\n"));
    }
    out.push_str("\nNotifications:\n");
    for field in view.notifications() {
        out.push_str(&format!("  {field}\n"));
    }
    Ok(out)
}

fn parse_decimal(input: &str) -> Result<Decimal> {
    input
        .trim()
        .parse::<Decimal>()
        .map_err(|source| DemoError::InvalidDecimal {
            input: input.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bindview-demo").chain(args.iter().copied()))
            .expect("valid args")
    }

    #[test]
    fn empty_run_renders_defaults() {
        let out = report(&parse(&[])).expect("report");
        assert!(out.starts_with("User:      \n"));
        assert!(out.ends_with("Notifications:\n"));
    }

    #[test]
    fn perfect_rating_and_high_deduction() {
        let out = report(&parse(&["--rating", "10", "--deduction", "1500.00"])).expect("report");
        assert!(out.contains("😊 Perfekte Bewertung!"));
        assert!(out.contains("⚠️ WARNUNG: Hohe Abbuchung!"));
        assert!(out.contains(
            "Notifications:\n  postRating\n  showSmiley\n  smileyText\n  bankDeduction\n  showWarning\n  warningText\n"
        ));
    }

    #[test]
    fn deduction_below_threshold_has_no_warning() {
        let out = report(&parse(&["--deduction", "999.99"])).expect("report");
        assert!(out.contains("Deduction: 999.99\n"));
        assert!(!out.contains("WARNUNG"));
    }

    #[test]
    fn progress_is_committed_by_default() {
        let out = report(&parse(&["--progress", "75"])).expect("report");
        assert!(out.contains("Progress:  [###############.....] 75.0%"));
        assert!(out.contains("  progressValue\n"));
        assert!(!out.contains("Pending:"));
    }

    #[test]
    fn no_commit_leaves_progress_staged() {
        let out = report(&parse(&["--progress", "75", "--no-commit"])).expect("report");
        assert!(out.contains("Progress:  [....................] 0.0%"));
        assert!(out.contains("Pending:   progress 75 (not committed)"));
        assert!(!out.contains("progressValue"));
    }

    #[test]
    fn unchanged_values_are_not_announced() {
        let out = report(&parse(&["--user-name", "", "--active", "false", "--rating", "0"]))
            .expect("report");
        assert!(out.ends_with("Notifications:\n"));
    }

    #[test]
    fn name_message_and_active() {
        let out = report(&parse(&[
            "--user-name",
            "TestUser",
            "--message",
            "Test Message",
            "--active",
            "true",
        ]))
        .expect("report");
        assert!(out.contains("User:      TestUser\n"));
        assert!(out.contains("Message:   Test Message\n"));
        assert!(out.contains("Active:    yes (#008000)\n"));
        assert!(out.contains("  userName\n  isActive\n  displayMessage\n"));
    }

    #[test]
    fn every_field_is_announced_in_declaration_order() {
        let out = report(&parse(&[
            "--user-name",
            "Ada",
            "--rating",
            "7",
            "--deduction",
            "12.50",
            "--active",
            "true",
            "--progress",
            "40",
            "--message",
            "hi",
        ]))
        .expect("report");
        assert!(out.ends_with(
            "Notifications:\n  userName\n  postRating\n  showSmiley\n  smileyText\n  \
             bankDeduction\n  showWarning\n  warningText\n  isActive\n  displayMessage\n  \
             progressValue\n"
        ));
        assert_eq!(out.lines().filter(|line| line.starts_with("User:")).count(), 1);
    }

    #[test]
    fn negative_rating_is_accepted() {
        let out = report(&parse(&["--rating", "-3"])).expect("report");
        assert!(out.contains("Rating:    -3\n"));
    }

    #[test]
    fn bad_decimal_is_reported() {
        let err = report(&parse(&["--deduction", "lots"])).unwrap_err();
        assert!(matches!(err, DemoError::InvalidDecimal { ref input, .. } if input == "lots"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
