//! Output formatting
//!
//! Human-readable rendering for plans, preflight reports, run summaries
//! and errors. Child process output never passes through here.

use std::path::Path;

use crate::core::check::CheckReport;
use crate::core::sequencer::RunReport;
use crate::core::step::Step;
use crate::error::{LockstepError, SequenceError};

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Render the ordered step list
pub fn format_plan(base_dir: &Path, steps: &[Step]) -> String {
    let mut out = format!("Base directory: {}\n", base_dir.display());
    if steps.is_empty() {
        out.push_str("  (no steps)\n");
        return out;
    }

    let name_width = steps.iter().map(|s| s.name().len()).max().unwrap_or(0);
    for (index, step) in steps.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<name_width$}  [{}]  {}\n",
            index + 1,
            step.name(),
            step.kind(),
            step.command()
        ));
    }
    out
}

/// Render a preflight report
pub fn format_check(report: &CheckReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        let prefix = if step.is_ok() {
            status::SUCCESS
        } else {
            status::ERROR
        };
        out.push_str(&format!("{prefix} {} [{}]\n", step.name, step.kind));
        if !step.dir_exists {
            out.push_str(&format!("    directory missing: {}\n", step.dir.display()));
        }
        if step.program_path.is_none() {
            out.push_str(&format!("    program not found: {}\n", step.program));
        }
    }

    if report.is_valid() {
        out.push_str(&format!(
            "\n{} All {} steps can run\n",
            status::SUCCESS,
            report.steps.len()
        ));
    } else {
        out.push_str(&format!(
            "\n{} {} problem(s) found\n",
            status::ERROR,
            report.problem_count()
        ));
    }
    out
}

/// Render the line printed after a fully successful run
pub fn format_summary(report: &RunReport) -> String {
    format!(
        "{} {} steps succeeded in {:.1}s",
        status::SUCCESS,
        report.steps.len(),
        report.elapsed.as_secs_f64()
    )
}

/// Print an error to stderr, naming the failed step when there is one
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", status::ERROR);

    if let Some(failed) = failed_step(error) {
        if failed.source.is_configuration_error() {
            eprintln!(
                "  {} step '{}' was not started; check the catalog and base directory",
                status::INFO,
                failed.name
            );
        }
    }
}

/// Process exit status for an error returned by the CLI
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(e) = error.downcast_ref::<LockstepError>() {
        return e.exit_code();
    }
    if let Some(e) = error.downcast_ref::<SequenceError>() {
        return e.exit_code();
    }
    crate::config::defaults::GENERIC_FAILURE_EXIT_CODE
}

fn failed_step(error: &anyhow::Error) -> Option<&SequenceError> {
    match error.downcast_ref::<LockstepError>() {
        Some(LockstepError::Sequence(e)) => Some(e),
        _ => error.downcast_ref::<SequenceError>(),
    }
}
