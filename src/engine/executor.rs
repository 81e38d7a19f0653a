//! Terminal progress, confirmation and summaries for plan execution

use anyhow::{Result, bail};
use colored::Colorize;
use declarative::{
    Action, Address, ApplyResult, ConfirmCallback, Diagnostic, ExecuteSummary, ProgressCallback,
    Severity,
};
use std::io::IsTerminal;

use super::differ::symbol;

/// Prints one line per change as it runs
#[derive(Debug, Default)]
pub struct UiProgress {
    /// Also print unchanged and skipped entries
    pub verbose: bool,
}

impl UiProgress {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressCallback for UiProgress {
    fn on_start(&mut self, address: &Address, action: Action) {
        log::info!("{action} {address}");
        println!("  {} {} {}", symbol(action), address, "...".dimmed());
    }

    fn on_diagnostic(&mut self, address: &Address, diagnostic: &Diagnostic) {
        let label = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        println!("    {label}: {} ({address})", diagnostic.summary);
        if !diagnostic.detail.is_empty() {
            println!("      {}", diagnostic.detail.dimmed());
        }
    }

    fn on_complete(&mut self, address: &Address, result: &ApplyResult) {
        match result {
            ApplyResult::Created => println!("    {} {} created", "✓".green(), address),
            ApplyResult::Updated => println!("    {} {} updated", "✓".green(), address),
            ApplyResult::Deleted => println!("    {} {} deleted", "✓".green(), address),
            ApplyResult::Failed { .. } => println!("    {} {} failed", "✗".red(), address),
            ApplyResult::Skipped { reason } if self.verbose => {
                println!("    {} {} skipped ({})", "⊘".dimmed(), address, reason)
            }
            ApplyResult::NoChange if self.verbose => {
                println!("    {} {}", "○".dimmed(), address)
            }
            _ => {}
        }
    }
}

/// Asks on the terminal unless `--yes` was given
#[derive(Debug, Default)]
pub struct DialoguerConfirm {
    pub yes: bool,
}

impl DialoguerConfirm {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }
}

impl ConfirmCallback for DialoguerConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        if !std::io::stdin().is_terminal() {
            bail!("Confirmation needed but stdin is not a terminal; pass --yes to proceed");
        }

        println!();
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;

        if !confirmed {
            println!();
            println!("  {} Aborted", "✗".red());
        }
        Ok(confirmed)
    }
}

/// Print final summary
pub fn print_summary(summary: &ExecuteSummary, dry_run: bool) {
    println!();
    if dry_run {
        println!("  {} Dry run - no changes made", "ℹ".blue());
    } else if summary.is_success() {
        println!("  {} Configuration applied successfully!", "✓".green().bold());
    } else {
        println!("  {} Configuration applied with errors", "⚠".yellow().bold());
    }

    for line in summary_lines(summary) {
        println!("    • {line}");
    }
}

/// Bullet lines for every non-zero counter
pub fn summary_lines(summary: &ExecuteSummary) -> Vec<String> {
    let counters = [
        (summary.created, "created"),
        (summary.updated, "updated"),
        (summary.deleted, "deleted"),
        (summary.no_change, "unchanged"),
        (summary.skipped, "skipped"),
        (summary.failed, "failed"),
    ];

    let mut lines: Vec<String> = counters
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{count} {} {label}", plural(*count, "resource")))
        .collect();
    if summary.warnings > 0 {
        lines.push(format!(
            "{} {}",
            summary.warnings,
            plural(summary.warnings, "warning")
        ));
    }
    lines
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines_skip_zero_counters() {
        let summary = ExecuteSummary {
            created: 2,
            failed: 1,
            skipped: 3,
            warnings: 1,
            ..Default::default()
        };
        assert_eq!(
            summary_lines(&summary),
            vec![
                "2 resources created",
                "3 resources skipped",
                "1 resource failed",
                "1 warning",
            ]
        );
    }

    #[test]
    fn test_summary_lines_empty() {
        assert!(summary_lines(&ExecuteSummary::default()).is_empty());
    }

    #[test]
    fn test_confirm_yes_skips_prompt() {
        let mut confirm = DialoguerConfirm::new(true);
        assert!(confirm.confirm("Apply 3 change(s)?").unwrap());
    }
}
