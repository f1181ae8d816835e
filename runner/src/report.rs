use std::time::Duration;

use colored::Colorize;
use gfx_testing::TestOutcome;

/// Pass/fail tally of a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed.saturating_add(self.failed)
    }

    pub fn record(&mut self, outcome: &TestOutcome) {
        if outcome.passed() {
            self.passed = self.passed.saturating_add(1);
        } else {
            self.failed = self.failed.saturating_add(1);
        }
        self.elapsed = self.elapsed.saturating_add(outcome.elapsed);
    }
}

/// Print one outcome as soon as it is available.
pub fn print_outcome(outcome: &TestOutcome) {
    let millis = outcome.elapsed.as_secs_f64() * 1000.0;
    match &outcome.result {
        Ok(()) => println!(
            "  {} {} {}",
            "✓".green(),
            outcome.record,
            format!("({millis:.1}ms)").dimmed()
        ),
        Err(failure) => {
            println!("  {} {}", "✗".red().bold(), outcome.record.to_string().red());
            println!("      {failure}");
            if let Some(path) = &outcome.artifact {
                println!("      {} {}", "snapshot:".dimmed(), path.display());
            }
        }
    }
}

pub fn print_summary(summary: &Summary) {
    println!();
    let line = format!(
        "{} passed, {} failed, {} total in {:.2}s",
        summary.passed,
        summary.failed,
        summary.total(),
        summary.elapsed.as_secs_f64()
    );
    if summary.failed == 0 {
        println!("{}", format!("✓ {line}").green().bold());
    } else {
        println!("{}", format!("✗ {line}").red().bold());
    }
}
