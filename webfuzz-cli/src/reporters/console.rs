//! Colored console rendering.

use colored::Colorize;
use webfuzz::{CheckResult, CheckStatus, Report};

pub fn print(report: &Report) {
    println!();
    println!("{}", "webfuzz results".bold());
    println!(
        "  target {}  seed {}  {}",
        report.base_url.cyan(),
        report.seed.to_string().cyan(),
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    for result in &report.results {
        print_result(result);
    }

    println!();
    let summary = format!(
        "{} passed, {} failed, {} skipped ({} total)",
        report.summary.passed, report.summary.failed, report.summary.skipped, report.summary.total
    );
    if report.passed() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
        println!(
            "{}",
            format!("replay with --seed {}", report.seed).yellow()
        );
    }
}

fn print_result(result: &CheckResult) {
    match result.status {
        CheckStatus::Pass => {
            println!(
                "  {} {} ({} trials, {}ms)",
                "✓".green(),
                result.name,
                result.trials_run,
                result.duration_ms
            );
        }
        CheckStatus::Fail => {
            println!(
                "  {} {} ({} trials, {} shrink steps, {}ms)",
                "✗".bright_red(),
                result.name.red().bold(),
                result.trials_run,
                result.shrink_attempts,
                result.duration_ms
            );
            if let Some(message) = &result.error_message {
                println!("      {message}");
            }
            if let Some(counterexample) = &result.counterexample {
                println!(
                    "      {} {}",
                    "counterexample:".bold(),
                    serde_json::to_string(counterexample).unwrap_or_default()
                );
            }
        }
        CheckStatus::Skip => {
            println!(
                "  {} {} ({})",
                "-".yellow(),
                result.name.dimmed(),
                result.error_message.as_deref().unwrap_or("skipped")
            );
        }
    }
}
