//! Terminal reporting

use std::path::Path;
use std::time::Duration;

use colored::*;
use similar::{ChangeTag, TextDiff};

/// Outcome of processing one file that could be read and parsed
#[derive(Debug)]
pub enum FileOutcome {
    /// Nothing to report
    Unchanged,
    /// Printing did not reproduce the input, or formatting would change it
    Changed { original: String, updated: String },
}

impl FileOutcome {
    pub fn compare(original: String, updated: String) -> Self {
        if original == updated {
            FileOutcome::Unchanged
        } else {
            FileOutcome::Changed { original, updated }
        }
    }
}

/// Counts for one command run
#[derive(Debug, Default, Clone)]
pub struct Summary {
    pub files_checked: usize,
    pub changed: usize,
    pub failed: usize,
    pub written: usize,
}

impl Summary {
    pub fn is_clean(&self) -> bool {
        self.changed == 0 && self.failed == 0
    }
}

pub fn print_failure(path: &Path, message: &str) {
    println!("{} {}: {}", "error".red().bold(), path.display(), message);
}

pub fn print_changed(path: &Path, label: &str) {
    println!("{} {}", label.yellow().bold(), path.display());
}

/// Unified diff of `original` against `updated`, whitespace made visible
pub fn render_diff(path: &Path, original: &str, updated: &str) -> String {
    let diff = TextDiff::from_lines(original, updated);
    let mut rendered = format!("{}\n", format!("--- {}", path.display()).bold());
    rendered.push_str(&format!("{}\n", format!("+++ {}", path.display()).bold()));

    for group in diff.grouped_ops(3) {
        for op in group {
            for change in diff.iter_changes(&op) {
                let line = visible_whitespace(change.value());
                let line = match change.tag() {
                    ChangeTag::Delete => format!("-{line}").red().to_string(),
                    ChangeTag::Insert => format!("+{line}").green().to_string(),
                    ChangeTag::Equal => format!(" {line}"),
                };
                rendered.push_str(&line);
                rendered.push('\n');
            }
        }
    }
    rendered
}

/// Make the trailing line ending and tabs visible
fn visible_whitespace(line: &str) -> String {
    let body = line.trim_end_matches(['\n', '\r']);
    let ending = if line.ends_with("\r\n") { "␍" } else { "" };
    format!("{}{}", body.replace('\t', "→"), ending)
}

pub fn print_summary(summary: &Summary, changed_label: &str, elapsed: Duration) {
    println!("\n{}", "Summary:".bold());
    println!("  Files checked: {}", summary.files_checked);
    if summary.changed > 0 {
        println!("  {}: {}", changed_label, summary.changed.to_string().yellow());
    }
    if summary.written > 0 {
        println!("  Files written: {}", summary.written.to_string().green());
    }
    if summary.failed > 0 {
        println!("  Failed: {}", summary.failed.to_string().red());
    }
    if summary.is_clean() {
        println!("  {}", "All files OK".green());
    }
    println!("Completed in {}", format_duration(elapsed));
}

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
