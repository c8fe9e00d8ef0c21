//! Terminal output for suite runs

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use shopcheck::reporter::Summary;
use shopcheck::{Outcome, ScenarioRecord};
use std::time::Duration;

/// Progress and result lines on stderr
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a bar over `total` scenarios
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet || !self.term.is_term() {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Name the scenario now running
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    /// Clear the bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Write a line above the bar, or straight to the terminal
    fn line(&self, text: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.println(text),
            None => {
                let _ = self.term.write_line(text);
            }
        }
    }

    fn tag(&self, symbol: &'static str, plain: &'static str, outcome: Outcome) -> String {
        if !self.use_color {
            return plain.to_string();
        }
        let styled = style(symbol).bold();
        match outcome {
            Outcome::Passed => styled.green(),
            Outcome::Failed | Outcome::Errored => styled.red(),
            Outcome::Skipped => styled.yellow(),
        }
        .to_string()
    }

    /// Print one finished scenario; failures show even in quiet mode
    pub fn scenario(&self, record: &ScenarioRecord) {
        let tag = match record.outcome {
            Outcome::Passed => self.tag("✓", "PASS", record.outcome),
            Outcome::Failed => self.tag("✗", "FAIL", record.outcome),
            Outcome::Errored => self.tag("!", "ERROR", record.outcome),
            Outcome::Skipped => self.tag("-", "SKIP", record.outcome),
        };
        if self.quiet && !record.outcome.is_problem() {
            if let Some(ref pb) = self.progress_bar {
                pb.inc(1);
            }
            return;
        }

        let mut text = format!("{tag} {} ({} ms)", record.name, record.duration_ms);
        if let Some(error) = &record.error {
            text.push_str(&format!("\n    {error}"));
        }
        if let Some(path) = &record.screenshot {
            text.push_str(&format!("\n    screenshot: {}", path.display()));
        }
        self.line(&text);
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        self.line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };
        self.line("");
        self.line(&styled);
    }

    /// Print the closing tally
    pub fn summary(&self, counts: Summary, duration: Duration) {
        let problems = counts.failed + counts.errored;
        if self.quiet && problems == 0 {
            return;
        }
        let status = match (problems, self.use_color) {
            (0, true) => style("PASSED").green().bold().to_string(),
            (_, true) => style("FAILED").red().bold().to_string(),
            (0, false) => "PASSED".to_string(),
            (_, false) => "FAILED".to_string(),
        };
        self.line("");
        self.line(&format!(
            "{status} {} scenarios in {:.2}s ({} passed, {} failed, {} errored, {} skipped)",
            counts.total,
            duration.as_secs_f64(),
            counts.passed,
            counts.failed,
            counts.errored,
            counts.skipped
        ));
    }
}
