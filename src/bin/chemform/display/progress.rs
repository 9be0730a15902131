use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Numbered steps on stderr, each with a live indicator while it runs.
struct StepReporter {
    bar: Option<ProgressBar>,
    start: Instant,
    step: u8,
    total_steps: u8,
    step_start: Instant,
    formulas: u64,
}

impl StepReporter {
    fn new(total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            start: now,
            step: 0,
            total_steps,
            step_start: now,
            formulas: 0,
        }
    }

    fn begin(&mut self, bar: ProgressBar, description: &str) {
        self.clear();
        self.step += 1;
        self.step_start = Instant::now();

        bar.set_message(format!(
            "[{}/{}] {}",
            self.step, self.total_steps, description
        ));
        bar.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(bar);
    }

    fn spin(&mut self, description: &str) {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}...") {
            bar.set_style(style.tick_chars(SPINNER_TICKS));
        }
        self.begin(bar, description);
    }

    fn count(&mut self, description: &str, len: usize) {
        let bar = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("  {spinner:.cyan} {msg} {bar:24.cyan/blue} {pos}/{len}")
        {
            bar.set_style(style.tick_chars(SPINNER_TICKS).progress_chars("█▉░"));
        }
        self.formulas = self.formulas.max(len as u64);
        self.begin(bar, description);
    }

    fn tick(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn complete_step(&mut self, description: &str, substeps: &[String]) {
        self.clear();

        let elapsed = self.step_start.elapsed();
        let mut stderr = io::stderr().lock();

        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            elapsed.as_secs_f64()
        );
        for substep in substeps {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {substep}");
        }
    }

    fn finish(mut self, summary: &str) {
        self.clear();
        print_footer(summary, self.formulas, self.start.elapsed());
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn print_footer(summary: &str, formulas: u64, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let timing = if formulas > 0 && secs > 0.0 {
        format!("{formulas} in {secs:.2}s ({:.0}/s)", formulas as f64 / secs)
    } else {
        format!("Total: {secs:.2}s")
    };

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr);
    let _ = writeln!(
        stderr,
        "  \x1b[2m╺━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╸\x1b[0m"
    );
    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "  \x1b[32m✓\x1b[0m {summary:<24} {timing:>30}");
    let _ = writeln!(stderr);
}

/// Step reporting that is a no-op when stderr is not interactive.
pub struct Progress {
    reporter: Option<StepReporter>,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        Self {
            reporter: interactive.then(|| StepReporter::new(total_steps)),
        }
    }

    /// Starts a step of unknown length.
    pub fn step(&mut self, description: &str) {
        if let Some(r) = &mut self.reporter {
            r.spin(description);
        }
    }

    /// Starts a step over `len` formulas, advanced by [`Progress::tick`].
    pub fn step_over(&mut self, description: &str, len: usize) {
        if let Some(r) = &mut self.reporter {
            r.count(description, len);
        }
    }

    pub fn tick(&self) {
        if let Some(r) = &self.reporter {
            r.tick();
        }
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[String]) {
        if let Some(r) = &mut self.reporter {
            r.complete_step(description, substeps);
        }
    }

    pub fn finish(self, summary: &str) {
        if let Some(r) = self.reporter {
            r.finish(summary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_progress_ignores_every_call() {
        let mut progress = Progress::new(false, 3);
        progress.step_over("Parsing formulas", 2);
        progress.tick();
        progress.complete_step("Parsing formulas", &["2 compositions".to_string()]);
        assert!(progress.reporter.is_none());
        progress.finish("done");
    }

    #[test]
    fn counted_steps_record_the_batch_size() {
        let mut reporter = StepReporter::new(3);
        reporter.count("Parsing formulas", 5);
        reporter.tick();
        assert_eq!(reporter.step, 1);
        assert_eq!(reporter.formulas, 5);
        assert_eq!(reporter.bar.as_ref().map(ProgressBar::position), Some(1));
        reporter.clear();
        assert!(reporter.bar.is_none());
    }
}
