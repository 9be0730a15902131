mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_element_usage, print_moiety_usage, print_run_summary, print_skipped};

/// How much the run may draw on stderr.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Banner, spinners and summary tables are shown.
    pub interactive: bool,
}

impl Context {
    /// Interactive unless `quiet` was requested or stderr is redirected.
    pub fn new(quiet: bool) -> Self {
        Self {
            interactive: !quiet && crate::io::stderr_is_tty(),
        }
    }
}
