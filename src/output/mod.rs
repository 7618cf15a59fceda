mod exports;
mod progress;
mod styling;
mod summary;
mod tables;

pub use exports::{write_report, ReportFormat};
pub use progress::PhaseProgress;
use styling::{banner, label};
pub use summary::print_summary;

/// Prints the banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        banner("📉 sentry-reliability"),
        label(env!("CARGO_PKG_VERSION")),
        label("MTTR / MTBF from Sentry issue history")
    );
}
