use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{done, heading, pending};

/// Spinner for the three collection phases: projects, issues, events and metrics.
pub struct PhaseProgress {
    pb: ProgressBar,
}

impl PhaseProgress {
    pub fn start_phase_1() -> Self {
        eprintln!("{}  {}", heading("⚙️"), heading("Phases").underlined());
        let pb = create_spinner(pending("Phase 1/3: Fetching projects").to_string());
        Self { pb }
    }

    pub fn finish_phase_1_start_phase_2(self, project_count: usize) -> Self {
        self.pb.finish_with_message(
            done(format!("Phase 1/3: Fetched {project_count} projects ✓")).to_string(),
        );
        let pb = create_spinner(pending("Phase 2/3: Fetching issues and activity").to_string());
        Self { pb }
    }

    pub fn finish_phase_2_start_phase_3(self, issue_count: usize, skip_events: bool) -> Self {
        self.pb.finish_with_message(
            done(format!("Phase 2/3: Fetched {issue_count} issues ✓")).to_string(),
        );
        let message = if skip_events {
            "Phase 3/3: Computing MTTR"
        } else {
            "Phase 3/3: Fetching events and computing metrics"
        };
        let pb = create_spinner(pending(message).to_string());
        Self { pb }
    }

    pub fn finish_phase_3(self) {
        self.pb
            .finish_with_message(done("Phase 3/3: Metrics computed ✓").to_string());
        eprintln!();
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::default_spinner().template("  {msg} {spinner}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
