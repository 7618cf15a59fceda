use std::fmt::Write;
use std::path::Path;

use comfy_table::{Cell, Color as TableColor};

use crate::reliability::{ComputedActivity, ReliabilityReport};

use super::styling::{count, heading, label, metric};
use super::tables::{color_coded_repair_cell, create_table, human_duration};

const SLOWEST_ISSUES: usize = 10;

/// Prints a human-readable summary of the run to stdout.
///
/// Shows an overview (dataset sizes, MTTR, MTBF, report path) followed by the
/// issues that took longest to resolve, colour coded:
/// - Green: resolved within an hour
/// - Yellow: resolved within a day
/// - Red: took longer than a day
pub fn print_summary(report: &ReliabilityReport, output_path: &Path) {
    println!("{}", render_summary(report, output_path));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", heading(emoji), heading(title).underlined());
}

fn slowest_issues(activities: &[ComputedActivity]) -> Vec<&ComputedActivity> {
    let mut sorted: Vec<_> = activities.iter().collect();
    sorted.sort_by(|a, b| b.duration.total_cmp(&a.duration));
    sorted.truncate(SLOWEST_ISSUES);
    sorted
}

fn render_summary(report: &ReliabilityReport, output_path: &Path) -> String {
    let mut output = String::new();
    let unit = report.unit;

    add_section_header(&mut output, "📊", "Overview");

    let events = report
        .total_events
        .map_or_else(|| "skipped".to_string(), |total| total.to_string());
    let mtbf = report.mtbf.map_or_else(
        || "n/a".to_string(),
        |mtbf| format!("{mtbf:.0} {unit} ({})", human_duration(mtbf, unit)),
    );

    let _ = write!(
        output,
        "  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n\n",
        label("Projects scanned:"),
        count(report.total_projects),
        label("Issues analyzed:"),
        count(report.total_issues),
        label("Events analyzed:"),
        count(events),
        label("Repair pairs:"),
        count(report.repair_pairs),
        label("MTTR:"),
        metric(format!(
            "{:.0} {unit} ({})",
            report.mttr,
            human_duration(report.mttr, unit)
        )),
        label("MTBF:"),
        metric(mtbf),
        label("Report:"),
        metric(output_path.display()),
        label("Analysis date:"),
        label(report.collected_at.format("%Y-%m-%d %H:%M UTC"))
    );

    add_section_header(&mut output, "🐢", "Slowest Issues to Resolve");

    let mut table = create_table();
    table.set_header(
        ["Issue Id", "Status", "Project", "Pairs", "Time to Resolve"]
            .iter()
            .map(|label| Cell::new(*label).fg(TableColor::Cyan))
            .collect::<Vec<_>>(),
    );

    for activity in slowest_issues(&report.activities) {
        table.add_row(vec![
            Cell::new(&activity.issue_id),
            Cell::new(&activity.issue_status),
            Cell::new(&activity.project_name),
            Cell::new(activity.pairs),
            color_coded_repair_cell(activity.duration, unit),
        ]);
    }

    let _ = writeln!(output, "{table}");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reliability::TimeUnit;
    use chrono::Utc;

    fn activity(id: &str, duration: f64) -> ComputedActivity {
        ComputedActivity {
            issue_id: id.to_string(),
            issue_status: "resolved".to_string(),
            project_name: "API".to_string(),
            duration,
            pairs: 1,
        }
    }

    fn report(activities: Vec<ComputedActivity>, mtbf: Option<f64>) -> ReliabilityReport {
        ReliabilityReport {
            collected_at: Utc::now(),
            unit: TimeUnit::Seconds,
            total_projects: 1,
            total_issues: activities.len(),
            total_events: mtbf.map(|_| 3),
            repair_pairs: activities.len(),
            mttr: 60.0,
            mtbf,
            activities,
            event_gaps: vec![],
        }
    }

    #[test]
    fn slowest_issues_sorted_descending_and_capped() {
        let activities: Vec<_> = (0..15)
            .map(|i| activity(&i.to_string(), f64::from(i)))
            .collect();

        let slowest = slowest_issues(&activities);
        assert_eq!(slowest.len(), SLOWEST_ISSUES);
        assert_eq!(slowest[0].issue_id, "14");
        assert_eq!(slowest[9].issue_id, "5");
    }

    #[test]
    fn summary_mentions_metrics_and_issues() {
        let rendered = render_summary(
            &report(vec![activity("4242", 90.0)], Some(15.0)),
            Path::new("result.xlsx"),
        );

        assert!(rendered.contains("MTTR"));
        assert!(rendered.contains("60 seconds"));
        assert!(rendered.contains("15 seconds"));
        assert!(rendered.contains("4242"));
        assert!(rendered.contains("result.xlsx"));
    }

    #[test]
    fn summary_marks_skipped_events() {
        let rendered = render_summary(&report(vec![], None), Path::new("result.xlsx"));

        assert!(rendered.contains("skipped"));
        assert!(rendered.contains("n/a"));
    }
}
