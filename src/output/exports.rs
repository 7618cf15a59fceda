use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::info;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reliability::ComputedActivity;

/// Column headers of the repair time report.
pub const REPORT_HEADER: [&str; 4] = ["Issue Id", "Issue Status", "Project Name", "Time to Resolve"];

/// Name of the single worksheet in the spreadsheet report.
pub const SHEET_NAME: &str = "MTTR";

/// File format of the repair time report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Excel workbook with one `MTTR` sheet
    #[default]
    Xlsx,
    /// Comma separated values
    Csv,
}

impl ReportFormat {
    /// Report path used when neither flag nor config file names one.
    #[must_use]
    pub fn default_path(self) -> PathBuf {
        match self {
            Self::Xlsx => PathBuf::from("result.xlsx"),
            Self::Csv => PathBuf::from("result.csv"),
        }
    }
}

/// Writes the repair time report to `path`, replacing any existing file.
///
/// One row per issue that contributed to MTTR, in the order they were computed.
///
/// # Errors
///
/// Returns an error if the file can't be created or written.
pub fn write_report(path: &Path, format: ReportFormat, activities: &[ComputedActivity]) -> Result<()> {
    info!("Registered {} activities", activities.len());
    info!("Output file '{}'", path.display());

    match format {
        ReportFormat::Xlsx => {
            let mut workbook = build_workbook(activities)?;
            workbook.save(path)?;
        }
        ReportFormat::Csv => {
            let file = File::create(path)?;
            write_csv(file, activities)?;
        }
    }

    Ok(())
}

/// Cells of one report row. Durations keep six decimals in both formats.
fn report_row(activity: &ComputedActivity) -> [String; 4] {
    [
        activity.issue_id.clone(),
        activity.issue_status.clone(),
        activity.project_name.clone(),
        format!("{:.6}", activity.duration),
    ]
}

fn build_workbook(activities: &[ComputedActivity]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(REPORT_HEADER) {
        worksheet.write_string(0, col, title)?;
    }

    for (row, activity) in (1u32..).zip(activities) {
        for (col, cell) in (0u16..).zip(report_row(activity)) {
            worksheet.write_string(row, col, cell)?;
        }
    }

    Ok(workbook)
}

/// Writes the header and one CSV row per activity.
pub fn write_csv<W: Write>(output: W, activities: &[ComputedActivity]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(REPORT_HEADER)?;
    for activity in activities {
        writer.write_record(report_row(activity))?;
    }
    writer.flush()?;

    Ok(())
}
