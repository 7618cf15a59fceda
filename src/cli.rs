use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use crate::auth::Token;
use crate::config::Config;
use crate::output::{self, ReportFormat};
use crate::providers::SentryProvider;
use crate::reliability::TimeUnit;

#[derive(Parser, Debug)]
#[command(name = "sentry-reliability")]
#[command(author, version, about = "MTTR and MTBF from Sentry issue history", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./sentry-reliability.{toml,json,yaml,yml})
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sentry auth token
    #[arg(short, long, env = "SENTRY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Sentry API base URL
    #[arg(short, long, env = "SENTRY_URL")]
    url: Option<String>,

    /// Report file, overwritten if it exists (defaults to result.xlsx or result.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report file format
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Unit for every reported duration
    #[arg(long, value_enum)]
    unit: Option<TimeUnit>,

    /// Only scan projects with this slug (repeatable)
    #[arg(short = 'P', long = "project")]
    projects: Vec<String>,

    /// Compute MTTR only, without fetching events
    #[arg(long, default_value_t = false)]
    skip_events: bool,
}

/// Settings resolved from flags, environment and configuration file.
#[derive(Debug)]
struct Settings {
    token: Token,
    base_url: String,
    output: PathBuf,
    format: ReportFormat,
    unit: TimeUnit,
    projects: Vec<String>,
    skip_events: bool,
}

impl Cli {
    fn resolve(&self, config: Config) -> Result<Settings> {
        let token = Token::require(self.token.as_deref())?;

        let projects = if self.projects.is_empty() {
            config.sentry.projects
        } else {
            self.projects.clone()
        };

        let format = self.format.unwrap_or(config.report.format);
        let output = self
            .output
            .clone()
            .or(config.report.output)
            .unwrap_or_else(|| format.default_path());

        Ok(Settings {
            token,
            base_url: self.url.clone().unwrap_or(config.sentry.base_url),
            output,
            format,
            unit: self.unit.unwrap_or(config.report.unit),
            projects,
            skip_events: self.skip_events || config.report.skip_events,
        })
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let settings = self.resolve(config)?;

        info!("Collecting Sentry reliability metrics from {}", settings.base_url);

        let provider = SentryProvider::new(&settings.base_url, settings.token, settings.projects)?;

        let report = provider
            .collect_reliability(settings.unit, settings.skip_events)
            .await
            .context("Failed to collect reliability metrics")?;

        output::write_report(&settings.output, settings.format, &report.activities)
            .with_context(|| format!("Failed to write report to {}", settings.output.display()))?;
        info!("Report written to: {}", settings.output.display());

        output::print_summary(&report, &settings.output);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sentry-reliability").chain(args.iter().copied()))
            .unwrap()
    }

    // Built directly so SENTRY_TOKEN / SENTRY_URL in the environment can't leak in
    fn cli_with_token(token: Option<&str>) -> Cli {
        Cli {
            config: None,
            token: token.map(str::to_string),
            url: None,
            output: None,
            format: None,
            unit: None,
            projects: vec![],
            skip_events: false,
        }
    }

    #[test]
    fn flags_override_config_file() {
        let cli = parse(&[
            "--token",
            "abc",
            "--url",
            "https://self-hosted.example.com/api/",
            "--output",
            "out.csv",
            "--format",
            "csv",
            "--unit",
            "minutes",
            "-P",
            "api",
            "-P",
            "web",
        ]);
        let mut config = Config::default();
        config.sentry.projects = vec!["ignored".to_string()];

        let settings = cli.resolve(config).unwrap();
        assert_eq!(settings.token.as_str(), "abc");
        assert_eq!(settings.base_url, "https://self-hosted.example.com/api/");
        assert_eq!(settings.output, PathBuf::from("out.csv"));
        assert_eq!(settings.format, ReportFormat::Csv);
        assert_eq!(settings.unit, TimeUnit::Minutes);
        assert_eq!(settings.projects, ["api", "web"]);
        assert!(!settings.skip_events);
    }

    #[test]
    fn config_file_fills_missing_flags() {
        let cli = cli_with_token(Some("abc"));
        let mut config = Config::default();
        config.report.output = Some(PathBuf::from("weekly.xlsx"));
        config.report.unit = TimeUnit::Minutes;
        config.report.skip_events = true;
        config.sentry.projects = vec!["worker".to_string()];

        let settings = cli.resolve(config).unwrap();
        assert_eq!(settings.base_url, "https://sentry.io/api/");
        assert_eq!(settings.output, PathBuf::from("weekly.xlsx"));
        assert_eq!(settings.format, ReportFormat::Xlsx);
        assert_eq!(settings.unit, TimeUnit::Minutes);
        assert_eq!(settings.projects, ["worker"]);
        assert!(settings.skip_events);
    }

    #[test]
    fn missing_token_is_fatal() {
        let cli = cli_with_token(None);

        let err = cli.resolve(Config::default()).unwrap_err();
        assert!(err.to_string().contains("SENTRY_TOKEN"));
    }

    #[test]
    fn defaults_to_xlsx_report() {
        let settings = cli_with_token(Some("abc")).resolve(Config::default()).unwrap();

        assert_eq!(settings.format, ReportFormat::Xlsx);
        assert_eq!(settings.output, PathBuf::from("result.xlsx"));
    }

    #[test]
    fn csv_format_changes_default_path() {
        let mut cli = cli_with_token(Some("abc"));
        cli.format = Some(ReportFormat::Csv);

        let settings = cli.resolve(Config::default()).unwrap();
        assert_eq!(settings.output, PathBuf::from("result.csv"));
    }

    #[test]
    fn blank_token_is_fatal() {
        assert!(cli_with_token(Some("  ")).resolve(Config::default()).is_err());
    }

    #[test]
    fn rejects_unknown_unit() {
        let result = Cli::try_parse_from(["sentry-reliability", "--unit", "hours"]);
        assert!(result.is_err());
    }
}
