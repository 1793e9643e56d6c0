use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use bhasha_export::{ExportConfig, ExportFile, ExportWriter};
use bhasha_ledger::{
    Achievement, ContributionRow, CounterAudit, ExportFilter, InMemoryLedger, LedgerError,
    LedgerSummary, LedgerWriter, ProjectionBuilder,
};
use bhasha_types::{
    AudioDuration, ContributionDraft, ContributionKind, DurationBucket, VideoDuration,
};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::cli::*;
use crate::config::SessionConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = SessionConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Run(args) => cmd_run(args, &config, &cli.format),
        Command::Buckets => cmd_buckets(&cli.format),
    }
}

/// A draft the ledger turned away, by its position in the session script.
#[derive(Debug, Serialize)]
struct Rejection {
    index: usize,
    reason: String,
}

#[derive(Debug, Serialize)]
struct SessionReport {
    accepted: usize,
    rejected: Vec<Rejection>,
    summary: LedgerSummary,
    achievements: Vec<Achievement>,
    languages: BTreeMap<String, usize>,
    /// Newest first, or every contribution in ledger order with `--all`.
    contributions: Vec<ContributionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    export: Option<ExportReport>,
}

#[derive(Debug, Serialize)]
struct ExportReport {
    path: String,
    format: String,
    records: usize,
    bytes: usize,
}

impl From<ExportFile> for ExportReport {
    fn from(file: ExportFile) -> Self {
        Self {
            path: file.path.display().to_string(),
            format: file.format.to_string(),
            records: file.record_count,
            bytes: file.bytes,
        }
    }
}

fn read_session(path: &Path) -> anyhow::Result<Vec<ContributionDraft>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading session {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("parsing session {}", path.display()))
}

fn run_session(args: RunArgs, config: &SessionConfig) -> anyhow::Result<SessionReport> {
    let drafts = read_session(&args.session)?;
    let ledger = InMemoryLedger::new(config.ledger.clone());
    if let Some(name) = &args.contributor {
        ledger.set_contributor(name)?;
    }

    let mut accepted = 0;
    let mut rejected = Vec::new();
    for (index, draft) in drafts.into_iter().enumerate() {
        match ledger.submit(draft) {
            Ok(_) => accepted += 1,
            Err(LedgerError::Validation(err)) => rejected.push(Rejection {
                index,
                reason: err.to_string(),
            }),
            Err(other) => return Err(other.into()),
        }
    }
    CounterAudit::verify(&ledger)?;
    debug!(accepted, rejected = rejected.len(), "session replayed");

    let export = match args.export {
        Some(format) => {
            let format = format.unwrap_or(config.export.format);
            let filter = ExportFilter::default()
                .with_kinds(args.types)
                .include_metadata(!args.no_metadata)
                .anonymize(args.anonymize);
            let records = ledger.export(&filter)?;
            let writer = ExportWriter::new(ExportConfig {
                directory: args.out.unwrap_or_else(|| config.export.directory.clone()),
                ..config.export.clone()
            });
            Some(writer.write_now(&records, format)?.into())
        }
        None => None,
    };

    Ok(SessionReport {
        accepted,
        rejected,
        summary: ledger.summary()?,
        achievements: ProjectionBuilder::achievements(&ledger)?,
        languages: ProjectionBuilder::language_breakdown(&ledger)?,
        contributions: if args.all {
            ProjectionBuilder::rows(&ledger)?
        } else {
            ProjectionBuilder::recent(&ledger, config.recent_limit)?
                .iter()
                .map(ContributionRow::from)
                .collect()
        },
        export,
    })
}

fn cmd_run(args: RunArgs, config: &SessionConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let report = run_session(args, config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn print_report(report: &SessionReport) {
    for rejection in &report.rejected {
        println!("{} draft #{}: {}", "✗".red().bold(), rejection.index, rejection.reason);
    }
    println!(
        "{} {} accepted, {} rejected",
        "✓".green().bold(),
        report.accepted.to_string().bold(),
        report.rejected.len()
    );

    let s = &report.summary;
    println!("\nContributor: {}", s.contributor.bold());
    println!(
        "  Audio: {:.2} h ({} recordings)   Video: {:.2} h ({} videos)",
        s.audio_hours, s.audio_records, s.video_hours, s.video_records
    );
    println!(
        "  Text: {} records ({} words)   Images: {}",
        s.text_records, s.total_words, s.image_records
    );
    println!(
        "  Audio+Video: {:.2} h  {}",
        s.audio_video_hours,
        percent(s.audio_video_progress).cyan()
    );
    println!(
        "  Text+Image: {} records  {}",
        s.text_image_records,
        percent(s.text_image_progress).cyan()
    );
    println!("  Overall: {}", percent(s.overall_progress).cyan().bold());

    if !report.achievements.is_empty() {
        println!("\nAchievements:");
        for achievement in &report.achievements {
            println!("  {} {}", "★".yellow(), achievement);
        }
    }

    if !report.languages.is_empty() {
        println!("\nLanguages:");
        for (language, count) in &report.languages {
            println!("  {:<12} {}", language, count);
        }
    }

    if !report.contributions.is_empty() {
        println!("\nContributions:");
        for row in &report.contributions {
            println!(
                "  {}  {:<6} {:<12} {}  {}",
                row.short_id.dimmed(),
                row.kind.title(),
                row.language,
                row.timestamp,
                row.details
            );
        }
    }

    if let Some(export) = &report.export {
        println!(
            "\n{} Exported {} records to {} ({} bytes)",
            "✓".green().bold(),
            export.records,
            export.path.bold(),
            export.bytes
        );
    }
}

#[derive(Debug, Serialize)]
struct BucketRow {
    label: &'static str,
    hours: f64,
    default: bool,
}

fn bucket_rows<B: DurationBucket>() -> Vec<BucketRow> {
    B::TABLE
        .iter()
        .map(|bucket| BucketRow {
            label: bucket.label(),
            hours: bucket.hours(),
            default: *bucket == B::DEFAULT,
        })
        .collect()
}

fn cmd_buckets(format: &OutputFormat) -> anyhow::Result<()> {
    let audio = bucket_rows::<AudioDuration>();
    let video = bucket_rows::<VideoDuration>();
    match format {
        OutputFormat::Json => {
            let tables = serde_json::json!({ "audio": audio, "video": video });
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }
        OutputFormat::Text => {
            let tables = [(ContributionKind::Audio, &audio), (ContributionKind::Video, &video)];
            for (kind, rows) in tables {
                println!("{}", kind.title().bold());
                for row in rows {
                    let marker = if row.default {
                        " (default)".dimmed().to_string()
                    } else {
                        String::new()
                    };
                    println!("  {:<14} {:.2} h{}", row.label, row.hours, marker);
                }
            }
        }
    }
    Ok(())
}
