use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;

use study_recovery::extract;
use study_recovery::record::RecoveredSet;
use study_recovery::render::{markdown, seed};
use study_recovery::report;
use study_recovery::settings::Settings;
use study_recovery::smoke;

#[derive(Parser)]
#[command(
    name = "study_recovery",
    about = "Recover and re-integrate study-note chapters from seed files and JSON exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan seed source files and recover chapter records
    Recover {
        /// Seed files to scan (default: the configured source list)
        sources: Vec<PathBuf>,
        /// Output directory for artifacts
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Integrate a chapters JSON export into the full artifact set
    Integrate {
        /// Chapters JSON export: a list, {chapters: [...]}, {data: [...]}, or a single object
        input: PathBuf,
        /// Output directory for artifacts
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Read-only smoke test against a running instance
    Smoke {
        /// API base URL (default: the configured one)
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = Settings::load()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Recover { sources, out_dir } => {
            let paths: Vec<PathBuf> = if sources.is_empty() {
                settings.seed_sources.iter().map(PathBuf::from).collect()
            } else {
                sources
            };
            let out_dir = out_dir.unwrap_or_else(|| PathBuf::from(&settings.out_dir));

            println!("Recovering study notes from {} source(s)...", paths.len());
            let set = extract::run(&paths, &settings.book_title);
            print_outcome(&set);
            if set.notes.is_empty() {
                println!("No study notes found in the seed files.");
                return Ok(());
            }

            fs::create_dir_all(&out_dir)
                .with_context(|| format!("cannot create {}", out_dir.display()))?;
            let json_path = write_file(
                &out_dir.join("study_notes_data.json"),
                &to_pretty_json(&set)?,
            )?;
            let md_path = write_file(
                &out_dir.join("STUDY_NOTES_RECOVERY.md"),
                &markdown::render(&set, &settings.book_title, settings.chapter_count),
            )?;
            println!("Recovered notes saved to: {}", md_path);
            println!("Structured data saved to: {}", json_path);
            Ok(())
        }

        Commands::Integrate { input, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| PathBuf::from(&settings.out_dir));

            println!("Integrating {}...", input.display());
            let set = extract::run(&[input], &settings.book_title);
            print_outcome(&set);
            if set.notes.is_empty() {
                println!("No chapters found; nothing to integrate.");
                return Ok(());
            }

            fs::create_dir_all(&out_dir)
                .with_context(|| format!("cannot create {}", out_dir.display()))?;
            let mut artifacts = vec![
                write_file(
                    &out_dir.join("study_notes_data_complete.json"),
                    &to_pretty_json(&set)?,
                )?,
                write_file(
                    &out_dir.join("COMPLETE_STUDY_NOTES.md"),
                    &markdown::render(&set, &settings.book_title, settings.chapter_count),
                )?,
                write_file(
                    &out_dir.join("seed-complete-study-notes.ts"),
                    &seed::seed_script(&set.notes),
                )?,
                write_file(&out_dir.join("database_schema_check.sql"), seed::SCHEMA_SQL)?,
            ];
            let summary = report::integration_summary(
                &set,
                &settings.book_title,
                settings.chapter_count,
                &artifacts,
            );
            artifacts.push(write_file(&out_dir.join("INTEGRATION_SUMMARY.md"), &summary)?);

            for artifact in &artifacts {
                println!("  wrote {}", artifact);
            }
            println!(
                "Integration complete: {} chapters, {} rejected.",
                set.notes.len(),
                set.rejections.len()
            );
            Ok(())
        }

        Commands::Smoke { base_url } => {
            let base = base_url.unwrap_or(settings.api_base);
            println!("Smoke testing {}...", base);
            match smoke::run(&base) {
                Ok(probe) => {
                    println!("GET /study-notes: {} ({} notes)", probe.list_status, probe.count);
                    if let Some((id, status)) = probe.by_id {
                        println!("GET /study-notes/{}: {}", id, status);
                    }
                    if let Some((lo, hi)) = probe.chapter_range() {
                        println!(
                            "Chapters available: {}-{} ({} total)",
                            lo,
                            hi,
                            probe.chapter_numbers.len()
                        );
                    }
                }
                Err(err) => println!("Smoke test failed: {:#}", err),
            }
            Ok(())
        }
    }
}

fn print_outcome(set: &RecoveredSet) {
    println!(
        "Recovered {} record(s), {} rejected, {} source error(s).",
        set.notes.len(),
        set.rejections.len(),
        set.source_errors.len()
    );
    for rejection in &set.rejections {
        println!(
            "  skipped {}[{}]: {}",
            rejection.source, rejection.index, rejection.reason
        );
    }
    for err in &set.source_errors {
        println!("  source error: {}", err);
    }
    let duplicates = set.duplicate_numbers();
    if !duplicates.is_empty() {
        println!(
            "  warning: duplicate chapter numbers passed through: {}",
            duplicates.iter().map(u32::to_string).join(", ")
        );
    }
}

fn to_pretty_json(set: &RecoveredSet) -> Result<String> {
    serde_json::to_string_pretty(&set.notes).context("cannot serialize notes")
}

fn write_file(path: &Path, contents: &str) -> Result<String> {
    fs::write(path, contents).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(path.display().to_string())
}
