use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use voicekit::audio::FfmpegTool;
use voicekit::cli::{Cli, Commands};
use voicekit::config::Config;
use voicekit::converter::{self, ConvertOutcome};
use voicekit::renamer::{self, RenameOutcome};
use voicekit::report::{self, ReportDocument, NO_SUITABLE_MAPPING};
use voicekit::splitter::{self, SplitOptions, SplitOutcome};
use voicekit::{checker, cleaner, target};

const FOLDER_PROMPT: &str = "Enter the folder path";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("voicekit=debug,voicekit_common=debug,info")
    } else {
        EnvFilter::new("voicekit=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config = Config::load().context("failed to load config")?;
    let mappings_dir = config.resolve_mappings_dir(cli.mappings.as_deref());
    tracing::debug!("mappings directory: {}", mappings_dir.display());

    match cli.command {
        Commands::Check { folder, mapping, layout, json } => {
            println!("🔎 voicekit - naming check\n");

            let folder = target::resolve_target(folder.as_deref(), FOLDER_PROMPT)?;
            let kinds = target::resolve_mapping_kinds(&mapping)?;
            let request = checker::AnalysisRequest { folder, kinds, layout };

            let report = checker::run_check(&request, &mappings_dir)
                .with_context(|| format!("check failed for {}", request.folder.display()))?;
            print!("{}", report::render_reconciliation(&report));

            if let Some(path) = json {
                ReportDocument::new(&request.folder, None, Some(&report)).write_to(&path)?;
                println!("✔ Report saved: {}", path.display());
            }
        }

        Commands::Auto { folder, json } => {
            println!("🔎 voicekit - automatic naming check\n");

            let folder = target::resolve_target(folder.as_deref(), FOLDER_PROMPT)?;
            let analysis = checker::run_auto(&folder, &mappings_dir)
                .with_context(|| format!("automatic check failed for {}", folder.display()))?;

            match (&analysis.selection.best, &analysis.report) {
                (Some(best), Some(found)) => {
                    println!("{}\n", report::render_best_mapping(best));
                    print!("{}", report::render_reconciliation(found));
                }
                _ => println!("{}", NO_SUITABLE_MAPPING),
            }

            if let Some(path) = json {
                ReportDocument::new(&folder, Some(&analysis.selection), analysis.report.as_ref())
                    .write_to(&path)?;
                println!("✔ Report saved: {}", path.display());
            }
        }

        Commands::Rename { folder, table, sheet, dry_run } => {
            println!("✏️  voicekit - rename{}\n", if dry_run { " (dry run)" } else { "" });

            let folder = target::resolve_target(folder.as_deref(), FOLDER_PROMPT)?;
            let table_path = table.unwrap_or_else(|| config.resolve_correction_table(&mappings_dir));

            println!("[1/2] Loading correction table...");
            let corrections = renamer::load_correction_table(&table_path, sheet.as_deref())
                .with_context(|| format!("could not load {}", table_path.display()))?;
            println!("✔ {} corrections loaded\n", corrections.len());

            println!("[2/2] Renaming files...");
            let summary = renamer::rename_files(&folder, &corrections, dry_run)?;
            for outcome in &summary.outcomes {
                match outcome {
                    RenameOutcome::Renamed { from, to } => println!("Renamed: \"{}\" -> \"{}\"", from, to),
                    RenameOutcome::Failed { file, reason } => println!("✗ {}: {}", file, reason),
                }
            }

            println!("\nRenaming Complete: {} files updated.", summary.renamed_count());
        }

        Commands::Clean { folder, patterns, dry_run, yes } => {
            println!("🧹 voicekit - cleanup{}\n", if dry_run { " (dry run)" } else { "" });

            let folder = target::resolve_target(folder.as_deref(), FOLDER_PROMPT)?;
            let pattern_path = patterns.unwrap_or_else(|| config.resolve_deletion_patterns(&mappings_dir));
            let patterns = cleaner::load_patterns(&pattern_path)?;

            let candidates = cleaner::find_candidates(&folder, &patterns)?;
            for candidate in &candidates {
                println!("  {} (pattern '{}')", candidate.entry.file_name, candidate.pattern);
            }

            if dry_run {
                println!("\nWould delete {} files.", candidates.len());
                return Ok(());
            }

            if candidates.is_empty() {
                println!("\nDeleted 0 files.");
                return Ok(());
            }

            if !yes && !target::confirm(&format!("Delete {} files?", candidates.len()))? {
                println!("⚠ Cancelled");
                return Ok(());
            }

            let summary = cleaner::delete_candidates(&candidates);
            for (file, reason) in &summary.failed {
                println!("✗ {}: {}", file, reason);
            }
            println!("\nDeleted {} files.", summary.deleted.len());
        }

        Commands::Split { folder, duration, prefix } => {
            println!("✂️  voicekit - split\n");

            let folder = target::resolve_target(folder.as_deref(), FOLDER_PROMPT)?;
            let options = SplitOptions {
                clip_duration: duration.unwrap_or(config.clip_duration),
                title_prefix: prefix.unwrap_or_else(|| config.title_prefix.clone()),
            };
            let tool = FfmpegTool::from_config(&config);

            let summary = splitter::split_all(&folder, &mappings_dir, &options, &tool)?;
            for outcome in &summary.outcomes {
                match outcome {
                    SplitOutcome::Split { source, clips, failed: 0 } => {
                        println!("✔ {}: {} clips", source, clips)
                    }
                    SplitOutcome::Split { source, clips, failed } => {
                        println!("⚠ {}: {} clips, {} failed", source, clips, failed)
                    }
                    SplitOutcome::Skipped { source, reason } => println!("⚠ {}: {}", source, reason),
                }
            }
            if !summary.removed.is_empty() {
                println!("✔ Removed {} REMOVE clips", summary.removed.len());
            }

            println!("\n✅ {} clips created", summary.clip_count().saturating_sub(summary.removed.len()));
        }

        Commands::Convert { folder, bitrate } => {
            println!("🎵 voicekit - WAV to MP3\n");

            let folder = target::resolve_target(folder.as_deref(), FOLDER_PROMPT)?;
            let bitrate = bitrate.unwrap_or_else(|| config.mp3_bitrate.clone());
            let tool = FfmpegTool::from_config(&config);

            let summary = converter::convert_folder(&folder, &bitrate, &tool)?;
            if summary.outcomes.is_empty() {
                println!("No WAV files found in {}", folder.display());
                return Ok(());
            }

            for outcome in &summary.outcomes {
                match outcome {
                    ConvertOutcome::Converted { file, output } => {
                        println!("✓ Converted: {} -> {}", file, display_name(output))
                    }
                    ConvertOutcome::Failed { file, reason } => println!("✗ Failed: {} ({})", file, reason),
                }
            }

            println!("\n✅ {}/{} files converted", summary.converted_count(), summary.outcomes.len());
        }

        Commands::Config { show, set_mappings_dir, set_ffmpeg, set_ffprobe } => {
            let mut config = config;
            let changed = set_mappings_dir.is_some() || set_ffmpeg.is_some() || set_ffprobe.is_some();

            if let Some(dir) = set_mappings_dir {
                config.mappings_dir = Some(dir);
            }
            if let Some(path) = set_ffmpeg {
                config.ffmpeg_path = path;
            }
            if let Some(path) = set_ffprobe {
                config.ffprobe_path = path;
            }

            if changed {
                config.save().context("failed to save config")?;
                println!("✔ Config saved");
            }

            if show || !changed {
                println!("Config:");
                println!("  Mappings: {}", config.resolve_mappings_dir(cli.mappings.as_deref()).display());
                println!("  Correction table: {}", config.resolve_correction_table(&mappings_dir).display());
                println!("  Deletion patterns: {}", config.resolve_deletion_patterns(&mappings_dir).display());
                println!("  ffmpeg: {}", config.ffmpeg_path);
                println!("  ffprobe: {}", config.ffprobe_path);
                println!("  MP3 bitrate: {}", config.mp3_bitrate);
                println!("  Clip duration: {}s", config.clip_duration);
                println!("  Title prefix: {}", config.title_prefix);
            }
        }
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
