//! # CLI Module
//!
//! Terminal front end for the comparison pipeline.
//!
//! ## Usage
//! ```bash
//! # Compare two photos (credentials from the environment or a prompt)
//! face-compare compare me.jpg passport.png
//!
//! # Explicit region, stricter matching, report in a chosen folder
//! face-compare compare me.jpg passport.png --region eu-west-1 \
//!     --similarity-threshold 90 --report-dir ./reports
//!
//! # Full service response as JSON
//! face-compare compare me.jpg passport.png --output json
//!
//! # Show the effective configuration
//! face-compare config
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use face_compare::config::AppConfig;
use face_compare::core::intake::{render_preview, ImageAsset, ImageSlot};
use face_compare::core::reporter::Headline;
use face_compare::core::{
    CompareOptions, ComparisonOutcome, ComparisonSession, CredentialCollector, CredentialInput,
    Credentials, DigestAlgorithm, RekognitionComparator, SessionOptions,
};
use face_compare::error::{FaceCompareError, Result};
use face_compare::events::{CompareEvent, Event, EventChannel, PipelineEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Face Compare - compare two face photos and keep a report
#[derive(Parser, Debug)]
#[command(name = "face-compare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/face-compare/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare the face in IMAGE1 with the faces in IMAGE2
    Compare {
        /// Source image (PNG or JPEG)
        image1: PathBuf,

        /// Target image (PNG or JPEG)
        image2: PathBuf,

        /// Access key ID (default: ACCESS_KEY_ID)
        #[arg(long)]
        access_key: Option<String>,

        /// Secret access key (default: SECRET_ACCESS_KEY, or prompt)
        #[arg(long)]
        secret_key: Option<String>,

        /// Service region (default: REGION, then us-east-1)
        #[arg(long)]
        region: Option<String>,

        /// Minimum similarity (0-100) for a face to count as a match
        #[arg(long)]
        similarity_threshold: Option<f32>,

        /// Digest used to label images in the report
        #[arg(long)]
        digest: Option<DigestArg>,

        /// Directory for the text report
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Do not save a report
        #[arg(long)]
        no_report: bool,

        /// Save downscaled previews of both images here
        #[arg(long)]
        preview_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Show face metadata and the full response
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the effective configuration (secret masked)
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DigestArg {
    Sha1,
    Sha256,
}

impl From<DigestArg> for DigestAlgorithm {
    fn from(arg: DigestArg) -> Self {
        match arg {
            DigestArg::Sha1 => DigestAlgorithm::Sha1,
            DigestArg::Sha256 => DigestAlgorithm::Sha256,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output including the full service response
    Json,
    /// Best similarity only
    Minimal,
}

struct CompareArgs {
    image1: PathBuf,
    image2: PathBuf,
    credentials: CredentialInput,
    report_dir: Option<PathBuf>,
    no_report: bool,
    preview_dir: Option<PathBuf>,
    output: OutputFormat,
    verbose: bool,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    face_compare::init_tracing();

    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Compare {
            image1,
            image2,
            access_key,
            secret_key,
            region,
            similarity_threshold,
            digest,
            report_dir,
            no_report,
            preview_dir,
            output,
            verbose,
        } => {
            if similarity_threshold.is_some() {
                config.comparison.similarity_threshold = similarity_threshold;
            }
            if let Some(digest) = digest {
                config.comparison.digest = digest.into();
            }
            config.validate()?;

            run_compare(
                &config,
                CompareArgs {
                    image1,
                    image2,
                    credentials: CredentialInput {
                        access_key,
                        secret_key,
                        region,
                    },
                    report_dir,
                    no_report,
                    preview_dir,
                    output,
                    verbose,
                },
            )
        }
        Commands::Config => {
            print_config(&config);
            Ok(())
        }
    }
}

fn run_compare(config: &AppConfig, args: CompareArgs) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(args.output, OutputFormat::Pretty);

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("Face Compare").bold().cyan(),
            style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let mut session = ComparisonSession::new(SessionOptions {
        compare: CompareOptions {
            similarity_threshold: config.comparison.similarity_threshold,
        },
        digest: config.comparison.digest,
    });

    // Image intake
    for (slot, path) in [
        (ImageSlot::Source, &args.image1),
        (ImageSlot::Target, &args.image2),
    ] {
        let asset = ImageAsset::from_path(path)?;
        if pretty {
            let (width, height) = asset.dimensions();
            term.write_line(&format!(
                "  {} {}: {} ({}x{}, {})",
                style("✓").green(),
                slot,
                asset.filename(),
                width,
                height,
                asset.format().mime_type()
            ))
            .ok();
        }
        if let Some(dir) = &args.preview_dir {
            if config.preview.enabled {
                save_preview(&term, dir, &asset, config.preview.max_dimension, pretty);
            }
        }
        session.set_image(slot, asset);
    }

    if pretty {
        term.write_line(&format!(
            "  {} Digest: {}",
            style("•").dim(),
            session.options().digest
        ))
        .ok();
    }

    // Credentials
    let collector = CredentialCollector::new(config.credentials.clone());
    let credentials = prompt_missing(&term, collector.collect(args.credentials));
    if pretty {
        term.write_line(&format!(
            "  {} Region: {}",
            style("•").dim(),
            style(credentials.region()).cyan()
        ))
        .ok();
    }
    session.set_credentials(credentials);

    if pretty {
        term.write_line("").ok();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(FaceCompareError::Runtime)?;

    // Cosmetic pause only; the pipeline itself never waits
    if config.ui.submit_pause_ms > 0 && pretty {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Preparing comparison...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        thread::sleep(Duration::from_millis(config.ui.submit_pause_ms));
        spinner.finish_and_clear();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose = args.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_position(phase.progress_percent());
                    pb.set_message(phase.to_string());
                }
                Event::Compare(CompareEvent::ClientCreated { region }) => {
                    pb.set_message(format!("Client ready ({})", region));
                }
                Event::Compare(CompareEvent::Submitted {
                    source_bytes,
                    target_bytes,
                }) => {
                    if verbose {
                        pb.set_message(format!(
                            "Submitted {} + {} bytes",
                            source_bytes, target_bytes
                        ));
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    pb.set_position(100);
                    pb.finish_and_clear();
                }
                Event::Pipeline(PipelineEvent::Error { .. })
                | Event::Pipeline(PipelineEvent::Rejected { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let comparator = RekognitionComparator::new();
    let outcome = runtime.block_on(session.submit_with_events(&comparator, &sender));

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let outcome = outcome?;

    let report_path = if args.no_report {
        None
    } else {
        let dir = args
            .report_dir
            .clone()
            .unwrap_or_else(|| config.report.directory.clone());
        Some(outcome.report.write_to_dir(&dir)?)
    };

    match args.output {
        OutputFormat::Pretty => print_pretty_results(&term, &outcome, report_path.as_deref(), verbose),
        OutputFormat::Json => print_json_results(&outcome, report_path.as_deref()),
        OutputFormat::Minimal => print_minimal_results(&outcome),
    }

    Ok(())
}

/// Ask for blank credential fields when attached to a terminal
fn prompt_missing(term: &Term, credentials: Credentials) -> Credentials {
    if credentials.is_complete() || !term.is_term() {
        return credentials;
    }

    let mut access_key = credentials.access_key().to_string();
    let mut secret_key = credentials.secret_key().to_string();

    if access_key.trim().is_empty() {
        term.write_str("Access Key ID: ").ok();
        access_key = term.read_line().unwrap_or_default();
    }
    if secret_key.trim().is_empty() {
        term.write_str("Secret Access Key: ").ok();
        secret_key = term.read_secure_line().unwrap_or_default();
    }

    Credentials::new(access_key, secret_key, credentials.region())
}

fn save_preview(term: &Term, dir: &Path, asset: &ImageAsset, max_dimension: u32, pretty: bool) {
    let saved = render_preview(asset, max_dimension)
        .map_err(|e| e.to_string())
        .and_then(|preview| preview.save_in(dir, asset).map_err(|e| e.to_string()));

    match saved {
        Ok(path) => {
            if pretty {
                term.write_line(&format!(
                    "    {} {}",
                    style("preview:").dim(),
                    style(path.display()).dim()
                ))
                .ok();
            }
        }
        Err(reason) => {
            tracing::warn!(filename = asset.filename(), "Preview failed: {}", reason);
            term.write_line(&format!(
                "    {} {}",
                style("⚠").yellow(),
                style(reason).yellow()
            ))
            .ok();
        }
    }
}

fn print_pretty_results(
    term: &Term,
    outcome: &ComparisonOutcome,
    report_path: Option<&Path>,
    verbose: bool,
) {
    term.write_line(&format!(
        "{} Comparison Complete",
        style("✓").green().bold()
    ))
    .ok();
    term.write_line("").ok();

    match &outcome.report.headline {
        Headline::Match { .. } => {
            term.write_line(&format!(
                "  {} {}",
                style("🎯").green(),
                style(&outcome.report.headline).green().bold()
            ))
            .ok();
        }
        Headline::NoMatch => {
            term.write_line(&format!(
                "  {} {}",
                style("⚠").yellow(),
                style(&outcome.report.headline).yellow()
            ))
            .ok();
        }
    }

    term.write_line(&format!(
        "  {} face matches, {} unmatched faces in {:.1}s",
        style(outcome.result.match_count()).cyan(),
        style(outcome.result.unmatched_faces.len()).cyan(),
        outcome.duration_ms as f64 / 1000.0
    ))
    .ok();

    if verbose {
        term.write_line("").ok();
        for (i, face_match) in outcome.result.face_matches.iter().enumerate() {
            let confidence = face_match
                .face
                .confidence
                .map(|c| format!("{:.2}%", c))
                .unwrap_or_else(|| "n/a".to_string());
            term.write_line(&format!(
                "  {} similarity {:.2}%, face confidence {}",
                style(format!("Match {}:", i + 1)).bold(),
                face_match.similarity,
                confidence
            ))
            .ok();
        }
        term.write_line("").ok();
        term.write_line(&format!("{}", style("Full response:").bold().underlined()))
            .ok();
        term.write_line(&outcome.result.to_json_pretty()).ok();
    }

    term.write_line("").ok();
    match report_path {
        Some(path) => {
            term.write_line(&format!(
                "  {} {}",
                style("Report saved to").dim(),
                style(path.display()).cyan()
            ))
            .ok();
        }
        None => {
            term.write_line(&format!("{}", style("Report not saved (--no-report).").dim()))
                .ok();
        }
    }
}

fn print_json_results(outcome: &ComparisonOutcome, report_path: Option<&Path>) {
    let similarity = match &outcome.report.headline {
        Headline::Match { similarity, .. } => Some(*similarity),
        Headline::NoMatch => None,
    };

    let output = serde_json::json!({
        "run_id": outcome.run_id.to_string(),
        "headline": outcome.report.headline.to_string(),
        "similarity": similarity,
        "match_count": outcome.report.match_count,
        "region": outcome.report.region,
        "images": [
            {
                "filename": outcome.report.source.filename,
                "digest": outcome.report.source.digest.as_hex(),
            },
            {
                "filename": outcome.report.target.filename,
                "digest": outcome.report.target.digest.as_hex(),
            },
        ],
        "report_path": report_path.map(|p| p.display().to_string()),
        "duration_ms": outcome.duration_ms,
        "response": outcome.result,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}

fn print_minimal_results(outcome: &ComparisonOutcome) {
    match outcome.result.best_match() {
        Some(best) => println!("{:.2}", best.similarity),
        None => println!("no match"),
    }
}

fn print_config(config: &AppConfig) {
    let mut shown = config.clone();
    if shown.credentials.secret_access_key.is_some() {
        shown.credentials.secret_access_key = Some("********".to_string());
    }

    match toml::to_string_pretty(&shown) {
        Ok(rendered) => print!("{}", rendered),
        Err(e) => eprintln!("Failed to render configuration: {}", e),
    }
}
