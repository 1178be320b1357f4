//! @ai:module:intent CLI for the General Report pipeline
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tutoring_report::{
    access::{applicable_results, authorize, Audience},
    config::{ReportConfig, StudentFilter},
    export::{ExportFormat, ReportWriter},
    render::{ReportRenderer, ReportRendererTrait},
    shaping::{AnswerExtractor, Shaper, ShaperTrait, TestCategory},
    store::{ReportRequest, StoreReader, StoreReaderTrait},
};

#[derive(Parser)]
#[command(name = "tutoring-report")]
#[command(about = "General Report generator for student test results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render General Reports for one request file or a directory of them
    Render {
        /// Request JSON file or directory
        #[arg(short, long)]
        input: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for reports
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export formats (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        format: Vec<ExportFormat>,

        /// Audience for requests without a requester
        #[arg(long)]
        audience: Option<Audience>,

        /// Filter by control numbers (comma-separated)
        #[arg(long)]
        students: Option<String>,
    },

    /// Print shaped chart data and answers for a request file
    Shape {
        /// Request JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "report.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tutoring_report=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            config,
            output,
            format,
            audience,
            students,
        } => render_reports(RenderArgs {
            input,
            config,
            output,
            format,
            audience,
            students,
        }),
        Commands::Shape { input, config } => shape_request(input, config),
        Commands::Init { output } => init_config(output),
    }
}

struct RenderArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Vec<ExportFormat>,
    audience: Option<Audience>,
    students: Option<String>,
}

#[derive(Default)]
struct RenderSummary {
    rendered: usize,
    skipped: usize,
    denied: usize,
    failed: usize,
}

/// @ai:intent Render and export a report for every selected request
/// @ai:effects fs:read, fs:write
fn render_reports(args: RenderArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    if let Some(output) = args.output {
        config.output.directory = output;
    }
    if !args.format.is_empty() {
        config.output.formats = args.format;
    }
    if let Some(audience) = args.audience {
        config.output.audience = audience;
    }
    if let Some(students) = args.students {
        config.output.filter = StudentFilter {
            control_numbers: Some(split_list(&students)),
        };
    }

    let requests = load_requests(&args.input)?;
    tracing::info!("Loaded {} report requests", requests.len());

    let renderer = ReportRenderer::new(
        Shaper::new(config.shaping_tables()),
        chrono::Local::now().date_naive(),
    )
    .with_title(config.render.title.clone())
    .with_institution(config.render.institution.clone());
    let writer = ReportWriter::new(&config.output.formats);

    let mut summary = RenderSummary::default();

    for request in &requests {
        let student = &request.student;

        if !config.output.filter.matches(&student.control_number) {
            summary.skipped += 1;
            continue;
        }

        let audience = match &request.requested_by {
            Some(requester) => match authorize(requester, student) {
                Ok(audience) => audience,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", student.control_number, e);
                    summary.denied += 1;
                    continue;
                }
            },
            None => config.output.audience,
        };

        let results = applicable_results(audience, &request.results);
        let document = renderer.render(student, &results, config.render.logo.as_deref());

        match writer.write_all(&document, &config.output.directory) {
            Ok(_) => summary.rendered += 1,
            Err(e) if e.is_recoverable() => {
                tracing::error!(
                    "Could not export report for {}: {}. Regenerate it with `tutoring-report render --input {} --students {}`",
                    student.control_number,
                    e,
                    args.input.display(),
                    student.control_number.trim()
                );
                summary.failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    print_summary(&summary, &config.output.directory);
    Ok(())
}

/// @ai:intent Load a single request file or every request in a directory
/// @ai:effects fs:read
fn load_requests(input: &Path) -> Result<Vec<ReportRequest>> {
    let reader = StoreReader::new();

    if input.is_dir() {
        reader
            .load_dir(input)
            .with_context(|| format!("Failed to read requests from {}", input.display()))
    } else {
        let request = reader
            .load(input)
            .with_context(|| format!("Failed to read request {}", input.display()))?;
        Ok(vec![request])
    }
}

/// @ai:intent Print the shaped view of each result as JSON
/// @ai:effects fs:read
fn shape_request(input: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config_path)?;
    let shaper = Shaper::new(config.shaping_tables());
    let answers = AnswerExtractor::new();

    for request in load_requests(&input)? {
        let shaped: Vec<_> = request
            .results
            .iter()
            .map(|result| {
                let category = TestCategory::from_code(&result.test.code);
                let mut entry = json!({
                    "test": result.test.code,
                    "category": category,
                    "shaped": shaper.shape(result, category),
                });
                if category == TestCategory::PsychologicalAssistance {
                    entry["answers"] = json!(answers.extract(result));
                }
                entry
            })
            .collect();

        let output = json!({
            "control_number": request.student.control_number,
            "results": shaped,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

/// @ai:intent Write a default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = ReportConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<ReportConfig> {
    match path {
        Some(p) => ReportConfig::load(&p),
        None => {
            let default_path = PathBuf::from("report.toml");

            if default_path.exists() {
                ReportConfig::load(&default_path)
            } else {
                Ok(ReportConfig::default())
            }
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn print_summary(summary: &RenderSummary, output_dir: &Path) {
    println!();
    println!("=== Report Summary ===");
    println!("Rendered:  {}", summary.rendered);
    println!("Filtered:  {}", summary.skipped);
    println!("Denied:    {}", summary.denied);
    println!("Failed:    {}", summary.failed);
    println!("Output:    {}", output_dir.display());
}
