//! Flow IDPS - Command Line Entry Point

mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use flow_idps_core::constants::{APP_NAME, APP_VERSION};
use flow_idps_core::logic::dataset::{generate, generate_mixed, write_csv};
use flow_idps_core::logic::report::{render_json, render_text};
use flow_idps_core::{
    HeuristicScorer, IdpsError, IdpsResult, LayoutInfo, OnnxScorer, Pipeline, PipelineConfig,
    ProbabilityScorer, RecordPolicy,
};

use cli::{Cli, Commands, GenerateKind, OutputFormat};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::debug!("{} v{}", APP_NAME, APP_VERSION);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<IdpsError>() {
        Some(err) => {
            eprintln!("error[{}]: {:#}", err.kind(), e);
            if let Some(missing) = err.missing_features() {
                eprintln!("all missing features: {}", missing.join(", "));
            }
        }
        None => eprintln!("error: {:#}", e),
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze {
            file,
            model,
            threshold,
            policy,
            format,
            rows,
            parallel,
        } => analyze(&file, model, threshold, policy, format, rows, parallel),
        Commands::Generate {
            kind,
            count,
            out,
            seed,
        } => generate_batch(kind, count, &out, seed),
        Commands::Schema { json } => print_schema(json),
    }
}

// ============================================================================
// ANALYZE
// ============================================================================

/// ONNX when a model path resolves, otherwise the heuristic fallback
fn build_scorer(config: &PipelineConfig) -> IdpsResult<Box<dyn ProbabilityScorer>> {
    match config.resolve_model_path() {
        Some(path) => {
            let scorer = OnnxScorer::load(&path).map_err(|e| IdpsError::Config(e.to_string()))?;
            Ok(Box::new(scorer))
        }
        None => {
            log::info!("ONNX model not found - using fallback heuristics");
            Ok(Box::new(HeuristicScorer::new()))
        }
    }
}

fn analyze(
    file: &Path,
    model: Option<PathBuf>,
    threshold: Option<f64>,
    policy: Option<RecordPolicy>,
    format: OutputFormat,
    rows: usize,
    parallel: bool,
) -> Result<()> {
    let mut config = PipelineConfig::from_env()?;
    if let Some(t) = threshold {
        config.attack_threshold = t;
    }
    if let Some(p) = policy {
        config.record_policy = p;
    }
    if model.is_some() {
        config.model_path = model;
    }
    config.parallel |= parallel;

    let scorer = build_scorer(&config)?;
    // Range checks run here, after the overrides
    let pipeline = Pipeline::new(scorer, config)?;

    let report = pipeline
        .analyze_path(file)
        .with_context(|| format!("analyzing {}", file.display()))?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&report, rows)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}

// ============================================================================
// GENERATE
// ============================================================================

fn generate_batch(kind: GenerateKind, count: usize, out: &Path, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let flows = match kind.traffic_kind() {
        Some(traffic) => generate(&mut rng, traffic, count),
        None => generate_mixed(&mut rng, count),
    };

    write_csv(out, &flows).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {} flows to {}", flows.len(), out.display());
    Ok(())
}

// ============================================================================
// SCHEMA
// ============================================================================

fn print_schema(json: bool) -> Result<()> {
    let layout = LayoutInfo::current();

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!(
        "Feature layout v{} ({} features, hash {:08x})",
        layout.version, layout.feature_count, layout.hash
    );
    for (index, name) in layout.feature_names.iter().enumerate() {
        println!("{:>3}  {}", index, name);
    }
    Ok(())
}
