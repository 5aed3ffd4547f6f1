//! CADASIL prognosis CLI.
//!
//! Projects survival for a patient's age, sex and NOTCH3-SVD stage, prints
//! horizon probabilities, lists stages, and validates parameter files.

use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use cadasil_common::error::{format_error_human, StructuredError};
use cadasil_common::{DiseaseStage, Error, OutputFormat, Sex};
use cadasil_core::config::{load_parameters, ConfigOptions, LoadedParameters, ModelParameters};
use cadasil_core::exit_codes::ExitCode;
use cadasil_core::input::{validate_age, validate_horizons};
use cadasil_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use cadasil_core::model::{simulate_with, ModelResult, DEFAULT_HORIZONS};
use cadasil_core::narrative::{default_provider, narrate_or_fallback, NarrativeConfig, NarrativeRequest};
use cadasil_core::output::{
    render_horizons, render_projection, render_stages, stage_rows, Envelope, HorizonReport,
    ProjectionInput, ProjectionReport,
};

/// CADASIL survival projection
#[derive(Parser)]
#[command(name = "cadasil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Directory containing parameters.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Parameters file (overrides --config)
    #[arg(long, global = true)]
    parameters: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project survival and summary statistics
    Project(ProjectArgs),

    /// Survival probability at fixed horizons
    Table(ProjectArgs),

    /// List disease stages and hazard ratios
    Stages,

    /// Project survival and add a prose interpretation
    Narrate(ProjectArgs),

    /// Validate parameter configuration
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct PatientArgs {
    /// Current age in years
    #[arg(long, allow_negative_numbers = true)]
    age: f64,

    /// Patient sex
    #[arg(long, value_enum, ignore_case = true)]
    sex: Sex,

    /// NOTCH3-SVD stage (0, 1a, 1b, 2a, 2b, 3a, 3b, 4a)
    #[arg(long, value_enum, ignore_case = true)]
    stage: DiseaseStage,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[command(flatten)]
    patient: PatientArgs,

    /// Horizons in years, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_HORIZONS.to_vec())]
    horizons: Vec<u32>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Print the built-in parameters as JSON and exit
    #[arg(long)]
    dump_defaults: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet);
    init_logging(&LogConfig::from_env(level, cli.global.log_format));

    let outcome = match &cli.command {
        Commands::Project(args) => run_project(&cli.global, args),
        Commands::Table(args) => run_table(&cli.global, args),
        Commands::Stages => run_stages(&cli.global),
        Commands::Narrate(args) => run_narrate(&cli.global, args),
        Commands::Check(args) => run_check(&cli.global, args),
    };

    let exit_code = outcome.unwrap_or_else(|err| report_error(&cli.global, &err));
    std::process::exit(exit_code.as_i32());
}

fn report_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    tracing::debug!(code = err.code(), category = %err.category(), "command failed");
    match global.format {
        OutputFormat::Json => eprintln!("{}", StructuredError::from(err).to_json_pretty()),
        OutputFormat::Md | OutputFormat::Summary => {
            eprintln!("{}", format_error_human(err, std::io::stderr().is_terminal()))
        }
    }
    ExitCode::from(err)
}

fn load(global: &GlobalOpts) -> Result<LoadedParameters, Error> {
    let options = ConfigOptions {
        config_dir: global.config.clone(),
        parameters_path: global.parameters.clone(),
    };
    Ok(load_parameters(&options)?)
}

/// Validate inputs and run the simulation.
fn project(
    loaded: &LoadedParameters,
    args: &ProjectArgs,
) -> Result<(ProjectionInput, ModelResult), Error> {
    let age = validate_age(args.patient.age)?;
    validate_horizons(&args.horizons)?;

    let (sex, stage) = (args.patient.sex, args.patient.stage);
    let result = simulate_with(&loaded.parameters, age, stage, sex);
    let input = ProjectionInput {
        age,
        sex,
        stage,
        hazard_ratio: loaded.parameters.hazard_ratio(stage),
    };
    Ok((input, result))
}

fn run_project(global: &GlobalOpts, args: &ProjectArgs) -> Result<ExitCode, Error> {
    let loaded = load(global)?;
    let (input, result) = project(&loaded, args)?;
    let report = ProjectionReport::new(
        input,
        result,
        &args.horizons,
        loaded.paths.parameters_source.to_string(),
    );
    println!("{}", render_projection(&report, global.format)?);
    Ok(ExitCode::Clean)
}

fn run_table(global: &GlobalOpts, args: &ProjectArgs) -> Result<ExitCode, Error> {
    let loaded = load(global)?;
    let (input, result) = project(&loaded, args)?;
    let report = HorizonReport {
        horizons: cadasil_core::model::horizon_table(&result, &args.horizons),
        input,
    };
    println!("{}", render_horizons(&report, global.format)?);
    Ok(ExitCode::Clean)
}

fn run_stages(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let loaded = load(global)?;
    let rows = stage_rows(&loaded.parameters);
    println!("{}", render_stages(&rows, global.format)?);
    Ok(ExitCode::Clean)
}

fn run_narrate(global: &GlobalOpts, args: &ProjectArgs) -> Result<ExitCode, Error> {
    let loaded = load(global)?;
    let (input, result) = project(&loaded, args)?;

    // The projection is final before the collaborator is contacted.
    let request = NarrativeRequest::new(input.age, input.stage, input.sex, &result);
    let provider = default_provider(NarrativeConfig::from_env());
    let narrative = narrate_or_fallback(provider.as_ref(), &request);
    let degraded = narrative.is_fallback();

    let report = ProjectionReport::new(
        input,
        result,
        &args.horizons,
        loaded.paths.parameters_source.to_string(),
    )
    .with_narrative(narrative);
    println!("{}", render_projection(&report, global.format)?);

    Ok(if degraded {
        ExitCode::NarrativeDegraded
    } else {
        ExitCode::Clean
    })
}

fn run_check(global: &GlobalOpts, args: &CheckArgs) -> Result<ExitCode, Error> {
    if args.dump_defaults {
        println!("{}", ModelParameters::default().to_json_pretty()?);
        return Ok(ExitCode::Clean);
    }

    let loaded = load(global)?;
    let snapshot = &loaded.snapshot;
    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Envelope::new(snapshot))?);
        }
        OutputFormat::Summary => {
            println!(
                "ok: {} ({}) [{}]",
                snapshot.parameters_path.as_deref().unwrap_or("built-in tables"),
                snapshot.parameters_source,
                snapshot.short_id()
            );
        }
        OutputFormat::Md => {
            println!("# Parameter check\n");
            println!("| Field | Value |\n|-------|-------|");
            println!("| Status | ok |");
            println!("| Source | {} |", snapshot.parameters_source);
            println!(
                "| Path | {} |",
                snapshot.parameters_path.as_deref().unwrap_or("-")
            );
            println!("| Snapshot | {} |", snapshot.short_id());
            println!("| Milestones | {} |", snapshot.summary.milestone_count);
            println!("| Max years | {} |", snapshot.summary.max_years);
        }
    }
    Ok(ExitCode::Clean)
}
