use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use harvard_artifacts::app::App;
use harvard_artifacts::config::{ConfigLoader, ResolvedConfig};
use harvard_artifacts::domain::Classification;
use harvard_artifacts::error::HarvardError;
use harvard_artifacts::harvard::{HarvardClient, HarvardHttpClient};
use harvard_artifacts::output::{JsonOutput, OutputMode, TextOutput};
use harvard_artifacts::queries;

#[derive(Parser)]
#[command(name = "harvard-artifacts")]
#[command(about = "Collect Harvard Art Museums artifact records into a local SQLite snapshot")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    non_interactive: bool,

    #[arg(long, global = true)]
    config: Option<String>,

    /// Override the snapshot database path.
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List classifications above the popularity threshold")]
    Classifications,
    #[command(about = "Fetch, normalize and persist one classification")]
    Collect(CollectArgs),
    #[command(about = "List the query catalog")]
    Queries,
    #[command(about = "Run one named query against the snapshot")]
    Query(QueryArgs),
}

#[derive(Args)]
struct CollectArgs {
    classification: String,

    /// Fetch and normalize only; skip the persistence step.
    #[arg(long)]
    no_insert: bool,
}

#[derive(Args)]
struct QueryArgs {
    slug: String,

    #[arg(long)]
    artifact_id: Option<i64>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<HarvardError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &HarvardError) -> u8 {
    match error {
        HarvardError::InvalidClassification(_)
        | HarvardError::MissingApiKey
        | HarvardError::ConfigRead(_)
        | HarvardError::ConfigParse(_)
        | HarvardError::UnknownQuery(_)
        | HarvardError::MissingArtifactId(_) => 2,
        HarvardError::CatalogHttp(_)
        | HarvardError::CatalogStatus { .. }
        | HarvardError::ObjectHttp(_)
        | HarvardError::ObjectStatus { .. }
        | HarvardError::Storage(_) => 3,
        HarvardError::MalformedResponse(_) => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.non_interactive {
        OutputMode::NonInteractive
    } else {
        OutputMode::Interactive
    };

    let mut config = ConfigLoader::resolve(cli.config.as_deref()).into_diagnostic()?;
    if let Some(db) = cli.db {
        config.db_path = db.into();
    }

    match cli.command {
        Commands::Classifications => {
            let app = online_app(config)?;
            match output_mode {
                OutputMode::NonInteractive => {
                    let entries = app.classifications(&JsonOutput).into_diagnostic()?;
                    JsonOutput::print_classifications(&entries).into_diagnostic()?;
                }
                OutputMode::Interactive => {
                    let entries = app.classifications(&TextOutput).into_diagnostic()?;
                    TextOutput::print_classifications(&entries);
                }
            }
            Ok(())
        }
        Commands::Collect(args) => {
            let classification: Classification = args.classification.parse().into_diagnostic()?;
            let app = online_app(config)?;
            run_collect(&app, &classification, args.no_insert, output_mode)
        }
        Commands::Queries => {
            let specs = queries::catalog();
            match output_mode {
                OutputMode::NonInteractive => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(specs).into_diagnostic()?
                    );
                }
                OutputMode::Interactive => {
                    for spec in specs {
                        let marker = if spec.needs_artifact_id {
                            "  (requires --artifact-id)"
                        } else {
                            ""
                        };
                        println!("{:<28} {}{}", spec.slug, spec.title, marker);
                    }
                }
            }
            Ok(())
        }
        Commands::Query(args) => {
            let app = App::new(NopHarvard, config);
            match output_mode {
                OutputMode::NonInteractive => {
                    let result = app
                        .run_query(&args.slug, args.artifact_id, &JsonOutput)
                        .into_diagnostic()?;
                    JsonOutput::print_query(&result).into_diagnostic()?;
                }
                OutputMode::Interactive => {
                    let result = app
                        .run_query(&args.slug, args.artifact_id, &TextOutput)
                        .into_diagnostic()?;
                    TextOutput::print_query(&result);
                }
            }
            Ok(())
        }
    }
}

fn online_app(config: ResolvedConfig) -> miette::Result<App<HarvardHttpClient>> {
    let api_key = config
        .api_key
        .clone()
        .ok_or(HarvardError::MissingApiKey)
        .into_diagnostic()?;
    let client = HarvardHttpClient::new(&config.base_url, &api_key).into_diagnostic()?;
    Ok(App::new(client, config))
}

fn run_collect(
    app: &App<HarvardHttpClient>,
    classification: &Classification,
    no_insert: bool,
    output_mode: OutputMode,
) -> miette::Result<()> {
    match output_mode {
        OutputMode::NonInteractive => {
            let collections = app.collect(classification, &JsonOutput).into_diagnostic()?;
            if no_insert {
                JsonOutput::print_collect(&collections).into_diagnostic()?;
            } else {
                let inserted = app.insert(&collections, &JsonOutput).into_diagnostic()?;
                JsonOutput::print_insert(&inserted).into_diagnostic()?;
            }
        }
        OutputMode::Interactive => {
            let collections = app.collect(classification, &TextOutput).into_diagnostic()?;
            TextOutput::print_collect_summary(&collections);
            if !no_insert {
                let inserted = app.insert(&collections, &TextOutput).into_diagnostic()?;
                TextOutput::print_insert_summary(&inserted);
            }
        }
    }
    Ok(())
}

/// Placeholder client for offline commands; any upstream call is a bug.
struct NopHarvard;

impl HarvardClient for NopHarvard {
    fn fetch_classifications(
        &self,
        _size: u32,
    ) -> Result<Vec<serde_json::Value>, HarvardError> {
        Err(HarvardError::CatalogHttp(
            "upstream client not configured".to_string(),
        ))
    }

    fn fetch_objects_page(
        &self,
        _classification: &Classification,
        _size: u32,
        _page: u32,
    ) -> Result<Vec<serde_json::Value>, HarvardError> {
        Err(HarvardError::ObjectHttp(
            "upstream client not configured".to_string(),
        ))
    }
}
