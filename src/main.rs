use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gcpassets::asset::{
    all_aliases, first_raw_result, resolve_asset_type, search_all, search_resources,
    ContainerNode, RawAsset, ResourceRecord, Scope, SearchRequest, CONTAINER_TYPES,
};
use gcpassets::config::Config;
use gcpassets::gcp::client::{format_gcp_error, GcpClient};
use gcpassets::hierarchy;
use gcpassets::progress::Spinner;
use gcpassets::render::{resources::NO_RESOURCES, HierarchyFormat, ResourceFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// List GCP assets and render the resource hierarchy
#[derive(Parser, Debug)]
#[command(name = "gcpassets", version = gcpassets::VERSION, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level for debugging (written to the log file, never stdout)
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Do not animate a spinner while fetching
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display asset hierarchy (folders, projects)
    Hierarchy {
        /// GCP scope (e.g. organizations/123456789 or folders/123)
        #[arg(long)]
        scope: Option<String>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<HierarchyFormat>,

        /// Print the first raw search result and exit
        #[arg(long)]
        debug: bool,

        /// Report folders and projects whose parent was not fetched
        #[arg(long)]
        show_orphans: bool,
    },

    /// List resources of a specific type
    ListResources {
        /// GCP scope (e.g. organizations/123456789)
        #[arg(long)]
        scope: Option<String>,

        /// Resource type or alias (e.g. compute.googleapis.com/Instance or vm)
        #[arg(long = "type")]
        asset_type: String,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<ResourceFormat>,

        /// Print the first raw search result and exit
        #[arg(long)]
        debug: bool,
    },

    /// Show the aliases accepted by --type
    Types,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("gcpassets {} started with log level: {:?}", gcpassets::VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("gcpassets").join("gcpassets.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".gcpassets").join("gcpassets.log");
    }
    PathBuf::from("gcpassets.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let config = Config::load();
    let progress = !args.no_progress;

    let result = match args.command {
        Command::Hierarchy {
            scope,
            format,
            debug,
            show_orphans,
        } => {
            let format = config.effective_hierarchy_format(format);
            run_hierarchy(&config, scope.as_deref(), format, debug, show_orphans, progress).await
        }
        Command::ListResources {
            scope,
            asset_type,
            format,
            debug,
        } => {
            let format = config.effective_resource_format(format);
            run_list_resources(&config, scope.as_deref(), &asset_type, format, debug, progress)
                .await
        }
        Command::Types => {
            print_types();
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run_hierarchy(
    config: &Config,
    scope: Option<&str>,
    format: HierarchyFormat,
    debug: bool,
    show_orphans: bool,
    progress: bool,
) -> Result<ExitCode> {
    let Some(raw_scope) = config.effective_scope(scope) else {
        eprintln!("Error: No scope given. Use --scope or set GCPASSETS_SCOPE.");
        return Ok(ExitCode::FAILURE);
    };

    let scope: Scope = match raw_scope.parse() {
        Ok(scope) => scope,
        Err(e) => {
            eprintln!(
                "Error: Invalid --scope format. Must be 'organizations/<id>' or 'folders/<id>'. Received: '{}'. Details: {}",
                raw_scope, e
            );
            return Ok(ExitCode::FAILURE);
        }
    };
    let scope_str = scope.to_string();

    tracing::info!("Building hierarchy for {}", scope_str);

    let request = SearchRequest::new(&scope_str, CONTAINER_TYPES)
        .with_page_size(config.effective_page_size());

    if debug {
        return print_first_raw(config, &request, Fetching::Assets).await;
    }

    let indicator = spinner(progress, "Fetching folders and projects...");
    let fetched = fetch_assets(config, &request).await;
    indicator.stop();

    let raw = match fetched {
        Ok(raw) => raw,
        Err(e) => return Ok(report_ingestion_failure(Fetching::Assets, &e)),
    };

    if raw.is_empty() {
        println!("No assets found under the specified parent.");
        return Ok(ExitCode::SUCCESS);
    }

    let nodes: Vec<ContainerNode> = raw.iter().map(ContainerNode::from_raw).collect();
    let forest = hierarchy::build(&nodes, &scope);

    if show_orphans && forest.orphans.total() > 0 {
        eprintln!(
            "Note: {} folder(s) and {} project(s) were fetched but their parent is not visible under {}; they are not shown.",
            forest.orphans.folders, forest.orphans.projects, scope_str
        );
    }

    println!("{}", format.render(&forest, &scope_str)?);
    Ok(ExitCode::SUCCESS)
}

async fn run_list_resources(
    config: &Config,
    scope: Option<&str>,
    asset_type: &str,
    format: ResourceFormat,
    debug: bool,
    progress: bool,
) -> Result<ExitCode> {
    let Some(scope) = config.effective_scope(scope) else {
        eprintln!("Error: No scope given. Use --scope or set GCPASSETS_SCOPE.");
        return Ok(ExitCode::FAILURE);
    };

    let resolved = resolve_asset_type(asset_type);
    tracing::info!("Listing {} under {}", resolved, scope);

    let request = SearchRequest::new(&scope, &[resolved.as_str()])
        .with_page_size(config.effective_page_size());

    if debug {
        return print_first_raw(config, &request, Fetching::Resources).await;
    }

    let indicator = spinner(progress, &format!("Fetching {} resources...", asset_type));
    let fetched = fetch_resources(config, &request).await;
    indicator.stop();

    let resources = match fetched {
        Ok(resources) => resources,
        Err(e) => return Ok(report_ingestion_failure(Fetching::Resources, &e)),
    };

    if resources.is_empty() {
        println!("{}", NO_RESOURCES);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", format.render(&resources, &scope)?);
    Ok(ExitCode::SUCCESS)
}

async fn fetch_assets(config: &Config, request: &SearchRequest) -> Result<Vec<RawAsset>> {
    let client = GcpClient::new(&config.effective_endpoint()).await?;
    search_all(&client, request).await
}

async fn fetch_resources(config: &Config, request: &SearchRequest) -> Result<Vec<ResourceRecord>> {
    let client = GcpClient::new(&config.effective_endpoint()).await?;
    search_resources(&client, request).await
}

async fn print_first_raw(
    config: &Config,
    request: &SearchRequest,
    what: Fetching,
) -> Result<ExitCode> {
    let first = match GcpClient::new(&config.effective_endpoint()).await {
        Ok(client) => first_raw_result(&client, request).await,
        Err(e) => Err(e),
    };

    match first {
        Ok(Some(raw)) => {
            println!("Debug: First resource raw data:");
            println!("{}", serde_json::to_string_pretty(&raw)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => {
            println!("{}", NO_RESOURCES);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_ingestion_failure(what, &e)),
    }
}

/// What a failed fetch was after, for the error line
#[derive(Debug, Clone, Copy)]
enum Fetching {
    Assets,
    Resources,
}

impl Fetching {
    fn noun(self) -> &'static str {
        match self {
            Fetching::Assets => "assets",
            Fetching::Resources => "resources",
        }
    }
}

fn report_ingestion_failure(what: Fetching, error: &anyhow::Error) -> ExitCode {
    tracing::error!("Fetching {} failed: {:#}", what.noun(), error);
    eprintln!("Error fetching {} from GCP: {}", what.noun(), format_gcp_error(error));
    ExitCode::FAILURE
}

fn spinner(enabled: bool, message: &str) -> Spinner {
    if enabled {
        Spinner::start(message)
    } else {
        Spinner::disabled()
    }
}

fn print_types() {
    let aliases = all_aliases();
    let width = aliases
        .iter()
        .map(|(alias, _)| alias.len())
        .max()
        .unwrap_or(0);
    for (alias, asset_type) in aliases {
        println!("{:<width$}  {}", alias, asset_type, width = width);
    }
}
