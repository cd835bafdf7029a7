use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use hf_dataset_watch::app::App;
use hf_dataset_watch::catalog::HfCatalogClient;
use hf_dataset_watch::chat::{CommandContext, SlashCommand, definitions};
use hf_dataset_watch::config::ConfigLoader;
use hf_dataset_watch::domain::WatchScope;
use hf_dataset_watch::error::WatchError;
use hf_dataset_watch::output::{ConsoleSink, JsonOutput, OutputMode, print_definitions_text};
use hf_dataset_watch::store::FileWatchListStore;

#[derive(Parser)]
#[command(name = "hf-watch")]
#[command(about = "Browse Hugging Face datasets and keep a dataset watch list")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./hf-watch.json when present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Sender the reply is addressed to
    #[arg(long, global = true, default_value = "local")]
    sender: String,

    /// Room the command was issued in
    #[arg(long, global = true, default_value = "local")]
    room: String,

    /// Override how watch lists are partitioned
    #[arg(long, global = true, value_enum)]
    scope: Option<WatchScope>,

    /// Directory holding persisted watch lists
    #[arg(long, global = true)]
    store_dir: Option<String>,

    /// Print the outgoing message as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List available datasets from Hugging Face")]
    Datasets,
    #[command(about = "Add a dataset to your watch list")]
    Watch(WatchArgs),
    #[command(about = "Show your watched datasets")]
    Watchlist,
    #[command(about = "Show the slash commands exposed to the chat host")]
    Commands,
    #[command(about = "Run a raw slash command line, e.g. \"/watch org/name\"")]
    Exec(ExecArgs),
}

#[derive(Args)]
struct WatchArgs {
    dataset_id: Option<String>,
}

#[derive(Args)]
struct ExecArgs {
    line: String,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<WatchError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &WatchError) -> u8 {
    match error {
        WatchError::ConfigRead(_)
        | WatchError::ConfigParse(_)
        | WatchError::InvalidConfig(_)
        | WatchError::InvalidCommand(_) => 2,
        WatchError::CatalogHttp(_) | WatchError::CatalogDecode(_) => 3,
        WatchError::Store(_) | WatchError::StoreDecode { .. } | WatchError::Delivery(_) => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let context = match &cli.command {
        Commands::Commands => return print_commands(output_mode),
        Commands::Datasets => command_context(&cli, SlashCommand::Datasets, Vec::new()),
        Commands::Watch(args) => command_context(
            &cli,
            SlashCommand::Watch,
            args.dataset_id.iter().cloned().collect(),
        ),
        Commands::Watchlist => command_context(&cli, SlashCommand::Watchlist, Vec::new()),
        Commands::Exec(args) => CommandContext::parse(&cli.sender, &cli.room, &args.line)?,
    };

    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    let store_dir = cli
        .store_dir
        .as_deref()
        .map(Utf8PathBuf::from)
        .or_else(|| config.store_dir.clone());
    let store = match store_dir {
        Some(root) => FileWatchListStore::new_with_root(root),
        None => FileWatchListStore::new()?,
    };
    let catalog = HfCatalogClient::from_config(&config)?;

    let mut app = App::from_config(catalog, store, &config);
    if let Some(scope) = cli.scope {
        app = app.with_scope(scope);
    }

    app.handle(&context, &ConsoleSink::new(output_mode))?;
    Ok(())
}

fn command_context(cli: &Cli, command: SlashCommand, arguments: Vec<String>) -> CommandContext {
    CommandContext::new(&cli.sender, &cli.room, command.name(), arguments)
}

fn print_commands(output_mode: OutputMode) -> miette::Result<()> {
    let definitions = definitions();
    match output_mode {
        OutputMode::Json => JsonOutput::print_definitions(&definitions).into_diagnostic(),
        OutputMode::Text => print_definitions_text(&definitions).into_diagnostic(),
    }
}
