use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use runlog::analysis::RunAnalysis;
use runlog::config::AnalysisConfig;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect the CSV logs of an optimization run", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run output directory holding the log_*.csv files.
    #[arg(global = true, short, long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON file with analysis settings; explicit flags override it.
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    analysis: AnalysisConfig,

    /// Print JSON instead of tables.
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Summary(cmd::summary::SummaryArgs),
    Cases(cmd::cases::CasesArgs),
    Wells(cmd::wells::WellsArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            info!("⚙️  Loading settings from: {}", path.display());
            let mut file_config = AnalysisConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(&cli.analysis, &matches);
            file_config
        }
        None => cli.analysis.clone(),
    };

    let analysis = match RunAnalysis::load(&cli.output_dir, &config) {
        Ok(a) => a,
        Err(e) => {
            error!("❌ FATAL ERROR READING RUN LOGS:");
            error!("   {}", e);
            process::exit(1);
        }
    };

    for w in analysis.cases.warnings() {
        warn!("⚠️  {}", w);
    }

    let result = match cli.command {
        Commands::Summary(args) => cmd::summary::run(&args, &analysis, cli.json),
        Commands::Cases(args) => cmd::cases::run(&args, &analysis, cli.json),
        Commands::Wells(args) => cmd::wells::run(&args, &analysis, cli.json),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
