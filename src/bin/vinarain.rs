//! VinaRain CLI: province rainfall analysis in the terminal.
//!
//! Usage:
//!   vinarain provinces [--region R]
//!   vinarain search <query>
//!   vinarain analyze <province>
//!   vinarain interactive
//!
//! All commands accept `--config path` (YAML).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vinarain::repl::Repl;
use vinarain::{
    view, AnalysisSession, GeminiAnalyzer, ProvinceIndex, RainfallAnalyzer, SessionState,
    VinarainConfig,
};

#[derive(Parser)]
#[command(
    name = "vinarain",
    version,
    about = "Province rainfall and disaster-risk analysis for Vietnam"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known provinces
    Provinces {
        /// Only list provinces in this region (e.g. "Miền Trung")
        #[arg(long)]
        region: Option<String>,
    },
    /// Show autocomplete suggestions for a search text
    Search {
        /// Text to search for
        query: String,
    },
    /// Analyze rainfall for one province and print the report
    Analyze {
        /// Exact province name
        province: String,
    },
    /// Start an interactive search session
    Interactive,
}

fn init_logging(config: &VinarainConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_analyzer(config: &VinarainConfig) -> Result<Arc<dyn RainfallAnalyzer>, String> {
    let analyzer = GeminiAnalyzer::new(config.gemini())
        .map_err(|e| format!("Failed to create analysis client: {}", e))?;
    Ok(Arc::new(analyzer))
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("failed to create tokio runtime: {}", e))
}

fn cmd_provinces(index: &ProvinceIndex, region: Option<&str>) -> i32 {
    let records = match region {
        Some(region) => index.in_region(region),
        None => index.records().iter().collect(),
    };
    if records.is_empty() {
        println!("No provinces found.");
        return 0;
    }
    println!("{:<18}  {:<24}  {}", "ID", "NAME", "REGION");
    println!("{}", "-".repeat(60));
    for record in records {
        println!("{:<18}  {:<24}  {}", record.id, record.name, record.region);
    }
    0
}

fn cmd_search(index: &ProvinceIndex, query: &str) -> i32 {
    let hits = index.filter(query);
    if hits.is_empty() {
        println!("No provinces match '{}'", query);
        return 1;
    }
    println!("{}", view::render_suggestions(&hits));
    0
}

fn cmd_analyze(config: &VinarainConfig, index: ProvinceIndex, name: &str) -> i32 {
    let Some(province) = index.find_by_name(name).cloned() else {
        eprintln!("Error: unknown province '{}'", name);
        let hits = index.filter(name.trim());
        if !hits.is_empty() {
            eprintln!("Did you mean:\n{}", view::render_suggestions(&hits));
        }
        return 2;
    };

    let analyzer = match build_analyzer(config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    rt.block_on(async {
        if !analyzer.is_available().await {
            eprintln!("Warning: no API key configured (set GEMINI_API_KEY)");
        }

        let mut session = AnalysisSession::new(Arc::new(index), analyzer);
        let ticket = session.select_province(province);
        println!("{}\n", view::render_state(session.state()));

        let completion = ticket.run().await;
        session.complete(completion);
        println!("{}", view::render_state(session.state()));

        match session.state() {
            SessionState::Success(_) => 0,
            _ => 1,
        }
    })
}

fn cmd_interactive(config: &VinarainConfig, index: ProvinceIndex) -> i32 {
    let analyzer = match build_analyzer(config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    rt.block_on(async {
        let session = AnalysisSession::new(Arc::new(index), analyzer);
        let repl = Repl::new(session, tokio::io::stdout());
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        match repl.run(input).await {
            Ok(_) => 0,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        }
    })
}

fn main() {
    let cli = Cli::parse();

    let config = match VinarainConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config);
    config.log_sources();

    let index = ProvinceIndex::builtin();
    let code = match cli.command {
        Commands::Provinces { region } => cmd_provinces(&index, region.as_deref()),
        Commands::Search { query } => cmd_search(&index, &query),
        Commands::Analyze { province } => cmd_analyze(&config, index, &province),
        Commands::Interactive => cmd_interactive(&config, index),
    };
    std::process::exit(code);
}
