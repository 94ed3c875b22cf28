use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lens_analyzer::{HttpAnalyzer, SessionController, read_statement};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

mod config;
mod export;
mod logging;
mod report;
mod state;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LENS_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "lens",
    version,
    long_version = LONG_VERSION,
    about = "Upload a bank statement to the analyzer and print a spending dashboard"
)]
struct Cli {
    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a statement (PDF or spreadsheet) and print the dashboard
    Analyze {
        /// Statement file to upload
        file: PathBuf,

        /// Password for an encrypted statement
        #[arg(long, conflicts_with = "ask_password")]
        password: Option<String>,

        /// Prompt for the statement password on stdin
        #[arg(long)]
        ask_password: bool,

        /// Analyzer base URL (overrides config)
        #[arg(long)]
        server: Option<String>,

        /// Request timeout in seconds, at least 1 (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Print the dashboard as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Also write the validated transactions to a CSV file
        #[arg(long)]
        csv_out: Option<PathBuf>,

        /// Transaction rows to print (0 = all; default from config)
        #[arg(long)]
        rows: Option<usize>,
    },

    /// Check that the analyzer backend is running
    Health {
        /// Analyzer base URL (overrides config)
        #[arg(long)]
        server: Option<String>,
    },

    /// Manage ~/.lens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze {
            file,
            password,
            ask_password,
            server,
            timeout,
            json,
            csv_out,
            rows,
        } => {
            let cfg = config::load_config()?;
            debug!(?cfg, "loaded config");
            let password = match (password, ask_password) {
                (Some(p), _) => p,
                (None, true) => prompt_secret("Statement password")?,
                (None, false) => String::new(),
            };
            let opts = AnalyzeOptions {
                base_url: server.unwrap_or(cfg.server.base_url.clone()),
                analyze_path: cfg.server.analyze_path.clone(),
                timeout: timeout
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| cfg.server.timeout()),
                json,
                csv_out,
                rows: rows.unwrap_or(cfg.display.max_rows),
            };
            debug!(server = %opts.base_url, timeout = ?opts.timeout, "effective analyzer settings");
            analyze(file, password, opts).await?;
        }

        Command::Health { server } => {
            let cfg = config::load_config()?;
            let base_url = server.unwrap_or(cfg.server.base_url.clone());
            debug!(server = %base_url, "checking analyzer health");
            let analyzer = HttpAnalyzer::new(&base_url, cfg.server.timeout())?;
            let status = analyzer
                .health()
                .await
                .with_context(|| format!("analyzer at {base_url}"))?;
            println!("{base_url}: {status}");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

struct AnalyzeOptions {
    base_url: String,
    analyze_path: String,
    timeout: Duration,
    json: bool,
    csv_out: Option<PathBuf>,
    rows: usize,
}

async fn analyze(path: PathBuf, password: String, opts: AnalyzeOptions) -> Result<()> {
    let statement = read_statement(&path)?;
    let name = statement.name().to_string();

    let analyzer =
        HttpAnalyzer::new(&opts.base_url, opts.timeout)?.with_analyze_path(&opts.analyze_path);
    let mut session = SessionController::new(analyzer);
    session.select_file(statement);
    session.set_password(password);

    if !opts.json {
        eprintln!("Analyzing {name}… (this can take up to {}s)", opts.timeout.as_secs());
    }

    let state = session.submit().await;
    if let Some(err) = state.error() {
        bail!("{err}");
    }

    let dash = state.dashboard();

    if let Some(out) = &opts.csv_out {
        export::write_csv(out, &dash.transactions)?;
        eprintln!("Wrote {} transactions to {}", dash.transactions.len(), out.display());
    }

    if opts.json {
        let out = report::JsonReport::new(&name, &dash, state.notice());
        println!("{}", serde_json::to_string_pretty(&out).context("serialize dashboard")?);
        return Ok(());
    }

    if let Some(notice) = state.notice() {
        println!("{notice}");
        return Ok(());
    }

    println!(
        "# {name} (analyzed {})\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    print!("{}", report::render_dashboard(&dash, opts.rows));

    Ok(())
}

fn prompt_secret(label: &str) -> Result<String> {
    // Plain stdin read; input is echoed.
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim_end_matches(['\r', '\n']).to_string())
}
