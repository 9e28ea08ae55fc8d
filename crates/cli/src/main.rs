use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use cli::repl;
use cli::terminal::{Summary, TerminalView};
use providers::http::{HttpClassifier, HttpClassifierConfig};
use providers::Readiness;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use triage_core::config;
use triage_core::config::AppConfig;
use triage_core::controller::Controller;
use triage_core::models::{FileHandle, InputMode, ViewState};
use triage_core::submission::build_service;
use triage_core::view::{NullView, View};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { input, json } => run_classify(cfg, input, json).await,
        Commands::Interactive => run_interactive(cfg).await,
        Commands::Status { json } => run_status(cfg, json).await,
    }
}

#[derive(Parser)]
#[command(name = "email-triage")]
#[command(about = "Classify emails as productive or unproductive", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one email and print the classification
    Classify {
        #[command(flatten)]
        input: InputArgs,
        /// Output JSON summary
        #[arg(long)]
        json: bool,
    },
    /// Line-oriented session over the same form
    Interactive,
    /// Check service health and model readiness
    Status {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Email text
    #[arg(long)]
    text: Option<String>,
    /// Email file (.txt or .pdf)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Read the email text from stdin
    #[arg(long)]
    stdin: bool,
}

async fn run_classify(cfg: AppConfig, input: InputArgs, json: bool) -> Result<()> {
    let view: Box<dyn View + Send> = if json {
        Box::new(NullView)
    } else {
        Box::new(TerminalView::stdout())
    };
    let mut controller = Controller::new(&cfg, build_service(&cfg), view);

    if let Some(path) = input.file {
        let handle = FileHandle::from_path(&path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        controller.switch_mode(InputMode::File);
        controller.select_file(Some(handle));
    } else if input.stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        controller.set_text(text);
    } else if let Some(text) = input.text {
        controller.set_text(text);
    }

    // A rejected file leaves nothing selected; report that error instead of
    // the generic "no file" one the submit would produce.
    let state = if controller.view_state() == ViewState::ErrorShown {
        ViewState::ErrorShown
    } else {
        controller.submit().await
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&Summary::of(controller.view_model()))?
        );
    }
    if state == ViewState::ErrorShown {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_interactive(cfg: AppConfig) -> Result<()> {
    let mut controller =
        Controller::new(&cfg, build_service(&cfg), Box::new(TerminalView::stdout()));
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    repl::run(&mut controller, stdin).await
}

async fn run_status(cfg: AppConfig, json: bool) -> Result<()> {
    let client = HttpClassifier::new(HttpClassifierConfig {
        base_url: cfg.service.base_url.clone(),
    });
    let health = client
        .health()
        .await
        .with_context(|| format!("service at {} is unreachable", cfg.service.base_url))?;
    let ready = client.ready().await?;

    if json {
        let summary = serde_json::json!({
            "base_url": cfg.service.base_url,
            "health": health,
            "ready": ready,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{}: {} (version {})",
            cfg.service.base_url,
            health.status,
            health.version.as_deref().unwrap_or("unknown")
        );
        match &ready {
            Readiness::Ready => println!("models: ready"),
            Readiness::Loading { message } => println!(
                "models: loading{}",
                message
                    .as_deref()
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            ),
        }
    }
    if ready != Readiness::Ready {
        bail!("classification service is not ready yet");
    }
    Ok(())
}
