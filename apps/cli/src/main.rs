//! `kami`: capture the JavaScript patch selected in Origami Studio.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kami_capture::{
    default_config_path, load_script, CaptureConfig, CaptureCoordinator, CaptureOutcome,
    CaptureTrigger, TriggerResult,
};
use kami_context::platform::PlatformProvider;
use kami_context::ActiveAppProviderRef;
use kami_input::{AccessibilityPermission, ForegroundCopyCommand, PermissionProvider};
use kami_pasteboard::platform::PlatformPasteboard;
use kami_patch::{DecodedRecord, PathResolver};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kami")]
#[command(about = "Open the JavaScript patch selected in Origami Studio", long_about = None)]
#[command(version)]
struct Cli {
    /// Capture config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture the selected patch and print its script path
    Capture {
        /// Wait before capturing, to switch to Origami first
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        /// Capture whatever app is frontmost, not only Origami
        #[arg(long)]
        anywhere: bool,
        /// Also print the script source
        #[arg(long)]
        print: bool,
    },
    /// Decode a saved clipboard payload and show the declared script path
    Decode {
        /// Binary or XML property list file
        file: PathBuf,
        /// Dump the whole payload as XML
        #[arg(long)]
        dump: bool,
    },
    /// Find where a declared script path really lives
    Resolve { declared_path: String },
    /// Check the Accessibility permission the copy command needs
    Permission {
        /// Show the system prompt if not granted
        #[arg(long)]
        request: bool,
    },
    /// Print the effective capture config
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kami=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CaptureConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load capture config")?;
    tracing::debug!(?config, "Effective capture config");

    match cli.command {
        Commands::Capture {
            delay_ms,
            anywhere,
            print,
        } => run_capture(config, delay_ms, anywhere, print).await,
        Commands::Decode { file, dump } => run_decode(&config, file, dump),
        Commands::Resolve { declared_path } => run_resolve(&declared_path),
        Commands::Permission { request } => run_permission(request),
        Commands::Config => run_config(&config, cli.config),
    }
}

async fn run_capture(
    mut config: CaptureConfig,
    delay_ms: u64,
    anywhere: bool,
    print: bool,
) -> Result<()> {
    if anywhere {
        config.target_bundle_id = None;
    }

    if delay_ms > 0 {
        eprintln!("Capturing in {delay_ms}ms, switch to Origami Studio now");
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    let apps: ActiveAppProviderRef = Arc::new(PlatformProvider::new());
    let coordinator = Arc::new(CaptureCoordinator::new(
        config,
        Arc::new(PlatformPasteboard::new()),
        Arc::new(ForegroundCopyCommand::new(apps.clone())),
        Arc::new(AccessibilityPermission),
    )?);
    let trigger = CaptureTrigger::new(coordinator.clone(), apps);

    let mut attempt = tokio::spawn(async move { trigger.on_shortcut().await });

    let result = tokio::select! {
        joined = &mut attempt => joined,
        _ = tokio::signal::ctrl_c() => {
            coordinator.cancel();
            attempt.await
        }
    }
    .context("Capture task failed")?;

    let outcome: CaptureOutcome = match result {
        TriggerResult::Completed(outcome) => outcome,
        TriggerResult::Ignored { frontmost } => bail!(
            "Frontmost app is {}, not Origami Studio (use --anywhere to capture anyway)",
            frontmost.as_deref().unwrap_or("unknown")
        ),
    };

    let script = match outcome {
        Ok(script) => script,
        Err(e) => bail!("{} ({})", e.user_message(), e.code()),
    };

    println!("{}", script.to_uri());
    if print {
        print!("{}", load_script(&script)?);
    }
    Ok(())
}

fn run_decode(config: &CaptureConfig, file: PathBuf, dump: bool) -> Result<()> {
    let bytes =
        std::fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
    let record = DecodedRecord::decode(&bytes)
        .with_context(|| format!("Failed to decode {}", file.display()))?;

    if dump {
        record
            .root()
            .to_writer_xml(std::io::stdout().lock())
            .context("Failed to write payload")?;
        println!();
    }

    match record.extract_path(&config.query) {
        Some(path) => {
            println!("{path}");
            Ok(())
        }
        None => bail!(
            "No '{}' record with a {} path among {} records",
            config.query.type_name_value,
            config.query.required_suffix,
            record.records().count()
        ),
    }
}

fn run_resolve(declared_path: &str) -> Result<()> {
    match PathResolver::new().resolve(declared_path) {
        Some(resolved) => {
            println!("{}", resolved.as_path().display());
            Ok(())
        }
        None => bail!("No subdirectory next to {declared_path} contains the script"),
    }
}

fn run_permission(request: bool) -> Result<()> {
    let permission = AccessibilityPermission;
    if permission.has_capture_permission() {
        println!("granted");
        return Ok(());
    }

    if request {
        permission.request_capture_permission();
    }
    bail!("Accessibility permission not granted")
}

fn run_config(config: &CaptureConfig, explicit: Option<PathBuf>) -> Result<()> {
    match explicit.or_else(default_config_path) {
        Some(path) => eprintln!("# {}", path.display()),
        None => eprintln!("# no config directory, using defaults"),
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
