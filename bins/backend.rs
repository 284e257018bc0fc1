use clap::Parser;
use configs::{AppConfig, LaunchArgs};
use dotenvy::dotenv;
use state::ProcessState;
use tracing::{error, info};

/// Placeholder model handle; the backend has not loaded a model at bootstrap.
struct Unloaded;

fn init_logging() {
    // load .env first so RUST_LOG takes effect
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "backend", event = "logger_init", "tracing subscriber initialized");
}

async fn run(args: LaunchArgs) -> anyhow::Result<()> {
    let config = AppConfig::resolve(args.config.as_deref())?;
    info!(models_dir = %config.storage.models_dir, "config resolved");
    common::env::ensure_env(&config.storage.models_dir).await?;

    let state = state::bootstrap::<Unloaded>(args, &config);
    report(&state)
}

fn report(state: &ProcessState<Unloaded>) -> anyhow::Result<()> {
    let snapshot = state.snapshot().to_json()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = LaunchArgs::parse();
    init_logging();

    info!(
        service = "backend",
        event = "start",
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        bind = %args.bind_addr(),
        "backend bootstrap starting"
    );

    match run(args).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "backend", event = "run_failed", error = %e, "bootstrap failed");
            std::process::ExitCode::FAILURE
        }
    }
}
