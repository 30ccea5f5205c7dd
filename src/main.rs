#![forbid(unsafe_code)]

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Command};
use overlay_settings::constants::listing::DEFAULT_ENTRY;
use overlay_settings::environment::AppEnvironment;
use overlay_settings::host::HeadlessHost;
use overlay_settings::{ipc, ConfigContext};

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to install log subscriber")
}

fn build_host(cli: &Cli) -> Result<HeadlessHost> {
    if !cli.notify {
        return Ok(HeadlessHost::new());
    }

    let socket = match &cli.notify_socket {
        Some(path) => path.clone(),
        None => ipc::default_socket_path()?,
    };
    info!(socket = %socket.display(), "Sending notifications");
    Ok(HeadlessHost::with_socket(socket))
}

/// Resolve `--overlay`, falling back to the current overlay
fn target_overlay(ctx: &ConfigContext, overlay: Option<usize>) -> Result<usize> {
    let id = overlay.unwrap_or_else(|| ctx.overlays.current_id());
    if id >= ctx.overlays.count() {
        bail!("Overlay {id} does not exist ({} overlays loaded)", ctx.overlays.count());
    }
    Ok(id)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let env = match &cli.app_dir {
        Some(dir) => AppEnvironment::with_application_path(dir.clone()),
        None => AppEnvironment::detect(),
    };
    info!(dir = %env.application_path.display(), steam = env.is_steam_install, "Using application directory");

    let host = build_host(&cli)?;
    let mut ctx = ConfigContext::new(env, &host);

    if !matches!(cli.command, Command::RestoreDefaults) && !ctx.load_config_from_file(&host) {
        warn!(path = %ctx.env.config_path().display(), "No user config, using defaults");
    }

    match cli.command {
        Command::Show => {
            let json = serde_json::to_string_pretty(&ctx).context("Failed to serialize settings")?;
            println!("{json}");
        }
        Command::Profiles { multi } => {
            for name in ctx.overlay_profile_list(multi) {
                println!("{name}");
            }
        }
        Command::Migrate => {
            ctx.save_config_to_file(&host)?;
        }
        Command::RestoreDefaults => {
            ctx.restore_config_from_default(&host)?;
        }
        Command::ExportProfile { name, overlay } => {
            let id = target_overlay(&ctx, overlay)?;
            ctx.save_overlay_profile_to_file(&name, id, &host)?;
        }
        Command::ImportProfile { name, overlay } => {
            let id = target_overlay(&ctx, overlay)?;
            if name == DEFAULT_ENTRY {
                ctx.load_overlay_profile_default(false, id, &host);
            } else if !ctx.load_overlay_profile_from_file(&name, id, &host) {
                bail!("Profile {name:?} not found");
            }
            ctx.save_config_to_file(&host)?;
        }
        Command::ExportMulti { name } => {
            ctx.save_multi_overlay_profile_to_file(&name, &host)?;
        }
        Command::ImportMulti { name, keep_existing } => {
            if name == DEFAULT_ENTRY {
                ctx.load_overlay_profile_default(true, 0, &host);
            } else if !ctx.load_multi_overlay_profile_from_file(&name, !keep_existing, &host) {
                bail!("Profile {name:?} not found");
            }
            ctx.save_config_to_file(&host)?;
        }
        Command::DeleteProfile { name, multi } => {
            ctx.delete_overlay_profile(&name, multi)?;
        }
    }

    Ok(())
}
