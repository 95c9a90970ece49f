mod commands;
mod config;
mod console;
mod permissions;

use anyhow::{Context, Result};
use clap::Parser;
use cmdtree_core::{
    CommandDispatcher, CommandRegistry, CompileContext, RegistrationEnvironment, RegistryConfig,
};
use config::Config;
use console::ConsoleSource;
use permissions::PermissionsStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "Config.toml")]
    config: PathBuf,

    /// Run console commands on behalf of this principal
    #[arg(long = "as", value_name = "PRINCIPAL")]
    principal: Option<String>,
}

fn main() -> Result<()> {
    // Setup logging
    let logfile = tracing_appender::rolling::daily("./logs", "cmdtree.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("CMDTREE_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stdout))
        .with_env_filter(env_filter)
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    let permissions = Arc::new(PermissionsStore::load(&config.permissions_file)?);

    let mut registry = CommandRegistry::new(RegistryConfig {
        admin_root: config.admin_root.clone(),
        admin_permission: config.admin_permission.clone(),
    });
    commands::register_commands(&mut registry, &permissions);

    let mut dispatcher = CommandDispatcher::new(config.registration_environment()?);
    let context = CompileContext::with_shared(permissions.clone());
    let report = registry.register_all(&mut dispatcher, RegistrationEnvironment::All, &context);
    if !report.skipped.is_empty() {
        warn!("Some commands were not registered: {}", report.skipped.join(", "));
    }

    ctrlc::set_handler(|| {
        info!("Shutting down");
        std::process::exit(0);
    })
    .context("Failed to set the interrupt handler")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start the suggestion runtime")?;

    let source = ConsoleSource::new(config.console_name.clone(), args.principal);
    info!("Ready, type a command or ?<partial command> for completions");
    console::run(&dispatcher, &source, &runtime, config.log_commands)
}
