//! CLI entrypoint for Estate OS
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod progress;

use std::fs;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use estate_application::{RunTeamInput, RunTeamUseCase, TeamRunError};
use estate_domain::{AttachmentRef, Message, ModuleId, ToolProvider};
use estate_infrastructure::{
    ConfigLoader, DocumentStore, FileConfig, HttpCompletionGateway, JsonlTranscriptLogger,
    ModuleRegistry, ToolRegistry,
};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};
use progress::ConsoleProgress;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    match cli.command {
        Command::Modules => list_modules(&config),
        Command::Tools => list_tools(),
        Command::Ask {
            module,
            question,
            attach,
        } => ask(&config, &module, &question, &attach, cli.quiet).await,
    }
}

fn list_modules(config: &FileConfig) -> Result<()> {
    let registry = ModuleRegistry::bootstrap(&config.model());

    println!("Modules:");
    for (id, metadata) in registry.list() {
        let status = registry.status(id);
        let availability = match status.error {
            None => "available".to_string(),
            Some(reason) => format!("unavailable: {}", reason),
        };
        println!(
            "  {} {}  {} [{}]",
            metadata.icon, id, metadata.name, availability
        );
        println!("      {}", metadata.description);
    }
    Ok(())
}

fn list_tools() -> Result<()> {
    let registry = ToolRegistry::with_module_providers();

    for provider in registry.providers() {
        println!("{} ({})", provider.display_name(), provider.id());
        for tool in provider.tool_spec().all() {
            println!("  {:<28} {}", tool.name, tool.description);
        }
        println!();
    }
    println!("{} tools total", registry.tool_count());
    Ok(())
}

async fn ask(
    config: &FileConfig,
    module: &str,
    question: &str,
    attach: &[std::path::PathBuf],
    quiet: bool,
) -> Result<()> {
    let module_id = ModuleId::from(module);
    let registry = ModuleRegistry::bootstrap(&config.model());

    // Unavailable modules are reported, never panicked on
    let team = match registry.resolve(&module_id) {
        Ok(team) => team,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    let api_key = match std::env::var(&config.gateway.api_key_env) {
        Ok(key) if !key.is_empty() => key,
        _ => bail!(
            "No API key found. Set the {} environment variable.",
            config.gateway.api_key_env
        ),
    };

    // Persist attachments before the run so the team sees stable paths
    let store = DocumentStore::new(&config.documents.dir);
    let mut attachments: Vec<AttachmentRef> = Vec::new();
    for path in attach {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let stored = store.save(&module_id, &name, &bytes)?;
        info!(file = %stored.stored_path, "Attachment stored");
        attachments.push(stored);
    }

    let transcript = config
        .transcripts
        .enabled
        .then(|| JsonlTranscriptLogger::for_module(&config.transcripts.dir, &module_id))
        .flatten();
    if let Some(transcript) = &transcript {
        transcript.log_message(&Message::user(question));
    }

    // === Dependency Injection ===
    let gateway = Arc::new(HttpCompletionGateway::new(
        &config.gateway.endpoint,
        api_key,
    ));
    let tools = Arc::new(ToolRegistry::with_module_providers());
    let use_case = RunTeamUseCase::new(gateway, tools).with_params(config.execution_params());

    // Ctrl-C cancels between steps instead of killing the process
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let input = RunTeamInput::new(question).with_attachments(attachments);
    let result = if quiet {
        use_case.execute(&team, input, &cancel).await
    } else {
        use_case
            .execute_with_progress(&team, input, &cancel, &ConsoleProgress)
            .await
    };

    let report = match result {
        Ok(report) => report,
        Err(TeamRunError::Cancelled) => {
            println!("Run cancelled.");
            return Ok(());
        }
    };

    if let Some(transcript) = &transcript {
        transcript.log_message(&Message::assistant(report.response.as_str()));
        transcript.log_report(&report);
    }

    println!("{}", report.response);
    Ok(())
}
