use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use bcsync_core::{BindingService, BuildConfigStore, ResourceBinding};
use bcsync_kube::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS, KubeStore, KubeStoreConfig};
use bcsync_model::JobType;
use bcsync_observe::{LoggerConfig, LoggerError, init_local_offset, init_logger};

/// Exit code when the binding no longer refers to a live build config.
const EXIT_ABSENT: u8 = 3;

/// Bind jobs to build configs and check whether existing bindings are still current.
#[derive(Parser)]
#[command(name = "bcsync-check", version)]
struct Cli {
    #[command(flatten)]
    conn: ConnArgs,

    /// Log filter directive; takes precedence over `BCSYNC_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format (text, json, journald); takes precedence over `BCSYNC_LOG_FORMAT`.
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConnArgs {
    /// Kubeconfig context; inferred when omitted.
    #[arg(long, global = true)]
    context: Option<String>,

    /// API connect timeout in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_CONNECT_TIMEOUT_MS)]
    connect_timeout_ms: u64,

    /// API read timeout in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_READ_TIMEOUT_MS)]
    read_timeout_ms: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a build config and print the binding a job of the given type would store.
    Bind {
        #[arg(long, short)]
        namespace: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "pipeline")]
        job_type: JobType,
    },
    /// Check whether a stored binding still refers to a live build config.
    ///
    /// The binding is read from `--file` (JSON as printed by `bind`) or given field by field.
    Resolve {
        #[arg(long, conflicts_with_all = ["namespace", "name", "uid", "resource_version", "context_dir"])]
        file: Option<PathBuf>,
        #[arg(long, short, required_unless_present = "file")]
        namespace: Option<String>,
        #[arg(long, required_unless_present = "file")]
        name: Option<String>,
        #[arg(long, required_unless_present = "file")]
        uid: Option<String>,
        #[arg(long, required_unless_present = "file")]
        resource_version: Option<String>,
        #[arg(long, default_value = "")]
        context_dir: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    // Must happen before the runtime spawns worker threads.
    init_local_offset();

    let cli = Cli::parse();

    let logger = logger_config(LoggerConfig::default().with_env_overrides()?, &cli)?;
    init_logger(&logger)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let store_cfg = KubeStoreConfig {
        context: cli.conn.context,
        connect_timeout_ms: cli.conn.connect_timeout_ms,
        read_timeout_ms: cli.conn.read_timeout_ms,
    };
    let store = KubeStore::connect(&store_cfg)
        .await
        .context("failed to connect to cluster")?;
    info!("connected to cluster");

    let service = BindingService::new(Arc::new(store));

    match cli.command {
        Command::Bind {
            namespace,
            name,
            job_type,
        } => bind(&service, &namespace, &name, job_type).await,
        Command::Resolve {
            file,
            namespace,
            name,
            uid,
            resource_version,
            context_dir,
        } => {
            let binding = match file {
                Some(path) => read_binding(&path)?,
                None => ResourceBinding::new(
                    namespace.unwrap_or_default(),
                    name.unwrap_or_default(),
                    uid.unwrap_or_default(),
                    resource_version.unwrap_or_default(),
                    context_dir,
                ),
            };
            resolve(&service, &binding).await
        }
    }
}

async fn bind(
    service: &BindingService,
    namespace: &str,
    name: &str,
    job_type: JobType,
) -> anyhow::Result<ExitCode> {
    if !service.is_eligible(job_type) {
        bail!("job type '{job_type}' cannot be bound to a build config");
    }

    let Some(bc) = service.store().get(namespace, name).await? else {
        eprintln!("build config {namespace}/{name} not found");
        return Ok(ExitCode::from(EXIT_ABSENT));
    };

    let binding = service
        .bind(job_type, &bc)
        .with_context(|| format!("build config {namespace}/{name} cannot be bound"))?;
    println!("{}", serde_json::to_string_pretty(&binding)?);
    Ok(ExitCode::SUCCESS)
}

async fn resolve(service: &BindingService, binding: &ResourceBinding) -> anyhow::Result<ExitCode> {
    debug!(binding = %binding, "resolving binding");

    match service.resolve(binding).await? {
        Some(live) => {
            let live_version = live.resource_version().unwrap_or_default();
            let live_dir = live.context_dir().unwrap_or_default();
            println!("live: {binding}");
            println!(
                "  resourceVersion: bound={} live={}{}",
                binding.resource_version(),
                live_version,
                marker(binding.resource_version() != live_version)
            );
            println!(
                "  contextDir:      bound={:?} live={:?}{}",
                binding.context_dir(),
                live_dir,
                marker(binding.context_dir() != live_dir)
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("absent: {binding} no longer refers to a live build config");
            Ok(ExitCode::from(EXIT_ABSENT))
        }
    }
}

/// Apply `--log-level` and `--log-format` over `base`, which already carries env overrides.
fn logger_config(base: LoggerConfig, cli: &Cli) -> Result<LoggerConfig, LoggerError> {
    base.with_overrides(cli.log_level.clone(), cli.log_format.clone())
}

fn read_binding(path: &Path) -> anyhow::Result<ResourceBinding> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid binding in {}", path.display()))
}

fn marker(changed: bool) -> &'static str {
    if changed { "  (changed)" } else { "" }
}
