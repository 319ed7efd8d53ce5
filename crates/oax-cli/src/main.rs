mod store;
mod transport;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oax_core::config::{self, CONFIG_FILE_NAME, ExplorerConfig};
use oax_core::dialog::{self, Dialog};
use oax_core::discover::discover;
use oax_core::parse::operation::HttpMethod;
use oax_core::parse::spec::Specification;
use oax_core::synthesize::Synthesizer;

use store::{InputStore, parse_assignments};
use transport::Transport;

#[derive(Parser)]
#[command(name = "oax", about = "Explore and call OpenAPI 3.0 described APIs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and resolve an OpenAPI document
    Validate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Summarize the operations of a resolved document
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,
    },

    /// List the values an operation needs before it can be called
    Inputs {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// HTTP method of the operation
        #[arg(short, long)]
        method: HttpMethod,

        /// Path template of the operation, e.g. /users/{id}
        path: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,
    },

    /// Build the request for an operation and optionally send it
    Request {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// HTTP method of the operation
        #[arg(short, long)]
        method: HttpMethod,

        /// Path template of the operation, e.g. /users/{id}
        path: String,

        /// Input value as key=value, repeatable
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Perform the call and remember the values used
        #[arg(long)]
        send: bool,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// List the API documents available for selection
    Apis {
        /// Directory to scan, defaults to the configured api_dir
        dir: Option<PathBuf>,
    },

    /// Initialize a new oax configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Inputs {
            input,
            method,
            path,
            format,
        } => cmd_inputs(input, method, &path, format),

        Commands::Request {
            input,
            method,
            path,
            set,
            send,
            format,
        } => cmd_request(input, method, &path, &set, send, format),

        Commands::Apis { dir } => cmd_apis(dir),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oax", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config file from the current directory, defaults when absent.
fn load_config() -> Result<ExplorerConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))?;
    Ok(cfg.unwrap_or_default())
}

fn load_spec(input: Option<PathBuf>, cfg: &ExplorerConfig) -> Result<Specification> {
    let path = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    oax_core::load(&content).with_context(|| format!("failed to load {}", path.display()))
}

fn print<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(value)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn cmd_validate(input: Option<PathBuf>) -> Result<()> {
    let cfg = load_config()?;
    let spec = load_spec(input, &cfg)?;

    eprintln!("Valid OpenAPI {} document: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Servers: {}", spec.servers.len());
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Operations: {}", spec.operations().count());

    if let Some(ref components) = spec.components {
        eprintln!("  Schemas: {}", components.schemas.len());
    }

    eprintln!("All references resolved.");
    Ok(())
}

fn cmd_inspect(input: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let cfg = load_config()?;
    let spec = load_spec(input, &cfg)?;
    print(&build_inspect_summary(&spec), format)
}

fn build_inspect_summary(spec: &Specification) -> serde_json::Value {
    let servers: Vec<&str> = spec.servers.iter().map(|s| s.url.as_str()).collect();

    let operations: Vec<serde_json::Value> = spec
        .operations()
        .map(|(path, method, op)| {
            let body_types: Vec<&String> = op
                .request_body
                .as_ref()
                .map(|b| b.content.keys().collect())
                .unwrap_or_default();
            serde_json::json!({
                "method": method.as_str(),
                "path": path,
                "summary": op.summary,
                "parameters": op.inline_parameters().map(|p| &p.name).collect::<Vec<_>>(),
                "request_body": body_types,
                "responses": op.responses.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "servers": servers,
        "operations": operations,
    })
}

fn cmd_inputs(
    input: Option<PathBuf>,
    method: HttpMethod,
    path: &str,
    format: OutputFormat,
) -> Result<()> {
    let cfg = load_config()?;
    let spec = load_spec(input, &cfg)?;
    let operation = spec
        .operation(path, method)
        .with_context(|| format!("no operation {method} {path}"))?;

    let store = InputStore::open(&cfg.inputs_file)?;
    let inputs = discover(&spec, operation, &store);
    print(&inputs, format)
}

fn cmd_request(
    input: Option<PathBuf>,
    method: HttpMethod,
    path: &str,
    set: &[String],
    send: bool,
    format: OutputFormat,
) -> Result<()> {
    let cfg = load_config()?;
    let spec = load_spec(input, &cfg)?;
    let operation = spec
        .operation(path, method)
        .with_context(|| format!("no operation {method} {path}"))?;

    let supplied = parse_assignments(set)?;
    let mut store = InputStore::open(&cfg.inputs_file)?;
    let values = store.merged(&supplied);

    let synthesizer = Synthesizer::new(&spec).with_fallback_base_url(&cfg.fallback_base_url);
    let request = synthesizer.synthesize(operation, method, path, &values)?;

    if !send {
        return print(&request, format);
    }

    let transport = Transport::new(Duration::from_secs(cfg.timeout_secs))?;
    let call = transport.send(&request);
    store.remember(&supplied)?;
    log::debug!("remembered {} inputs in {}", supplied.len(), store.path().display());
    print(&call, format)
}

fn cmd_apis(dir: Option<PathBuf>) -> Result<()> {
    let cfg = load_config()?;
    let dir = dir.unwrap_or_else(|| PathBuf::from(&cfg.api_dir));
    list_apis(&dir)
}

fn list_apis(dir: &Path) -> Result<()> {
    let selection = dialog::api_selection(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?;
    if let Dialog::ApiSelection { available } = selection {
        if available.is_empty() {
            eprintln!("No API documents in {}", dir.display());
        }
        for name in available {
            println!("{name}");
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
