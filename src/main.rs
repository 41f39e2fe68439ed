//! Binary entrypoint for the mqchat CLI.
//!
//! Commands:
//! - `start [--host <host>] [--port <port>] [--identity <name>]` - connect to the broker and enter the chat prompt
//! - `init` - create a starter `config.toml`
//!
//! See the library crate docs for module-level details: `mqchat::`.
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use mqchat::chat::{ChatSession, MessageRouter};
use mqchat::config::Config;
use mqchat::mqtt::MqttClient;
use mqchat::storage::ChatLogStore;
use mqchat::validation::validate_identity;

#[derive(Parser)]
#[command(name = "mqchat")]
#[command(about = "A console chat client for MQTT publish/subscribe brokers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the broker and start the chat prompt
    Start {
        /// Broker host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Broker port (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Identity to chat as (overrides config)
        #[arg(short, long)]
        identity: Option<String>,
    },
    /// Initialize a new configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            host,
            port,
            identity,
        } => {
            let mut config = Config::load(&cli.config).await?;
            // CLI overrides config; fallback to config when CLI absent
            if let Some(host) = host {
                config.broker.host = host;
            }
            if let Some(port) = port {
                config.broker.port = port;
            }
            if let Some(identity) = identity {
                config.chat.identity = identity;
            }
            init_logging(&Some(config.clone()), cli.verbose);
            info!("Starting mqchat v{}", env!("CARGO_PKG_VERSION"));

            if let Err(e) = validate_identity(&config.chat.identity) {
                anyhow::bail!("invalid identity '{}': {}", config.chat.identity, e);
            }

            run_chat(config).await?;
        }
        Commands::Init => {
            init_logging(&None, cli.verbose);
            info!("Initializing new mqchat configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
    }

    Ok(())
}

/// Connect, subscribe the broadcast topic, and run the command prompt until
/// end-of-input. Startup failure returns before any prompt is shown.
async fn run_chat(config: Config) -> Result<()> {
    let identity = config.chat.identity.clone();
    let store = Arc::new(ChatLogStore::new(&config.storage.data_dir).await?);
    let client = MqttClient::new(&config);
    let mut session = ChatSession::new(identity.clone(), client, store.clone());
    session.start(Arc::new(MessageRouter::new(store))).await?;

    println!(
        "Connected to broker at {}:{} as '{}'.",
        config.broker.host, config.broker.port, identity
    );
    println!("Commands: send <todos|a/b> <message>  |  chat <todos|topic>");

    let mut rl = DefaultEditor::new()?;
    let prompt = format!("{}> ", identity);
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                // A failed command is terminal for that command only.
                if let Err(e) = session.handle_line(line).await {
                    eprintln!("error: {:#}", e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at the prompt - keep the session alive
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("input error: {}", err);
                break;
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if let Some(file) = config.as_ref().and_then(|c| c.logging.file.clone()) {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            // Route records to the log file so they do not interleave with
            // the chat prompt.
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            builder.format(move |_fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{} [{}] {}", ts, record.level(), record.args());
                }
                Ok(())
            });
        } else {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
