use clap::{Parser, Subcommand};
use flick::config::{Config, DEFAULT_CONFIG_PATH, TransportKind};
use flick::gesture::GestureEvent;
use flick::pipeline::run_pipeline;
use flick::transport;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flick", about = "Drive a TV remote with hand gestures")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Recognize gestures from a landmark stream (default)
    Run {
        /// JSON-lines landmark file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// adb, keyboard or console
        #[arg(short, long)]
        transport: Option<TransportKind>,

        /// Log commands instead of sending them
        #[arg(long)]
        dry_run: bool,

        /// Disable the terminal status line
        #[arg(long)]
        no_hud: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Print the gesture to key code table
    Keys,
}

#[hotpath::main]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flick=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Run {
        input: "-".into(),
        config: PathBuf::from(DEFAULT_CONFIG_PATH),
        transport: None,
        dry_run: false,
        no_hud: false,
    });

    match command {
        Command::Run {
            input,
            config,
            transport,
            dry_run,
            no_hud,
        } => {
            let mut config = Config::load(&config)?;
            if let Some(kind) = transport {
                config.transport.kind = kind;
            }
            if dry_run {
                config.transport.kind = TransportKind::Console;
            }
            let hud = config.ui.hud && !no_hud;

            let transport = transport::from_config(&config.transport)?;
            let stats = run_pipeline(&config, &input, transport, hud)?;
            eprint!("{}", stats.summary());
        }
        Command::Config { config } => {
            print!("{}", Config::load(&config)?.to_toml()?);
        }
        Command::Keys => {
            for event in GestureEvent::ALL {
                let command = event.command();
                println!(
                    "{:<12} {:<7} {}",
                    event.to_string(),
                    command.to_string(),
                    command.keycode()
                );
            }
        }
    }

    Ok(())
}
