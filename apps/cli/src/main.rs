use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use lumi_core_sdk::{config::Config, llm, prompts, server, telemetry};

/**
 * \brief CLI entry point: run the gateway or talk to Lumi from a terminal.
 */
#[derive(Parser, Debug)]
#[command(name = "lumi", version, about = "Lumi listening companion gateway")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /**
     * \brief Start the HTTP gateway serving the page and the chat API.
     */
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 8000)]
        port: u16,
        /** \brief Directory holding index.html and the /static assets */
        #[arg(long, env = "LUMI_STATIC_DIR", default_value = "static")]
        static_dir: String,
    },

    /**
     * \brief Send a single message (no history) and print the reply.
     */
    Chat {
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let cli = Cli::parse();
    let config = Config::from_env().context("load configuration failed")?;
    info!(base_url = %config.base_url, model = %config.model, "configuration loaded");

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            let state = server::AppState::new(config).context("build http client failed")?;
            let addr = format!("{}:{}", host, port);
            server::run(&addr, state, &static_dir).await?;
        }
        Commands::Chat { message } => {
            let text = message.trim();
            anyhow::ensure!(!text.is_empty(), "message must not be empty");

            let state = server::AppState::new(config).context("build http client failed")?;
            let messages = prompts::assemble(&[], text);
            let reply = llm::chat_once(&state.http, &state.config, &messages)
                .await
                .context("chat completion failed")?;
            println!("{}", reply.trim());
        }
    }

    Ok(())
}
