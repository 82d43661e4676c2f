mod config;
mod http_server;
mod logging;
mod matching;
mod navidrome;
mod ports;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::{NavidromeArgs, NavidromeConfig, resolve_web_dir},
    http_server::{app::HttpServerConfig, state::AppState},
    logging::init_tracing,
    services::navidrome::{ServerInfo, client::NavidromeHttpAdapter, connection_status},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter directive, e.g. `info` or `navi_playlist=debug`
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: String,

    /// OTLP (gRPC) endpoint to export traces to
    #[arg(long, global = true, env = "OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,

    /// The port to run the server on
    #[arg(short, long, default_value = "8080", global = true, env = "PORT")]
    port: u16,

    /// Directory holding the web frontend
    #[arg(long, global = true, env = "WEB_DIR")]
    web_dir: Option<PathBuf>,

    #[command(flatten)]
    navidrome: NavidromeArgs,

    /// Defaults to `serve`
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Args {
    fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Serve the web UI and the playlist API (default)
    Serve,
    /// Check that the Navidrome server is reachable and the credentials work
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let telemetry = init_tracing(
        env!("CARGO_PKG_NAME"),
        args.otlp_endpoint.as_deref(),
        &args.log_level,
    )?;

    let result = run(args).await;
    telemetry.shutdown();
    result
}

async fn run(args: Args) -> Result<()> {
    let navidrome_config = NavidromeConfig::from_args(args.navidrome.clone())?;
    let client = NavidromeHttpAdapter::new(&navidrome_config)
        .wrap_err("Failed to create Navidrome client")?;
    let server_info = ServerInfo {
        server_url: navidrome_config.server_url(),
        user: navidrome_config.user.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match args.command() {
        Commands::Serve => {
            tracing::info!(
                "Using Navidrome at {} as {}",
                server_info.server_url,
                server_info.user
            );
            let app_state = Arc::new(AppState {
                navidrome: Arc::new(client),
                server_info,
            });
            http_server::app::start(HttpServerConfig {
                port: args.port,
                web_dir: resolve_web_dir(args.web_dir),
                app_state,
            })
            .await?;
        }
        Commands::Ping => {
            let status = connection_status(&client, &server_info).await;
            println!("{}", serde_json::to_string_pretty(&status)?);
            if !status.connected {
                return Err(color_eyre::eyre::eyre!(
                    "Could not connect to {}",
                    server_info.server_url
                ));
            }
        }
    }

    Ok(())
}
