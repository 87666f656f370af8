use anyhow::{Context, Result};
use clap::Parser;
use pte_practice::cli::{Cli, Command};
use pte_practice::{create_router, scoring, AppContext, AppState, Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match Config::load(&cli.config) {
        Ok(cfg) => {
            init_tracing(&cfg.service.log_level);
            cfg
        }
        Err(e) => {
            init_tracing("info");
            error!("Failed to load config from {}: {:#}", cli.config, e);
            return Err(e);
        }
    };

    match cli.command {
        Command::Serve { bind, port } => serve(cfg, bind, port).await,
        Command::Score {
            reference,
            transcript,
            highlight,
        } => {
            let target = scoring::scoring_target(&reference, highlight.as_deref());
            let result = scoring::score_attempt(&transcript, target);
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(cfg: Config, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| cfg.service.http.bind.clone());
    let port = port.unwrap_or(cfg.service.http.port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Practice service: {}", cfg.api.base_url);
    info!(
        "Timing: prep {}s, record {}s (one-line {}s)",
        cfg.practice.prep_secs, cfg.practice.record_secs, cfg.practice.one_line_record_secs
    );
    info!("Speech source: {:?}", cfg.speech.source);

    let ctx = AppContext::from_config(cfg);
    let router = create_router(AppState::new(ctx));

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, router)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
