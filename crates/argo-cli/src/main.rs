//! Argo CLI - chat dashboard and relay server
//!
//! Usage:
//!   argo serve          - Run the chat relay
//!   argo chat           - Open the terminal dashboard
//!   argo send <text>    - Send one message and print the exchange

mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use argo_core::{ArgoConfig, ChatSession, HttpRelayClient};
use argo_memory::{AuditLog, DisabledAuditLog, SupabaseAuditLog};
use argo_relay::{RelayState, WebhookForwarder};

#[derive(Parser)]
#[command(name = "argo")]
#[command(author = "HeyBattle1")]
#[command(version)]
#[command(about = "Argo Assistant - chat dashboard and webhook relay", long_about = None)]
struct Cli {
    /// Caller identifier sent with chat requests
    #[arg(long, global = true)]
    user_id: Option<String>,

    /// Relay endpoint the client posts to
    #[arg(long, global = true)]
    relay_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay between the UI and the automation webhook
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,

        /// Downstream webhook URL
        #[arg(long)]
        webhook_url: Option<String>,
    },

    /// Open the interactive dashboard
    Chat,

    /// Send a single message and print the exchange
    Send {
        /// Message text
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (stderr, so the dashboard owns stdout)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = ArgoConfig::load().context("failed to load configuration")?;
    if let Some(user_id) = cli.user_id {
        config.user_id = user_id;
    }
    if let Some(relay_url) = cli.relay_url {
        config.relay_url = relay_url;
    }

    match cli.command {
        Commands::Serve { bind, webhook_url } => {
            if let Some(bind) = bind {
                config.relay.bind = bind;
            }
            if let Some(url) = webhook_url {
                config.relay.webhook_url = url;
            }
            run_relay(&config).await
        }

        Commands::Chat => tui::run_tui(&config).await,

        Commands::Send { text } => send_once(&config, &text.join(" ")).await,
    }
}

async fn run_relay(config: &ArgoConfig) -> anyhow::Result<()> {
    let audit: Arc<dyn AuditLog> = match config.supabase() {
        Some((url, key)) => Arc::new(SupabaseAuditLog::new(url, key, &config.relay.memory_table)),
        None => {
            tracing::warn!("SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY not set; audit logging disabled");
            Arc::new(DisabledAuditLog)
        }
    };

    let webhook = WebhookForwarder::new(
        config.relay.webhook_url.clone(),
        Duration::from_secs(config.relay.webhook_timeout_secs),
    )?;

    let listener = tokio::net::TcpListener::bind(&config.relay.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.relay.bind))?;

    tracing::info!(
        bind = %config.relay.bind,
        webhook = %webhook.url(),
        timeout_secs = config.relay.webhook_timeout_secs,
        "argo relay listening"
    );
    println!("Argo relay listening on {}", config.relay.bind);

    argo_relay::serve(listener, RelayState::new(audit, Arc::new(webhook))).await?;
    Ok(())
}

async fn send_once(config: &ArgoConfig, text: &str) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("nothing to send");
    }

    let client = HttpRelayClient::new(config.relay_url.clone());
    let mut session = ChatSession::new(config.user_id.clone());
    session.submit(&client, text).await;

    for msg in session.messages() {
        println!("[{}] {}: {}", msg.clock(), msg.sender.label(), msg.text);
    }
    for notice in session.take_notices() {
        eprintln!("⚠️  {}: {}", notice.title, notice.description);
    }
    Ok(())
}
