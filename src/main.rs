//! proxycmd demo host.
//!
//! Drives one console over stdio: inbound packets are read from stdin (JSON
//! `Inbound` objects, or plain text treated as console channel chat) and
//! every outbound packet is written to stdout as one JSON line. Logs go to
//! stderr, as JSON when `PROXYCMD_LOG_FORMAT=json`.

use proxycmd::config::validate;
use proxycmd::proto::{Inbound, Outbound, PRIVATE_CHAT_CHANNEL, PacketKind};
use proxycmd::{Config, Console, HookHost, HostInfo, SubscribeError, TomlFileStore};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Accepts every subscription; the stdin loop delivers everything anyway.
struct StdioHost;

impl HookHost for StdioHost {
    fn subscribe(&mut self, kind: PacketKind) -> Result<(), SubscribeError> {
        debug!(packet = %kind, "Subscribed");
        Ok(())
    }
}

fn stdout_sink(packet: Outbound) {
    match serde_json::to_string(&packet) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!(error = %e, packet = %packet.kind(), "Failed to encode packet"),
    }
}

fn env_version(key: &str) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

fn parse_line(line: &str) -> Inbound {
    if line.trim_start().starts_with('{') {
        match serde_json::from_str(line) {
            Ok(packet) => return packet,
            Err(e) => debug!(error = %e, "Not a packet, treating as chat"),
        }
    }
    Inbound::Chat {
        channel: PRIVATE_CHAT_CHANNEL,
        message: line.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if std::env::var("PROXYCMD_LOG_FORMAT").is_ok_and(|v| v == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "proxycmd.toml".to_string());

    let config = Config::load_or_default(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;
    if let Err(findings) = validate(&config) {
        for finding in &findings {
            warn!(path = %config_path, issue = %finding, "Config problem");
        }
    }
    // Write back so new keys show up with their defaults.
    config.save(&config_path)?;

    proxycmd::metrics::init();

    let host_info = HostInfo {
        protocol_version: env_version("PROXYCMD_PROTOCOL_VERSION"),
        patch_version: env_version("PROXYCMD_PATCH_VERSION"),
    };
    let mut console = Console::new(config, stdout_sink)
        .with_store(Arc::new(TomlFileStore::new(&config_path)))
        .with_host_info(host_info);

    console.add("echo", |ctx, args| {
        ctx.message(args);
        Ok(())
    })?;

    let subscribed = console.attach(&mut StdioHost)?;
    info!(
        config = %config_path,
        packets = subscribed.len(),
        "proxycmd console ready"
    );

    console.handle(&Inbound::Login);
    console.handle(&Inbound::ClientSettingsLoaded);
    console.run_deferred();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let packet = parse_line(&line);
        let verdict = console.handle(&packet);
        debug!(packet = %packet.kind(), ?verdict, "Delivered");
        console.run_deferred();
    }

    debug!(metrics = %proxycmd::metrics::gather_metrics(), "Shutting down");
    Ok(())
}
