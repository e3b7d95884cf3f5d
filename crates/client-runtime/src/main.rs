//! # Bot Client Runtime
//!
//! Demo entry point: runs one session against a static operation provider
//! and replays a short sequence of server pushes.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + environment)
//! 2. Initialize logging from the configured filter
//! 3. Build and start the session
//! 4. Replay the demo pushes, print notices
//! 5. Wait for Ctrl+C, shut down, report counters

use std::sync::Arc;

use anyhow::{Context, Result};
use client_runtime::{load_config, ClientSession, StaticProvider};
use shared_bus::ProtocolEvent;
use shared_types::{BotGroup, Uid, Uin};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEMO_BOT_UIN: u32 = 10001;

const DEMO_FIXTURE: &str = r#"{
    "friends": [
        { "uin": 100, "uid": "u_100", "nickname": "alice", "remarks": "" }
    ],
    "groups": [{
        "group_uin": 5,
        "members": [
            { "uin": 100, "uid": "u_100", "member_card": null, "permission": "Owner" },
            { "uin": 200, "uid": "u_200", "member_card": "bob", "permission": "Member" }
        ]
    }]
}"#;

fn demo_events() -> Vec<ProtocolEvent> {
    vec![
        ProtocolEvent::GroupListPushed {
            groups: vec![BotGroup::new(5, "demo group"), BotGroup::new(6, "quiet group")],
        },
        ProtocolEvent::GroupMemberIncreased {
            group_uin: Uin(5),
            member_uid: Uid::new("u_200"),
            operator_uid: Some(Uid::new("u_100")),
        },
        ProtocolEvent::GroupMemberDecreased {
            group_uin: Uin(5),
            member_uid: Uid::new("u_unknown"),
            operator_uid: None,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = load_config();
    if config.session.bot_uin == Uin(0) {
        config.session.bot_uin = Uin(DEMO_BOT_UIN);
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_target(config.logging.with_target)
        .with_thread_ids(config.logging.with_thread_ids)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let provider = StaticProvider::from_json(DEMO_FIXTURE).context("Invalid demo fixture")?;
    let session =
        ClientSession::new(config, Arc::new(provider)).context("Failed to build session")?;

    let mut notices = session.notices().subscribe();
    tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            info!(notice = %notice, kick = notice.is_kick(), "Group notice");
        }
    });

    session.start().await.context("Failed to start session")?;

    let sink = session.event_sink();
    for event in demo_events() {
        if let Err(e) = sink.push(event).await {
            warn!(error = %e, "Demo event not queued");
        }
    }

    info!("Session is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    if let Some(stats) = session.shutdown().await {
        info!(pump = %serde_json::to_string(&stats)?, "Event pump totals");
    }
    info!(cache = %serde_json::to_string(&session.caching().stats())?, "Cache totals");

    Ok(())
}
