//! # Client Session
//!
//! Owns everything one logged-in bot account needs: the logic units, the
//! dispatcher over their subscriptions and the event pump feeding it.
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration
//! 2. Build the logic units around the injected operation provider
//! 3. Register them and freeze the subscription registry
//! 4. `start()`: optional friend warm-up, then spawn the event pump

use logic_caching::{CachingService, OperationProvider};
use logic_notice::{NoticeBus, NoticeLogic};
use parking_lot::Mutex;
use shared_bus::{Dispatcher, LogicInfo, RegistryError, SubscriptionRegistry};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::container::config::{ClientConfig, ConfigError};
use crate::pump::{EventPump, EventSink, PumpStats};

/// Errors building or running a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Logic unit registration failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Session already started")]
    AlreadyStarted,
}

/// One bot session.
pub struct ClientSession {
    config: ClientConfig,
    caching: Arc<CachingService>,
    notices: Arc<NoticeBus>,
    dispatcher: Arc<Dispatcher>,
    sink: EventSink,
    /// Taken by `start()`.
    pump: Mutex<Option<EventPump>>,
    pump_task: Mutex<Option<JoinHandle<PumpStats>>>,
    shutdown_tx: watch::Sender<bool>,
}

impl ClientSession {
    /// Build a session around the given operation provider.
    pub fn new(
        config: ClientConfig,
        provider: Arc<dyn OperationProvider>,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        info!(bot_uin = %config.session.bot_uin, "Creating client session");

        let caching = Arc::new(CachingService::new(provider, config.caching.clone()));
        let notices = Arc::new(NoticeBus::with_capacity(config.session.notice_capacity));
        let notice_logic = Arc::new(NoticeLogic::new(caching.clone(), notices.clone()));

        let registry = SubscriptionRegistry::builder()
            .register(caching.clone())?
            .register(notice_logic)?
            .build();
        let dispatcher = Arc::new(Dispatcher::new(registry));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (sink, pump) = EventPump::channel(
            config.session.event_queue_capacity,
            dispatcher.clone(),
            shutdown_rx,
        );

        Ok(Self {
            config,
            caching,
            notices,
            dispatcher,
            sink,
            pump: Mutex::new(Some(pump)),
            pump_task: Mutex::new(None),
            shutdown_tx,
        })
    }

    /// Start the session.
    ///
    /// With `bootstrap_on_start` the friend list is fetched first; a failure
    /// is logged and the first lookup retries it.
    pub async fn start(&self) -> Result<(), SessionError> {
        let pump = self.pump.lock().take().ok_or(SessionError::AlreadyStarted)?;

        if self.config.caching.bootstrap_on_start {
            match self.caching.bootstrap_friends().await {
                Ok(()) => info!("Friend list warmed up"),
                Err(e) => warn!(error = %e, "Friend warm-up failed, deferring to first lookup"),
            }
        }

        for unit in self.dispatcher.registry().units() {
            info!(unit = unit.name, subscribes = ?unit.subscribes, "Logic unit ready");
        }

        *self.pump_task.lock() = Some(tokio::spawn(pump.run()));
        info!(bot_uin = %self.config.session.bot_uin, "Client session started");
        Ok(())
    }

    /// Stop the event pump and wait for it to finish the current event.
    ///
    /// Returns the pump totals, or `None` if the session never started.
    pub async fn shutdown(&self) -> Option<PumpStats> {
        info!("Initiating session shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let task = self.pump_task.lock().take()?;
        match task.await {
            Ok(stats) => Some(stats),
            Err(e) => {
                error!(error = %e, "Event pump task failed");
                None
            }
        }
    }

    /// Handle for pushing protocol events into the session.
    pub fn event_sink(&self) -> EventSink {
        self.sink.clone()
    }

    /// The resolution cache.
    pub fn caching(&self) -> &Arc<CachingService> {
        &self.caching
    }

    /// The bus group notices are published on.
    pub fn notices(&self) -> &Arc<NoticeBus> {
        &self.notices
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Registered logic units in registration order.
    pub fn units(&self) -> Vec<LogicInfo> {
        self.dispatcher.registry().units()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
