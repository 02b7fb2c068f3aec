//! The command console.
//!
//! A [`Console`] sits inside a host's packet pipeline. The host hands it
//! inbound packets through [`Console::handle`] and gets back a [`Verdict`];
//! anything the console wants to show goes out through the host's
//! [`PacketSink`]. The console owns its hook registry, channel session and
//! config; there is one per client connection.
//!
//! Submodules:
//! - [`prefix`]: command prefix resolution
//! - `dispatch`: line to hook invocation
//! - `output`: console chat lines
//! - [`session`]: private channel state machine
//! - `builtins`: command listing and streaming toggle

mod builtins;
mod dispatch;
mod output;
pub mod prefix;
pub mod session;

pub use dispatch::Dispatch;
pub use session::{ChannelSession, ChannelState, SessionAction};

use crate::config::{Config, ConfigStore, NullStore};
use crate::error::{ConsoleError, RegistryError};
use crate::hooks::{Aliases, Hook, HookId, HookOptions, HookResult, Invocation, Registry, hook_fn};
use crate::host::{HookHost, HostInfo, PacketSink, SubscribeError, Verdict};
use proxycmd_proto::{Inbound, Outbound, PRIVATE_CHANNEL_ID, PRIVATE_CHANNEL_INDEX, PRIVATE_CHAT_CHANNEL, PacketKind};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Work queued for the host's next turn.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    JoinChannel,
    Message(String),
}

pub struct Console {
    config: Config,
    registry: Registry,
    session: ChannelSession,
    sink: Box<dyn PacketSink>,
    store: Arc<dyn ConfigStore>,
    host_info: HostInfo,
    deferred: VecDeque<Deferred>,
}

impl Console {
    /// Create a console writing to `sink`, with the built-in commands
    /// registered.
    pub fn new(config: Config, sink: impl PacketSink + 'static) -> Self {
        let mut console = Self {
            session: ChannelSession::new(config.streaming_mode),
            config,
            registry: Registry::new(),
            sink: Box::new(sink),
            store: Arc::new(NullStore),
            host_info: HostInfo::default(),
            deferred: VecDeque::new(),
        };
        builtins::register(&mut console);
        console
    }

    /// Persist runtime config changes through `store`.
    pub fn with_store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.store = store;
        self
    }

    /// Version details shown in the login banner.
    pub fn with_host_info(mut self, host_info: HostInfo) -> Self {
        self.host_info = host_info;
        self
    }

    /// Subscribe to every inbound packet kind the console handles.
    ///
    /// Privileged command packets that the host's protocol version lacks
    /// are skipped. Returns the kinds actually subscribed.
    pub fn attach(&mut self, host: &mut dyn HookHost) -> Result<Vec<PacketKind>, ConsoleError> {
        let mut subscribed = Vec::with_capacity(PacketKind::INBOUND.len());
        for kind in PacketKind::INBOUND {
            match host.subscribe(kind) {
                Ok(()) => subscribed.push(kind),
                Err(SubscribeError::Unsupported(_)) if kind.is_privileged() => {
                    debug!(packet = %kind, "Packet not available, skipping");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(subscribed)
    }

    /// Route one inbound packet.
    pub fn handle(&mut self, packet: &Inbound) -> Verdict {
        match packet {
            Inbound::Chat { channel, message } | Inbound::Whisper { channel, message } => {
                if *channel == PRIVATE_CHAT_CHANNEL {
                    // The private channel does not exist server side.
                    self.exec(message, false);
                    Verdict::Suppress
                } else if self.config.public_enable && self.exec(message, true).consumed() {
                    Verdict::Suppress
                } else {
                    Verdict::Propagate
                }
            }
            Inbound::OpCommand { command } | Inbound::Admin { command } => {
                if self.exec(command, false).consumed() {
                    Verdict::Suppress
                } else {
                    Verdict::Propagate
                }
            }
            Inbound::Login => {
                self.session.on_login();
                debug!(state = %self.session.state(), "Login seen");
                Verdict::Propagate
            }
            Inbound::ClientSettingsLoaded => {
                let action = self.session.on_settings_loaded();
                self.apply(action);
                Verdict::Propagate
            }
            Inbound::JoinPrivateChannel { index } | Inbound::LeavePrivateChannel { index } => {
                if *index == PRIVATE_CHANNEL_INDEX {
                    Verdict::Suppress
                } else {
                    Verdict::Propagate
                }
            }
            Inbound::RequestPrivateChannelInfo { channel_id } => {
                if *channel_id == PRIVATE_CHANNEL_ID {
                    self.sink.send(Outbound::private_channel_info());
                    Verdict::Suppress
                } else {
                    Verdict::Propagate
                }
            }
        }
    }

    // ========================================================================
    // Hook management
    // ========================================================================

    /// Register a closure under one name or a set of aliases.
    pub fn add<F>(&mut self, names: impl Into<Aliases>, f: F) -> Result<HookId, RegistryError>
    where
        F: Fn(&mut Invocation<'_>, &[String]) -> HookResult + Send + Sync + 'static,
    {
        self.add_hook(names, hook_fn(f), HookOptions::default())
    }

    /// Register a closure with an explicit id or owner label.
    pub fn add_with<F>(
        &mut self,
        names: impl Into<Aliases>,
        f: F,
        options: HookOptions,
    ) -> Result<HookId, RegistryError>
    where
        F: Fn(&mut Invocation<'_>, &[String]) -> HookResult + Send + Sync + 'static,
    {
        self.add_hook(names, hook_fn(f), options)
    }

    pub fn add_hook(
        &mut self,
        names: impl Into<Aliases>,
        hook: Arc<dyn Hook>,
        options: HookOptions,
    ) -> Result<HookId, RegistryError> {
        self.registry
            .add(names, hook, options.id, options.owner.as_deref())
    }

    /// Remove the hook `id` from every name in `names`.
    pub fn remove(&mut self, names: impl Into<Aliases>, id: HookId) -> Result<usize, RegistryError> {
        self.registry.remove(names, id)
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn is_streaming(&self) -> bool {
        self.session.is_streaming()
    }

    /// Turn streaming mode on or off and persist the setting.
    ///
    /// Turning it on hides the channel right away; turning it off queues a
    /// join for the next turn when the channel was hidden. Returns the
    /// channel action taken, if any.
    pub fn set_streaming(&mut self, on: bool) -> Option<SessionAction> {
        let action = self.session.set_streaming(on);
        info!(streaming = on, state = %self.session.state(), "Streaming mode changed");
        self.apply(action);

        if self.config.streaming_mode != on {
            self.config.streaming_mode = on;
            if let Err(e) = self.store.persist(&self.config) {
                warn!(error = %e, code = e.error_code(), "Failed to persist streaming mode");
            }
        }
        action
    }

    /// Run work queued by earlier packets, in order.
    ///
    /// Hosts call this once an event has fully propagated.
    pub fn run_deferred(&mut self) {
        while let Some(work) = self.deferred.pop_front() {
            match work {
                Deferred::JoinChannel => self.join_channel(),
                Deferred::Message(text) => self.message([text]),
            }
        }
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    fn defer_message(&mut self, text: impl Into<String>) {
        self.deferred.push_back(Deferred::Message(text.into()));
    }

    fn apply(&mut self, action: Option<SessionAction>) {
        match action {
            Some(SessionAction::ScheduleJoin) => {
                // One join per turn.
                if !self.deferred.contains(&Deferred::JoinChannel) {
                    self.deferred.push_back(Deferred::JoinChannel);
                }
            }
            Some(SessionAction::Leave) => {
                info!(channel = %self.config.private_channel_name, "Leaving console channel");
                self.sink.send(Outbound::leave_private_channel());
            }
            None => {}
        }
    }

    fn join_channel(&mut self) {
        if !self.session.join_still_wanted() {
            debug!(state = %self.session.state(), "Dropping stale channel join");
            return;
        }
        info!(channel = %self.config.private_channel_name, "Joining console channel");
        self.sink
            .send(Outbound::join_private_channel(self.config.private_channel_name.clone()));
        if self.config.login_message {
            let HostInfo { protocol_version, patch_version } = self.host_info;
            self.message([format!(
                "Console enabled. Client version: {protocol_version}. Patch version: {patch_version}"
            )]);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> &ChannelSession {
        &self.session
    }

    pub fn host_info(&self) -> HostInfo {
        self.host_info
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("session", &self.session)
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}
