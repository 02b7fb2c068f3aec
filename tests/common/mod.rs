//! Integration test common infrastructure.
//!
//! Provides a recording packet sink, a scriptable hook host, and helpers
//! for building consoles wired to them.

#![allow(dead_code)]

use parking_lot::Mutex;
use proxycmd::proto::{Outbound, PacketKind};
use proxycmd::{Config, Console, HookHost, PacketSink, SubscribeError};
use std::sync::Arc;

/// Records every packet a console sends.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Outbound>>>);

impl Recorder {
    pub fn sink(&self) -> RecordingSink {
        RecordingSink(Arc::clone(&self.0))
    }

    /// Everything sent since the last call.
    pub fn take(&self) -> Vec<Outbound> {
        std::mem::take(&mut *self.0.lock())
    }

    /// Text of the console chat lines sent since the last call.
    pub fn take_lines(&self) -> Vec<String> {
        self.take()
            .into_iter()
            .filter_map(|packet| match packet {
                Outbound::PrivateChat { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// Sink half of a [`Recorder`].
pub struct RecordingSink(Arc<Mutex<Vec<Outbound>>>);

impl PacketSink for RecordingSink {
    fn send(&mut self, packet: Outbound) {
        self.0.lock().push(packet);
    }
}

/// Hook host that refuses the listed packet kinds as unsupported.
#[derive(Default)]
pub struct TestHost {
    pub unsupported: Vec<PacketKind>,
    pub subscribed: Vec<PacketKind>,
}

impl TestHost {
    pub fn without(kinds: &[PacketKind]) -> Self {
        Self {
            unsupported: kinds.to_vec(),
            subscribed: Vec::new(),
        }
    }
}

impl HookHost for TestHost {
    fn subscribe(&mut self, kind: PacketKind) -> Result<(), SubscribeError> {
        if self.unsupported.contains(&kind) {
            return Err(SubscribeError::Unsupported(kind));
        }
        self.subscribed.push(kind);
        Ok(())
    }
}

pub fn console_with(config: Config) -> (Console, Recorder) {
    let recorder = Recorder::default();
    let console = Console::new(config, recorder.sink());
    (console, recorder)
}

pub fn console() -> (Console, Recorder) {
    console_with(Config::default())
}

/// Arguments each call of a hook received.
pub type Calls = Arc<Mutex<Vec<Vec<String>>>>;

/// Register a hook that records its arguments.
pub fn recording_hook(console: &mut Console, names: &[&str]) -> Calls {
    let calls: Calls = Arc::default();
    let log = Arc::clone(&calls);
    console
        .add(names, move |_, args| {
            log.lock().push(args.to_vec());
            Ok(())
        })
        .expect("register hook");
    calls
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
