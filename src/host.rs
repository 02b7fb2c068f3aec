//! Host collaborator interfaces.
//!
//! The console never talks to a network. It is handed packets by the host
//! (which owns the real hook subscription mechanism) and gives packets back
//! through a [`PacketSink`].

use proxycmd_proto::{Outbound, PacketKind};
use thiserror::Error;

/// Outbound packet emission primitive.
pub trait PacketSink: Send {
    /// Deliver `packet` to the client.
    fn send(&mut self, packet: Outbound);
}

impl<F> PacketSink for F
where
    F: FnMut(Outbound) + Send,
{
    fn send(&mut self, packet: Outbound) {
        self(packet)
    }
}

/// Host packet hook subscription mechanism.
pub trait HookHost {
    /// Ask the host to route packets of `kind` to the console.
    fn subscribe(&mut self, kind: PacketKind) -> Result<(), SubscribeError>;
}

/// Subscription failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    /// The host's protocol version has no such packet.
    #[error("packet {0} is not supported by this protocol version")]
    Unsupported(PacketKind),

    #[error("subscription to {kind} rejected: {reason}")]
    Rejected { kind: PacketKind, reason: String },
}

/// What the host should do with an inbound packet after the console saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Keep routing the packet.
    Propagate,
    /// Drop the packet; the console owns it.
    Suppress,
}

impl Verdict {
    pub fn is_suppressed(self) -> bool {
        self == Self::Suppress
    }
}

/// Host version details shown in the login banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostInfo {
    pub protocol_version: u32,
    pub patch_version: u32,
}
