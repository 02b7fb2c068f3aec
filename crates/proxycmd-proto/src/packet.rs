//! Packet schemas exchanged with the host.
//!
//! The host owns the real wire formats. The console only sees the handful
//! of fields it needs, modelled here as plain enums. With the `serde`
//! feature both enums (de)serialize as internally tagged JSON objects,
//! e.g. `{"kind":"chat","channel":18,"message":"!help"}`.

use std::fmt;

/// Reserved private channel slot used as the console surface.
pub const PRIVATE_CHANNEL_INDEX: u32 = 7;

/// Reserved private channel id (`-2` as an unsigned 32-bit value).
pub const PRIVATE_CHANNEL_ID: u32 = 0xFFFF_FFFE;

/// Offset between private channel slots and chat channel numbers.
pub const CHAT_CHANNEL_OFFSET: u32 = 11;

/// Chat channel number of the reserved private channel.
pub const PRIVATE_CHAT_CHANNEL: u32 = CHAT_CHANNEL_OFFSET + PRIVATE_CHANNEL_INDEX;

/// Host packet names the console cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PacketKind {
    /// Client chat line.
    CChat,
    /// Client whisper line.
    CWhisper,
    /// Client operator command.
    COpCommand,
    /// Client admin command.
    CAdmin,
    /// Server login notification.
    SLogin,
    /// Server notification that client settings finished loading.
    SLoadClientUserSetting,
    /// Private channel join notification.
    SJoinPrivateChannel,
    /// Client request to leave a private channel.
    CLeavePrivateChannel,
    /// Server notification that a private channel was left.
    SLeavePrivateChannel,
    /// Client request for private channel details.
    CRequestPrivateChannelInfo,
    /// Server reply with private channel details.
    SRequestPrivateChannelInfo,
    /// Server private channel chat line.
    SPrivateChat,
}

impl PacketKind {
    /// Every inbound packet kind the console subscribes to.
    pub const INBOUND: [PacketKind; 9] = [
        PacketKind::CChat,
        PacketKind::CWhisper,
        PacketKind::COpCommand,
        PacketKind::CAdmin,
        PacketKind::SLogin,
        PacketKind::SLoadClientUserSetting,
        PacketKind::SJoinPrivateChannel,
        PacketKind::CLeavePrivateChannel,
        PacketKind::CRequestPrivateChannelInfo,
    ];

    /// Host-side packet name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CChat => "C_CHAT",
            Self::CWhisper => "C_WHISPER",
            Self::COpCommand => "C_OP_COMMAND",
            Self::CAdmin => "C_ADMIN",
            Self::SLogin => "S_LOGIN",
            Self::SLoadClientUserSetting => "S_LOAD_CLIENT_USER_SETTING",
            Self::SJoinPrivateChannel => "S_JOIN_PRIVATE_CHANNEL",
            Self::CLeavePrivateChannel => "C_LEAVE_PRIVATE_CHANNEL",
            Self::SLeavePrivateChannel => "S_LEAVE_PRIVATE_CHANNEL",
            Self::CRequestPrivateChannelInfo => "C_REQUEST_PRIVATE_CHANNEL_INFO",
            Self::SRequestPrivateChannelInfo => "S_REQUEST_PRIVATE_CHANNEL_INFO",
            Self::SPrivateChat => "S_PRIVATE_CHAT",
        }
    }

    /// Privileged command packets are missing from some protocol versions.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::COpCommand | Self::CAdmin)
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packet delivered by the host to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Inbound {
    /// `C_CHAT`
    Chat {
        /// Chat channel number.
        channel: u32,
        /// Raw (font-wrapped) chat text.
        message: String,
    },
    /// `C_WHISPER`
    Whisper {
        /// Chat channel number.
        #[cfg_attr(feature = "serde", serde(default))]
        channel: u32,
        /// Raw (font-wrapped) chat text.
        message: String,
    },
    /// `C_OP_COMMAND`
    OpCommand {
        /// Command text, no prefix required.
        command: String,
    },
    /// `C_ADMIN`
    Admin {
        /// Command text, no prefix required.
        command: String,
    },
    /// `S_LOGIN`
    Login,
    /// `S_LOAD_CLIENT_USER_SETTING`
    ClientSettingsLoaded,
    /// `S_JOIN_PRIVATE_CHANNEL`
    JoinPrivateChannel {
        /// Private channel slot.
        index: u32,
    },
    /// `C_LEAVE_PRIVATE_CHANNEL`
    LeavePrivateChannel {
        /// Private channel slot.
        index: u32,
    },
    /// `C_REQUEST_PRIVATE_CHANNEL_INFO`
    RequestPrivateChannelInfo {
        /// Private channel id.
        channel_id: u32,
    },
}

impl Inbound {
    /// Packet kind of this event.
    pub fn kind(&self) -> PacketKind {
        match self {
            Self::Chat { .. } => PacketKind::CChat,
            Self::Whisper { .. } => PacketKind::CWhisper,
            Self::OpCommand { .. } => PacketKind::COpCommand,
            Self::Admin { .. } => PacketKind::CAdmin,
            Self::Login => PacketKind::SLogin,
            Self::ClientSettingsLoaded => PacketKind::SLoadClientUserSetting,
            Self::JoinPrivateChannel { .. } => PacketKind::SJoinPrivateChannel,
            Self::LeavePrivateChannel { .. } => PacketKind::CLeavePrivateChannel,
            Self::RequestPrivateChannelInfo { .. } => PacketKind::CRequestPrivateChannelInfo,
        }
    }
}

/// Packet emitted by the console towards the client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Outbound {
    /// `S_PRIVATE_CHAT`
    PrivateChat {
        /// Private channel id.
        channel: u32,
        /// Author id, always `0` for console output.
        author_id: u64,
        /// Author display name.
        author_name: String,
        /// Entity-escaped text.
        message: String,
    },
    /// `S_JOIN_PRIVATE_CHANNEL`
    JoinPrivateChannel {
        /// Private channel slot.
        index: u32,
        /// Private channel id.
        id: u32,
        /// Member ids.
        members: Vec<u32>,
        /// Channel display name.
        name: String,
    },
    /// `S_LEAVE_PRIVATE_CHANNEL`
    LeavePrivateChannel {
        /// Private channel id.
        channel_id: u32,
    },
    /// `S_REQUEST_PRIVATE_CHANNEL_INFO`
    PrivateChannelInfo {
        /// Owner flag.
        owner: u32,
        /// Password flag.
        password: u32,
        /// Member ids.
        members: Vec<u32>,
        /// Friend ids.
        friends: Vec<u32>,
    },
}

impl Outbound {
    /// Console chat line on the reserved channel.
    pub fn private_chat(author_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PrivateChat {
            channel: PRIVATE_CHANNEL_ID,
            author_id: 0,
            author_name: author_name.into(),
            message: message.into(),
        }
    }

    /// Join notification for the reserved channel.
    pub fn join_private_channel(name: impl Into<String>) -> Self {
        Self::JoinPrivateChannel {
            index: PRIVATE_CHANNEL_INDEX,
            id: PRIVATE_CHANNEL_ID,
            members: Vec::new(),
            name: name.into(),
        }
    }

    /// Leave notification for the reserved channel.
    pub fn leave_private_channel() -> Self {
        Self::LeavePrivateChannel {
            channel_id: PRIVATE_CHANNEL_ID,
        }
    }

    /// Synthetic details of the reserved channel: owned, no password, empty.
    pub fn private_channel_info() -> Self {
        Self::PrivateChannelInfo {
            owner: 1,
            password: 0,
            members: Vec::new(),
            friends: Vec::new(),
        }
    }

    /// Packet kind of this event.
    pub fn kind(&self) -> PacketKind {
        match self {
            Self::PrivateChat { .. } => PacketKind::SPrivateChat,
            Self::JoinPrivateChannel { .. } => PacketKind::SJoinPrivateChannel,
            Self::LeavePrivateChannel { .. } => PacketKind::SLeavePrivateChannel,
            Self::PrivateChannelInfo { .. } => PacketKind::SRequestPrivateChannelInfo,
        }
    }
}
