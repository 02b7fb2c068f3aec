//! Private channel session state machine.
//!
//! Tracks whether the console's virtual channel is joined on the client and
//! whether streaming mode hides it. Transitions return the side effect the
//! console has to perform; the machine itself never sends anything.

use std::fmt;

/// Where the virtual channel stands on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    /// No login seen yet.
    #[default]
    LoggedOut,
    /// Logged in, channel not (or no longer) shown.
    PendingJoin,
    /// Channel shown, or a join is queued for the next turn.
    Joined,
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoggedOut => "logged_out",
            Self::PendingJoin => "pending_join",
            Self::Joined => "joined",
        })
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Queue a channel join for the host's next turn.
    ScheduleJoin,
    /// Send a channel leave now.
    Leave,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSession {
    state: ChannelState,
    streaming: bool,
}

impl ChannelSession {
    pub fn new(streaming: bool) -> Self {
        Self {
            state: ChannelState::LoggedOut,
            streaming,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// A login resets the channel from any state.
    pub fn on_login(&mut self) {
        self.state = ChannelState::PendingJoin;
    }

    /// Client settings finished loading.
    pub fn on_settings_loaded(&mut self) -> Option<SessionAction> {
        self.try_join()
    }

    /// Turn streaming mode on or off. Setting the current value is a no-op.
    pub fn set_streaming(&mut self, on: bool) -> Option<SessionAction> {
        if self.streaming == on {
            return None;
        }
        self.streaming = on;
        if on {
            if self.state == ChannelState::Joined {
                self.state = ChannelState::PendingJoin;
                return Some(SessionAction::Leave);
            }
            None
        } else {
            self.try_join()
        }
    }

    pub fn toggle_streaming(&mut self) -> Option<SessionAction> {
        self.set_streaming(!self.streaming)
    }

    /// Whether a queued join may still be delivered.
    pub fn join_still_wanted(&self) -> bool {
        self.state == ChannelState::Joined && !self.streaming
    }

    fn try_join(&mut self) -> Option<SessionAction> {
        if self.state == ChannelState::PendingJoin && !self.streaming {
            self.state = ChannelState::Joined;
            Some(SessionAction::ScheduleJoin)
        } else {
            None
        }
    }
}
