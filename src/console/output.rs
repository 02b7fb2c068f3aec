//! Console output on the private channel.

use super::Console;
use crate::metrics;
use proxycmd_proto::{Outbound, escape_entities};
use std::fmt::{Display, Write};

impl Console {
    /// Write space-joined `parts` as one console line.
    ///
    /// Dropped while streaming mode is on, and when the joined text is
    /// empty.
    pub fn message<I, T>(&mut self, parts: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        if self.session.is_streaming() {
            metrics::record_message_muted();
            return;
        }

        let mut text = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = write!(text, "{part}");
        }
        if text.is_empty() {
            return;
        }

        let message = escape_entities(&text).into_owned();
        self.sink
            .send(Outbound::private_chat(self.config.author_name.clone(), message));
        metrics::record_message_sent();
    }
}
