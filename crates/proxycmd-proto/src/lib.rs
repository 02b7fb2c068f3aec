//! # proxycmd-proto
//!
//! Wire-facing building blocks for the proxycmd console:
//!
//! - Opaque packet schemas exchanged with the host ([`Inbound`], [`Outbound`])
//! - Reserved private channel constants
//! - A shell-like argument lexer that keeps inline markup spans atomic
//! - Chat markup helpers (font wrapper stripping, entity escaping)
//!
//! ## Quick Start
//!
//! ```rust
//! use proxycmd_proto::{markup, tokenize};
//!
//! let line = markup::strip_font("<FONT>!say \"hello world\" twice</FONT>");
//! let argv = tokenize(&line).expect("balanced quotes");
//! assert_eq!(argv, vec!["!say", "hello world", "twice"]);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod args;
pub mod casemap;
pub mod error;
pub mod markup;
pub mod packet;

pub use self::args::tokenize;
pub use self::casemap::command_to_lower;
pub use self::error::ArgsError;
pub use self::markup::{escape_entities, strip_font};
pub use self::packet::{
    Inbound, Outbound, PacketKind, CHAT_CHANNEL_OFFSET, PRIVATE_CHANNEL_ID,
    PRIVATE_CHANNEL_INDEX, PRIVATE_CHAT_CHANNEL,
};
