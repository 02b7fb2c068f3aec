//! proxycmd - chat command console for message-routing proxies.
//!
//! Turns chat and whisper lines into command invocations and sends command
//! output back as chat on a virtual private channel.
//!
//! ```
//! use proxycmd::{Config, Console};
//! use proxycmd::proto::Outbound;
//!
//! let mut console = Console::new(Config::default(), |_packet: Outbound| {});
//! console
//!     .add("ping", |ctx, _args| {
//!         ctx.reply("pong");
//!         Ok(())
//!     })
//!     .unwrap();
//! assert!(console.exec("!ping", true).consumed());
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod hooks;
pub mod host;
pub mod metrics;
pub mod telemetry;

pub use proxycmd_proto as proto;

pub use config::{Config, ConfigError, ConfigStore, NullStore, TomlFileStore};
pub use console::{ChannelState, Console, Dispatch};
pub use error::{ConsoleError, HookError, RegistryError};
pub use hooks::{Hook, HookId, HookOptions, HookResult, Invocation, hook_fn};
pub use host::{HookHost, HostInfo, PacketSink, SubscribeError, Verdict};
