//! Commands every console ships with.

use super::{Console, SessionAction};
use crate::hooks::{HookOptions, HookResult, Invocation, hook_fn};

/// Owner label of the built-in commands.
pub const OWNER: &str = "proxycmd";

/// Group label for hooks registered without an owner.
const UNLABELED: &str = "other";

const DISABLED: &str = "Streaming mode disabled.";

pub(super) fn register(console: &mut Console) {
    let show = console.config.show_commands_aliases.clone();
    let stream = console.config.streaming_toggle_aliases.clone();

    // Invalid alias lists are logged by the registry.
    let _ = console.add_hook(show, hook_fn(show_commands), HookOptions::owner(OWNER));
    let _ = console.add_hook(stream, hook_fn(toggle_streaming), HookOptions::owner(OWNER));
}

/// One line per owner group: `owner: a, b, c`.
fn show_commands(ctx: &mut Invocation<'_>, _args: &[String]) -> HookResult {
    let lines: Vec<String> = {
        let groups = ctx.console().registry().by_owner();
        let labeled = groups.iter().filter_map(|(owner, names)| owner.map(|o| (o, names)));
        let unlabeled = groups.get(&None).map(|names| (UNLABELED, names));
        labeled
            .chain(unlabeled)
            .map(|(owner, names)| format!("{owner}: {}", names.join(", ")))
            .collect()
    };
    for line in lines {
        ctx.reply(line);
    }
    Ok(())
}

fn toggle_streaming(ctx: &mut Invocation<'_>, _args: &[String]) -> HookResult {
    let console = ctx.console();
    let on = !console.is_streaming();
    let action = console.set_streaming(on);
    if !on {
        if action == Some(SessionAction::ScheduleJoin) {
            // Shown after the channel comes back.
            console.defer_message(DISABLED);
        } else {
            console.message([DISABLED]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigError, ConfigStore};
    use crate::console::ChannelState;
    use parking_lot::Mutex;
    use proxycmd_proto::{Inbound, Outbound};
    use std::sync::Arc;

    #[derive(Default)]
    struct MemoryStore(Mutex<Vec<bool>>);

    impl ConfigStore for MemoryStore {
        fn persist(&self, config: &Config) -> Result<(), ConfigError> {
            self.0.lock().push(config.streaming_mode);
            Ok(())
        }
    }

    fn console() -> (Console, Arc<Mutex<Vec<Outbound>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&sent);
        let console = Console::new(Config::default(), move |p: Outbound| sink.lock().push(p));
        (console, sent)
    }

    #[test]
    fn test_builtins_registered() {
        let (console, _) = console();
        for name in ["commands", "cmds", "command", "cmd", "streaming", "stream"] {
            assert!(console.registry().contains(name), "{name}");
        }
    }

    #[test]
    fn test_show_commands_groups_by_owner() {
        let (mut console, sent) = console();
        console.add("roll", |_, _| Ok(())).unwrap();
        console
            .add_with("dice", |_, _| Ok(()), HookOptions::owner("fun"))
            .unwrap();

        console.exec("!commands", true);
        assert_eq!(
            sent.lock().as_slice(),
            &[
                Outbound::private_chat("", "fun: dice"),
                Outbound::private_chat(
                    "",
                    "proxycmd: cmd, cmds, command, commands, stream, streaming"
                ),
                Outbound::private_chat("", "other: roll"),
            ]
        );
    }

    #[test]
    fn test_streaming_toggle_persists() {
        let store = Arc::new(MemoryStore::default());
        let (console, _) = console();
        let mut console = console.with_store(store.clone());

        console.exec("!stream", true);
        assert!(console.is_streaming());
        assert!(console.config().streaming_mode);
        console.exec("!stream", true);
        assert!(!console.is_streaming());
        assert_eq!(*store.0.lock(), vec![true, false]);
    }

    #[test]
    fn test_streaming_off_while_logged_out() {
        let (mut console, sent) = console();
        console.exec("!stream", true);
        console.exec("!stream", true);
        assert!(!console.has_deferred());
        assert_eq!(
            sent.lock().as_slice(),
            &[Outbound::private_chat("", "Streaming mode disabled.")]
        );
    }

    #[test]
    fn test_streaming_round_trip_rejoins() {
        let (mut console, sent) = console();
        console.handle(&Inbound::Login);
        console.handle(&Inbound::ClientSettingsLoaded);
        console.run_deferred();
        sent.lock().clear();

        console.exec("!streaming", true);
        assert_eq!(sent.lock().as_slice(), &[Outbound::leave_private_channel()]);
        assert_eq!(console.session().state(), ChannelState::PendingJoin);

        console.exec("!streaming", true);
        console.run_deferred();
        let sent = sent.lock();
        assert_eq!(sent[1], Outbound::join_private_channel("Proxy"));
        assert_eq!(sent.last(), Some(&Outbound::private_chat("", "Streaming mode disabled.")));
    }
}
