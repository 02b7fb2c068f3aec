//! Private channel lifecycle: login, join, streaming mode, host wiring.

mod common;

use common::{TestHost, console, console_with};
use proxycmd::proto::{Inbound, Outbound, PRIVATE_CHANNEL_ID, PacketKind};
use proxycmd::{ChannelState, Config, HostInfo, Verdict};

fn log_in(console: &mut proxycmd::Console) {
    assert_eq!(console.handle(&Inbound::Login), Verdict::Propagate);
    assert_eq!(console.handle(&Inbound::ClientSettingsLoaded), Verdict::Propagate);
}

#[test]
fn test_join_waits_for_next_turn() {
    let (console, out) = console();
    let mut console = console.with_host_info(HostInfo {
        protocol_version: 381_582,
        patch_version: 10_003,
    });

    log_in(&mut console);
    assert!(out.is_empty());
    assert_eq!(console.session().state(), ChannelState::Joined);

    console.run_deferred();
    assert_eq!(
        out.take(),
        vec![
            Outbound::join_private_channel("Proxy"),
            Outbound::private_chat(
                "",
                "Console enabled. Client version: 381582. Patch version: 10003"
            ),
        ]
    );
}

#[test]
fn test_join_packet_shape() {
    let config = Config {
        private_channel_name: "Console".into(),
        login_message: false,
        ..Config::default()
    };
    let (mut console, out) = console_with(config);
    log_in(&mut console);
    console.run_deferred();

    assert_eq!(
        out.take(),
        vec![Outbound::JoinPrivateChannel {
            index: 7,
            id: PRIVATE_CHANNEL_ID,
            members: Vec::new(),
            name: "Console".into(),
        }]
    );
}

#[test]
fn test_settings_before_login_do_nothing() {
    let (mut console, out) = console();
    console.handle(&Inbound::ClientSettingsLoaded);
    console.run_deferred();
    assert!(out.is_empty());
    assert_eq!(console.session().state(), ChannelState::LoggedOut);
}

#[test]
fn test_streaming_mutes_and_rejoins_once() {
    let (mut console, out) = console();
    log_in(&mut console);
    console.run_deferred();
    out.take();

    console.exec("!streaming", true);
    assert!(console.is_streaming());
    assert_eq!(
        out.take(),
        vec![Outbound::LeavePrivateChannel {
            channel_id: PRIVATE_CHANNEL_ID
        }]
    );

    console.message(["muted"]);
    console.exec("!commands", true);
    assert!(out.is_empty());

    console.exec("!stream", true);
    assert!(!console.is_streaming());
    console.run_deferred();

    let sent = out.take();
    let joins = sent
        .iter()
        .filter(|p| matches!(p, Outbound::JoinPrivateChannel { .. }))
        .count();
    assert_eq!(joins, 1);
    assert_eq!(sent[0], Outbound::join_private_channel("Proxy"));
    assert_eq!(
        sent.last(),
        Some(&Outbound::private_chat("", "Streaming mode disabled."))
    );

    // Nothing left over for later turns.
    console.run_deferred();
    assert!(out.is_empty());
}

#[test]
fn test_streaming_from_config_blocks_join() {
    let config = Config {
        streaming_mode: true,
        ..Config::default()
    };
    let (mut console, out) = console_with(config);
    log_in(&mut console);
    console.run_deferred();
    assert!(out.is_empty());
    assert_eq!(console.session().state(), ChannelState::PendingJoin);

    console.exec("!stream", true);
    console.run_deferred();
    assert_eq!(out.take()[0], Outbound::join_private_channel("Proxy"));
}

#[test]
fn test_streaming_before_settings_loaded() {
    let (mut console, out) = console();
    console.handle(&Inbound::Login);
    console.exec("!stream", true);
    console.handle(&Inbound::ClientSettingsLoaded);
    console.run_deferred();
    assert!(out.is_empty());
}

#[test]
fn test_console_channel_packets_are_swallowed() {
    let (mut console, out) = console();
    assert_eq!(
        console.handle(&Inbound::JoinPrivateChannel { index: 7 }),
        Verdict::Suppress
    );
    assert_eq!(
        console.handle(&Inbound::LeavePrivateChannel { index: 7 }),
        Verdict::Suppress
    );
    assert_eq!(
        console.handle(&Inbound::LeavePrivateChannel { index: 0 }),
        Verdict::Propagate
    );

    assert_eq!(
        console.handle(&Inbound::RequestPrivateChannelInfo {
            channel_id: PRIVATE_CHANNEL_ID
        }),
        Verdict::Suppress
    );
    assert_eq!(
        out.take(),
        vec![Outbound::PrivateChannelInfo {
            owner: 1,
            password: 0,
            members: Vec::new(),
            friends: Vec::new(),
        }]
    );
}

#[test]
fn test_attach_degrades_without_privileged_packets() {
    let (mut console, _) = console();
    let mut host = TestHost::without(&[PacketKind::COpCommand, PacketKind::CAdmin]);

    let subscribed = console.attach(&mut host).unwrap();
    assert_eq!(subscribed.len(), PacketKind::INBOUND.len() - 2);
    assert!(subscribed.contains(&PacketKind::CChat));
    assert!(!subscribed.contains(&PacketKind::CAdmin));
}

#[test]
fn test_attach_fails_without_required_packets() {
    let (mut console, _) = console();
    let mut host = TestHost::without(&[PacketKind::SLogin]);
    assert!(console.attach(&mut host).is_err());
}
