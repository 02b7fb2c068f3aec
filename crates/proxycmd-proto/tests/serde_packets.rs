//! JSON shape of packets with the `serde` feature.

#![cfg(feature = "serde")]

use proxycmd_proto::{Inbound, Outbound, PRIVATE_CHANNEL_ID};

#[test]
fn test_inbound_from_json() {
    let packet: Inbound =
        serde_json::from_str(r#"{"kind":"chat","channel":18,"message":"!help"}"#).unwrap();
    assert_eq!(
        packet,
        Inbound::Chat {
            channel: 18,
            message: "!help".to_string()
        }
    );

    let packet: Inbound = serde_json::from_str(r#"{"kind":"login"}"#).unwrap();
    assert_eq!(packet, Inbound::Login);
}

#[test]
fn test_whisper_channel_defaults_to_zero() {
    let packet: Inbound =
        serde_json::from_str(r#"{"kind":"whisper","message":"hi"}"#).unwrap();
    assert_eq!(
        packet,
        Inbound::Whisper {
            channel: 0,
            message: "hi".to_string()
        }
    );
}

#[test]
fn test_outbound_to_json() {
    let value = serde_json::to_value(Outbound::private_chat("Console", "ok")).unwrap();
    assert_eq!(value["kind"], "private_chat");
    assert_eq!(value["channel"], PRIVATE_CHANNEL_ID);
    assert_eq!(value["author_id"], 0);
    assert_eq!(value["message"], "ok");
}
