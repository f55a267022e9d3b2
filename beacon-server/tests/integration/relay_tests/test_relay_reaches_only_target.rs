use beacon_core::{RoomId, SignalKind};

use crate::integration::create_test_service;
use crate::utils::{connect_peer, join_frame, relay_frame};

#[tokio::test]
async fn test_relay_reaches_only_target() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);
    let c = connect_peer(&service);
    for peer in [&a, &b, &c] {
        peer.send(&service, &join_frame("test-room"));
    }
    for peer in [&a, &b, &c] {
        peer.handle.clear();
    }

    let cases = [
        ("offer", SignalKind::Offer, r#"{"type":"offer","sdp":"v=0\r\n"}"#),
        ("answer", SignalKind::Answer, r#"{"type":"answer","sdp":"v=0\r\n"}"#),
        (
            "ice-candidate",
            SignalKind::IceCandidate,
            r#"{"candidate":"candidate:1 1 udp 2122260223 10.0.0.2 54321 typ host","sdpMid":"0","sdpMLineIndex":0}"#,
        ),
    ];

    for (wire, kind, payload) in cases {
        a.send(&service, &relay_frame(wire, "test-room", &b.id, payload));

        let received = b.handle.messages();
        assert_eq!(received.len(), 1, "{} reaches the target once", wire);
        assert_eq!(received[0].kind, kind);
        assert_eq!(received[0].payload_str(), Some(payload));
        assert_eq!(received[0].target_id, Some(b.id.clone()));
        assert_eq!(received[0].room_id, Some(RoomId::from("test-room")));

        assert!(a.handle.frames().is_empty());
        assert!(c.handle.frames().is_empty(), "no room-wide fan-out");
        b.handle.clear();
    }
}

#[tokio::test]
async fn test_relay_does_not_require_shared_room() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);

    a.send(&service, &relay_frame("offer", "elsewhere", &b.id, r#""opaque""#));

    assert_eq!(b.handle.messages_of(SignalKind::Offer).len(), 1);
    assert_eq!(service.rooms().room_count(), 0, "relays never touch rooms");
}

#[tokio::test]
async fn test_relay_forwards_null_payload() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);

    a.send(&service, &relay_frame("offer", "r", &b.id, "null"));

    let frames = b.handle.frames();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].contains(r#""payload":null"#), "got {}", frames[0]);
    assert_eq!(b.handle.messages()[0].payload_str(), Some("null"));
}
