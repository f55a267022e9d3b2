use beacon_core::{RoomId, SessionId};

use crate::integration::create_test_service;
use crate::utils::{connect_peer, join_frame, relay_frame};

#[tokio::test]
async fn test_relay_to_absent_target_has_no_effect() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);
    a.send(&service, &join_frame("test-room"));
    b.send(&service, &join_frame("test-room"));
    a.handle.clear();
    b.handle.clear();

    let ghost = SessionId::from("no-such-session");
    a.send(&service, &relay_frame("offer", "test-room", &ghost, r#"{"sdp":"x"}"#));
    a.send(&service, r#"{"type":"answer","roomId":"test-room","payload":{"sdp":"x"}}"#);
    a.send(&service, r#"{"type":"ice-candidate","targetId":"","payload":{}}"#);

    assert!(a.handle.frames().is_empty());
    assert!(b.handle.frames().is_empty());
    assert_eq!(service.rooms().participant_count(&RoomId::from("test-room")), 2);
}

#[tokio::test]
async fn test_relay_to_closed_target_is_dropped() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);
    b.handle.close();

    a.send(&service, &relay_frame("offer", "test-room", &b.id, r#"{"sdp":"x"}"#));

    assert!(b.handle.frames().is_empty());
    assert!(a.handle.frames().is_empty());
}

#[tokio::test]
async fn test_relay_to_disconnected_target_is_dropped() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);
    service.on_disconnect(&b.id);

    a.send(&service, &relay_frame("answer", "test-room", &b.id, r#"{"sdp":"x"}"#));

    assert!(b.handle.frames().is_empty());
}

#[tokio::test]
async fn test_failing_member_does_not_block_fan_out() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let broken = connect_peer(&service);
    let c = connect_peer(&service);
    a.send(&service, &join_frame("test-room"));
    broken.send(&service, &join_frame("test-room"));
    c.send(&service, &join_frame("test-room"));
    a.handle.clear();
    c.handle.clear();
    broken.handle.fail_writes();

    let d = connect_peer(&service);
    d.send(&service, &join_frame("test-room"));

    assert_eq!(a.handle.frames().len(), 1);
    assert_eq!(c.handle.frames().len(), 1);
    assert_eq!(service.rooms().participant_count(&RoomId::from("test-room")), 4);
}
