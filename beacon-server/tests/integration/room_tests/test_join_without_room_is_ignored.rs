use beacon_core::RoomId;

use crate::integration::create_test_service;
use crate::utils::{connect_peer, join_frame};

#[tokio::test]
async fn test_join_without_room_is_ignored() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);
    a.send(&service, &join_frame("test-room"));

    b.send(&service, r#"{"type":"join"}"#);
    b.send(&service, r#"{"type":"join","roomId":""}"#);
    b.send(&service, r#"{"type":"leave","roomId":null}"#);

    assert_eq!(service.rooms().room_count(), 1);
    assert_eq!(service.rooms().participant_count(&RoomId::from("test-room")), 1);
    assert!(a.handle.frames().is_empty());
    assert!(b.handle.frames().is_empty(), "no error reply on the wire");
}

#[tokio::test]
async fn test_inert_and_unknown_types_change_nothing() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);
    a.send(&service, &join_frame("test-room"));

    b.send(&service, r#"{"type":"room-info","roomId":"test-room","participants":["x"]}"#);
    b.send(&service, r#"{"type":"user-joined","roomId":"test-room"}"#);
    b.send(&service, r#"{"type":"mute","roomId":"test-room"}"#);

    assert_eq!(service.rooms().participant_count(&RoomId::from("test-room")), 1);
    assert!(a.handle.frames().is_empty());
    assert!(b.handle.frames().is_empty());
}
