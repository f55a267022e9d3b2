use beacon_core::{RoomId, SignalKind};

use crate::integration::create_test_service;
use crate::utils::{connect_peer, join_frame};

#[tokio::test]
async fn test_malformed_frame_keeps_session() {
    let service = create_test_service();

    let a = connect_peer(&service);
    let b = connect_peer(&service);
    b.send(&service, &join_frame("test-room"));

    for frame in ["", "{", "not json", r#"{"roomId":"test-room"}"#, r#"{"type":42}"#] {
        a.send(&service, frame);
    }

    assert!(a.handle.frames().is_empty(), "no reply to a bad frame");
    assert!(service.sessions().contains(&a.id));

    a.send(&service, &join_frame("test-room"));

    assert_eq!(service.rooms().participant_count(&RoomId::from("test-room")), 2);
    assert_eq!(b.handle.messages_of(SignalKind::UserJoined).len(), 1);
}
