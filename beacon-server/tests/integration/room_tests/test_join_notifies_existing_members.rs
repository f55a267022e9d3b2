use std::collections::HashSet;

use beacon_core::{RoomId, SignalKind};

use crate::integration::create_test_service;
use crate::utils::{connect_peer, join_frame};

#[tokio::test]
async fn test_join_notifies_existing_members() {
    let service = create_test_service();
    let room = RoomId::from("test-room");

    let a = connect_peer(&service);
    let b = connect_peer(&service);
    let c = connect_peer(&service);
    for peer in [&a, &b, &c] {
        peer.send(&service, &join_frame("test-room"));
    }
    for peer in [&a, &b, &c] {
        peer.handle.clear();
    }

    let d = connect_peer(&service);
    d.send(&service, &join_frame("test-room"));

    for peer in [&a, &b, &c] {
        let notices = peer.handle.messages();
        assert_eq!(notices.len(), 1, "each existing member gets one notice");
        assert_eq!(notices[0].kind, SignalKind::UserJoined);
        assert_eq!(notices[0].room_id, Some(room.clone()));
        assert_eq!(notices[0].sender_id, Some(d.id.clone()));
        assert!(notices[0].payload.is_none());
    }
    assert!(d.handle.frames().is_empty(), "joiner is not notified");

    let members = service.rooms().members_of(&room);
    let expected: HashSet<_> = [&a, &b, &c, &d].iter().map(|p| p.id.clone()).collect();
    assert_eq!(members, expected);
}

#[tokio::test]
async fn test_first_member_creates_room_silently() {
    let service = create_test_service();

    let a = connect_peer(&service);
    a.send(&service, &join_frame("fresh"));

    assert!(service.rooms().contains(&RoomId::from("fresh")));
    assert_eq!(service.rooms().participant_count(&RoomId::from("fresh")), 1);
    assert!(a.handle.frames().is_empty());
}
