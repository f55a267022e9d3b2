use beacon_core::{RoomId, SessionId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Copy of a room's member set at one point in time.
pub type MemberSnapshot = HashSet<SessionId>;

/// A room the session was removed from, with the members still in it.
#[derive(Debug, Clone)]
pub struct Departure {
    pub room_id: RoomId,
    pub remaining: MemberSnapshot,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub participant_count: usize,
}

/// Room id → member set.
///
/// A room exists only while it has at least one member. Each mutation runs
/// under the lock of the shard holding that room, so unrelated rooms do not
/// contend. Every read hands out a copy.
#[derive(Clone, Default)]
pub struct RoomTable {
    rooms: Arc<DashMap<RoomId, MemberSnapshot>>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the session to the room, creating it if needed, and returns the
    /// members after the add.
    pub fn join(&self, room_id: &RoomId, session_id: &SessionId) -> MemberSnapshot {
        match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().insert(session_id.clone());
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                info!("Creating room {}", room_id);
                let members = HashSet::from([session_id.clone()]);
                entry.insert(members.clone());
                members
            }
        }
    }

    /// Removes the session from the room and drops the room once empty.
    ///
    /// Returns the remaining members, or `None` if the session was not in
    /// the room (including when the room does not exist).
    pub fn leave(&self, room_id: &RoomId, session_id: &SessionId) -> Option<MemberSnapshot> {
        let mut remaining = None;

        let removed = self.rooms.remove_if_mut(room_id, |_, members| {
            if members.remove(session_id) {
                remaining = Some(members.clone());
            }
            members.is_empty()
        });

        if removed.is_some() {
            info!("Room {} is empty and removed", room_id);
        }

        remaining
    }

    pub fn members_of(&self, room_id: &RoomId) -> MemberSnapshot {
        self.rooms
            .get(room_id)
            .map(|members| members.value().clone())
            .unwrap_or_default()
    }

    /// Removes the session from every room it belongs to.
    ///
    /// Returns one [`Departure`] per room that actually contained it. Calling
    /// this again for the same session returns nothing.
    pub fn remove_everywhere(&self, session_id: &SessionId) -> Vec<Departure> {
        let room_ids: Vec<RoomId> = self
            .rooms
            .iter()
            .filter(|entry| entry.value().contains(session_id))
            .map(|entry| entry.key().clone())
            .collect();

        room_ids
            .into_iter()
            .filter_map(|room_id| {
                self.leave(&room_id, session_id)
                    .map(|remaining| Departure { room_id, remaining })
            })
            .collect()
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn participant_count(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map_or(0, |members| members.len())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn summaries(&self) -> Vec<RoomSummary> {
        self.rooms
            .iter()
            .map(|entry| RoomSummary {
                room_id: entry.key().clone(),
                participant_count: entry.value().len(),
            })
            .collect()
    }
}
