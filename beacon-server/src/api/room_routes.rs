//! Read-only view of the room table over HTTP.

use crate::SignalingService;
use crate::room::RoomSummary;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use beacon_core::RoomId;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomExistsResponse {
    pub exists: bool,
    pub participant_count: usize,
}

pub fn room_routes() -> Router<SignalingService> {
    Router::new()
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/count", get(room_count))
        .route("/api/rooms/{room_id}/exists", get(room_exists))
}

async fn list_rooms(State(service): State<SignalingService>) -> Json<Vec<RoomSummary>> {
    Json(service.rooms().summaries())
}

async fn room_count(State(service): State<SignalingService>) -> Json<usize> {
    Json(service.rooms().room_count())
}

async fn room_exists(
    State(service): State<SignalingService>,
    Path(room_id): Path<String>,
) -> Json<RoomExistsResponse> {
    let participant_count = service.rooms().participant_count(&RoomId::from(room_id));

    Json(RoomExistsResponse {
        exists: participant_count > 0,
        participant_count,
    })
}
