pub mod availability;
pub mod reservations;
pub mod resources;
pub mod suggestions;
pub mod waitlist;

use axum::Json;
use serde::Serialize;

/// Standard success envelope: `{ "status": "success", "data": ... }`.
#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    pub data: T,
}

pub fn success<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: "success",
        data,
    })
}
