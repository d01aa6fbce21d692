//! HTTP REST API routes

mod contact_routes;
mod event_routes;
mod item_routes;
mod race_routes;
mod reference_routes;
mod spell_routes;
mod stat_block_routes;
mod user_routes;

use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Map a service error to an HTTP response. Services signal outcomes
/// through their error messages: missing rows say "not found", unique
/// violations say "already exists", and validation failures use
/// imperative phrasing.
pub(crate) fn error_response(err: anyhow::Error) -> (StatusCode, String) {
    let message = err.to_string();
    if message.contains("not found") {
        (StatusCode::NOT_FOUND, message)
    } else if message.contains("already exists") {
        (StatusCode::CONFLICT, message)
    } else if message.contains("cannot")
        || message.contains("must")
        || message.contains("Duplicate")
        || message.contains("require")
        || message.contains("may only")
        || message.contains("malformed")
        || message.contains("Unknown")
    {
        (StatusCode::BAD_REQUEST, message)
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Spell routes
        .route("/api/spells", get(spell_routes::list_spells))
        .route("/api/spells", post(spell_routes::create_spell))
        .route("/api/spells/{id}", get(spell_routes::get_spell))
        .route("/api/spells/{id}", put(spell_routes::update_spell))
        .route("/api/spells/{id}", delete(spell_routes::delete_spell))
        // Stat block routes
        .route("/api/stat-blocks", get(stat_block_routes::list_stat_blocks))
        .route("/api/stat-blocks", post(stat_block_routes::create_stat_block))
        .route(
            "/api/stat-blocks/{id}",
            get(stat_block_routes::get_stat_block),
        )
        .route(
            "/api/stat-blocks/{id}",
            put(stat_block_routes::update_stat_block),
        )
        .route(
            "/api/stat-blocks/{id}",
            delete(stat_block_routes::delete_stat_block),
        )
        .route(
            "/api/stat-blocks/{id}/classes",
            put(stat_block_routes::set_class_levels),
        )
        .route(
            "/api/stat-blocks/{id}/sheet",
            get(stat_block_routes::get_character_sheet),
        )
        // Race routes
        .route("/api/races", get(race_routes::list_races))
        .route("/api/races", post(race_routes::create_race))
        .route("/api/races/{id}", get(race_routes::get_race))
        .route("/api/races/{id}", put(race_routes::update_race))
        .route("/api/races/{id}", delete(race_routes::delete_race))
        // Item routes
        .route("/api/items", get(item_routes::list_items))
        .route("/api/items", post(item_routes::create_item))
        .route("/api/items/{id}", get(item_routes::get_item))
        .route("/api/items/{id}", put(item_routes::update_item))
        .route("/api/items/{id}", delete(item_routes::delete_item))
        // Event routes
        .route("/api/events", get(event_routes::list_events))
        .route("/api/events", post(event_routes::create_event))
        .route("/api/events/{id}", get(event_routes::get_event))
        .route("/api/events/{id}", put(event_routes::update_event))
        .route("/api/events/{id}", delete(event_routes::delete_event))
        .route(
            "/api/events/{id}/children",
            get(event_routes::list_children),
        )
        // User routes
        .route("/api/users", get(user_routes::list_users))
        .route("/api/users", post(user_routes::create_user))
        .route("/api/users/{id}", get(user_routes::get_user))
        .route("/api/users/{id}", put(user_routes::update_user))
        .route("/api/users/{id}", delete(user_routes::delete_user))
        // Reference data routes
        .route("/api/schools", get(reference_routes::list_schools))
        .route("/api/schools", post(reference_routes::create_school))
        .route("/api/schools/{id}", delete(reference_routes::delete_school))
        .route("/api/damage-types", get(reference_routes::list_damage_types))
        .route(
            "/api/damage-types",
            post(reference_routes::create_damage_type),
        )
        .route(
            "/api/damage-types/{id}",
            delete(reference_routes::delete_damage_type),
        )
        .route("/api/classes", get(reference_routes::list_classes))
        .route("/api/classes", post(reference_routes::create_class))
        .route("/api/classes/{id}", delete(reference_routes::delete_class))
        .route("/api/coin-types", get(reference_routes::list_coin_types))
        .route("/api/abilities", get(reference_routes::list_abilities))
        .route("/api/skills", get(reference_routes::list_skills))
        // Contact routes
        .route("/api/contact", post(contact_routes::submit_contact))
        .route(
            "/api/contact/queue",
            get(contact_routes::contact_queue_status),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_mapping() {
        assert_eq!(
            error_response(anyhow::anyhow!("Spell not found: 7")).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(anyhow::anyhow!("spell already exists: Fireball")).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(anyhow::anyhow!("Spell name cannot be empty")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(anyhow::anyhow!("connection reset")).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
