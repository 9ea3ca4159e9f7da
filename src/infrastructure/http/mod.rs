//! HTTP REST API routes

mod action_routes;
mod effect_routes;

use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::ActionError;
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::state::AppState;

pub use action_routes::*;
pub use effect_routes::*;

/// Error body returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub code: String,
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponseDto>);

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponseDto {
            code: code.to_string(),
            message: message.into(),
        }),
    )
}

/// Preconditions are the client's to fix; everything else is ours
fn action_error(err: ActionError) -> ApiError {
    match err {
        ActionError::Precondition(failure) => {
            error_response(StatusCode::CONFLICT, failure.code(), failure.to_string())
        }
        other => {
            tracing::error!("Action failed: {}", other);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                other.to_string(),
            )
        }
    }
}

fn parse_character_id(id: &str) -> Result<CharacterId, ApiError> {
    Uuid::parse_str(id)
        .map(CharacterId::from_uuid)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "INVALID_ID", "Invalid character ID"))
}

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        // Actions
        .route(
            "/api/characters/{id}/abilities/{ability}",
            post(action_routes::use_ability),
        )
        .route(
            "/api/objects/{universe}/{object}/actions/{action}",
            post(action_routes::perform_object_action),
        )
        // Effect lifecycle
        .route("/api/characters/{id}/turn", post(effect_routes::process_turn))
        .route("/api/scenes/end", post(effect_routes::end_scene))
        .route(
            "/api/characters/{id}/effects/{effect}",
            delete(effect_routes::remove_effect),
        )
        .route(
            "/api/characters/{id}/live-stats",
            get(effect_routes::get_live_stats),
        )
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::services::test_support::{FixedClock, MockCatalog};
    use crate::domain::entities::{BaseStats, CharacterSheet, WorldObject, WorldObjectAction};
    use crate::domain::services::ScriptedDice;
    use crate::domain::value_objects::Attribute;
    use crate::infrastructure::config::AppConfig;
    use crate::infrastructure::persistence::InMemoryStore;

    struct Harness {
        router: Router,
        juno: CharacterId,
    }

    async fn harness() -> Harness {
        let store = Arc::new(InMemoryStore::new());
        let juno = CharacterSheet::new("Juno", BaseStats::new().with_stat(Attribute::Mental, 3), 6)
            .with_ability("focus")
            .with_ability("mind_spike");
        let juno_id = juno.id;
        store.insert_character(juno).await;
        store
            .insert_object(
                WorldObject::new("terminal_01", "neon", "Terminal", "locked").with_action(
                    WorldObjectAction::new("Hack", "unlocked")
                        .visible_in("locked")
                        .with_required_skills("skill_hack,1"),
                ),
            )
            .await;

        let config = AppConfig {
            server_port: 0,
            catalog_path: String::new(),
            seed_path: String::new(),
        };
        let state = AppState::with_adapters(
            config,
            store,
            Arc::new(MockCatalog::standard()),
            Arc::new(ScriptedDice::new(Vec::<i32>::new())),
            Arc::new(FixedClock::new()),
        );

        Harness {
            router: create_routes().with_state(Arc::new(state)),
            juno: juno_id,
        }
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_use_ability_returns_outcome() {
        let h = harness().await;
        let uri = format!("/api/characters/{}/abilities/focus", h.juno);

        let (status, body) = send(&h.router, "POST", &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["activationSuccess"], true);
        assert_eq!(body["abilityName"], "Focus");
        assert_eq!(body["affected"][0]["appliedEffects"][0], "Focus (+2 mental, 3 turns)");
    }

    #[tokio::test]
    async fn test_precondition_maps_to_conflict() {
        let h = harness().await;
        let uri = format!("/api/characters/{}/abilities/mind_spike", h.juno);

        let (status, body) = send(&h.router, "POST", &uri, Some(json!({ "nearby": [] }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "MISSING_TARGET");
    }

    #[tokio::test]
    async fn test_unknown_ability_is_internal_error() {
        let h = harness().await;
        let uri = format!("/api/characters/{}/abilities/nope", h.juno);

        let (status, body) = send(&h.router, "POST", &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_object_action_soft_failure_is_ok() {
        let h = harness().await;

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/objects/neon/terminal_01/actions/Hack",
            Some(json!({ "characterId": h.juno })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["actionSuccess"], "false");
        assert_eq!(body["objectState"], "locked");
        assert_eq!(body["skillsMissing"][0], "Hacking (level 1)");
    }

    #[tokio::test]
    async fn test_effect_lifecycle_routes() {
        let h = harness().await;
        let ability = format!("/api/characters/{}/abilities/focus", h.juno);
        send(&h.router, "POST", &ability, Some(json!({}))).await;

        let (status, body) = send(
            &h.router,
            "GET",
            &format!("/api/characters/{}/live-stats", h.juno),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["effective"]["mental"], 5);

        let (status, body) = send(
            &h.router,
            "POST",
            &format!("/api/characters/{}/turn", h.juno),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["activeEffects"][0], "Focus (+2 mental, 1 turn)");

        let (status, body) = send(
            &h.router,
            "DELETE",
            &format!("/api/characters/{}/effects/buff_focus", h.juno),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removedEffects"][0], "Focus");

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/scenes/end",
            Some(json!({ "characterIds": [h.juno] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_bad_ids_and_health() {
        let h = harness().await;

        let (status, body) = send(&h.router, "POST", "/api/characters/not-a-uuid/turn", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ID");

        let (status, _) = send(
            &h.router,
            "GET",
            &format!("/api/characters/{}/live-stats", CharacterId::new()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = send(&h.router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
