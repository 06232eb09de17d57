use crate::application_ports::Locator;
use application_ports::user_sync::{UserSyncError, UserSyncOutcome};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domain_shared::identity::ProviderUserData;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, instrument, warn};

/// Namespace the event-delivery service puts in front of the provider's event names.
const PROVIDER_EVENT_PREFIX: &str = "clerk/";

/// Event as forwarded by the event-delivery service.
///
/// The provider's own webhook body names the event under `type`, so both shapes decode.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    #[serde(alias = "type")]
    pub name: String,
    #[serde(default)]
    pub data: ProviderUserData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLifecycleEvent {
    Created,
    Updated,
    Deleted,
}

impl UserLifecycleEvent {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.strip_prefix(PROVIDER_EVENT_PREFIX).unwrap_or(name) {
            "user.created" => Some(UserLifecycleEvent::Created),
            "user.updated" => Some(UserLifecycleEvent::Updated),
            "user.deleted" => Some(UserLifecycleEvent::Deleted),
            _ => None,
        }
    }
}

#[instrument(level = "info", skip_all)]
pub async fn event_handler<L: Locator>(
    State(locator): State<L>,
    Json(envelope): Json<EventEnvelope>,
) -> (StatusCode, Json<Value>) {
    let EventEnvelope { name, data } = envelope;
    let Some(event) = UserLifecycleEvent::from_name(&name) else {
        warn!(event = %name, "Received unexpected event");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "unexpected_event", "event": name })),
        );
    };

    let port = locator.get_user_sync_port();
    let result = match event {
        UserLifecycleEvent::Created => port.sync_user_created(data).await,
        UserLifecycleEvent::Updated => port.sync_user_updated(data).await,
        UserLifecycleEvent::Deleted => port.sync_user_deleted(data).await,
    };

    match result {
        Ok(outcome) => (StatusCode::OK, Json(outcome_to_json(&outcome))),
        Err(err) => {
            // A non-2xx status hands the event back to the delivery service for retry.
            error!(event = %name, error = %err, "Failed to sync user");
            (error_status(&err), Json(json!({ "error": err.to_string() })))
        }
    }
}

fn outcome_to_json(outcome: &UserSyncOutcome) -> Value {
    serde_json::to_value(outcome).unwrap_or_else(|_| json!({ "success": false }))
}

fn error_status(err: &UserSyncError) -> StatusCode {
    match err {
        UserSyncError::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        UserSyncError::AlreadyExists => StatusCode::CONFLICT,
        UserSyncError::TemporaryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}
