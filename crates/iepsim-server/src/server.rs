use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use iepsim_core::model::{
    SchoolResponseRequest, ScoreOutcomesRequest, SimulationLogRequest, SuggestScenarioRequest,
};
use iepsim_core::normalize::{normalize_school_response, normalize_score_list, MalformedResponse};
use iepsim_core::prompt;
use iepsim_core::providers::llm::{
    Decoding, LlmClient, SCHOOL_RESPONSE_DECODING, SCORE_OUTCOMES_DECODING,
};
use iepsim_core::repair::loose_parse;
use iepsim_core::storage::Store;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn LlmClient>,
    pub store: Store,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/api/generateSchoolResponseAndOptions",
            post(generate_school_response),
        )
        .route("/api/scoreOutcomes", post(score_outcomes))
        .route("/api/logSimulation", post(log_simulation))
        .route("/api/suggestScenario", post(suggest_scenario))
        .with_state(state)
}

type ApiResponse = (StatusCode, Json<Value>);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

fn ok(body: Value) -> ApiResponse {
    (StatusCode::OK, Json(body))
}

/// Every failure is reported the same way: a single error status with the
/// message, plus the raw model text when there is any to show.
fn fail(message: String, raw: Option<String>) -> ApiResponse {
    let body = ErrorBody {
        error: message,
        raw,
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::to_value(body).unwrap_or_else(|_| json!({ "error": "internal error" }))),
    )
}

fn fail_malformed(err: MalformedResponse) -> ApiResponse {
    fail("Malformed model response".to_string(), Some(err.raw))
}

/// Front half shared by both model-backed endpoints: run the completion and
/// tolerantly parse the reply. The caller applies its own shape normalization.
async fn complete_and_parse(
    state: &AppState,
    prompt: &str,
    decoding: Decoding,
) -> Result<(Option<Value>, String), ApiResponse> {
    let resp = match state.client.complete(prompt, decoding).await {
        Ok(resp) => resp,
        Err(err) => {
            tracing::error!(event = "provider_error", provider = state.client.provider_name(), error = %err);
            return Err(fail(err.to_string(), None));
        }
    };
    tracing::debug!(
        event = "completion_received",
        provider = %resp.provider,
        model = %resp.model,
        chars = resp.text.len()
    );
    let parsed = loose_parse(&resp.text);
    Ok((parsed, resp.text))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn generate_school_response(
    State(state): State<AppState>,
    Json(req): Json<SchoolResponseRequest>,
) -> ApiResponse {
    let prompt = prompt::school_response_prompt(&req);
    let (parsed, raw) = match complete_and_parse(&state, &prompt, SCHOOL_RESPONSE_DECODING).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };
    match normalize_school_response(parsed, &raw) {
        Ok(result) => ok(result),
        Err(err) => {
            tracing::warn!(event = "malformed_response", endpoint = "generateSchoolResponseAndOptions");
            fail_malformed(err)
        }
    }
}

async fn score_outcomes(
    State(state): State<AppState>,
    Json(req): Json<ScoreOutcomesRequest>,
) -> ApiResponse {
    let prompt = prompt::score_outcomes_prompt(&req);
    let (parsed, raw) = match complete_and_parse(&state, &prompt, SCORE_OUTCOMES_DECODING).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };
    match normalize_score_list(parsed, &raw) {
        Ok(result) => ok(result),
        Err(err) => {
            tracing::warn!(event = "malformed_response", endpoint = "scoreOutcomes");
            fail_malformed(err)
        }
    }
}

async fn log_simulation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SimulationLogRequest>,
) -> ApiResponse {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    match state.store.insert_simulation(&req, user_agent.as_deref()) {
        Ok(id) => {
            tracing::info!(event = "simulation_logged", row_id = id, scenario_id = ?req.scenario_id);
            ok(json!({ "success": true }))
        }
        Err(err) => {
            tracing::error!(event = "storage_error", error = %err);
            fail(err.to_string(), None)
        }
    }
}

async fn suggest_scenario(
    State(state): State<AppState>,
    Json(req): Json<SuggestScenarioRequest>,
) -> ApiResponse {
    match state.store.insert_suggestion(&req.suggestion) {
        Ok(_) => ok(json!({ "success": true })),
        Err(err) => {
            tracing::error!(event = "storage_error", error = %err);
            fail(err.to_string(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iepsim_core::providers::llm::fake::{FailingClient, FakeClient};

    fn state_with(client: impl LlmClient + 'static) -> AppState {
        let store = Store::memory().unwrap();
        store.init_schema().unwrap();
        AppState {
            client: Arc::new(client),
            store,
        }
    }

    #[tokio::test]
    async fn test_generate_returns_normalized_payload() {
        let state = state_with(FakeClient::returning(
            r#"{"schoolResponse": "We hear you", "options": [{"type": "rights"}]}"#,
        ));
        let (status, Json(body)) = generate_school_response(
            State(state),
            Json(SchoolResponseRequest::default()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["schoolResponse"], json!("We hear you"));
        assert_eq!(
            body["options"][0],
            json!({"type": "rights", "text": "", "textExplanation": ""})
        );
    }

    #[tokio::test]
    async fn test_generate_strips_code_fences() {
        let state = state_with(FakeClient::returning(
            "```json\n{\"schoolResponse\": \"ok\", \"options\": []}\n```",
        ));
        let (status, Json(body)) = generate_school_response(
            State(state),
            Json(SchoolResponseRequest::default()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["schoolResponse"], json!("ok"));
    }

    #[tokio::test]
    async fn test_generate_reports_malformed_with_raw_text() {
        let state = state_with(FakeClient::returning("not json at all"));
        let (status, Json(body)) = generate_school_response(
            State(state),
            Json(SchoolResponseRequest::default()),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["raw"], json!("not json at all"));
        assert!(body["error"].as_str().unwrap().contains("Malformed"));
    }

    #[tokio::test]
    async fn test_generate_reports_provider_failure_without_raw() {
        let state = state_with(FailingClient);
        let (status, Json(body)) = generate_school_response(
            State(state),
            Json(SchoolResponseRequest::default()),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], json!("connection refused"));
        assert!(body.get("raw").is_none());
    }

    #[tokio::test]
    async fn test_score_outcomes_normalizes_list() {
        let state = state_with(FakeClient::returning(r#"[{"score": 80}]"#));
        let (status, Json(body)) =
            score_outcomes(State(state), Json(ScoreOutcomesRequest::default())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"outcome": "", "score": 80, "explanation": ""}])
        );
    }

    #[tokio::test]
    async fn test_score_outcomes_rejects_non_list() {
        let state = state_with(FakeClient::returning(r#"{"score": 80}"#));
        let (status, Json(body)) =
            score_outcomes(State(state), Json(ScoreOutcomesRequest::default())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["raw"], json!(r#"{"score": 80}"#));
    }

    #[tokio::test]
    async fn test_log_simulation_stores_user_agent() {
        let state = state_with(FakeClient::returning(""));
        let store = state.store.clone();

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, "test-agent/1.0".parse().unwrap());
        let (status, Json(body)) = log_simulation(
            State(state),
            headers,
            Json(SimulationLogRequest {
                scenario_id: Some("scn-1".to_string()),
                ..Default::default()
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let conn = store.conn.lock().unwrap();
        let ua: String = conn
            .query_row("SELECT user_agent FROM simulation_logs", [], |r| r.get(0))
            .unwrap();
        assert_eq!(ua, "test-agent/1.0");
    }

    #[tokio::test]
    async fn test_log_simulation_twice_accumulates_rows() {
        let state = state_with(FakeClient::returning(""));
        let store = state.store.clone();
        let req = SimulationLogRequest {
            scenario_id: Some("same-scenario".to_string()),
            ..Default::default()
        };
        for _ in 0..2 {
            let (status, _) =
                log_simulation(State(state.clone()), HeaderMap::new(), Json(req.clone())).await;
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(store.count_rows("simulation_logs").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_suggest_scenario_persists() {
        let state = state_with(FakeClient::returning(""));
        let store = state.store.clone();
        let (status, Json(body)) = suggest_scenario(
            State(state),
            Json(SuggestScenarioRequest {
                suggestion: json!({"title": "transportation dispute"}),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert_eq!(store.count_rows("scenario_suggestions").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_healthz() {
        let Json(body) = healthz().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
