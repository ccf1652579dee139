//! REST surface: `Router::route`, `StyleRenderer::render`, template/company
//! seeding for demos, and a health check. Grounded on the teacher's
//! `server/src/http.rs` router-builder style (one `Router::new().route(...)`
//! chain plus a handful of layered middlewares) — trimmed to plain HTTP,
//! no websocket/webrtc routes (telephony transport is a Non-goal).

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router as AxumRouter};
use receptionist_config::loader::{parse_company, parse_template};
use receptionist_core::{CompanyProfile, Template, Turn};
use receptionist_style::action::{Action, SlotKind, SlotValues};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{Result, ServerError};
use crate::state::AppState;

pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/healthz", get(healthz))
        .route("/route", post(route_turn))
        .route("/render", post(render_action))
        .route("/admin/templates/:id", post(seed_template))
        .route("/admin/companies/:id", post(seed_company))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// `POST /route` — drives a single `Turn` through `Router::route`.
async fn route_turn(State(state): State<AppState>, Json(turn): Json<Turn>) -> Json<receptionist_core::RoutedTurn> {
    Json(state.router.route(turn).await)
}

#[derive(Debug, Deserialize)]
struct RenderRequest {
    action: Action,
    company_id: String,
    session_id: String,
    turn_index: u32,
    #[serde(default)]
    just_extracted: Option<(SlotKind, String)>,
    #[serde(default)]
    captured_slots: SlotValues,
    /// `StyleRenderer::render` needs `template.greetings`; callers that
    /// only ever render non-`Greeting` actions may omit this.
    #[serde(default)]
    template_id: Option<String>,
}

/// `POST /render` — looks up the company (and, if supplied, the template)
/// by id, then calls `StyleRenderer::render` directly; no LLM involved.
async fn render_action(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<receptionist_style::RenderedUtterance>> {
    let company = state.company_store_load(&request.company_id).await?;
    let template = match &request.template_id {
        Some(id) => state.template_store_load(id).await?,
        None => empty_template(),
    };

    let just_extracted = request.just_extracted.as_ref().map(|(slot, value)| (*slot, value.as_str()));

    let rendered = receptionist_style::render(
        &request.action,
        &company,
        &template,
        &request.session_id,
        request.turn_index,
        just_extracted,
        &request.captured_slots,
    );

    Ok(Json(rendered))
}

impl AppState {
    async fn company_store_load(&self, id: &str) -> Result<CompanyProfile> {
        use receptionist_core::CompanyStore;
        self.company_store.load_company(id).await.map_err(ServerError::from)
    }

    async fn template_store_load(&self, id: &str) -> Result<Template> {
        use receptionist_core::TemplateStore;
        self.template_store.load_template(id).await.map_err(ServerError::from)
    }
}

fn empty_template() -> Template {
    Template {
        id: "__render_only__".to_string(),
        version: 1,
        scenarios: vec![],
        fillers: Default::default(),
        urgency_keywords: Default::default(),
        synonyms: Default::default(),
        intent_keywords: Default::default(),
        thresholds: Default::default(),
        category_fillers: Default::default(),
        category_synonyms: Default::default(),
        context_patterns: vec![],
        greetings: vec!["Hello! How can I help you today?".to_string()],
        custom_entity_patterns: vec![],
        corrections: vec![],
    }
}

/// `POST /admin/templates/:id` — seeds a `Template` from a raw YAML body,
/// for local demos and integration tests (spec §3's administrative
/// collaborator has no on-the-wire counterpart here; see DESIGN.md).
async fn seed_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<serde_json::Value>> {
    let mut template = parse_template(&body, &id).map_err(|e| ServerError::InvalidRequest(e.to_string()))?;
    template.id = id.clone();
    state.template_store.insert(template);
    Ok(Json(serde_json::json!({ "status": "ok", "id": id })))
}

/// `POST /admin/companies/:id` — seeds a `CompanyProfile` from a raw YAML
/// body, mirroring `seed_template`.
async fn seed_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<serde_json::Value>> {
    let mut company = parse_company(&body, &id).map_err(|e| ServerError::InvalidRequest(e.to_string()))?;
    company.id = id.clone();
    state.company_store.insert(company);
    Ok(Json(serde_json::json!({ "status": "ok", "id": id })))
}
