//! HTTP handlers for the contact book.
//!
//! Successful writes answer `303 See Other` pointing at the list, with the
//! notice carried in the `msg` query parameter. Rejected submissions answer
//! `422` with the form state so the client can redisplay it.

use crate::domain::ContactId;
use crate::error::ContactBookError;
use crate::metrics::{Metrics, RequestTimer};
use crate::models::{Contact, ProposedContact};
use crate::services::{ContactService, ContactUpdate, FormState, WriteOutcome};
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub const CONTACT_ADDED: &str = "Contact added!";
pub const CONTACT_UPDATED: &str = "Contact updated!";
pub const CONTACT_DELETED: &str = "Contact deleted!";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContactService>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(service: Arc<dyn ContactService>, metrics: Metrics) -> Self {
        Self { service, metrics }
    }
}

/// Build the contact book router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route(
            "/contact",
            get(list_handler)
                .post(submit_handler)
                .put(update_handler)
                .delete(delete_handler),
        )
        .route("/contact/add", get(add_form_handler))
        .route("/contact/edit/:name", get(edit_form_handler))
        .route("/contact/:name", get(detail_handler))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_requests,
        ))
        .with_state(state)
}

/// Fields an add, edit or delete form may submit.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "oldNama")]
    pub previous_name: Option<String>,
    pub nama: String,
    pub email: String,
    pub nohp: String,
}

impl ContactForm {
    fn proposed(&self) -> ProposedContact {
        ProposedContact::new(self.nama.as_str(), self.email.as_str(), self.nohp.as_str())
    }

    fn into_update(self) -> Result<ContactUpdate, ContactBookError> {
        let proposed = self.proposed();
        let id = self
            .id
            .ok_or_else(|| ContactBookError::InvalidRequest("missing _id".to_string()))?;
        let id = ContactId::new(id)
            .map_err(|e| ContactBookError::InvalidRequest(e.to_string()))?;
        let previous_name = self
            .previous_name
            .ok_or_else(|| ContactBookError::InvalidRequest("missing oldNama".to_string()))?;

        Ok(ContactUpdate {
            id,
            previous_name,
            proposed,
        })
    }
}

/// `?_method=` override for clients limited to GET and POST.
#[derive(Debug, Default, Deserialize)]
pub struct MethodOverride {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub msg: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContactList {
    contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msg: Option<String>,
}

/// Error response wrapper mapping service errors onto status codes.
pub struct ApiError(ContactBookError);

impl From<ContactBookError> for ApiError {
    fn from(err: ContactBookError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ContactBookError::NotFound(_) => StatusCode::NOT_FOUND,
            ContactBookError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ContactBookError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type HandlerResult = Result<Response, ApiError>;

fn redirect_with_notice(msg: &str) -> Response {
    Redirect::to(&format!("/contact?msg={}", urlencoding::encode(msg))).into_response()
}

fn write_response(outcome: WriteOutcome, notice: &str) -> Response {
    match outcome {
        WriteOutcome::Saved(_) => redirect_with_notice(notice),
        WriteOutcome::Invalid(form) => (StatusCode::UNPROCESSABLE_ENTITY, Json(form)).into_response(),
    }
}

async fn track_requests(State(metrics): State<Metrics>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let timer = RequestTimer::new(metrics);

    let response = next.run(req).await;
    let status = response.status();
    debug!(%method, %path, status = status.as_u16(), "request served");

    if status.is_server_error() {
        timer.complete_with_error();
    } else {
        timer.complete();
    }
    response
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /metrics`
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.summary())
}

/// `GET /contact` lists every contact plus any pending notice.
async fn list_handler(
    State(state): State<AppState>,
    Query(notice): Query<NoticeQuery>,
) -> HandlerResult {
    let contacts = state.service.list_contacts().await?;
    Ok(Json(ContactList {
        contacts,
        msg: notice.msg,
    })
    .into_response())
}

/// `GET /contact/add`
async fn add_form_handler() -> impl IntoResponse {
    Json(FormState::blank())
}

/// `GET /contact/edit/:name`
async fn edit_form_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult {
    let contact = state.service.get_contact(&name).await?;
    Ok(Json(FormState::for_edit(&contact)).into_response())
}

/// `GET /contact/:name`
async fn detail_handler(State(state): State<AppState>, Path(name): Path<String>) -> HandlerResult {
    let contact = state.service.get_contact(&name).await?;
    Ok(Json(contact).into_response())
}

/// `POST /contact` creates, or updates/deletes under `?_method=PUT|DELETE`.
async fn submit_handler(
    State(state): State<AppState>,
    Query(method): Query<MethodOverride>,
    Form(form): Form<ContactForm>,
) -> HandlerResult {
    let method = method.method.map(|m| m.trim().to_ascii_uppercase());
    match method.as_deref() {
        None | Some("") | Some("POST") => create(&state, form).await,
        Some("PUT") => update(&state, form).await,
        Some("DELETE") => delete(&state, form).await,
        Some(other) => Err(ContactBookError::InvalidRequest(format!(
            "unsupported _method: {}",
            other
        ))
        .into()),
    }
}

/// `PUT /contact`
async fn update_handler(State(state): State<AppState>, Form(form): Form<ContactForm>) -> HandlerResult {
    update(&state, form).await
}

/// `DELETE /contact`
async fn delete_handler(State(state): State<AppState>, Form(form): Form<ContactForm>) -> HandlerResult {
    delete(&state, form).await
}

async fn create(state: &AppState, form: ContactForm) -> HandlerResult {
    let outcome = state.service.create_contact(form.proposed()).await?;
    Ok(write_response(outcome, CONTACT_ADDED))
}

async fn update(state: &AppState, form: ContactForm) -> HandlerResult {
    let outcome = state.service.update_contact(form.into_update()?).await?;
    Ok(write_response(outcome, CONTACT_UPDATED))
}

// Deleting a name nobody holds still reports success.
async fn delete(state: &AppState, form: ContactForm) -> HandlerResult {
    state.service.delete_contact(&form.nama).await?;
    Ok(redirect_with_notice(CONTACT_DELETED))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_into_update_requires_id_and_previous_name() {
        let form = ContactForm {
            nama: "Ana".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.into_update(),
            Err(ContactBookError::InvalidRequest(_))
        ));

        let form = ContactForm {
            id: Some("c1".to_string()),
            nama: "Ana".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.into_update(),
            Err(ContactBookError::InvalidRequest(_))
        ));

        let form = ContactForm {
            id: Some("c1".to_string()),
            previous_name: Some("Ana".to_string()),
            nama: "Ana B".to_string(),
            email: "ana@x.com".to_string(),
            nohp: "081234567890".to_string(),
        };
        let update = form.into_update().unwrap();
        assert_eq!(update.id.as_str(), "c1");
        assert_eq!(update.previous_name, "Ana");
        assert_eq!(update.proposed.name, "Ana B");
    }

    #[test]
    fn test_redirect_encodes_notice() {
        let response = redirect_with_notice(CONTACT_ADDED);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()["location"].to_str().unwrap();
        assert_eq!(location, "/contact?msg=Contact%20added%21");
    }

    #[test]
    fn test_api_error_status_mapping() {
        let cases = [
            (ContactBookError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ContactBookError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                ContactBookError::Store(crate::error::StoreError::NotInitialized),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
