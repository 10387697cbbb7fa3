use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::HeaderMap, response::IntoResponse, routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    domain::{
        models::{document::Document, resident::Resident},
        services::{document_service::DocumentGeneratorProvider, token_service::TokenService},
    },
    presentation::{error::ApiError, handlers::authenticate},
    usecase::render_document_usecase::RenderDocumentUsecase,
};

/// json for render request
#[derive(Serialize, Deserialize)]
pub struct RenderRequest {
    pub document: Document,
    pub resident: Resident,
}

#[derive(Serialize, Deserialize)]
pub struct RenderResponse {
    pub content: String,
    pub is_valid: bool,
}

pub struct DocumentState<F: DocumentGeneratorProvider, T: TokenService> {
    render_service: Arc<RenderDocumentUsecase<F>>,
    token_service: T,
}

impl<F: DocumentGeneratorProvider, T: TokenService> Clone for DocumentState<F, T> {
    fn clone(&self) -> Self {
        Self {
            render_service: Arc::clone(&self.render_service),
            token_service: self.token_service.clone(),
        }
    }
}

pub fn create_document_router<F: DocumentGeneratorProvider + 'static, T: TokenService + 'static>(
    render_service: RenderDocumentUsecase<F>,
    token_service: T,
) -> Router {
    let state = DocumentState {
        render_service: Arc::new(render_service),
        token_service,
    };

    Router::new()
        .route("/documents/render", post(render::<F, T>))
        .with_state(state)
}

/// handler function for document rendering
async fn render<F: DocumentGeneratorProvider + 'static, T: TokenService + 'static>(
    State(state): State<DocumentState<F, T>>,
    headers: HeaderMap,
    Json(payload): Json<RenderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let actor_id = authenticate(&state.token_service, &headers)?;
    debug!(user_id = %actor_id, reference = %payload.document.reference, "render requested");

    let rendered = state
        .render_service
        .render(&payload.document, &payload.resident)?;
    Ok(Json(RenderResponse {
        content: rendered.content,
        is_valid: rendered.is_valid,
    }))
}
