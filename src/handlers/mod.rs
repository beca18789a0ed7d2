// Handlers for publishing a description and redirecting searches through it

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    codec,
    domain::TemplateParams,
    error::OpenSearchError,
    AppState,
};

// Query parameter struct for search
#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(rename = "type")]
    media_type: Option<String>,
    #[serde(default)]
    filters: String,
    #[serde(default)]
    page: String,
}

// GET /opensearch.xml
pub async fn description_xml(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, OpenSearchError> {
    let body = codec::encode(&state.description)?;
    Ok(([(header::CONTENT_TYPE, codec::CONTENT_TYPE)], body))
}

// GET /search?q=...&type=...&filters=...&page=...
pub async fn search(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Redirect, OpenSearchError> {
    let media_type = params
        .media_type
        .as_deref()
        .unwrap_or(state.default_type.as_str());

    let template_params = TemplateParams::new(&params.q)
        .with_filters(&params.filters)
        .with_start_page(&params.page);

    let url = state.description.request_with(media_type, &template_params)?;
    Ok(Redirect::to(url.as_str()))
}
