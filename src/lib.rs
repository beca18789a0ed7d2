//! OpenSearch description documents: the data model, an XML codec, URL
//! template filling and reference resolution, plus a small publishing server.

pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use codec::{decode, decode_reader, encode, encode_to_writer, DecodeOptions, LanguagePolicy};
pub use domain::{
    fill_template, Description, Image, Language, QueryExample, SyndicationRight, TemplateParams,
    UrlTemplate,
};
pub use error::{OpenSearchError, Result};

// Application state
pub struct AppState {
    pub description: Description,
    /// Media type used when a search does not name one
    pub default_type: String,
}

// Public function to create the router
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/opensearch.xml", get(handlers::description_xml))
        .route("/search", get(handlers::search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
