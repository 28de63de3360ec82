use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use loupe_core::stopwords::load_stopwords;
use loupe_core::{
    collect_documents, read_shards, score_documents, DocId, DocTable, InvertedIndex, Normalizer,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize {
    10
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub path: String,
    pub score: f64,
}

/// Shared state: the loaded index never changes for the lifetime of the
/// process, so handlers score concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    index: Arc<InvertedIndex>,
    doc_table: Arc<DocTable>,
    normalizer: Arc<Normalizer>,
}

/// Load the sharded index and doc table at startup and build the router.
pub fn build_app(index_dir: &Path, docs_dir: &Path, stopwords_path: &Path) -> Result<Router> {
    let index = read_shards(index_dir)?;
    let doc_table = collect_documents(docs_dir)?;
    let normalizer = Normalizer::new(load_stopwords(stopwords_path)?);
    let state = AppState {
        index: Arc::new(index),
        doc_table: Arc::new(doc_table),
        normalizer: Arc::new(normalizer),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .with_state(state)
        .layer(cors);
    Ok(app)
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let query_terms = state.normalizer.normalize_line(&params.q);
    let scores = score_documents(&query_terms, &state.index, &state.doc_table);

    let mut ranked: Vec<(DocId, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let total_hits = ranked.len();

    let k = params.k.clamp(1, 100);
    let results = ranked
        .into_iter()
        .take(k)
        .map(|(doc_id, score)| SearchHit {
            doc_id,
            path: state
                .doc_table
                .path(doc_id)
                .unwrap_or("<unknown>")
                .to_string(),
            score,
        })
        .collect();

    Json(SearchResponse {
        query: params.q,
        total_hits,
        results,
    })
}
