use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use loupe_core::{build_index, write_shards};
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

/// Index a tiny normalized corpus into a shard directory and build the app
/// over it. Doc ids follow sorted paths: a.txt = 1, b.txt = 2, c.txt = 3.
fn app_over_tiny_corpus(corpus: &std::path::Path, shards: &std::path::Path) -> axum::Router {
    fs::write(corpus.join("a.txt"), "rust system program rust\n").unwrap();
    fs::write(corpus.join("b.txt"), "learn rust\n").unwrap();
    fs::write(corpus.join("c.txt"), "garden tool\n").unwrap();

    let (index, doc_table) = build_index(corpus).unwrap();
    write_shards(&index, shards, 2, doc_table.len() as u32).unwrap();

    // No stopword file on purpose; the loader warns and continues empty.
    let stopwords = shards.join("stopwords.txt");
    loupe_server::build_app(shards, corpus, &stopwords).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let corpus = tempdir().unwrap();
    let shards = tempdir().unwrap();
    let app = app_over_tiny_corpus(corpus.path(), shards.path());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let corpus = tempdir().unwrap();
    let shards = tempdir().unwrap();
    let app = app_over_tiny_corpus(corpus.path(), shards.path());

    let response = app
        .oneshot(
            Request::get("/search?q=rust+program&k=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["total_hits"], 2);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    // a.txt matches both terms with the pair adjacent; b.txt matches one.
    assert_eq!(results[0]["doc_id"], 1);
    assert_eq!(results[0]["path"], "a.txt");
    assert_eq!(results[1]["doc_id"], 2);
    assert!(results[0]["score"].as_f64().unwrap() > results[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn degenerate_query_returns_no_hits() {
    let corpus = tempdir().unwrap();
    let shards = tempdir().unwrap();
    let app = app_over_tiny_corpus(corpus.path(), shards.path());

    let response = app
        .oneshot(Request::get("/search?q=%21%21%21").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_hits"], 0);
    assert!(json["results"].as_array().unwrap().is_empty());
}
