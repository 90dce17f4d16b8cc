//! Integration tests for [`Pipeline`].
//!
//! Documents are served by a throwaway axum server on 127.0.0.1 so the
//! fetch stage runs against a real HTTP stack without touching the network.
//! Parsing goes through a fixed-page parser so the text is deterministic.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use pdf_excerpt_core::fixtures::build_text_pdf;
use pdf_excerpt_core::{
    BackendError, DocumentParser, FetchError, Fetcher, MAX_TEXT_CHARS, ParsedDocument, Pipeline,
    PipelineError, TextItem,
};

/// Ignores the bytes and returns the configured pages.
struct FixedParser {
    pages: Vec<Vec<TextItem>>,
}

struct FixedDocument {
    pages: Vec<Vec<TextItem>>,
}

impl ParsedDocument for FixedDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_items(&self, page_number: usize) -> Result<Vec<TextItem>, BackendError> {
        Ok(self.pages[page_number - 1].clone())
    }
}

impl DocumentParser for FixedParser {
    fn parse(&self, _bytes: &[u8]) -> Result<Box<dyn ParsedDocument>, BackendError> {
        Ok(Box::new(FixedDocument {
            pages: self.pages.clone(),
        }))
    }
}

fn pipeline_with_pages(pages: Vec<Vec<TextItem>>) -> Pipeline {
    Pipeline::with_parser(Fetcher::default(), Arc::new(FixedParser { pages }))
}

async fn spawn_upstream() -> SocketAddr {
    let pdf = build_text_pdf(&["Hello World"]).unwrap();
    let router = Router::new()
        .route(
            "/doc.pdf",
            get(move || {
                let pdf = pdf.clone();
                async move { pdf }
            }),
        )
        .route(
            "/missing.pdf",
            get(|| async { (StatusCode::NOT_FOUND, "not here") }),
        )
        .route(
            "/page.html",
            get(|| async { "<!DOCTYPE html><html><body>hi</body></html>" }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn extracts_text_from_served_pdf() {
    let addr = spawn_upstream().await;
    let pipeline = pipeline_with_pages(vec![vec![
        TextItem::fragment("Hello"),
        TextItem::Marker,
        TextItem::fragment("World"),
    ]]);

    let text = pipeline
        .extract_text(&format!("http://{addr}/doc.pdf"))
        .await
        .unwrap();
    assert_eq!(text, "Hello World\n");
}

#[tokio::test]
async fn multi_page_text_is_ordered_and_clipped() {
    let addr = spawn_upstream().await;
    let long_page = "x".repeat(700);
    let pipeline = pipeline_with_pages(vec![
        vec![TextItem::fragment(long_page.clone())],
        vec![TextItem::fragment(long_page.clone())],
    ]);

    let text = pipeline
        .extract_text(&format!("http://{addr}/doc.pdf"))
        .await
        .unwrap();

    let expected_full = format!("{long_page}\n{long_page}\n");
    assert_eq!(text.encode_utf16().count(), MAX_TEXT_CHARS);
    assert_eq!(text, expected_full[..MAX_TEXT_CHARS]);
    assert_eq!(text.as_bytes()[700], b'\n');
}

#[tokio::test]
async fn pages_without_fragments_yield_empty_text() {
    let addr = spawn_upstream().await;
    let pipeline = pipeline_with_pages(vec![vec![TextItem::Marker], vec![]]);

    let text = pipeline
        .extract_text(&format!("http://{addr}/doc.pdf"))
        .await
        .unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn upstream_404_is_fetch_status_error() {
    let addr = spawn_upstream().await;
    let pipeline = pipeline_with_pages(vec![]);

    let err = pipeline
        .extract_text(&format!("http://{addr}/missing.pdf"))
        .await
        .unwrap_err();
    match err {
        PipelineError::Fetch(FetchError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected fetch status error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_pdf_body_is_invalid_format() {
    let addr = spawn_upstream().await;
    let pipeline = pipeline_with_pages(vec![vec![TextItem::fragment("unused")]]);

    let err = pipeline
        .extract_text(&format!("http://{addr}/page.html"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_format");
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let pipeline = pipeline_with_pages(vec![]);
    let err = pipeline
        .extract_text(&format!("http://{addr}/doc.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Fetch(FetchError::Transport(_))));
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let addr = spawn_upstream().await;
    let pipeline = pipeline_with_pages(vec![vec![TextItem::fragment("same")]]);
    let url = format!("http://{addr}/doc.pdf");

    let first = pipeline.extract_text(&url).await.unwrap();
    let second = pipeline.extract_text(&url).await.unwrap();
    assert_eq!(first, second);
}
