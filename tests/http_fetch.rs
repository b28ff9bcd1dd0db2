use docs_parser::{FetchSession, HttpTransport, ParserError, ResponseCache, TransportError};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_session() -> FetchSession<HttpTransport> {
    FetchSession::new(
        HttpTransport::new(Duration::from_secs(5)).unwrap(),
        ResponseCache::open_in_memory().unwrap(),
    )
}

#[tokio::test]
async fn test_cache_then_refetch_after_clear() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Python docs</h1>"))
        .mount(&server)
        .await;

    let url = format!("{}/3/", server.uri());
    let session = http_session();

    let first = session.get_bytes(&url).await.unwrap();
    let second = session.get_bytes(&url).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    session.clear_cache().unwrap();
    let third = session.get_bytes(&url).await.unwrap();
    assert_eq!(third, first);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_error_status_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pep-9999/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = format!("{}/pep-9999/", server.uri());
    let session = http_session();

    let err = session.get_document(&url).await.unwrap_err();
    assert!(matches!(
        err,
        ParserError::FetchFailed { source: TransportError::Status(500), .. }
    ));
    assert!(session.cache().is_empty().unwrap());
}

#[tokio::test]
async fn test_document_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/whatsnew/3.12.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><h1>What's New In Python 3.12</h1></body></html>"),
        )
        .mount(&server)
        .await;

    let session = http_session();
    let document = session
        .get_document(&format!("{}/whatsnew/3.12.html", server.uri()))
        .await
        .unwrap();

    let h1 = docs_parser::find_tag(document.root_element(), &docs_parser::Search::tag("h1")).unwrap();
    assert_eq!(docs_parser::locator::element_text(h1), "What's New In Python 3.12");
}
