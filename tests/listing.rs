//! Listing and post pages against a mock board

mod common;

use common::{LISTING_HTML, POST_QUERY, post_html, post_url, viewer_for};
use tf_viewer::viewer::board_of;
use tf_viewer::{AttachmentKind, Error, NetworkError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn list_returns_only_requested_board() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/board.php"))
        .and(query_param("mode", "list"))
        .and(query_param("b_id", "tmovie"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let posts = viewer_for(&server).list("tmovie", "1", None).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert!(
        posts
            .iter()
            .all(|p| board_of(&p.link).as_deref() == Some("tmovie"))
    );
    assert_eq!(posts[0].title, "Recoil 2011 1080p");
    assert_eq!(posts[0].link, POST_QUERY);
    assert!(posts[0].subtitle);
    assert_eq!(posts[0].date.as_deref(), Some("10-19"));
    assert!(!posts[1].subtitle);
}

#[tokio::test]
async fn list_sends_search_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/board.php"))
        .and(query_param("b_id", "tmovie"))
        .and(query_param("sc", "recoil"))
        .and(query_param("x", "0"))
        .and(query_param("y", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let posts = viewer_for(&server)
        .list("tmovie", "1", Some("recoil"))
        .await
        .unwrap();
    assert_eq!(posts.len(), 2);
}

#[tokio::test]
async fn listing_failure_status_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/board.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = viewer_for(&server)
        .list("tmovie", "1", None)
        .await
        .unwrap_err();
    match err {
        Error::Network(NetworkError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn view_parses_title_timestamp_and_attachments() {
    let server = MockServer::start().await;
    let short_link = format!("{}/short/AbCd", server.uri());
    Mock::given(method("GET"))
        .and(path("/board.php"))
        .and(query_param("mode", "view"))
        .and(query_param("id", "359715"))
        .respond_with(ResponseTemplate::new(200).set_body_string(post_html(&short_link)))
        .mount(&server)
        .await;

    let post = viewer_for(&server).view(&post_url(&server)).await.unwrap();

    assert_eq!(post.title, "Recoil 2011 1080p");
    assert_eq!(post.published_at.to_string(), "2021-05-03 10:15:00");
    assert_eq!(post.attachments.len(), 2);
    assert_eq!(post.attachments[0].kind, AttachmentKind::Subtitle);
    assert_eq!(post.attachments[1].kind, AttachmentKind::Torrent);
    assert_eq!(post.attachments[1].url, short_link);
}

#[tokio::test]
async fn attachments_for_listing_href() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/board.php"))
        .and(query_param("id", "359715"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(post_html("http://short.example/x")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let attachments = viewer_for(&server)
        .attachments_for_href(&format!("/tf_viewer/board.php?{POST_QUERY}"))
        .await
        .unwrap();
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments[0].filename, "Recoil.2011.srt");
}
