//! Legacy requests executed through the v2 surface

mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::time::Duration;
use uast_client::infrastructure::{RecordedCall, ScriptedSession, Surface};
use uast_client::nodes::Node;
use uast_client::{v1, v2, ClientError, Context, ErrorKind, Mode};

#[tokio::test]
async fn test_bridged_execute_uses_only_current_surface() {
    let (session, client) = client_for(
        ScriptedSession::new()
            .with_parse_v2(Ok(v2_response(&assignment_tree(), "python", "main.py")))
            .with_latency(Duration::from_millis(5)),
    );

    let resp = client
        .new_parse_request()
        .filename("main.py")
        .content("x = 1")
        .mode(Mode::Semantic)
        .execute()
        .await
        .unwrap();

    assert_eq!(session.call_count(Surface::Current), 1);
    assert_eq!(session.call_count(Surface::Legacy), 0);
    assert_eq!(resp.status, v1::Status::Ok);
    assert!(resp.errors.is_empty());
    assert!(resp.elapsed > Duration::ZERO);
    assert!(resp.elapsed >= Duration::from_millis(5));
    assert_eq!(resp.language, "python");
    assert_eq!(resp.filename, "main.py");
}

#[tokio::test]
async fn test_bridged_tree_equals_legacy_construction() {
    let (_session, client) = client_for(
        ScriptedSession::new()
            .with_parse_v2(Ok(v2_response(&assignment_tree(), "python", "main.py"))),
    );

    let resp = client
        .new_parse_request()
        .content("x = 1")
        .mode(Mode::Annotated)
        .execute()
        .await
        .unwrap();

    assert_eq!(resp.uast, Some(assignment_legacy()));
}

#[tokio::test]
async fn test_bridged_request_carries_legacy_fields() {
    let (session, client) = client_for(
        ScriptedSession::new().with_parse_v2(Ok(v2_response(&assignment_tree(), "python", ""))),
    );

    client
        .new_parse_request()
        .filename("main.py")
        .language("python")
        .content("x = 1")
        .encoding(v1::Encoding::Utf8)
        .mode(Mode::Native)
        .execute()
        .await
        .unwrap();

    assert_eq!(
        session.calls(),
        vec![RecordedCall::ParseV2(v2::ParseRequest {
            filename: "main.py".to_string(),
            language: "python".to_string(),
            content: "x = 1".to_string(),
            mode: Some(Mode::Native),
        })]
    );
}

#[tokio::test]
async fn test_uast_bridges_without_mode() {
    let (session, client) = client_for(
        ScriptedSession::new().with_parse_v2(Ok(v2_response(&assignment_tree(), "python", ""))),
    );

    let request = client.new_parse_request().content("x = 1");
    assert!(!request.is_bridged());

    let parsed = request.uast().await.unwrap();
    assert_eq!(parsed.tree, assignment_tree());
    assert_eq!(parsed.language, "python");

    match &session.calls()[..] {
        [RecordedCall::ParseV2(req)] => assert_eq!(req.mode, None),
        calls => panic!("unexpected calls: {:?}", calls),
    }
}

#[tokio::test]
async fn test_timeout_bounds_bridged_call() {
    let (_session, client) = client_for(
        ScriptedSession::new()
            .with_parse_v2(Ok(v2_response(&assignment_tree(), "python", "")))
            .with_latency(Duration::from_millis(200)),
    );

    let request = client
        .new_parse_request()
        .content("x = 1")
        .mode(Mode::Semantic)
        .timeout(Duration::from_millis(50));

    let err = request.execute().await.unwrap_err();
    assert!(matches!(err, ClientError::DeadlineExceeded));

    let err = request.uast().await.unwrap_err();
    assert!(err.is_cancellation());
}

#[tokio::test]
async fn test_zero_timeout_is_unbounded() {
    let (_session, client) = client_for(
        ScriptedSession::new()
            .with_parse_v2(Ok(v2_response(&assignment_tree(), "python", "")))
            .with_latency(Duration::from_millis(60)),
    );

    let resp = client
        .new_parse_request()
        .mode(Mode::Semantic)
        .timeout(Duration::ZERO)
        .execute()
        .await
        .unwrap();
    assert_eq!(resp.status, v1::Status::Ok);
}

#[tokio::test]
async fn test_caller_deadline_still_applies_with_longer_timeout() {
    let (_session, client) = client_for(
        ScriptedSession::new()
            .with_parse_v2(Ok(v2_response(&assignment_tree(), "python", "")))
            .with_latency(Duration::from_millis(200)),
    );

    let (ctx, _guard) = Context::background().with_timeout(Duration::from_millis(30));
    let err = client
        .new_parse_request()
        .mode(Mode::Semantic)
        .timeout(Duration::from_secs(10))
        .execute_with_context(&ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
}

#[tokio::test]
async fn test_cancellation_reaches_bridged_call() {
    let (_session, client) = client_for(
        ScriptedSession::new()
            .with_parse_v2(Ok(v2_response(&assignment_tree(), "python", "")))
            .with_latency(Duration::from_secs(5)),
    );

    let token = uast_client::CancellationToken::new();
    let ctx = Context::with_cancellation(token.clone());
    let request = client.new_parse_request().mode(Mode::Semantic);

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
    });
    let err = request.execute_with_context(&ctx).await.unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, ClientError::Cancelled));
}

#[tokio::test]
async fn test_partial_parse_surfaces_tree() {
    let mut resp = v2_response(&assignment_tree(), "python", "broken.py");
    resp.errors = vec![v2::ParseError::new("line 2: unexpected EOF")];
    let (_session, client) = client_for(ScriptedSession::new().with_parse_v2(Ok(resp)));

    let request = client.new_parse_request().content("x = 1\ndef");

    let err = request
        .uast_with_context(&Context::background())
        .await
        .unwrap_err();
    assert!(err.is_partial_parse());
    assert_eq!(err.partial_tree(), Some(&assignment_tree()));

    let err = request.mode(Mode::Semantic).execute().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PartialParse);
    assert!(err.to_string().contains("unexpected EOF"));
}

#[tokio::test]
async fn test_unrepresentable_tree_is_bridge_error() {
    let tree = Node::from(serde_json::json!({
        "@type": "python:Global",
        "names": ["a", "b"]
    }));
    let (_session, client) =
        client_for(ScriptedSession::new().with_parse_v2(Ok(v2_response(&tree, "python", ""))));

    let request = client.new_parse_request().mode(Mode::Native);
    let err = request.execute().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bridge);
    assert!(err.to_string().starts_with("cannot convert to v1 uast"));

    // the decoded tree itself is fine
    assert_eq!(request.uast().await.unwrap().tree, tree);
}

#[tokio::test]
async fn test_decode_error_keeps_language() {
    let resp = v2::ParseResponse {
        language: "go".to_string(),
        uast: vec![0xc1, 0x00],
        ..Default::default()
    };
    let (_session, client) = client_for(ScriptedSession::new().with_parse_v2(Ok(resp)));

    let err = client.new_parse_request().uast().await.unwrap_err();
    match err {
        ClientError::Decode { language, .. } => assert_eq!(language, "go"),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_payload_bridges_to_no_tree() {
    let (_session, client) = client_for(ScriptedSession::new().with_parse_v2(Ok(
        v2::ParseResponse {
            language: "python".to_string(),
            ..Default::default()
        },
    )));

    let resp = client
        .new_parse_request()
        .mode(Mode::Semantic)
        .execute()
        .await
        .unwrap();
    assert_eq!(resp.status, v1::Status::Ok);
    assert_eq!(resp.uast, None);
}

#[tokio::test]
async fn test_transport_error_passes_through() {
    let (session, client) = client_for(
        ScriptedSession::new().with_parse_v2(Err(ClientError::transport("connection refused"))),
    );

    let err = client
        .new_parse_request()
        .mode(Mode::Semantic)
        .execute()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.to_string(), "transport error: connection refused");
    assert_eq!(session.call_count(Surface::Legacy), 0);
}

#[tokio::test]
async fn test_concurrent_executions_of_one_builder() {
    let (session, client) = client_for(
        ScriptedSession::new()
            .with_parse_v2(Ok(v2_response(&assignment_tree(), "python", "")))
            .with_latency(Duration::from_millis(10)),
    );
    let request = client.new_parse_request().mode(Mode::Semantic);

    let (a, b) = tokio::join!(request.execute(), request.execute());
    assert_eq!(a.unwrap().uast, b.unwrap().uast);
    assert_eq!(session.call_count(Surface::Current), 2);
}

#[tokio::test]
async fn test_timeout_beyond_clock_range_is_unbounded() {
    let (session, client) = client_for(
        ScriptedSession::new()
            .with_parse_v2(Ok(v2_response(&assignment_tree(), "python", "main.py")))
            .with_latency(Duration::from_millis(5)),
    );
    let request = client
        .new_parse_request()
        .mode(Mode::Semantic)
        .timeout(Duration::MAX);

    let resp = request.execute().await.unwrap();
    assert_eq!(resp.uast, Some(assignment_legacy()));
    request.uast().await.unwrap();

    // the caller's deadline is still honored
    let (ctx, _guard) = Context::background().with_timeout(Duration::from_millis(1));
    tokio::time::sleep(Duration::from_millis(5)).await;
    let err = request.execute_with_context(&ctx).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
    assert_eq!(session.call_count(Surface::Current), 2);
}
