//! Shared fixtures for uast-client integration tests

#![allow(dead_code)]

use serde_json::json;
use std::sync::{Arc, Once};
use uast_client::infrastructure::ScriptedSession;
use uast_client::nodes::{self, Node};
use uast_client::v1::{self, Position, Role, INTERNAL_ROLE_KEY};
use uast_client::{v2, Client};

static TRACING: Once = Once::new();

/// Install a test subscriber once (`RUST_LOG=uast_client=debug` to see calls)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn client_for(session: ScriptedSession) -> (Arc<ScriptedSession>, Client) {
    init_tracing();
    let session = Arc::new(session);
    let client = Client::from_session(session.clone());
    (session, client)
}

/// `x = 1` as a semantic v2 tree
pub fn assignment_tree() -> Node {
    Node::from(json!({
        "@type": "python:Module",
        "@role": ["File", "Module"],
        "@pos": {
            "@type": "uast:Positions",
            "start": { "@type": "uast:Position", "offset": 0, "line": 1, "col": 1 },
            "end": { "@type": "uast:Position", "offset": 5, "line": 1, "col": 6 }
        },
        "body": [
            {
                "@type": "python:Assign",
                "@role": ["Assignment", "Statement"],
                "targets": [
                    { "@type": "python:Name", "@token": "x", "@role": ["Identifier", "Left"], "ctx": "Store" }
                ],
                "value": { "@type": "python:Num", "@token": "1", "@role": ["Literal", "Number", "Right"], "n": 1 }
            }
        ]
    }))
}

/// Same tree, built directly in the legacy shape
pub fn assignment_legacy() -> v1::Node {
    let name = v1::Node::new("python:Name")
        .with_token("x")
        .with_roles([Role::Identifier, Role::Left])
        .with_property("ctx", "Store")
        .with_property(INTERNAL_ROLE_KEY, "targets");
    let num = v1::Node::new("python:Num")
        .with_token("1")
        .with_roles([Role::Literal, Role::Number, Role::Right])
        .with_property("n", "1")
        .with_property(INTERNAL_ROLE_KEY, "value");
    let assign = v1::Node::new("python:Assign")
        .with_roles([Role::Assignment, Role::Statement])
        .with_property(INTERNAL_ROLE_KEY, "body")
        .with_child(name)
        .with_child(num);

    v1::Node::new("python:Module")
        .with_roles([Role::File, Role::Module])
        .with_span(Position::new(0, 1, 1), Position::new(5, 1, 6))
        .with_child(assign)
}

pub fn v2_response(tree: &Node, language: &str, filename: &str) -> v2::ParseResponse {
    v2::ParseResponse {
        language: language.to_string(),
        filename: filename.to_string(),
        uast: nodes::encode(tree).expect("encode tree"),
        errors: Vec::new(),
    }
}

pub fn fatal_parse(errors: &[&str]) -> v1::ParseResponse {
    v1::ParseResponse {
        status: v1::Status::Fatal,
        errors: errors.iter().map(|e| e.to_string()).collect(),
        ..Default::default()
    }
}
