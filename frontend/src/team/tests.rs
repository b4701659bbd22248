use super::*;
use crate::api::RawResponse;
use crate::api::tests::MockTransport;
use futures::executor::block_on;

fn member_json(id: u32, name: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "username": username,
        "gmail": format!("{username}@x.com"),
        "is_admin": false,
    })
}

fn dashboard_json(members: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({ "team_members": members, "team_tasks": [] })
}

#[test]
fn fetch_replaces_member_list() {
    let mock = MockTransport::new();
    mock.push_json(200, dashboard_json(vec![member_json(1, "Alice A", "alice")]));
    mock.push_json(
        200,
        dashboard_json(vec![
            member_json(1, "Alice A", "alice"),
            member_json(7, "Bob B", "bob"),
        ]),
    );
    let ctx = TeamContext::new();

    block_on(fetch_members(&mock, &ctx)).unwrap();
    assert_eq!(ctx.state().get_untracked().members.len(), 1);

    block_on(fetch_members(&mock, &ctx)).unwrap();
    let state = ctx.state().get_untracked();
    assert_eq!(state.members.len(), 2);
    assert_eq!(state.members[1].username, "bob");
    assert!(!state.loading);
}

#[test]
fn fetch_error_uses_fallback_text() {
    let mock = MockTransport::new();
    mock.push_network_error("Failed to fetch");
    let ctx = TeamContext::new();

    let err = block_on(fetch_members(&mock, &ctx)).unwrap_err();
    assert_eq!(err, "network error: Failed to fetch");
    assert!(ctx.state().get_untracked().error.is_some());
}

#[test]
fn add_member_resyncs_and_surfaces_new_row() {
    let mock = MockTransport::new();
    mock.push_json(200, serde_json::json!({ "message": "Member added" }));
    mock.push_json(
        200,
        dashboard_json(vec![
            member_json(1, "Alice A", "alice"),
            member_json(7, "Bob B", "bob"),
        ]),
    );
    let ctx = TeamContext::new();

    let request = AddMemberRequest {
        username: "bob".to_string(),
        name: "Bob B".to_string(),
        gmail: "bob@x.com".to_string(),
        password: "pw123".to_string(),
    };
    block_on(add_member(&mock, &ctx, request)).unwrap();

    assert_eq!(mock.call_log(), vec!["POST /add-member/", "GET /dashboard/"]);
    assert_eq!(
        mock.sent_bodies()[0].as_deref(),
        Some("username=bob&name=Bob%20B&gmail=bob%40x.com&password=pw123")
    );
    assert!(
        ctx.state()
            .get_untracked()
            .members
            .iter()
            .any(|m| m.username == "bob")
    );
}

#[test]
fn add_member_failure_skips_resync() {
    let mock = MockTransport::new();
    mock.push_json(400, serde_json::json!({ "error": "Username already taken" }));
    let ctx = TeamContext::new();

    let request = AddMemberRequest {
        username: "bob".to_string(),
        name: "Bob B".to_string(),
        gmail: "bob@x.com".to_string(),
        password: "pw123".to_string(),
    };
    let err = block_on(add_member(&mock, &ctx, request)).unwrap_err();
    assert_eq!(err, "Username already taken");

    assert_eq!(mock.call_log(), vec!["POST /add-member/"]);
    assert_eq!(
        ctx.state().get_untracked().error.as_deref(),
        Some("Username already taken")
    );
}

#[test]
fn edit_member_posts_prefixed_fields_to_id_path() {
    let mock = MockTransport::new();
    mock.push_json(200, serde_json::json!({ "message": "Member updated" }));
    mock.push_json(200, dashboard_json(vec![member_json(7, "Bobby B", "bob")]));
    let ctx = TeamContext::new();

    let request = EditMemberRequest {
        id: 7,
        name: "Bobby B".to_string(),
        username: "bob".to_string(),
        email: "bob@x.com".to_string(),
        password: "pw123".to_string(),
    };
    block_on(edit_member(&mock, &ctx, request)).unwrap();

    assert_eq!(
        mock.call_log(),
        vec!["POST /edit-member/7/", "GET /dashboard/"]
    );
    assert_eq!(
        mock.sent_bodies()[0].as_deref(),
        Some(
            "member_name=Bobby%20B&member_username=bob&member_email=bob%40x.com&member_password=pw123"
        )
    );
    assert_eq!(ctx.state().get_untracked().members[0].name, "Bobby B");
}

#[test]
fn delete_member_posts_bodyless_action_then_resyncs() {
    let mock = MockTransport::new();
    mock.push_json(200, serde_json::json!({ "message": "Member removed" }));
    mock.push_json(200, dashboard_json(vec![]));
    let ctx = TeamContext::new();

    block_on(delete_member(&mock, &ctx, 7)).unwrap();

    assert_eq!(
        mock.call_log(),
        vec!["POST /delete-member/7/", "GET /dashboard/"]
    );
    assert_eq!(mock.sent_bodies()[0], None);
    assert!(ctx.state().get_untracked().members.is_empty());
}

#[test]
fn superseded_fetch_response_is_discarded() {
    let mock = MockTransport::new();
    let stale_tx = mock.push_pending();
    mock.push_json(200, dashboard_json(vec![member_json(7, "Bob B", "bob")]));
    let ctx = TeamContext::new();

    block_on(async {
        let first = fetch_members(&mock, &ctx);
        let second = async {
            fetch_members(&mock, &ctx).await.unwrap();
            let stale = dashboard_json(vec![member_json(1, "Alice A", "alice")]);
            let _ = stale_tx.send(Ok(RawResponse {
                status: 200,
                body: stale.to_string(),
            }));
        };
        futures::join!(first, second);
    });

    let state = ctx.state().get_untracked();
    assert_eq!(state.members.len(), 1);
    assert_eq!(state.members[0].username, "bob");
}
