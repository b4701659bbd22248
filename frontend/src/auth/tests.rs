use super::*;
use crate::api::tests::MockTransport;
use futures::executor::block_on;

fn session_json(name: &str, username: &str, is_admin: bool) -> serde_json::Value {
    serde_json::json!({
        "member_name": name,
        "member_username": username,
        "is_admin": is_admin,
    })
}

#[test]
fn login_success_sets_identity_and_persists() {
    let mock = MockTransport::new();
    mock.push_json(200, session_json("Alice A", "alice", true));
    let ctx = AuthContext::new();

    let session = block_on(login(&mock, &ctx, "alice", "pw123")).unwrap();
    assert!(session.is_admin);

    let state = ctx.state().get_untracked();
    assert_eq!(state.user.as_deref(), Some("alice"));
    assert!(state.is_admin);
    assert!(!state.loading);
    assert_eq!(state.error, None);

    assert_eq!(
        LocalStorage::get(STORAGE_KEY_USERNAME).as_deref(),
        Some("alice")
    );
    assert_eq!(
        LocalStorage::get(STORAGE_KEY_NAME).as_deref(),
        Some("Alice A")
    );

    // 登录前做过一次防御性令牌刷新
    assert_eq!(mock.csrf_refreshes.get(), 1);
    assert_eq!(mock.call_log(), vec!["POST /login/"]);
}

#[test]
fn login_failure_records_backend_message() {
    let mock = MockTransport::new();
    mock.push_json(401, serde_json::json!({ "error": "Invalid credentials" }));
    let ctx = AuthContext::new();

    let err = block_on(login(&mock, &ctx, "alice", "wrong")).unwrap_err();
    assert_eq!(err, "Invalid credentials");

    let state = ctx.state().get_untracked();
    assert_eq!(state.user, None);
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
    assert_eq!(LocalStorage::get(STORAGE_KEY_USERNAME), None);
}

#[test]
fn login_failure_without_error_field_uses_fallback() {
    let mock = MockTransport::new();
    mock.push_raw(500, "<html>Server Error</html>");
    let ctx = AuthContext::new();

    let err = block_on(login(&mock, &ctx, "alice", "pw123")).unwrap_err();
    assert_eq!(err, "Login failed");
}

#[test]
fn csrf_refresh_failure_does_not_block_login() {
    let mock = MockTransport::new();
    mock.fail_csrf.set(true);
    mock.push_json(200, session_json("Alice A", "alice", false));
    let ctx = AuthContext::new();

    let session = block_on(login(&mock, &ctx, "alice", "pw123")).unwrap();
    assert!(!session.is_admin);
    assert!(ctx.state().get_untracked().is_authenticated());
}

#[test]
fn identity_falls_back_to_display_name() {
    let mock = MockTransport::new();
    mock.push_json(200, session_json("Alice A", "", false));
    let ctx = AuthContext::new();

    block_on(login(&mock, &ctx, "alice", "pw123")).unwrap();
    assert_eq!(
        ctx.state().get_untracked().user.as_deref(),
        Some("Alice A")
    );
}

#[test]
fn absent_session_fields_are_not_persisted() {
    let mock = MockTransport::new();
    mock.push_json(200, session_json("Alice A", "", false));
    let ctx = AuthContext::new();

    block_on(login(&mock, &ctx, "alice", "pw123")).unwrap();

    // 空字段不落盘
    assert_eq!(LocalStorage::get(STORAGE_KEY_USERNAME), None);
    assert_eq!(
        LocalStorage::get(STORAGE_KEY_NAME).as_deref(),
        Some("Alice A")
    );

    // 没有用户名键就没有可恢复的会话
    let restored = AuthContext::new();
    init_auth(&restored);
    assert!(!restored.state().get_untracked().is_authenticated());
}

#[test]
fn register_success_grants_admin_session() {
    let mock = MockTransport::new();
    mock.push_json(200, session_json("Bob B", "bob", true));
    let ctx = AuthContext::new();

    let request = RegisterRequest {
        username: "bob".to_string(),
        name: "Bob B".to_string(),
        gmail: "bob@x.com".to_string(),
        password: "pw123".to_string(),
        team_name: "Syntax".to_string(),
    };
    let session = block_on(register(&mock, &ctx, request)).unwrap();
    assert!(session.is_admin);

    let state = ctx.state().get_untracked();
    assert_eq!(state.user.as_deref(), Some("bob"));
    assert!(state.is_admin);
    assert_eq!(mock.call_log(), vec!["POST /register/"]);
}

#[test]
fn register_failure_uses_fallback_text() {
    let mock = MockTransport::new();
    mock.push_raw(500, "oops");
    let ctx = AuthContext::new();

    let request = RegisterRequest {
        username: "bob".to_string(),
        name: "Bob B".to_string(),
        gmail: "bob@x.com".to_string(),
        password: "pw123".to_string(),
        team_name: "Syntax".to_string(),
    };
    let err = block_on(register(&mock, &ctx, request)).unwrap_err();
    assert_eq!(err, "Registration failed");
}

#[test]
fn logout_clears_memory_and_storage() {
    let mock = MockTransport::new();
    mock.push_json(200, session_json("Alice A", "alice", true));
    let ctx = AuthContext::new();
    block_on(login(&mock, &ctx, "alice", "pw123")).unwrap();

    logout(&ctx);

    let state = ctx.state().get_untracked();
    assert_eq!(state, AuthState::default());
    assert_eq!(LocalStorage::get(STORAGE_KEY_USERNAME), None);
    assert_eq!(LocalStorage::get(STORAGE_KEY_NAME), None);
}

#[test]
fn init_auth_restores_persisted_identity() {
    LocalStorage::set(STORAGE_KEY_USERNAME, "alice");
    LocalStorage::set(STORAGE_KEY_NAME, "Alice A");

    let ctx = AuthContext::new();
    init_auth(&ctx);

    let state = ctx.state().get_untracked();
    assert_eq!(state.user.as_deref(), Some("Alice A"));
    // 管理员标记不持久化，恢复后由后端响应决定
    assert!(!state.is_admin);
}

#[test]
fn init_auth_without_stored_username_stays_logged_out() {
    LocalStorage::clear();
    LocalStorage::set(STORAGE_KEY_NAME, "Alice A");

    let ctx = AuthContext::new();
    init_auth(&ctx);

    assert!(!ctx.state().get_untracked().is_authenticated());
}

#[test]
fn auth_signal_tracks_login_state() {
    let ctx = AuthContext::new();
    let signal = ctx.is_authenticated_signal();
    assert!(!signal.get_untracked());

    let mock = MockTransport::new();
    mock.push_json(200, session_json("Alice A", "alice", false));
    block_on(login(&mock, &ctx, "alice", "pw123")).unwrap();
    assert!(signal.get_untracked());

    logout(&ctx);
    assert!(!signal.get_untracked());
}
