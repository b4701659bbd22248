//! 认证状态存储
//!
//! 持有当前登录身份，并提供登录、注册、登出三个操作。
//! 身份同时持久化到 LocalStorage，刷新页面后可恢复（仅作 UX 提示，
//! 真正的会话凭据是后端的 Cookie）。

use leptos::prelude::*;
use taskflow_shared::protocol::{LoginRequest, RegisterRequest};
use taskflow_shared::{STORAGE_KEY_NAME, STORAGE_KEY_USERNAME, SessionInfo};

use crate::api::{Transport, error_message, send};
use crate::web::{LocalStorage, log};

/// 认证状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// 当前登录成员的标识；None 表示未登录
    pub user: Option<String>,
    /// 是否团队管理员，决定登录后进入管理面板还是个人视图
    pub is_admin: bool,
    /// 登录/注册请求进行中
    pub loading: bool,
    /// 最近一次失败的文案
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// 以登录/注册成功的会话身份替换当前状态
    ///
    /// 标识优先取唯一用户名，后端未回传时退回显示名。
    fn apply_session(&mut self, session: &SessionInfo) {
        let user = if !session.member_username.is_empty() {
            Some(session.member_username.clone())
        } else if !session.member_name.is_empty() {
            Some(session.member_name.clone())
        } else {
            None
        };

        self.user = user;
        self.is_admin = session.is_admin;
        self.loading = false;
        self.error = None;
    }

    fn apply_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

/// 认证上下文（信号对），在应用根部创建并经 Context 注入
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state
    }

    /// 供路由守卫注入的认证状态派生信号
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.read().is_authenticated())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided at the app root")
}

/// 从 LocalStorage 恢复上次登录的身份
///
/// 只在用户名键存在时恢复；管理员标记不持久化，恢复后为 false，
/// 页面级权限始终以后端响应为准。
pub fn init_auth(ctx: &AuthContext) {
    let Some(username) = LocalStorage::get(STORAGE_KEY_USERNAME) else {
        return;
    };

    let user = LocalStorage::get(STORAGE_KEY_NAME)
        .filter(|name| !name.is_empty())
        .or(Some(username));

    ctx.set_state.update(|state| {
        state.user = user;
    });
}

/// 登录；成功时持久化身份并返回会话信息（调用方按 is_admin 决定跳转）
pub async fn login<T: Transport>(
    transport: &T,
    ctx: &AuthContext,
    username: &str,
    password: &str,
) -> Result<SessionInfo, String> {
    ctx.set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });

    // 防御性刷新：启动时的引导可能已失败（如后端当时未就绪）
    if let Err(err) = transport.refresh_csrf().await {
        log::warn(&format!("[Auth] CSRF refresh failed before login: {}", err));
    }

    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    match send(transport, &request).await {
        Ok(session) => {
            persist_session(&session);
            ctx.set_state.update(|state| state.apply_session(&session));
            Ok(session)
        }
        Err(err) => {
            let message = error_message(&err, "Login failed");
            ctx.set_state
                .update(|state| state.apply_error(message.clone()));
            Err(message)
        }
    }
}

/// 注册；后端会创建团队并授予注册者管理员身份
pub async fn register<T: Transport>(
    transport: &T,
    ctx: &AuthContext,
    request: RegisterRequest,
) -> Result<SessionInfo, String> {
    ctx.set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });

    if let Err(err) = transport.refresh_csrf().await {
        log::warn(&format!(
            "[Auth] CSRF refresh failed before register: {}",
            err
        ));
    }

    match send(transport, &request).await {
        Ok(session) => {
            persist_session(&session);
            ctx.set_state.update(|state| state.apply_session(&session));
            Ok(session)
        }
        Err(err) => {
            let message = error_message(&err, "Registration failed");
            ctx.set_state
                .update(|state| state.apply_error(message.clone()));
            Err(message)
        }
    }
}

/// 登出：清除内存状态与持久化身份。路由层监听认证信号完成跳转。
pub fn logout(ctx: &AuthContext) {
    LocalStorage::delete(STORAGE_KEY_USERNAME);
    LocalStorage::delete(STORAGE_KEY_NAME);
    ctx.set_state.set(AuthState::default());
}

/// 只持久化后端实际返回的字段，空值不落盘，
/// 避免 `init_auth` 把空用户名当成可恢复的会话。
fn persist_session(session: &SessionInfo) {
    if !session.member_username.is_empty() {
        LocalStorage::set(STORAGE_KEY_USERNAME, &session.member_username);
    }
    if !session.member_name.is_empty() {
        LocalStorage::set(STORAGE_KEY_NAME, &session.member_name);
    }
}

#[cfg(test)]
mod tests;
