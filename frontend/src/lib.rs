//! Taskflow 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `api`: 后端网关（传输层 + 协议分发）
//! - `auth` / `tasks` / `team`: 三个独立的状态存储
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod home;
    mod icons;
    pub mod login;
    mod member_dialog;
    pub mod register;
    mod task_dialog;
    pub mod view;
}
mod session;
mod tasks;
mod team;

use crate::api::TaskflowApi;
use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::view::ViewPage;
use crate::tasks::TaskContext;
use crate::team::TeamContext;

use leptos::prelude::*;
use leptos::task::spawn_local;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod dom;
    mod http;
    pub mod log;
    pub mod route;
    pub mod router;
    mod storage;

    pub use dom::confirm;
    pub use http::HttpClient;
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::View => view! { <ViewPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 后端网关：显式持有在应用根部，经 Context 注入各页面
    let api = TaskflowApi::new();
    provide_context(api.clone());

    // 2. 会话引导：启动时取一次 CSRF 令牌并安装为默认请求头。
    //    失败不致命，后续写操作会收到后端的授权错误。
    spawn_local(async move {
        session::init_session(&api).await;
    });

    // 3. 三个状态存储，互不交叉写入
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    provide_context(TaskContext::new());
    provide_context(TeamContext::new());

    // 4. 从 LocalStorage 恢复上次登录的身份（仅作 UX 提示）
    init_auth(&auth_ctx);

    // 5. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
