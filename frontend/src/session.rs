//! 会话引导
//!
//! 应用启动时取一次 CSRF 令牌并安装为默认请求头，让后续所有
//! POST 自动携带 `X-CSRFToken`。同一请求也让后端种下 csrftoken Cookie。

use crate::api::Transport;
use crate::web::log;

/// 初始化会话：失败只记录日志，不阻塞应用渲染。
/// 写操作前还会再做一次防御性刷新，见 `auth::login` / `auth::register`。
pub async fn init_session<T: Transport>(transport: &T) {
    if let Err(err) = transport.refresh_csrf().await {
        log::error(&format!("[Session] CSRF bootstrap failed: {}", err));
    }
}
