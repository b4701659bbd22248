//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 登录页面
    Login,
    /// 注册页面
    Register,
    /// 管理面板 (需要认证)
    Dashboard,
    /// 成员个人视图 (需要认证)
    View,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举；未知路径返回 None，由路由服务重定向到首页
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Home),
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/dashboard" => Some(Self::Dashboard),
            "/view" => Some(Self::View),
            _ => None,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::View => "/view",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    ///
    /// 仅是 UX 层的跳转提示；写操作的真正授权始终由后端判定。
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::View)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取未知路径的重定向目标
    pub fn unknown_path_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::View,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), Some(route));
        }
    }

    #[test]
    fn unknown_paths_do_not_parse() {
        assert_eq!(AppRoute::from_path("/nope"), None);
        assert_eq!(AppRoute::from_path("/dashboard/extra"), None);
        assert_eq!(AppRoute::from_path(""), None);
    }

    #[test]
    fn only_member_pages_require_auth() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::View.requires_auth());
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
    }
}
