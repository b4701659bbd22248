use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 本地存储键：登录成员的唯一用户名
pub const STORAGE_KEY_USERNAME: &str = "member_username";
/// 本地存储键：登录成员的显示名
pub const STORAGE_KEY_NAME: &str = "member_name";
/// 状态变更请求所需的防伪令牌请求头
pub const HEADER_CSRF: &str = "X-CSRFToken";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 登录/注册成功后后端返回的会话身份
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub member_username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// 团队成员，id 由服务端分配
///
/// 注意：后端不会把密码随响应回传，成员行里没有该字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub gmail: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// 指派给某个成员的任务
///
/// `assigned_to` 仅出现在管理面板的响应里（被指派成员的显示名），
/// `team_name` 仅出现在成员个人视图的响应里。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTask {
    pub id: u32,
    pub task_name: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_finish: bool,
}

/// 管理面板响应：团队成员与团队任务
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default)]
    pub team_tasks: Vec<TeamTask>,
}

/// 成员个人视图响应：仅本人名下的任务
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewData {
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub team_tasks: Vec<TeamTask>,
}

/// CSRF 令牌端点的响应体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrfToken {
    pub csrf_token: String,
}

/// 变更类端点成功时的通用响应体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// 非 2xx 响应的错误体；`error` 字段缺失时由调用方兜底
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_payload_deserializes() {
        let payload = serde_json::json!({
            "member_name": "Alice A",
            "team_members": [
                { "id": 1, "name": "Alice A", "username": "alice", "gmail": "alice@x.com", "is_admin": true },
                { "id": 7, "name": "Bob B", "username": "bob", "gmail": "bob@x.com", "is_admin": false }
            ],
            "team_tasks": [
                {
                    "id": 3,
                    "task_name": "Write report",
                    "assigned_to": "Bob B",
                    "start_date": "2025-01-01",
                    "end_date": "2025-01-10",
                    "is_finish": false
                }
            ]
        });

        let data: DashboardData = serde_json::from_value(payload).unwrap();
        assert_eq!(data.team_members.len(), 2);
        assert_eq!(data.team_members[1].id, 7);
        assert!(data.team_members[0].is_admin);

        let task = &data.team_tasks[0];
        assert_eq!(task.assigned_to.as_deref(), Some("Bob B"));
        assert_eq!(task.team_name, None);
        assert_eq!(
            task.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert!(!task.is_finish);
    }

    #[test]
    fn view_payload_carries_team_name_instead_of_assignee() {
        let payload = serde_json::json!({
            "member_name": "Bob B",
            "team_tasks": [
                {
                    "id": 3,
                    "task_name": "Write report",
                    "team_name": "Syntax",
                    "start_date": "2025-01-01",
                    "end_date": "2025-01-10",
                    "is_finish": true
                }
            ]
        });

        let data: ViewData = serde_json::from_value(payload).unwrap();
        let task = &data.team_tasks[0];
        assert_eq!(task.team_name.as_deref(), Some("Syntax"));
        assert_eq!(task.assigned_to, None);
        assert!(task.is_finish);
    }

    #[test]
    fn absent_list_fields_default_to_empty() {
        let data: DashboardData = serde_json::from_str("{}").unwrap();
        assert!(data.team_members.is_empty());
        assert!(data.team_tasks.is_empty());

        let view: ViewData = serde_json::from_str("{}").unwrap();
        assert!(view.team_tasks.is_empty());
    }

    #[test]
    fn session_info_defaults_missing_admin_flag() {
        let session: SessionInfo =
            serde_json::from_str(r#"{"member_name":"Bob B","member_username":"bob"}"#).unwrap();
        assert_eq!(session.member_username, "bob");
        assert!(!session.is_admin);
    }
}
