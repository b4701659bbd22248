//! API 协议定义
//!
//! 用 trait 把每个端点的路径、HTTP 方法、表单字段和响应类型绑定在一起。
//! 所有 POST 的请求体都是 `application/x-www-form-urlencoded`，响应体是 JSON。

use crate::{ApiMessage, CsrfToken, DashboardData, SessionInfo, ViewData};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, with any id segment already substituted.
    fn path(&self) -> String;

    /// Form fields posted with the request, in declaration order.
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// 编码后的表单请求体；无字段的请求（纯动作类 POST 与 GET）返回 None
    fn form_body(&self) -> Option<String> {
        let fields = self.form_fields();
        if fields.is_empty() {
            None
        } else {
            Some(encode_form(&fields))
        }
    }
}

// =========================================================
// 表单编码 (Form Encoding)
// =========================================================

/// `application/x-www-form-urlencoded` 的保留集：字母数字与 `-_.~` 之外全部转义
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// 把键值对编码为表单请求体
pub fn encode_form(fields: &[(&'static str, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FORM),
                utf8_percent_encode(value, FORM)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

// =========================================================
// Request Definitions
// =========================================================

/// 获取 CSRF 令牌（同时让后端种下 csrftoken Cookie）
#[derive(Debug, Clone, Default)]
pub struct CsrfTokenRequest;

impl ApiRequest for CsrfTokenRequest {
    type Response = CsrfToken;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/csrf-token/".to_string()
    }
}

/// 登录
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = SessionInfo;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/login/".to_string()
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("password", self.password.clone()),
        ]
    }
}

/// 注册；后端会为注册者创建团队并授予管理员身份
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub gmail: String,
    pub password: String,
    pub team_name: String,
}

impl ApiRequest for RegisterRequest {
    type Response = SessionInfo;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/register/".to_string()
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("name", self.name.clone()),
            ("gmail", self.gmail.clone()),
            ("password", self.password.clone()),
            ("team_name", self.team_name.clone()),
        ]
    }
}

/// 管理面板数据（成员 + 任务）
#[derive(Debug, Clone, Default)]
pub struct DashboardRequest;

impl ApiRequest for DashboardRequest {
    type Response = DashboardData;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/dashboard/".to_string()
    }
}

/// 成员个人视图数据（本人名下任务）
#[derive(Debug, Clone, Default)]
pub struct ViewRequest;

impl ApiRequest for ViewRequest {
    type Response = ViewData;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/view/".to_string()
    }
}

/// 管理员：向团队添加成员
#[derive(Debug, Clone)]
pub struct AddMemberRequest {
    pub username: String,
    pub name: String,
    pub gmail: String,
    pub password: String,
}

impl ApiRequest for AddMemberRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/add-member/".to_string()
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("name", self.name.clone()),
            ("gmail", self.gmail.clone()),
            ("password", self.password.clone()),
        ]
    }
}

/// 管理员：编辑成员资料
///
/// 编辑端点的字段名带 `member_` 前缀，与创建端点不同。
#[derive(Debug, Clone)]
pub struct EditMemberRequest {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for EditMemberRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/edit-member/{}/", self.id)
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("member_name", self.name.clone()),
            ("member_username", self.username.clone()),
            ("member_email", self.email.clone()),
            ("member_password", self.password.clone()),
        ]
    }
}

/// 管理员：将成员移出团队
#[derive(Debug, Clone)]
pub struct DeleteMemberRequest {
    pub id: u32,
}

impl ApiRequest for DeleteMemberRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/delete-member/{}/", self.id)
    }
}

/// 管理员：创建任务并指派给成员
#[derive(Debug, Clone)]
pub struct AddTaskRequest {
    pub task_name: String,
    pub team_member_id: u32,
    /// 日历日期，格式 YYYY-MM-DD；不做客户端校验，由后端判定
    pub start_date: String,
    pub end_date: String,
}

impl ApiRequest for AddTaskRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/add-task/".to_string()
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("task_name", self.task_name.clone()),
            ("team_member_id", self.team_member_id.to_string()),
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
        ]
    }
}

/// 管理员：编辑任务
#[derive(Debug, Clone)]
pub struct EditTaskRequest {
    pub id: u32,
    pub task_name: String,
    pub team_member_id: u32,
    pub start_date: String,
    pub end_date: String,
}

impl ApiRequest for EditTaskRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/edit-task/{}/", self.id)
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("task_name", self.task_name.clone()),
            ("team_member_id", self.team_member_id.to_string()),
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
        ]
    }
}

/// 管理员：删除任务
#[derive(Debug, Clone)]
pub struct DeleteTaskRequest {
    pub id: u32,
}

impl ApiRequest for DeleteTaskRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/delete-task/{}/", self.id)
    }
}

/// 将任务标记为已完成（单向：false → true，无重开操作）
#[derive(Debug, Clone)]
pub struct MarkTaskCompleteRequest {
    pub id: u32,
}

impl ApiRequest for MarkTaskCompleteRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/mark-task-complete/{}/", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_form_escapes_reserved_characters() {
        let body = encode_form(&[
            ("name", "Bob B".to_string()),
            ("gmail", "bob@x.com".to_string()),
        ]);
        assert_eq!(body, "name=Bob%20B&gmail=bob%40x.com");
    }

    #[test]
    fn login_request_encodes_in_field_order() {
        let request = LoginRequest {
            username: "alice".to_string(),
            password: "pw&123".to_string(),
        };
        assert_eq!(request.path(), "/login/");
        assert_eq!(
            request.form_body().as_deref(),
            Some("username=alice&password=pw%26123")
        );
    }

    #[test]
    fn id_segments_are_substituted_into_paths() {
        assert_eq!(EditMemberRequest {
            id: 7,
            name: String::new(),
            username: String::new(),
            email: String::new(),
            password: String::new(),
        }
        .path(), "/edit-member/7/");
        assert_eq!(DeleteTaskRequest { id: 12 }.path(), "/delete-task/12/");
        assert_eq!(
            MarkTaskCompleteRequest { id: 3 }.path(),
            "/mark-task-complete/3/"
        );
    }

    #[test]
    fn action_posts_have_no_body() {
        assert_eq!(DeleteMemberRequest { id: 1 }.form_body(), None);
        assert_eq!(MarkTaskCompleteRequest { id: 1 }.form_body(), None);
        assert_eq!(DashboardRequest.form_body(), None);
    }

    #[test]
    fn edit_member_uses_prefixed_field_names() {
        let request = EditMemberRequest {
            id: 5,
            name: "Bob B".to_string(),
            username: "bob".to_string(),
            email: "bob@x.com".to_string(),
            password: "pw123".to_string(),
        };
        let fields: Vec<&str> = request.form_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            fields,
            vec![
                "member_name",
                "member_username",
                "member_email",
                "member_password"
            ]
        );
    }
}
