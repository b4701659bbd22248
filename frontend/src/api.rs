//! 后端 API 网关
//!
//! `Transport` 把「发一次 HTTP 请求」抽象成一个可替换的接口：
//! 生产实现 [`TaskflowApi`] 走浏览器 fetch，测试用脚本化替身。
//! 协议层的解析与错误提取集中在 [`send`]，与传输方式无关。

use async_trait::async_trait;
use leptos::prelude::*;
use std::fmt;
use taskflow_shared::protocol::{ApiRequest, CsrfTokenRequest, HttpMethod};
use taskflow_shared::{ErrorBody, HEADER_CSRF};

use crate::web::HttpClient;

/// API 错误类型
///
/// 界面层最终只展示一条文本；分类存在是为了让兜底策略可判定：
/// 后端给了 `error` 字段就用它，没给才落到每个操作自己的兜底文案。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 请求未到达后端，或响应体不可读
    Network(String),
    /// 响应不是预期的结构
    Decode(String),
    /// 后端返回非 2xx；message 为响应体的 `error` 字段（若有）
    Backend { status: u16, message: Option<String> },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "invalid response: {}", msg),
            ApiError::Backend {
                message: Some(msg), ..
            } => write!(f, "{}", msg),
            ApiError::Backend {
                status,
                message: None,
            } => write!(f, "request failed with status {}", status),
        }
    }
}

/// 面向用户的错误文案：后端消息优先，缺失时用操作自己的兜底文案
pub fn error_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Backend {
            message: Some(msg), ..
        } => msg.clone(),
        ApiError::Backend { message: None, .. } => fallback.to_string(),
        other => other.to_string(),
    }
}

/// 原始 HTTP 响应，与浏览器类型解耦
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层接口
///
/// 状态存储只依赖这个 trait，不接触 fetch；测试里用脚本化替身注入。
#[async_trait(?Send)]
pub trait Transport {
    /// 发送一次请求，返回原始响应；传输失败映射为 `ApiError::Network`
    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        form_body: Option<String>,
    ) -> Result<RawResponse, ApiError>;

    /// 重新获取 CSRF 令牌并安装为进程级默认请求头
    async fn refresh_csrf(&self) -> Result<(), ApiError>;
}

/// 发送一个协议请求并解析响应
pub async fn send<R, T>(transport: &T, request: &R) -> Result<R::Response, ApiError>
where
    R: ApiRequest,
    T: Transport,
{
    let raw = transport
        .dispatch(R::METHOD, &request.path(), request.form_body())
        .await?;

    if !raw.ok() {
        let message = serde_json::from_str::<ErrorBody>(&raw.body)
            .ok()
            .map(|body| body.error);
        return Err(ApiError::Backend {
            status: raw.status,
            message,
        });
    }

    serde_json::from_str::<R::Response>(&raw.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// 生产传输实现：同源后端 + 浏览器 fetch
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskflowApi {
    base_url: String,
}

impl TaskflowApi {
    /// 同源部署，无需前缀
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// 跨源部署时指定后端地址
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait(?Send)]
impl Transport for TaskflowApi {
    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        form_body: Option<String>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.url(path);
        let mut builder = match method {
            HttpMethod::Get => HttpClient::get(&url),
            HttpMethod::Post => HttpClient::post(&url),
        };

        if let Some(body) = form_body {
            builder = builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(RawResponse { status, body })
    }

    async fn refresh_csrf(&self) -> Result<(), ApiError> {
        let token = send(self, &CsrfTokenRequest).await?;
        HttpClient::set_default_header(HEADER_CSRF, &token.csrf_token);
        Ok(())
    }
}

/// 从 Context 获取后端网关
pub fn use_api() -> TaskflowApi {
    use_context::<TaskflowApi>().expect("TaskflowApi should be provided at the app root")
}

#[cfg(test)]
pub(crate) mod tests;
