//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 `reqwest::Client`，只暴露"发请求"的能力

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use reqwest::{multipart::Form, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

/// HTTP 执行器
///
/// 职责：
/// - 持有唯一的 Client 资源、基础地址与令牌
/// - 统一处理状态码与 JSON 解析
/// - 不认识 Administrado / Anteproyecto
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpExecutor {
    /// 创建新的 HTTP 执行器
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::api_request_failed("<client-builder>", e))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    /// 拼接完整地址
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let request = self.client.get(self.url(path));
        self.send(path, request).await
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let request = self.client.get(self.url(path)).query(query);
        self.send(path, request).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send(path, request).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.put(self.url(path)).json(body);
        self.send(path, request).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> AppResult<T> {
        let request = self.client.post(self.url(path)).multipart(form);
        self.send(path, request).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let request = self.client.delete(self.url(path));
        self.send_raw(path, request).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> AppResult<T> {
        let body = self.send_raw(endpoint, request).await?;
        parse_body(endpoint, &body)
    }

    async fn send_raw(&self, endpoint: &str, request: RequestBuilder) -> AppResult<String> {
        let request = if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        };

        debug!("发送请求: {}", endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("响应 {} ({}): {} 字节", endpoint, status, body.len());

        if !status.is_success() {
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: extract_message(&body),
            }
            .into());
        }

        Ok(body)
    }
}

/// 解析响应体；支持直接返回对象，也支持 `{ "data": ... }` 包装
pub fn parse_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> AppResult<T> {
    if body.trim().is_empty() {
        return Err(ApiError::EmptyResponse {
            endpoint: endpoint.to_string(),
        }
        .into());
    }

    let value: JsonValue = serde_json::from_str(body)?;

    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => Ok(parsed),
        Err(direct_err) => match value.get("data") {
            Some(data) if !data.is_null() => Ok(serde_json::from_value(data.clone())?),
            Some(_) => Err(ApiError::EmptyResponse {
                endpoint: endpoint.to_string(),
            }
            .into()),
            None => Err(direct_err.into()),
        },
    }
}

/// 从错误响应中提取提示信息
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<JsonValue>(trimmed) {
        for key in ["message", "detail", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return Some(msg.to_string());
            }
        }
    }

    Some(crate::utils::logging::truncate_text(trimmed, 200))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: String,
    }

    #[test]
    fn test_parse_body_direct_and_wrapped() {
        let direct: Record = parse_body("/x", r#"{"id":"a1"}"#).unwrap();
        let wrapped: Record = parse_body("/x", r#"{"code":200,"data":{"id":"a2"}}"#).unwrap();
        assert_eq!(direct.id, "a1");
        assert_eq!(wrapped.id, "a2");
    }

    #[test]
    fn test_parse_body_empty_and_null_data() {
        let empty = parse_body::<Record>("/x", "  ").unwrap_err();
        let null = parse_body::<Record>("/x", r#"{"data":null}"#).unwrap_err();
        assert!(matches!(empty, AppError::Api(ApiError::EmptyResponse { .. })));
        assert!(matches!(null, AppError::Api(ApiError::EmptyResponse { .. })));
    }

    #[test]
    fn test_extract_message_prefers_json_fields() {
        assert_eq!(
            extract_message(r#"{"detail":"Cliente no encontrado"}"#).as_deref(),
            Some("Cliente no encontrado")
        );
        assert_eq!(extract_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = Config {
            api_base_url: "http://municipio.test/api/".to_string(),
            ..Config::default()
        };
        let executor = HttpExecutor::new(&config).unwrap();
        assert_eq!(executor.url("/clients/7"), "http://municipio.test/api/clients/7");
    }
    #[tokio::test]
    async fn test_delete_surfaces_connection_failure() {
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let executor = HttpExecutor::new(&config).unwrap();
        let err = executor.delete("anteproyectos/1").await.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, AppError::Api(ApiError::RequestFailed { .. })));
    }
}
