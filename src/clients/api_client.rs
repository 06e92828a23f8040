/// 后端 REST API 客户端
///
/// 封装行政相对人、预项目、其他手续与文档上传接口
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::HttpExecutor;
use crate::models::{ClientOut, CreateClientRequest, FileHandle, ProcedureKind, UploadedDocument};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

/// 只关心 ID 的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: String,
}

/// 文档上传接口的响应
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(alias = "file_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
}

impl UploadResponse {
    /// 转为客户端文档记录，缺失的信息用本地文件补齐
    pub fn into_document(self, document_key: &str, file: &FileHandle) -> UploadedDocument {
        UploadedDocument {
            key: document_key.to_string(),
            id: self.id,
            name: self.name,
            url: self.url,
            size: self.size.or(Some(file.size)),
            mime_type: self.mime_type.or_else(|| Some(file.mime_type.clone())),
        }
    }
}

/// 后端 API 客户端
pub struct ApiClient {
    http: HttpExecutor,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            http: HttpExecutor::new(config)?,
        })
    }

    // ========== 行政相对人 ==========

    pub async fn create_client(&self, body: &CreateClientRequest) -> AppResult<ClientOut> {
        let client: ClientOut = self.http.post_json("clients", body).await?;
        info!("✓ 行政相对人已创建: {}", client.id);
        Ok(client)
    }

    pub async fn update_client(&self, id: &str, body: &CreateClientRequest) -> AppResult<ClientOut> {
        let client: ClientOut = self.http.put_json(&format!("clients/{id}"), body).await?;
        info!("✓ 行政相对人已更新: {}", client.id);
        Ok(client)
    }

    pub async fn get_client_by_id(&self, id: &str) -> AppResult<ClientOut> {
        self.http.get_json(&format!("clients/{id}")).await
    }

    /// 按姓名 / 证件号搜索
    pub async fn list_clients(&self, search: &str) -> AppResult<Vec<ClientOut>> {
        self.http
            .get_json_with_query("clients", &[("search", search)])
            .await
    }

    // ========== 预项目 ==========

    pub async fn create_anteproyecto(&self, payload: &JsonValue) -> AppResult<RecordRef> {
        self.http.post_json("anteproyectos", payload).await
    }

    pub async fn update_anteproyecto(&self, id: &str, payload: &JsonValue) -> AppResult<RecordRef> {
        self.http
            .put_json(&format!("anteproyectos/{id}"), payload)
            .await
    }

    pub async fn get_anteproyecto(&self, id: &str) -> AppResult<JsonValue> {
        self.http.get_json(&format!("anteproyectos/{id}")).await
    }

    pub async fn list_anteproyectos(&self) -> AppResult<Vec<JsonValue>> {
        self.http.get_json("anteproyectos").await
    }

    pub async fn delete_anteproyecto(&self, id: &str) -> AppResult<()> {
        self.http.delete(&format!("anteproyectos/{id}")).await
    }

    // ========== 其他手续 ==========

    pub async fn create_tramite(&self, kind: ProcedureKind, payload: &JsonValue) -> AppResult<RecordRef> {
        self.http.post_json(&tramite_path(kind, None), payload).await
    }

    pub async fn update_tramite(
        &self,
        kind: ProcedureKind,
        id: &str,
        payload: &JsonValue,
    ) -> AppResult<RecordRef> {
        self.http.put_json(&tramite_path(kind, Some(id)), payload).await
    }

    // ========== 文档 ==========

    /// 上传文档
    ///
    /// # 参数
    /// - `file`: 本地文件
    /// - `document_key`: 文档所属字段
    pub async fn upload_document(&self, file: FileHandle, document_key: &str) -> AppResult<UploadedDocument> {
        debug!("上传文档 {} ({} 字节) -> {}", file.name, file.size, document_key);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .unwrap_or_else(|_| Part::bytes(file.bytes.clone()).file_name(file.name.clone()));

        let form = Form::new()
            .text("document_key", document_key.to_string())
            .part("file", part);

        let response: UploadResponse = self.http.post_multipart("documents/upload", form).await?;
        Ok(response.into_document(document_key, &file))
    }
}

/// 通用手续接口路径
fn tramite_path(kind: ProcedureKind, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("tramites/{}/{}", kind.slug(), id),
        None => format!("tramites/{}", kind.slug()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tramite_path() {
        assert_eq!(tramite_path(ProcedureKind::Demolicion, None), "tramites/demolicion");
        assert_eq!(
            tramite_path(ProcedureKind::ConformidadObra, Some("42")),
            "tramites/conformidad_obra/42"
        );
    }

    #[test]
    fn test_upload_response_fills_missing_metadata() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"file_id":"doc-1","name":"fue.pdf"}"#).unwrap();
        let file = FileHandle::from_bytes("fue.pdf", vec![0; 64]);
        let doc = response.into_document("fue", &file);

        assert_eq!(doc.id, "doc-1");
        assert_eq!(doc.key, "fue");
        assert_eq!(doc.size, Some(64));
        assert_eq!(doc.mime_type.as_deref(), Some("application/pdf"));
    }

    /// 需要可用的后端服务
    #[tokio::test]
    #[ignore]
    async fn test_get_client_against_backend() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = ApiClient::new(&Config::from_env()).unwrap();
        let result = client.get_client_by_id("1").await;
        assert!(result.is_ok(), "后端应返回行政相对人: {:?}", result.err());
    }
}
