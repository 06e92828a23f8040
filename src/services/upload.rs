//! 文件上传服务 - 业务能力层
//!
//! 向导只认识 `DocumentUploader`，不关心文件最终存到哪里

use crate::clients::ApiClient;
use crate::error::{ApiError, AppError, AppResult, UploadError};
use crate::models::{FileHandle, UploadedDocument};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// 文件上传协作者
pub trait DocumentUploader: Send + Sync {
    /// 上传文件，返回客户端文档记录
    fn upload<'a>(
        &'a self,
        file: FileHandle,
        document_key: &'a str,
    ) -> BoxFuture<'a, AppResult<UploadedDocument>>;
}

/// 本地模拟上传
///
/// 以时间戳生成 ID，以 `blob:` URL 代替真实地址
#[derive(Debug, Default)]
pub struct LocalUploader {
    counter: AtomicU64,
}

impl LocalUploader {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", chrono::Utc::now().timestamp_millis(), seq)
    }
}

impl DocumentUploader for LocalUploader {
    fn upload<'a>(
        &'a self,
        file: FileHandle,
        document_key: &'a str,
    ) -> BoxFuture<'a, AppResult<UploadedDocument>> {
        Box::pin(async move {
            if file.size == 0 {
                return Err(UploadError::EmptyFile {
                    document_key: document_key.to_string(),
                    name: file.name,
                }
                .into());
            }

            let id = self.next_id();
            debug!("本地上传: {} -> {} ({} 字节)", file.name, id, file.size);

            Ok(UploadedDocument {
                key: document_key.to_string(),
                url: Some(format!("blob:local/{id}")),
                id,
                name: file.name,
                size: Some(file.size),
                mime_type: Some(file.mime_type),
            })
        })
    }
}

/// 通过后端文档接口上传
pub struct RemoteUploader {
    client: Arc<ApiClient>,
}

impl RemoteUploader {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl DocumentUploader for RemoteUploader {
    fn upload<'a>(
        &'a self,
        file: FileHandle,
        document_key: &'a str,
    ) -> BoxFuture<'a, AppResult<UploadedDocument>> {
        Box::pin(async move {
            let name = file.name.clone();
            match self.client.upload_document(file, document_key).await {
                Err(AppError::Api(ApiError::BadResponse {
                    status, message, ..
                })) if (400..500).contains(&status) => Err(UploadError::Rejected {
                    document_key: document_key.to_string(),
                    name,
                    reason: message.unwrap_or_else(|| format!("HTTP {status}")),
                }
                .into()),
                other => other,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_upload_keeps_name_and_unique_ids() {
        let uploader = LocalUploader::new();
        let a = uploader
            .upload(FileHandle::from_bytes("partida.pdf", vec![1; 10]), "partida_registral")
            .await
            .unwrap();
        let b = uploader
            .upload(FileHandle::from_bytes("partida.pdf", vec![1; 10]), "partida_registral")
            .await
            .unwrap();

        assert_eq!(a.name, "partida.pdf");
        assert_eq!(a.key, "partida_registral");
        assert_eq!(a.size, Some(10));
        assert!(a.url.as_deref().unwrap().starts_with("blob:"));
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_local_upload_rejects_empty_file() {
        let uploader = LocalUploader::new();
        let err = uploader
            .upload(FileHandle::from_bytes("vacio.pdf", vec![]), "fue")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upload(UploadError::EmptyFile { .. })));
    }
}
