use crate::error::{AppError, AppResult, FileError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 已上传文档的客户端记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDocument {
    /// 文档所属字段（如 `partida_registral`）
    pub key: String,
    #[serde(alias = "file_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, rename = "type", alias = "mime_type")]
    pub mime_type: Option<String>,
}

/// 待上传的文件
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileHandle {
    /// 从内存数据创建文件
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            mime_type: guess_mime_type(&name).to_string(),
            size: bytes.len() as u64,
            name,
            bytes,
        }
    }

    /// 读取本地文件
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self::from_bytes(name, bytes))
    }
}

/// 根据扩展名猜测 MIME 类型
pub fn guess_mime_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "dwg" => "application/acad",
        "dxf" => "image/vnd.dxf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
