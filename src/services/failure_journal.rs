//! 保存失败记录 - 业务能力层
//!
//! 只负责"追加一行失败记录"，不关心流程

use crate::error::{AppError, AppResult};
use crate::models::ProcedureKind;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 保存失败记录
///
/// 职责：
/// - 将保存失败的草稿追加到记录文件
/// - 每次只写一条
pub struct FailureJournal {
    path: String,
}

impl FailureJournal {
    pub fn new() -> Self {
        Self::with_path("failed_saves.txt")
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 追加一条失败记录
    ///
    /// # 参数
    /// - `kind`: 手续类型
    /// - `source`: 草稿文件名或记录 ID
    /// - `reason`: 失败原因
    pub async fn record(&self, kind: ProcedureKind, source: &str, reason: &str) -> AppResult<()> {
        debug!("写入失败记录: {} | {}", kind.slug(), source);

        let line = format!(
            "{} | {} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            kind.slug(),
            source,
            reason.replace('\n', " ")
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AppError::file_write_failed(&self.path, e))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(&self.path, e))?;

        Ok(())
    }
}

impl Default for FailureJournal {
    fn default() -> Self {
        Self::new()
    }
}
