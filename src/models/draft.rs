use crate::models::form_value::FieldValue;
use crate::models::procedure::ProcedureKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 待上传的本地文件（草稿中声明，处理时上传到对应字段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingUpload {
    /// 目标字段
    pub field: String,
    /// 本地文件路径（相对路径以草稿所在目录为基准）
    pub path: String,
}

/// 持久化的向导草稿
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub kind: ProcedureKind,
    /// 编辑已有记录时的 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// 已完成的步骤 ID
    #[serde(default)]
    pub completed_steps: Vec<String>,
    #[serde(default)]
    pub form: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<PendingUpload>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl Draft {
    /// 创建空草稿
    pub fn new(kind: ProcedureKind) -> Self {
        Self {
            kind,
            record_id: None,
            completed_steps: Vec::new(),
            form: BTreeMap::new(),
            uploads: Vec::new(),
            file_path: None,
        }
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }

    /// 用于日志显示的文件名
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(|p| std::path::Path::new(p).file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("<{}>", self.kind.slug()))
    }
}
