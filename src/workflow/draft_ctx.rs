//! 草稿处理上下文
//!
//! 封装"我正在处理第几份草稿、是什么手续"这一信息

use crate::models::{Draft, ProcedureKind};
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct DraftCtx {
    /// 草稿序号（从1开始，仅用于日志显示）
    pub draft_index: usize,

    pub kind: ProcedureKind,

    pub file_name: String,
}

impl DraftCtx {
    pub fn new(draft_index: usize, draft: &Draft) -> Self {
        Self {
            draft_index,
            kind: draft.kind,
            file_name: draft.display_name(),
        }
    }
}

impl Display for DraftCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[草稿 #{} 手续#{} 文件#{}]",
            self.draft_index,
            self.kind.slug(),
            self.file_name
        )
    }
}
