/// 保存状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    /// 保存成功，界面应跳转到列表页
    Saved {
        record_id: String,
        redirect_to: &'static str,
    },
    /// 保存失败，停留在当前步骤；`retryable` 表示直接重试可能成功
    Failed { message: String, retryable: bool },
}

impl SaveState {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveState::Saved { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SaveState::Failed { .. })
    }
}
