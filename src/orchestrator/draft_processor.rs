//! 单份草稿处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **上下文**：为草稿构建 `DraftCtx`
//! 2. **流程调度**：委托 `DraftFlow` 完成上传、校验与保存
//! 3. **统计输出**：记录单份草稿的结果

use crate::models::Draft;
use crate::workflow::{DraftCtx, DraftFlow, DraftOutcome};
use anyhow::Result;
use tracing::{info, warn};

/// 处理单份草稿
///
/// # 参数
/// - `flow`: 草稿处理流程（所有草稿共用）
/// - `draft`: 草稿数据
/// - `draft_index`: 草稿序号（用于日志）
pub async fn process_draft(flow: &DraftFlow, draft: Draft, draft_index: usize) -> Result<DraftOutcome> {
    let ctx = DraftCtx::new(draft_index, &draft);
    log_draft_start(&ctx, draft.uploads.len());

    let outcome = flow.run(&draft, &ctx).await?;
    log_draft_complete(&ctx, &outcome);

    Ok(outcome)
}

fn log_draft_start(ctx: &DraftCtx, uploads: usize) {
    info!("\n{}", "─".repeat(60));
    info!("[草稿 {}] 开始处理 {}", ctx.draft_index, ctx);
    if uploads > 0 {
        info!("[草稿 {}] 待上传文件: {} 个", ctx.draft_index, uploads);
    }
}

fn log_draft_complete(ctx: &DraftCtx, outcome: &DraftOutcome) {
    match outcome {
        DraftOutcome::Submitted { record_id, .. } => {
            info!("[草稿 {}] ✅ 已提交，记录 ID: {}", ctx.draft_index, record_id)
        }
        DraftOutcome::Incomplete { step, errors } => warn!(
            "[草稿 {}] 📝 停在步骤 {}，{} 个字段未通过",
            ctx.draft_index,
            step,
            errors.len()
        ),
        DraftOutcome::SaveFailed { message } => {
            warn!("[草稿 {}] ❌ 保存失败: {}", ctx.draft_index, message)
        }
    }
}
