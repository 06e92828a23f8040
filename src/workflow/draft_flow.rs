//! 草稿处理流程 - 流程层
//!
//! 核心职责：定义"一份草稿"的完整处理流程
//!
//! 流程顺序：
//! 1. 恢复向导（当前步骤 = 第一个未完成的步骤）
//! 2. 上传草稿中声明的本地文件
//! 3. 逐步 handle_next，遇到校验失败即停止
//! 4. 保存；失败写入失败记录（兜底）

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::models::{Draft, FileHandle, PendingUpload};
use crate::services::{DocumentUploader, FailureJournal, WizardPersistence};
use crate::wizard::{HeaderStore, SaveState, ValidationErrors, WizardSettings};
use crate::wizards::AnyWizard;
use crate::workflow::draft_ctx::DraftCtx;

/// 草稿处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum DraftOutcome {
    /// 已提交
    Submitted {
        record_id: String,
        redirect_to: &'static str,
    },
    /// 某一步校验未通过
    Incomplete {
        step: String,
        errors: ValidationErrors,
    },
    /// 保存失败（已写入失败记录）
    SaveFailed { message: String },
}

impl DraftOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, DraftOutcome::Submitted { .. })
    }
}

/// 草稿处理流程
///
/// - 编排完整的草稿处理流程
/// - 决定何时上传、何时前进、何时保存、何时兜底
/// - 只依赖协作者（uploader / persistence）
pub struct DraftFlow {
    uploader: Arc<dyn DocumentUploader>,
    persistence: Arc<dyn WizardPersistence>,
    journal: FailureJournal,
    headers: HeaderStore,
    settings: WizardSettings,
    verbose_logging: bool,
}

impl DraftFlow {
    pub fn new(
        config: &Config,
        uploader: Arc<dyn DocumentUploader>,
        persistence: Arc<dyn WizardPersistence>,
        headers: HeaderStore,
    ) -> Self {
        Self {
            uploader,
            persistence,
            journal: FailureJournal::with_path(&config.failure_journal),
            headers,
            settings: WizardSettings::from_config(config),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(&self, draft: &Draft, ctx: &DraftCtx) -> Result<DraftOutcome> {
        let subtitle = if draft.record_id.is_some() {
            "Editar trámite"
        } else {
            "Nuevo trámite"
        };
        let _header = self.headers.enter(draft.kind.name(), subtitle);

        let mut wizard = AnyWizard::resume(draft, self.settings)
            .with_context(|| format!("{} 无法恢复草稿", ctx))?;

        info!(
            "[草稿 {}] {} - 从第 {}/{} 步开始",
            ctx.draft_index,
            draft.kind.name(),
            wizard.current_step() + 1,
            wizard.steps().len()
        );

        // ========== 上传待上传文件 ==========
        for upload in &draft.uploads {
            self.upload_pending(&mut wizard, draft, upload, ctx).await;
        }

        // ========== 逐步前进 ==========
        loop {
            let at = wizard.current_step();
            if !wizard.handle_next() {
                return Ok(self.incomplete(&wizard, at, ctx));
            }
            debug!("[草稿 {}] ✓ 第 {} 步完成", ctx.draft_index, at + 1);
            if wizard.current_step() == at {
                break;
            }
        }

        // 草稿中标记为已完成的步骤同样要重新校验
        for at in 0..wizard.steps().len() {
            if !wizard.validate_step(at) {
                return Ok(self.incomplete(&wizard, at, ctx));
            }
        }

        // ========== 保存 ==========
        info!("[草稿 {}] 📤 正在保存...", ctx.draft_index);

        match wizard.handle_save(self.persistence.as_ref()).await {
            SaveState::Saved {
                record_id,
                redirect_to,
            } => {
                info!(
                    "[草稿 {}] ✓ 已保存 {} -> {}",
                    ctx.draft_index, record_id, redirect_to
                );
                Ok(DraftOutcome::Submitted {
                    record_id,
                    redirect_to,
                })
            }
            SaveState::Failed { message, retryable } => {
                if retryable {
                    warn!("[草稿 {}] ⚠️ 保存失败，可重试", ctx.draft_index);
                }
                self.write_failure(ctx, &message).await?;
                Ok(DraftOutcome::SaveFailed { message })
            }
            SaveState::Idle | SaveState::Saving => {
                let message = "保存失败（仅记录日志）".to_string();
                self.write_failure(ctx, &message).await?;
                Ok(DraftOutcome::SaveFailed { message })
            }
        }
    }

    fn incomplete(&self, wizard: &AnyWizard, at: usize, ctx: &DraftCtx) -> DraftOutcome {
        let step = wizard.steps()[at].id.clone();
        let errors = wizard.errors().clone();
        warn!(
            "[草稿 {}] ⚠️ 第 {} 步 ({}) 未通过校验: {}",
            ctx.draft_index,
            at + 1,
            step,
            errors.summary()
        );
        if self.verbose_logging {
            info!("[草稿 {}]\n{}", ctx.draft_index, wizard.render());
        }
        DraftOutcome::Incomplete { step, errors }
    }

    /// 上传一个待上传文件；失败只记录日志，由后续校验决定是否阻塞
    async fn upload_pending(
        &self,
        wizard: &mut AnyWizard,
        draft: &Draft,
        upload: &PendingUpload,
        ctx: &DraftCtx,
    ) {
        let path = resolve_upload_path(draft, &upload.path);

        let file = match FileHandle::from_path(&path).await {
            Ok(file) => file,
            Err(e) => {
                error!("[草稿 {}] ❌ 读取 {} 失败: {}", ctx.draft_index, path.display(), e);
                return;
            }
        };

        match wizard
            .upload_into(self.uploader.as_ref(), file, &upload.field)
            .await
        {
            Ok(document) => info!(
                "[草稿 {}] ✓ 已上传 {} -> {}",
                ctx.draft_index, document.name, upload.field
            ),
            Err(e) => error!(
                "[草稿 {}] ❌ 上传到 {} 失败: {}",
                ctx.draft_index, upload.field, e
            ),
        }
    }

    async fn write_failure(&self, ctx: &DraftCtx, reason: &str) -> Result<()> {
        self.journal
            .record(ctx.kind, &ctx.file_name, reason)
            .await
            .context("写入失败记录失败")?;

        warn!(
            "[草稿 {}] ⚠️ 已写入 {}: {}",
            ctx.draft_index,
            self.journal.path(),
            reason
        );
        Ok(())
    }
}

/// 相对路径以草稿文件所在目录为基准
fn resolve_upload_path(draft: &Draft, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }

    draft
        .file_path
        .as_deref()
        .and_then(|p| Path::new(p).parent())
        .map(|dir| dir.join(candidate))
        .unwrap_or_else(|| candidate.to_path_buf())
}
