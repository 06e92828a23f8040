//! 批量草稿处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量草稿的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、创建 API 客户端与协作者
//! 2. **批量加载**：扫描并加载所有草稿（`Vec<Draft>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：每批完成后再开始下一批
//! 5. **全局统计**：汇总所有草稿的处理结果
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 `ApiClient` 的模块
//! - **向下委托**：委托 draft_processor 处理单份草稿

use crate::clients::ApiClient;
use crate::config::{Config, UploadMode};
use crate::models::Draft;
use crate::orchestrator::draft_processor;
use crate::services::{ApiPersistence, DocumentUploader, LocalUploader, RemoteUploader, WizardPersistence};
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_drafts_loaded, log_startup,
    print_final_stats,
};
use crate::wizard::HeaderStore;
use crate::workflow::{DraftFlow, DraftOutcome};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<DraftFlow>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let client = Arc::new(ApiClient::new(&config).context("创建 API 客户端失败")?);

        let uploader: Arc<dyn DocumentUploader> = match config.upload_mode {
            UploadMode::Local => Arc::new(LocalUploader::new()),
            UploadMode::Remote => Arc::new(RemoteUploader::new(client.clone())),
        };
        let persistence: Arc<dyn WizardPersistence> = Arc::new(ApiPersistence::new(client));

        Self::with_collaborators(config, uploader, persistence)
    }

    /// 使用指定的协作者初始化
    pub fn with_collaborators(
        config: Config,
        uploader: Arc<dyn DocumentUploader>,
        persistence: Arc<dyn WizardPersistence>,
    ) -> Result<Self> {
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;

        log_startup(
            config.max_concurrent_drafts,
            &config.api_base_url,
            config.upload_mode.as_str(),
        );

        let flow = DraftFlow::new(&config, uploader, persistence, HeaderStore::new());

        Ok(Self {
            config,
            flow: Arc::new(flow),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let all_drafts = self.load_drafts().await?;

        if all_drafts.is_empty() {
            warn!("⚠️ 没有找到待处理的草稿，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_drafts_loaded(all_drafts.len(), self.batch_size());

        let stats = self.process_all_drafts(all_drafts).await?;

        print_final_stats(
            stats.submitted,
            stats.incomplete,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    async fn load_drafts(&self) -> Result<Vec<Draft>> {
        info!("\n📁 正在扫描草稿目录: {}", self.config.drafts_folder);
        let drafts = crate::models::load_all_drafts(&self.config.drafts_folder).await?;
        Ok(drafts)
    }

    fn batch_size(&self) -> usize {
        self.config.max_concurrent_drafts.max(1)
    }

    async fn process_all_drafts(&self, all_drafts: Vec<Draft>) -> Result<ProcessingStats> {
        let batch_size = self.batch_size();
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total = all_drafts.len();
        let total_batches = total.div_ceil(batch_size);
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        for (batch_idx, batch) in all_drafts.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            log_batch_start(
                batch_idx + 1,
                total_batches,
                batch_start + 1,
                batch_start + batch.len(),
                total,
            );

            let batch_stats = self
                .process_batch(batch, batch_start, semaphore.clone())
                .await?;

            log_batch_complete(batch_idx + 1, batch_stats.submitted, batch.len());
            stats.merge(&batch_stats);
        }

        Ok(stats)
    }

    async fn process_batch(
        &self,
        batch: &[Draft],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<ProcessingStats> {
        let mut handles = Vec::new();

        for (idx, draft) in batch.iter().enumerate() {
            let draft_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let flow = self.flow.clone();
            let draft = draft.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                draft_processor::process_draft(&flow, draft, draft_index).await
            });
            handles.push((draft_index, handle));
        }

        let mut stats = ProcessingStats {
            total: batch.len(),
            ..Default::default()
        };

        for (draft_index, handle) in handles {
            match handle.await {
                Ok(Ok(outcome)) => stats.record(&outcome),
                Ok(Err(e)) => {
                    error!("[草稿 {}] ❌ 处理过程中发生错误: {:#}", draft_index, e);
                    stats.failed += 1;
                }
                Err(e) => {
                    error!("[草稿 {}] 任务执行失败: {}", draft_index, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub submitted: usize,
    pub incomplete: usize,
    pub failed: usize,
    pub total: usize,
}

impl ProcessingStats {
    fn record(&mut self, outcome: &DraftOutcome) {
        match outcome {
            DraftOutcome::Submitted { .. } => self.submitted += 1,
            DraftOutcome::Incomplete { .. } => self.incomplete += 1,
            DraftOutcome::SaveFailed { .. } => self.failed += 1,
        }
    }

    fn merge(&mut self, other: &ProcessingStats) {
        self.submitted += other.submitted;
        self.incomplete += other.incomplete;
        self.failed += other.failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_record_and_merge() {
        let mut batch = ProcessingStats::default();
        batch.record(&DraftOutcome::SaveFailed {
            message: "timeout".to_string(),
        });
        batch.record(&DraftOutcome::Submitted {
            record_id: "1".to_string(),
            redirect_to: "/demoliciones",
        });

        let mut total = ProcessingStats {
            total: 5,
            ..Default::default()
        };
        total.merge(&batch);
        total.merge(&batch);
        assert_eq!(total.submitted, 2);
        assert_eq!(total.failed, 2);
        assert_eq!(total.incomplete, 0);
        assert_eq!(total.total, 5);
    }
}
