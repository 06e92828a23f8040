//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量草稿处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载草稿（Vec<Draft>）
//! - 控制并发数量（Semaphore）
//! - 持有 API 客户端与协作者
//! - 输出全局统计信息
//!
//! ### `draft_processor` - 单份草稿处理器
//! - 构建草稿上下文
//! - 委托 DraftFlow 处理
//! - 输出单份草稿的结果
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Draft>)
//!     ↓
//! draft_processor (处理单份 Draft)
//!     ↓
//! workflow::DraftFlow (上传 → 逐步校验 → 保存 → 失败记录)
//!     ↓
//! wizards / wizard (状态机)
//!     ↓
//! services (能力层：upload / persistence / journal)
//!     ↓
//! clients + infrastructure (ApiClient / HttpExecutor)
//! ```

pub mod batch_processor;
pub mod draft_processor;

pub use batch_processor::{App, ProcessingStats};
pub use draft_processor::process_draft;
