//! # Trámites Wizard
//!
//! 市政审批手续的多步骤向导：按步骤收集表单、校验、上传文档并提交到后端
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有唯一的 HTTP 客户端，只暴露"发请求"的能力
//! - `clients/` - `ApiClient`，行政相对人 / 预项目 / 手续 / 文档接口
//!
//! ### ② 状态机（Wizard）
//! - `wizard/` - 通用向导控制器：字段、校验规则、导航、上传、保存
//! - `wizards/` - 七种具体手续的字段、步骤与规则，`AnyWizard` 统一分派
//!
//! ### ③ 业务能力层（Services）
//! - `DocumentUploader` - 本地模拟 / 远程上传
//! - `WizardPersistence` - 按手续类型保存
//! - `FailureJournal` - 记录保存失败
//!
//! ### ④ 流程层与编排层
//! - `workflow/` - 一份草稿的完整处理流程
//! - `orchestrator/` - 批量草稿处理，控制并发
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod wizard;
pub mod wizards;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Draft, ProcedureKind};
pub use orchestrator::{App, ProcessingStats};
pub use wizard::{WizardController, WizardDefinition, WizardSettings};
pub use wizards::AnyWizard;
pub use workflow::{DraftFlow, DraftOutcome};
