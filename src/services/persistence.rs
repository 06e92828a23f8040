//! 保存服务 - 业务能力层
//!
//! 把向导累计的表单数据交给后端，按手续类型选择接口

use crate::clients::ApiClient;
use crate::error::AppResult;
use crate::models::{CreateClientRequest, ProcedureKind};
use futures::future::BoxFuture;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

/// 保存请求
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub kind: ProcedureKind,
    /// 有值时为更新，否则为创建
    pub record_id: Option<String>,
    pub payload: JsonValue,
}

/// 保存结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecord {
    pub id: String,
}

/// 持久化协作者
pub trait WizardPersistence: Send + Sync {
    fn save(&self, request: SaveRequest) -> BoxFuture<'_, AppResult<SavedRecord>>;
}

/// 通过 REST 接口保存
pub struct ApiPersistence {
    client: Arc<ApiClient>,
}

impl ApiPersistence {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn save_inner(&self, request: SaveRequest) -> AppResult<SavedRecord> {
        debug!("保存 {} 载荷: {}", request.kind.slug(), request.payload);

        let id = match (request.kind, request.record_id) {
            (ProcedureKind::Administrado, None) => {
                let body: CreateClientRequest = serde_json::from_value(request.payload)?;
                self.client.create_client(&body).await?.id
            }
            (ProcedureKind::Administrado, Some(id)) => {
                let body: CreateClientRequest = serde_json::from_value(request.payload)?;
                self.client.update_client(&id, &body).await?.id
            }
            (ProcedureKind::Anteproyecto, None) => {
                self.client.create_anteproyecto(&request.payload).await?.id
            }
            (ProcedureKind::Anteproyecto, Some(id)) => {
                self.client.update_anteproyecto(&id, &request.payload).await?.id
            }
            (kind, None) => self.client.create_tramite(kind, &request.payload).await?.id,
            (kind, Some(id)) => {
                self.client
                    .update_tramite(kind, &id, &request.payload)
                    .await?
                    .id
            }
        };

        Ok(SavedRecord { id })
    }
}

impl WizardPersistence for ApiPersistence {
    fn save(&self, request: SaveRequest) -> BoxFuture<'_, AppResult<SavedRecord>> {
        Box::pin(self.save_inner(request))
    }
}
