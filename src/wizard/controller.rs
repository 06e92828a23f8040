//! 向导控制器 - 流程层
//!
//! 持有表单数据、步骤列表、当前步骤、校验错误与已上传文档，
//! 对外暴露字段修改、上传、校验、前进、后退、跳转与保存操作。
//!
//! 导航约束：可以跳到任意 `<= current_step` 的步骤，
//! 或已完成的步骤，或恰好是下一步；其余点击无效。

use crate::config::{Config, SaveFailurePolicy};
use crate::error::{AppResult, WizardError};
use crate::models::{Draft, FieldValue, FileHandle, UploadedDocument};
use crate::services::{DocumentUploader, SaveRequest, WizardPersistence};
use crate::wizard::banner::ValidationBanner;
use crate::wizard::definition::WizardDefinition;
use crate::wizard::errors::ValidationErrors;
use crate::wizard::field::{FormData, FormField};
use crate::wizard::save::SaveState;
use crate::wizard::step::{Step, StepDef};
use std::marker::PhantomData;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// 控制器行为设置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardSettings {
    pub banner_timeout: Duration,
    pub failure_policy: SaveFailurePolicy,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            banner_timeout: Duration::from_secs(5),
            failure_policy: SaveFailurePolicy::Report,
        }
    }
}

impl WizardSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            banner_timeout: config.banner_timeout(),
            failure_policy: config.save_failure_policy,
        }
    }
}

/// 向导控制器
pub struct WizardController<W: WizardDefinition> {
    form: FormData<W::Field>,
    defs: Vec<StepDef<W::Field>>,
    steps: Vec<Step>,
    current_step: usize,
    errors: ValidationErrors,
    uploaded_documents: Vec<UploadedDocument>,
    banner: ValidationBanner,
    save_state: SaveState,
    record_id: Option<String>,
    settings: WizardSettings,
    _wizard: PhantomData<W>,
}

impl<W: WizardDefinition> WizardController<W> {
    /// 新建流程
    pub fn new(settings: WizardSettings) -> Self {
        let defs = W::steps();
        let steps = defs.iter().map(Step::from_def).collect();
        Self {
            form: W::initial_form(),
            defs,
            steps,
            current_step: 0,
            errors: ValidationErrors::new(),
            uploaded_documents: Vec::new(),
            banner: ValidationBanner::new(settings.banner_timeout),
            save_state: SaveState::Idle,
            record_id: None,
            settings,
            _wizard: PhantomData,
        }
    }

    /// 编辑已有记录
    pub fn edit(settings: WizardSettings, record_id: impl Into<String>, form: FormData<W::Field>) -> Self {
        let mut controller = Self::new(settings);
        controller.uploaded_documents = collect_documents(&form);
        controller.form = form;
        controller.record_id = Some(record_id.into());
        controller
    }

    /// 从草稿恢复：当前步骤为第一个未完成的步骤
    pub fn resume(settings: WizardSettings, draft: &Draft) -> AppResult<Self> {
        if draft.kind != W::KIND {
            return Err(WizardError::KindMismatch {
                expected: W::KIND.slug().to_string(),
                found: draft.kind.slug().to_string(),
            }
            .into());
        }

        let form = FormData::from_raw(W::KIND.slug(), &draft.form)?;
        let mut controller = Self::new(settings);
        controller.uploaded_documents = collect_documents(&form);
        controller.form = form;
        controller.record_id = draft.record_id.clone();

        for step in controller.steps.iter_mut() {
            step.completed = draft.completed_steps.iter().any(|id| *id == step.id);
        }
        for id in &draft.completed_steps {
            if !controller.steps.iter().any(|s| s.id == *id) {
                warn!("⚠️ [{}] 草稿中的步骤不存在: {}", W::KIND.slug(), id);
            }
        }

        controller.current_step = controller
            .steps
            .iter()
            .position(|s| !s.completed)
            .unwrap_or_else(|| controller.last_index());

        debug!(
            "[{}] 恢复草稿，当前步骤 {}/{}",
            W::KIND.slug(),
            controller.current_step + 1,
            controller.steps.len()
        );

        Ok(controller)
    }

    // ========== 字段 ==========

    /// 修改字段：清除该字段的错误并隐藏提示条
    pub fn on_input_change(&mut self, field: W::Field, value: impl Into<FieldValue>) {
        self.form.set(field, value);
        self.errors.clear_field(field.key());
        self.banner.hide();
    }

    // ========== 校验与导航 ==========

    /// 校验指定步骤，整体替换错误表
    pub fn validate_step(&mut self, step_index: usize) -> bool {
        self.errors = W::step_rules(step_index).check(&self.form);
        if !self.errors.is_empty() {
            debug!(
                "[{}] 步骤 {} 校验失败: {}",
                W::KIND.slug(),
                step_index + 1,
                self.errors.summary()
            );
        }
        self.errors.is_empty()
    }

    /// 前进一步；校验失败时显示提示条并停留
    pub fn handle_next(&mut self) -> bool {
        self.handle_next_at(Instant::now())
    }

    /// 同 `handle_next`，显式传入当前时间
    pub fn handle_next_at(&mut self, now: Instant) -> bool {
        if !self.validate_step(self.current_step) {
            self.banner.show(now);
            return false;
        }

        self.steps[self.current_step].completed = true;
        self.current_step = (self.current_step + 1).min(self.last_index());
        true
    }

    /// 后退一步，不做校验
    pub fn handle_previous(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// 是否允许跳到目标步骤
    pub fn can_navigate_to(&self, target: usize) -> bool {
        if target >= self.steps.len() {
            return false;
        }
        target <= self.current_step || self.steps[target].completed || target == self.current_step + 1
    }

    /// 点击步骤指示器；不允许时不做任何事
    pub fn handle_step_click(&mut self, target: usize) -> bool {
        if !self.can_navigate_to(target) {
            return false;
        }
        self.current_step = target;
        true
    }

    // ========== 文档 ==========

    /// 上传文件并记录到已上传列表，返回文档记录供调用方合并
    pub async fn handle_file_upload(
        &mut self,
        uploader: &dyn DocumentUploader,
        file: FileHandle,
        document_key: W::Field,
    ) -> AppResult<UploadedDocument> {
        let name = file.name.clone();
        match uploader.upload(file, document_key.key()).await {
            Ok(document) => {
                debug!("[{}] ✓ 已上传 {} -> {}", W::KIND.slug(), name, document_key.key());
                self.uploaded_documents.push(document.clone());
                Ok(document)
            }
            Err(e) => {
                error!("[{}] ❌ 上传 {} 失败: {}", W::KIND.slug(), name, e);
                Err(e)
            }
        }
    }

    /// 上传文件并追加到对应文件字段
    pub async fn upload_into_field(
        &mut self,
        uploader: &dyn DocumentUploader,
        file: FileHandle,
        field: W::Field,
    ) -> AppResult<UploadedDocument> {
        let document = self.handle_file_upload(uploader, file, field).await?;
        let mut files = self.form.files(field).to_vec();
        files.push(document.clone());
        self.on_input_change(field, files);
        Ok(document)
    }

    /// 按 ID 移除文档（同时从表单字段中移除）
    pub fn remove_document(&mut self, document_id: &str) -> Option<UploadedDocument> {
        let position = self
            .uploaded_documents
            .iter()
            .position(|d| d.id == document_id)?;
        let removed = self.uploaded_documents.remove(position);
        self.form.remove_file(document_id);
        Some(removed)
    }

    // ========== 保存 ==========

    /// 提交表单数据
    ///
    /// 成功后记录 ID 并给出跳转目标；失败时停留在当前步骤，
    /// 按配置保留可重试的失败状态或仅记录日志。
    pub async fn handle_save(&mut self, persistence: &dyn WizardPersistence) -> SaveState {
        let request = SaveRequest {
            kind: W::KIND,
            record_id: self.record_id.clone(),
            payload: W::payload(&self.form),
        };

        self.save_state = SaveState::Saving;

        match persistence.save(request).await {
            Ok(saved) => {
                info!("[{}] ✓ 保存成功: {}", W::KIND.slug(), saved.id);
                self.record_id = Some(saved.id.clone());
                self.save_state = SaveState::Saved {
                    record_id: saved.id,
                    redirect_to: W::KIND.list_route(),
                };
            }
            Err(e) => {
                error!("[{}] ❌ 保存失败: {}", W::KIND.slug(), e);
                self.save_state = match self.settings.failure_policy {
                    SaveFailurePolicy::Report => SaveState::Failed {
                        message: e.to_string(),
                        retryable: e.is_retryable(),
                    },
                    SaveFailurePolicy::LogOnly => SaveState::Idle,
                };
            }
        }

        self.save_state.clone()
    }

    // ========== 状态读取 ==========

    pub fn form(&self) -> &FormData<W::Field> {
        &self.form
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_defs(&self) -> &[StepDef<W::Field>] {
        &self.defs
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn current_step_def(&self) -> &StepDef<W::Field> {
        &self.defs[self.current_step]
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.last_index()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn uploaded_documents(&self) -> &[UploadedDocument] {
        &self.uploaded_documents
    }

    pub fn banner(&self) -> &ValidationBanner {
        &self.banner
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save_state
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// 已完成步骤所占百分比
    pub fn completion_percentage(&self) -> u8 {
        if self.steps.is_empty() {
            return 0;
        }
        let completed = self.steps.iter().filter(|s| s.completed).count();
        ((completed * 100 + self.steps.len() / 2) / self.steps.len()) as u8
    }

    /// 写回草稿
    pub fn to_draft(&self) -> Draft {
        let mut draft = Draft::new(W::KIND);
        draft.record_id = self.record_id.clone();
        draft.completed_steps = self
            .steps
            .iter()
            .filter(|s| s.completed)
            .map(|s| s.id.clone())
            .collect();
        draft.form = self.form.to_raw();
        draft
    }

    fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

fn collect_documents<F: FormField>(form: &FormData<F>) -> Vec<UploadedDocument> {
    form.iter()
        .flat_map(|(_, value)| value.as_files().iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, AppError};
    use crate::models::ProcedureKind;
    use crate::services::{LocalUploader, SavedRecord};
    use crate::wizard::rules::StepRules;
    use futures::future::BoxFuture;
    use std::sync::Mutex;

    crate::form_fields! {
        enum Field {
            Nombre => "nombre",
            Area => "area",
            Plano => "plano",
        }
    }

    struct ThreeSteps;

    impl WizardDefinition for ThreeSteps {
        type Field = Field;
        const KIND: ProcedureKind = ProcedureKind::Demolicion;

        fn steps() -> Vec<StepDef<Field>> {
            vec![
                StepDef::new("datos", "Datos").field(Field::Nombre, "Nombre"),
                StepDef::new("area", "Área").field(Field::Area, "Área"),
                StepDef::new("planos", "Planos").field(Field::Plano, "Plano"),
            ]
        }

        fn step_rules(step: usize) -> StepRules<Field> {
            match step {
                0 => StepRules::new().required(Field::Nombre, "El nombre es requerido"),
                1 => StepRules::new().required(Field::Area, "El área es requerida"),
                2 => StepRules::new().required(Field::Plano, "El plano es requerido"),
                _ => StepRules::new(),
            }
        }
    }

    fn controller() -> WizardController<ThreeSteps> {
        WizardController::new(WizardSettings::default())
    }

    struct RecordingPersistence {
        result: Mutex<Option<AppResult<SavedRecord>>>,
        requests: Mutex<Vec<SaveRequest>>,
    }

    impl RecordingPersistence {
        fn returning(result: AppResult<SavedRecord>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl WizardPersistence for RecordingPersistence {
        fn save(&self, request: SaveRequest) -> BoxFuture<'_, AppResult<SavedRecord>> {
            self.requests.lock().unwrap().push(request);
            let result = self.result.lock().unwrap().take().unwrap();
            Box::pin(async move { result })
        }
    }

    fn server_error() -> AppError {
        AppError::Api(ApiError::BadResponse {
            endpoint: "tramites/demolicion".to_string(),
            status: 500,
            message: None,
        })
    }

    #[test]
    fn test_next_blocked_until_required_filled() {
        let mut c = controller();
        assert!(!c.handle_next());
        assert_eq!(c.current_step(), 0);
        assert!(c.errors().contains("nombre"));
        assert!(!c.steps()[0].completed);

        c.on_input_change(Field::Nombre, "Casa Pérez");
        assert!(c.handle_next());
        assert_eq!(c.current_step(), 1);
        assert!(c.steps()[0].completed);
    }

    #[test]
    fn test_failed_next_shows_banner_and_edit_hides_it() {
        let mut c = controller();
        let t0 = Instant::now();
        c.handle_next_at(t0);
        assert!(c.banner().is_visible_at(t0 + Duration::from_secs(1)));
        assert!(!c.banner().is_visible_at(t0 + Duration::from_secs(5)));

        c.on_input_change(Field::Nombre, "x");
        assert!(!c.banner().is_visible_at(t0));
    }

    #[test]
    fn test_input_change_clears_only_that_field() {
        crate::form_fields! {
            enum Two {
                A => "a",
                B => "b",
            }
        }
        struct TwoFields;
        impl WizardDefinition for TwoFields {
            type Field = Two;
            const KIND: ProcedureKind = ProcedureKind::Demolicion;
            fn steps() -> Vec<StepDef<Two>> {
                vec![StepDef::new("uno", "Uno")]
            }
            fn step_rules(_: usize) -> StepRules<Two> {
                StepRules::new().required(Two::A, "A").required(Two::B, "B")
            }
        }

        let mut c = WizardController::<TwoFields>::new(WizardSettings::default());
        assert!(!c.validate_step(0));
        assert_eq!(c.errors().len(), 2);

        c.on_input_change(Two::A, "valor");
        assert!(!c.errors().contains("a"));
        assert_eq!(c.errors().get("b"), Some("B"));
    }

    #[test]
    fn test_validation_replaces_error_map() {
        let mut c = controller();
        c.validate_step(0);
        assert!(c.errors().contains("nombre"));

        c.validate_step(1);
        assert!(!c.errors().contains("nombre"));
        assert!(c.errors().contains("area"));
    }

    #[test]
    fn test_previous_clamps_at_zero() {
        let mut c = controller();
        c.handle_previous();
        assert_eq!(c.current_step(), 0);

        c.on_input_change(Field::Nombre, "x");
        c.handle_next();
        c.handle_previous();
        assert_eq!(c.current_step(), 0);
        assert!(c.steps()[0].completed);
    }

    #[test]
    fn test_next_on_last_step_stays_and_marks_completed() {
        let mut c = controller();
        c.on_input_change(Field::Nombre, "x");
        c.on_input_change(Field::Area, 50.0);
        c.on_input_change(Field::Plano, "plano.pdf");
        assert!(c.handle_next());
        assert!(c.handle_next());
        assert!(c.handle_next());
        assert_eq!(c.current_step(), 2);
        assert!(c.steps().iter().all(|s| s.completed));
        assert_eq!(c.completion_percentage(), 100);
    }

    #[test]
    fn test_step_click_guard() {
        let mut c = controller();
        assert!(!c.handle_step_click(2));
        assert_eq!(c.current_step(), 0);

        assert!(c.handle_step_click(1));
        assert_eq!(c.current_step(), 1);

        assert!(c.handle_step_click(0));
        assert!(!c.handle_step_click(7));
    }

    #[test]
    fn test_completed_step_reachable_from_behind() {
        let mut c = controller();
        c.on_input_change(Field::Nombre, "x");
        c.on_input_change(Field::Area, 10.0);
        c.handle_next();
        c.handle_next();
        assert_eq!(c.current_step(), 2);

        assert!(c.handle_step_click(0));
        assert!(c.can_navigate_to(1));
        assert!(!c.can_navigate_to(2));
        assert!(c.handle_step_click(1));
        assert!(c.can_navigate_to(2));
    }

    #[test]
    fn test_backward_edit_keeps_later_completion() {
        let mut c = controller();
        c.on_input_change(Field::Nombre, "x");
        c.handle_next();
        c.handle_previous();
        c.on_input_change(Field::Nombre, "");
        assert!(c.steps()[0].completed);
    }

    #[test]
    fn test_completion_percentage_rounds() {
        let mut c = controller();
        assert_eq!(c.completion_percentage(), 0);
        c.on_input_change(Field::Nombre, "x");
        c.handle_next();
        assert_eq!(c.completion_percentage(), 33);
        c.on_input_change(Field::Area, 1.0);
        c.handle_next();
        assert_eq!(c.completion_percentage(), 67);
    }

    #[test]
    fn test_resume_from_draft() {
        let mut draft = Draft::new(ProcedureKind::Demolicion);
        draft.completed_steps = vec!["datos".to_string(), "area".to_string()];
        draft.form.insert("nombre".to_string(), FieldValue::from("x"));

        let c = WizardController::<ThreeSteps>::resume(WizardSettings::default(), &draft).unwrap();
        assert_eq!(c.current_step(), 2);
        assert_eq!(c.form().text(Field::Nombre), "x");
        assert_eq!(c.to_draft().completed_steps, draft.completed_steps);
    }

    #[test]
    fn test_resume_rejects_other_kind() {
        let draft = Draft::new(ProcedureKind::Anteproyecto);
        let err = WizardController::<ThreeSteps>::resume(WizardSettings::default(), &draft)
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Wizard(WizardError::KindMismatch { .. })));
    }

    #[tokio::test]
    async fn test_uploads_accumulate() {
        let uploader = LocalUploader::new();
        let mut c = controller();
        let names = ["a.pdf", "b.pdf", "c.dwg"];

        for name in names {
            let doc = c
                .handle_file_upload(&uploader, FileHandle::from_bytes(name, vec![7; 4]), Field::Plano)
                .await
                .unwrap();
            assert_eq!(doc.name, name);
        }

        assert_eq!(c.uploaded_documents().len(), 3);
        for (doc, name) in c.uploaded_documents().iter().zip(names) {
            assert_eq!(doc.name, name);
        }
    }

    #[tokio::test]
    async fn test_upload_into_field_and_remove() {
        let uploader = LocalUploader::new();
        let mut c = controller();
        c.validate_step(2);
        assert!(c.errors().contains("plano"));

        let doc = c
            .upload_into_field(&uploader, FileHandle::from_bytes("p.pdf", vec![1]), Field::Plano)
            .await
            .unwrap();
        assert!(!c.errors().contains("plano"));
        assert_eq!(c.form().files(Field::Plano).len(), 1);

        let removed = c.remove_document(&doc.id).unwrap();
        assert_eq!(removed.id, doc.id);
        assert!(c.form().files(Field::Plano).is_empty());
        assert!(c.remove_document(&doc.id).is_none());
    }

    #[tokio::test]
    async fn test_save_success_sets_redirect() {
        let persistence = RecordingPersistence::returning(Ok(SavedRecord { id: "d-1".to_string() }));
        let mut c = controller();
        c.on_input_change(Field::Nombre, "x");

        let state = c.handle_save(&persistence).await;
        assert_eq!(
            state,
            SaveState::Saved {
                record_id: "d-1".to_string(),
                redirect_to: "/demoliciones",
            }
        );
        assert_eq!(c.record_id(), Some("d-1"));

        let requests = persistence.requests.lock().unwrap();
        assert_eq!(requests[0].payload["nombre"], "x");
        assert_eq!(requests[0].record_id, None);
    }

    #[tokio::test]
    async fn test_edit_saves_against_existing_record() {
        let persistence = RecordingPersistence::returning(Ok(SavedRecord { id: "d-9".to_string() }));
        let form = FormData::new().with(Field::Nombre, "Casa antigua");
        let mut c = WizardController::<ThreeSteps>::edit(WizardSettings::default(), "d-9", form);
        assert_eq!(c.record_id(), Some("d-9"));

        assert!(c.handle_save(&persistence).await.is_saved());
        let requests = persistence.requests.lock().unwrap();
        assert_eq!(requests[0].record_id.as_deref(), Some("d-9"));
    }

    #[tokio::test]
    async fn test_save_failure_reports_retry_state() {
        let persistence = RecordingPersistence::returning(Err(server_error()));
        let mut c = controller();
        c.on_input_change(Field::Nombre, "x");
        c.handle_next();

        let state = c.handle_save(&persistence).await;
        assert!(matches!(state, SaveState::Failed { retryable: true, .. }));
        assert_eq!(c.current_step(), 1);
    }

    #[tokio::test]
    async fn test_save_failure_log_only_stays_idle() {
        let persistence = RecordingPersistence::returning(Err(server_error()));
        let mut c = WizardController::<ThreeSteps>::new(WizardSettings {
            failure_policy: SaveFailurePolicy::LogOnly,
            ..WizardSettings::default()
        });

        let state = c.handle_save(&persistence).await;
        assert_eq!(state, SaveState::Idle);
        assert_eq!(c.current_step(), 0);
    }
}
