//! 具体向导
//!
//! 每个文件提供一个 `WizardDefinition`；`AnyWizard` 按手续类型统一分派。

pub mod administrado;
pub mod ampliacion;
pub mod anteproyecto;
pub mod conformidad_obra;
pub mod demolicion;
pub mod licencia_edificacion;
pub mod licencia_funcionamiento;

pub use administrado::AdministradoWizard;
pub use ampliacion::AmpliacionWizard;
pub use anteproyecto::AnteproyectoWizard;
pub use conformidad_obra::ConformidadObraWizard;
pub use demolicion::DemolicionWizard;
pub use licencia_edificacion::LicenciaEdificacionWizard;
pub use licencia_funcionamiento::LicenciaFuncionamientoWizard;

use crate::error::{AppResult, WizardError};
use crate::models::{Draft, FileHandle, ProcedureKind, UploadedDocument};
use crate::services::{DocumentUploader, WizardPersistence};
use crate::wizard::{
    FormField, SaveState, ShellView, Step, StepContent, ValidationErrors, WizardController,
    WizardSettings, WizardShell,
};

/// 多个向导共用的提示文本
pub mod messages {
    pub const CLIENT_REQUIRED: &str = "Debe seleccionar un administrado";
    pub const PARTIDA_REQUIRED: &str = "La partida registral es requerida";
    pub const FUE_REQUIRED: &str = "El FUE es requerido";
    pub const CONDOMINIO_REQUIRED: &str = "La autorización de la junta de propietarios es requerida";
    pub const DECLARACION_REQUIRED: &str = "Debe aceptar la declaración jurada";
    pub const AREA_POSITIVE: &str = "El área debe ser mayor a 0";
}

/// 任意类型的向导
pub enum AnyWizard {
    Administrado(WizardController<AdministradoWizard>),
    Anteproyecto(WizardController<AnteproyectoWizard>),
    LicenciaEdificacion(WizardController<LicenciaEdificacionWizard>),
    AmpliacionRemodelacion(WizardController<AmpliacionWizard>),
    Demolicion(WizardController<DemolicionWizard>),
    ConformidadObra(WizardController<ConformidadObraWizard>),
    LicenciaFuncionamiento(WizardController<LicenciaFuncionamientoWizard>),
}

macro_rules! dispatch {
    ($wizard:expr, $c:ident => $body:expr) => {
        match $wizard {
            AnyWizard::Administrado($c) => $body,
            AnyWizard::Anteproyecto($c) => $body,
            AnyWizard::LicenciaEdificacion($c) => $body,
            AnyWizard::AmpliacionRemodelacion($c) => $body,
            AnyWizard::Demolicion($c) => $body,
            AnyWizard::ConformidadObra($c) => $body,
            AnyWizard::LicenciaFuncionamiento($c) => $body,
        }
    };
}

/// 按字段名找到具体向导的字段
fn field_of<F: FormField>(kind: ProcedureKind, key: &str) -> AppResult<F> {
    F::from_key(key).ok_or_else(|| {
        WizardError::UnknownField {
            kind: kind.slug().to_string(),
            key: key.to_string(),
        }
        .into()
    })
}

impl AnyWizard {
    /// 新建指定类型的向导
    pub fn new(kind: ProcedureKind, settings: WizardSettings) -> Self {
        match kind {
            ProcedureKind::Administrado => Self::Administrado(WizardController::new(settings)),
            ProcedureKind::Anteproyecto => Self::Anteproyecto(WizardController::new(settings)),
            ProcedureKind::LicenciaEdificacion => Self::LicenciaEdificacion(WizardController::new(settings)),
            ProcedureKind::AmpliacionRemodelacion => {
                Self::AmpliacionRemodelacion(WizardController::new(settings))
            }
            ProcedureKind::Demolicion => Self::Demolicion(WizardController::new(settings)),
            ProcedureKind::ConformidadObra => Self::ConformidadObra(WizardController::new(settings)),
            ProcedureKind::LicenciaFuncionamiento => {
                Self::LicenciaFuncionamiento(WizardController::new(settings))
            }
        }
    }

    /// 从草稿恢复，类型由草稿决定
    pub fn resume(draft: &Draft, settings: WizardSettings) -> AppResult<Self> {
        Ok(match draft.kind {
            ProcedureKind::Administrado => Self::Administrado(WizardController::resume(settings, draft)?),
            ProcedureKind::Anteproyecto => Self::Anteproyecto(WizardController::resume(settings, draft)?),
            ProcedureKind::LicenciaEdificacion => {
                Self::LicenciaEdificacion(WizardController::resume(settings, draft)?)
            }
            ProcedureKind::AmpliacionRemodelacion => {
                Self::AmpliacionRemodelacion(WizardController::resume(settings, draft)?)
            }
            ProcedureKind::Demolicion => Self::Demolicion(WizardController::resume(settings, draft)?),
            ProcedureKind::ConformidadObra => Self::ConformidadObra(WizardController::resume(settings, draft)?),
            ProcedureKind::LicenciaFuncionamiento => {
                Self::LicenciaFuncionamiento(WizardController::resume(settings, draft)?)
            }
        })
    }

    pub fn kind(&self) -> ProcedureKind {
        match self {
            Self::Administrado(_) => ProcedureKind::Administrado,
            Self::Anteproyecto(_) => ProcedureKind::Anteproyecto,
            Self::LicenciaEdificacion(_) => ProcedureKind::LicenciaEdificacion,
            Self::AmpliacionRemodelacion(_) => ProcedureKind::AmpliacionRemodelacion,
            Self::Demolicion(_) => ProcedureKind::Demolicion,
            Self::ConformidadObra(_) => ProcedureKind::ConformidadObra,
            Self::LicenciaFuncionamiento(_) => ProcedureKind::LicenciaFuncionamiento,
        }
    }

    pub fn steps(&self) -> &[Step] {
        dispatch!(self, c => c.steps())
    }

    pub fn current_step(&self) -> usize {
        dispatch!(self, c => c.current_step())
    }

    pub fn is_last_step(&self) -> bool {
        dispatch!(self, c => c.is_last_step())
    }

    pub fn errors(&self) -> &ValidationErrors {
        dispatch!(self, c => c.errors())
    }

    pub fn save_state(&self) -> &SaveState {
        dispatch!(self, c => c.save_state())
    }

    pub fn record_id(&self) -> Option<&str> {
        dispatch!(self, c => c.record_id())
    }

    pub fn uploaded_documents(&self) -> &[UploadedDocument] {
        dispatch!(self, c => c.uploaded_documents())
    }

    pub fn completion_percentage(&self) -> u8 {
        dispatch!(self, c => c.completion_percentage())
    }

    pub fn validate_step(&mut self, step_index: usize) -> bool {
        dispatch!(self, c => c.validate_step(step_index))
    }

    pub fn handle_next(&mut self) -> bool {
        dispatch!(self, c => c.handle_next())
    }

    pub fn handle_previous(&mut self) {
        dispatch!(self, c => c.handle_previous())
    }

    pub fn handle_step_click(&mut self, target: usize) -> bool {
        dispatch!(self, c => c.handle_step_click(target))
    }

    /// 上传文件并追加到名为 `field_key` 的字段
    pub async fn upload_into(
        &mut self,
        uploader: &dyn DocumentUploader,
        file: FileHandle,
        field_key: &str,
    ) -> AppResult<UploadedDocument> {
        let kind = self.kind();
        dispatch!(self, c => {
            let field = field_of(kind, field_key)?;
            c.upload_into_field(uploader, file, field).await
        })
    }

    pub async fn handle_save(&mut self, persistence: &dyn WizardPersistence) -> SaveState {
        dispatch!(self, c => c.handle_save(persistence).await)
    }

    pub fn shell_view(&self) -> ShellView {
        dispatch!(self, c => WizardShell::view(c))
    }

    /// 外壳加当前步骤内容
    pub fn render(&self) -> String {
        dispatch!(self, c => WizardShell::render(c, |c| StepContent::current(c).render()))
    }

    pub fn to_draft(&self) -> Draft {
        dispatch!(self, c => c.to_draft())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;
    use crate::services::LocalUploader;

    #[test]
    fn test_every_kind_has_a_wizard() {
        for kind in ProcedureKind::all() {
            let wizard = AnyWizard::new(*kind, WizardSettings::default());
            assert_eq!(wizard.kind(), *kind);
            assert!(wizard.steps().len() >= 3, "{kind} 至少三步");
            assert_eq!(wizard.current_step(), 0);
        }
    }

    #[test]
    fn test_resume_picks_wizard_by_kind() {
        let mut draft = Draft::new(ProcedureKind::Demolicion);
        draft.form.insert("tipo_demolicion".to_string(), FieldValue::from("total"));
        let wizard = AnyWizard::resume(&draft, WizardSettings::default()).unwrap();
        assert_eq!(wizard.kind(), ProcedureKind::Demolicion);
        assert_eq!(wizard.to_draft().form, draft.form);
    }

    #[test]
    fn test_resume_rejects_foreign_field() {
        let mut draft = Draft::new(ProcedureKind::Demolicion);
        draft.form.insert("giro".to_string(), FieldValue::from("bodega"));
        assert!(AnyWizard::resume(&draft, WizardSettings::default()).is_err());
    }

    #[tokio::test]
    async fn test_upload_into_unknown_field_fails() {
        let uploader = LocalUploader::new();
        let mut wizard = AnyWizard::new(ProcedureKind::Anteproyecto, WizardSettings::default());

        let err = wizard
            .upload_into(&uploader, FileHandle::from_bytes("x.pdf", vec![1]), "no_existe")
            .await;
        assert!(err.is_err());

        wizard
            .upload_into(&uploader, FileHandle::from_bytes("fue.pdf", vec![1]), "fue")
            .await
            .unwrap();
        assert_eq!(wizard.uploaded_documents().len(), 1);
    }
}
