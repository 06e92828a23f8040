//! 扩建 / 改建

use crate::models::ProcedureKind;
use crate::wizard::{Condition, StepDef, StepRules, WizardDefinition};
use crate::wizards::messages;

crate::form_fields! {
    pub enum Field {
        SelectedClient => "selectedClient",
        TipoObra => "tipo_obra",
        NumeroLicenciaAnterior => "numero_licencia_anterior",
        AreaExistente => "area_existente",
        AreaAmpliacion => "area_ampliacion",
        DescripcionRemodelacion => "descripcion_remodelacion",
        DireccionPredio => "direccion_predio",
        EsCondominio => "es_condominio",
        AutorizacionCondominio => "autorizacion_condominio",
        PartidaRegistral => "partida_registral",
        Fue => "fue",
        LicenciaAnterior => "licencia_anterior",
        PlanosArquitectura => "planos_arquitectura",
        DeclaracionJurada => "declaracion_jurada",
    }
}

const CON_AMPLIACION: &[&str] = &["ampliacion", "ambas"];
const CON_REMODELACION: &[&str] = &["remodelacion", "ambas"];

pub struct AmpliacionWizard;

impl WizardDefinition for AmpliacionWizard {
    type Field = Field;
    const KIND: ProcedureKind = ProcedureKind::AmpliacionRemodelacion;

    fn steps() -> Vec<StepDef<Field>> {
        vec![
            StepDef::new("administrado", "Administrado").field(Field::SelectedClient, "Administrado"),
            StepDef::new("obra", "Obra")
                .field(Field::TipoObra, "Tipo de obra")
                .field(Field::NumeroLicenciaAnterior, "Licencia de la edificación existente")
                .field(Field::AreaExistente, "Área existente (m²)")
                .field_when(
                    Field::AreaAmpliacion,
                    "Área a ampliar (m²)",
                    Condition::OneOf(Field::TipoObra, CON_AMPLIACION),
                )
                .field_when(
                    Field::DescripcionRemodelacion,
                    "Descripción de la remodelación",
                    Condition::OneOf(Field::TipoObra, CON_REMODELACION),
                ),
            StepDef::new("predio", "Predio")
                .field(Field::DireccionPredio, "Dirección del predio")
                .field(Field::EsCondominio, "¿Es condominio?")
                .field_when(
                    Field::AutorizacionCondominio,
                    "Autorización de la junta de propietarios",
                    Condition::IsTrue(Field::EsCondominio),
                ),
            StepDef::new("documentacion", "Documentación")
                .field(Field::PartidaRegistral, "Partida registral")
                .field(Field::Fue, "FUE")
                .field(Field::LicenciaAnterior, "Licencia anterior")
                .field(Field::PlanosArquitectura, "Planos de arquitectura"),
            StepDef::new("confirmacion", "Confirmación").field(Field::DeclaracionJurada, "Declaración jurada"),
        ]
    }

    fn step_rules(step: usize) -> StepRules<Field> {
        match step {
            0 => StepRules::new().required(Field::SelectedClient, messages::CLIENT_REQUIRED),
            1 => StepRules::new()
                .required(Field::TipoObra, "Seleccione el tipo de obra")
                .required(Field::AreaExistente, "El área existente es requerida")
                .positive(Field::AreaExistente, messages::AREA_POSITIVE)
                .when(
                    Condition::OneOf(Field::TipoObra, CON_AMPLIACION),
                    StepRules::new()
                        .required(Field::AreaAmpliacion, "El área a ampliar es requerida")
                        .positive(Field::AreaAmpliacion, messages::AREA_POSITIVE),
                )
                .when(
                    Condition::OneOf(Field::TipoObra, CON_REMODELACION),
                    StepRules::new().required(
                        Field::DescripcionRemodelacion,
                        "Describa la remodelación",
                    ),
                ),
            2 => StepRules::new()
                .required(Field::DireccionPredio, "La dirección del predio es requerida")
                .when(
                    Condition::IsTrue(Field::EsCondominio),
                    StepRules::new().required(Field::AutorizacionCondominio, messages::CONDOMINIO_REQUIRED),
                ),
            3 => StepRules::new()
                .required(Field::PartidaRegistral, messages::PARTIDA_REQUIRED)
                .required(Field::Fue, messages::FUE_REQUIRED)
                .required(Field::LicenciaAnterior, "La licencia anterior es requerida"),
            4 => StepRules::new().required(Field::DeclaracionJurada, messages::DECLARACION_REQUIRED),
            _ => StepRules::new(),
        }
    }
}
