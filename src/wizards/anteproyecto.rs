//! 预项目（anteproyecto）提交

use crate::models::ProcedureKind;
use crate::wizard::{Condition, StepDef, StepRules, WizardDefinition};
use crate::wizards::messages;

crate::form_fields! {
    pub enum Field {
        SelectedClient => "selectedClient",
        NombreProyecto => "nombre_proyecto",
        TipoProyecto => "tipo_proyecto",
        AreaTerreno => "area_terreno",
        AreaTechada => "area_techada",
        NumeroPisos => "numero_pisos",
        DireccionPredio => "direccion_predio",
        EsCondominio => "es_condominio",
        AutorizacionCondominio => "autorizacion_condominio",
        PartidaRegistral => "partida_registral",
        Fue => "fue",
        PlanosArquitectura => "planos_arquitectura",
        OtrosDocumentos => "otros_documentos",
        DeclaracionJurada => "declaracion_jurada",
    }
}

pub struct AnteproyectoWizard;

impl WizardDefinition for AnteproyectoWizard {
    type Field = Field;
    const KIND: ProcedureKind = ProcedureKind::Anteproyecto;

    fn steps() -> Vec<StepDef<Field>> {
        vec![
            StepDef::new("administrado", "Administrado").field(Field::SelectedClient, "Administrado"),
            StepDef::new("proyecto", "Datos del proyecto")
                .field(Field::NombreProyecto, "Nombre del proyecto")
                .field(Field::TipoProyecto, "Tipo de proyecto")
                .field(Field::AreaTerreno, "Área del terreno (m²)")
                .field(Field::AreaTechada, "Área techada (m²)")
                .field(Field::NumeroPisos, "Número de pisos"),
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
                .field(Field::PlanosArquitectura, "Planos de arquitectura")
                .field(Field::OtrosDocumentos, "Otros documentos"),
            StepDef::new("confirmacion", "Confirmación").field(Field::DeclaracionJurada, "Declaración jurada"),
        ]
    }

    fn step_rules(step: usize) -> StepRules<Field> {
        match step {
            0 => StepRules::new().required(Field::SelectedClient, messages::CLIENT_REQUIRED),
            1 => StepRules::new()
                .required(Field::NombreProyecto, "El nombre del proyecto es requerido")
                .required(Field::TipoProyecto, "Seleccione el tipo de proyecto")
                .required(Field::AreaTerreno, "El área del terreno es requerida")
                .positive(Field::AreaTerreno, messages::AREA_POSITIVE)
                .positive(Field::AreaTechada, messages::AREA_POSITIVE),
            2 => StepRules::new()
                .required(Field::DireccionPredio, "La dirección del predio es requerida")
                .when(
                    Condition::IsTrue(Field::EsCondominio),
                    StepRules::new().required(Field::AutorizacionCondominio, messages::CONDOMINIO_REQUIRED),
                ),
            3 => StepRules::new()
                .required(Field::PartidaRegistral, messages::PARTIDA_REQUIRED)
                .required(Field::Fue, messages::FUE_REQUIRED)
                .required(Field::PlanosArquitectura, "Los planos de arquitectura son requeridos"),
            4 => StepRules::new().required(Field::DeclaracionJurada, messages::DECLARACION_REQUIRED),
            _ => StepRules::new(),
        }
    }
}
