use crate::models::ProcedureKind;
use crate::wizard::{Condition, StepDef, StepRules, WizardDefinition};
use crate::wizards::messages;

crate::form_fields! {
    pub enum Field {
        SelectedClient => "selectedClient",
        Modalidad => "modalidad",
        TieneAnteproyecto => "tiene_anteproyecto",
        NumeroAnteproyecto => "numero_anteproyecto",
        AreaTechada => "area_techada",
        NumeroPisos => "numero_pisos",
        DireccionPredio => "direccion_predio",
        EsCondominio => "es_condominio",
        AutorizacionCondominio => "autorizacion_condominio",
        PartidaRegistral => "partida_registral",
        Fue => "fue",
        PlanosArquitectura => "planos_arquitectura",
        PlanosEstructuras => "planos_estructuras",
        PlanosInstalaciones => "planos_instalaciones",
        DeclaracionJurada => "declaracion_jurada",
    }
}

const MODALIDADES_CON_ESTRUCTURAS: &[&str] = &["c", "d", "C", "D"];

pub struct LicenciaEdificacionWizard;

impl WizardDefinition for LicenciaEdificacionWizard {
    type Field = Field;
    const KIND: ProcedureKind = ProcedureKind::LicenciaEdificacion;

    fn steps() -> Vec<StepDef<Field>> {
        vec![
            StepDef::new("administrado", "Administrado").field(Field::SelectedClient, "Administrado"),
            StepDef::new("proyecto", "Proyecto")
                .field(Field::Modalidad, "Modalidad (A/B/C/D)")
                .field(Field::TieneAnteproyecto, "¿Cuenta con anteproyecto aprobado?")
                .field_when(
                    Field::NumeroAnteproyecto,
                    "Número de anteproyecto",
                    Condition::IsTrue(Field::TieneAnteproyecto),
                )
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
                .field_when(
                    Field::PlanosEstructuras,
                    "Planos de estructuras",
                    Condition::OneOf(Field::Modalidad, MODALIDADES_CON_ESTRUCTURAS),
                )
                .field(Field::PlanosInstalaciones, "Planos de instalaciones"),
            StepDef::new("confirmacion", "Confirmación").field(Field::DeclaracionJurada, "Declaración jurada"),
        ]
    }

    fn step_rules(step: usize) -> StepRules<Field> {
        match step {
            0 => StepRules::new().required(Field::SelectedClient, messages::CLIENT_REQUIRED),
            1 => StepRules::new()
                .required(Field::Modalidad, "Seleccione la modalidad")
                .pattern(Field::Modalidad, r"(?i)^[abcd]$", "Modalidad no válida")
                .when(
                    Condition::IsTrue(Field::TieneAnteproyecto),
                    StepRules::new().required(
                        Field::NumeroAnteproyecto,
                        "El número de anteproyecto es requerido",
                    ),
                )
                .required(Field::AreaTechada, "El área techada es requerida")
                .positive(Field::AreaTechada, messages::AREA_POSITIVE)
                .positive(Field::NumeroPisos, "El número de pisos debe ser mayor a 0"),
            2 => StepRules::new()
                .required(Field::DireccionPredio, "La dirección del predio es requerida")
                .when(
                    Condition::IsTrue(Field::EsCondominio),
                    StepRules::new().required(Field::AutorizacionCondominio, messages::CONDOMINIO_REQUIRED),
                ),
            3 => StepRules::new()
                .required(Field::PartidaRegistral, messages::PARTIDA_REQUIRED)
                .required(Field::Fue, messages::FUE_REQUIRED)
                .required(Field::PlanosArquitectura, "Los planos de arquitectura son requeridos")
                .when(
                    Condition::OneOf(Field::Modalidad, MODALIDADES_CON_ESTRUCTURAS),
                    StepRules::new().required(
                        Field::PlanosEstructuras,
                        "Los planos de estructuras son requeridos para esta modalidad",
                    ),
                ),
            4 => StepRules::new().required(Field::DeclaracionJurada, messages::DECLARACION_REQUIRED),
            _ => StepRules::new(),
        }
    }
}
