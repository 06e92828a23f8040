use crate::models::ProcedureKind;
use crate::wizard::{Condition, StepDef, StepRules, WizardDefinition};
use crate::wizards::messages;

crate::form_fields! {
    pub enum Field {
        SelectedClient => "selectedClient",
        NumeroLicencia => "numero_licencia",
        FechaFinObra => "fecha_fin_obra",
        ConVariaciones => "con_variaciones",
        PlanosReplanteo => "planos_replanteo",
        Fue => "fue",
        DeclaracionFinObra => "declaracion_fin_obra",
        FotosObra => "fotos_obra",
        DeclaracionJurada => "declaracion_jurada",
    }
}

pub struct ConformidadObraWizard;

impl WizardDefinition for ConformidadObraWizard {
    type Field = Field;
    const KIND: ProcedureKind = ProcedureKind::ConformidadObra;

    fn steps() -> Vec<StepDef<Field>> {
        vec![
            StepDef::new("administrado", "Administrado").field(Field::SelectedClient, "Administrado"),
            StepDef::new("obra", "Obra ejecutada")
                .field(Field::NumeroLicencia, "Número de licencia")
                .field(Field::FechaFinObra, "Fecha de fin de obra")
                .field(Field::ConVariaciones, "¿Hubo variaciones?")
                .field_when(
                    Field::PlanosReplanteo,
                    "Planos de replanteo",
                    Condition::IsTrue(Field::ConVariaciones),
                ),
            StepDef::new("documentacion", "Documentación")
                .field(Field::Fue, "FUE")
                .field(Field::DeclaracionFinObra, "Declaración de fin de obra")
                .field(Field::FotosObra, "Fotografías de la obra"),
            StepDef::new("confirmacion", "Confirmación").field(Field::DeclaracionJurada, "Declaración jurada"),
        ]
    }

    fn step_rules(step: usize) -> StepRules<Field> {
        match step {
            0 => StepRules::new().required(Field::SelectedClient, messages::CLIENT_REQUIRED),
            1 => StepRules::new()
                .required(Field::NumeroLicencia, "El número de licencia es requerido")
                .required(Field::FechaFinObra, "La fecha de fin de obra es requerida")
                .pattern(Field::FechaFinObra, r"^\d{4}-\d{2}-\d{2}$", "Use el formato AAAA-MM-DD")
                .when(
                    Condition::IsTrue(Field::ConVariaciones),
                    StepRules::new().required(Field::PlanosReplanteo, "Los planos de replanteo son requeridos"),
                ),
            2 => StepRules::new()
                .required(Field::Fue, messages::FUE_REQUIRED)
                .required(Field::DeclaracionFinObra, "La declaración de fin de obra es requerida"),
            3 => StepRules::new().required(Field::DeclaracionJurada, messages::DECLARACION_REQUIRED),
            _ => StepRules::new(),
        }
    }
}
