use crate::models::ProcedureKind;
use crate::wizard::{Condition, StepDef, StepRules, WizardDefinition};
use crate::wizards::messages;

crate::form_fields! {
    pub enum Field {
        SelectedClient => "selectedClient",
        TipoDemolicion => "tipo_demolicion",
        AreaDemoler => "area_demoler",
        Motivo => "motivo",
        PlanoDemolicionParcial => "plano_demolicion_parcial",
        PartidaRegistral => "partida_registral",
        Fue => "fue",
        PlanoUbicacion => "plano_ubicacion",
        DeclaracionJurada => "declaracion_jurada",
    }
}

pub struct DemolicionWizard;

impl WizardDefinition for DemolicionWizard {
    type Field = Field;
    const KIND: ProcedureKind = ProcedureKind::Demolicion;

    fn steps() -> Vec<StepDef<Field>> {
        vec![
            StepDef::new("administrado", "Administrado").field(Field::SelectedClient, "Administrado"),
            StepDef::new("demolicion", "Demolición")
                .field(Field::TipoDemolicion, "Tipo de demolición")
                .field(Field::AreaDemoler, "Área a demoler (m²)")
                .field(Field::Motivo, "Motivo")
                .field_when(
                    Field::PlanoDemolicionParcial,
                    "Plano de demolición parcial",
                    Condition::Equals(Field::TipoDemolicion, "parcial"),
                ),
            StepDef::new("documentacion", "Documentación")
                .field(Field::PartidaRegistral, "Partida registral")
                .field(Field::Fue, "FUE")
                .field(Field::PlanoUbicacion, "Plano de ubicación"),
            StepDef::new("confirmacion", "Confirmación").field(Field::DeclaracionJurada, "Declaración jurada"),
        ]
    }

    fn step_rules(step: usize) -> StepRules<Field> {
        match step {
            0 => StepRules::new().required(Field::SelectedClient, messages::CLIENT_REQUIRED),
            1 => StepRules::new()
                .required(Field::TipoDemolicion, "Seleccione el tipo de demolición")
                .required(Field::AreaDemoler, "El área a demoler es requerida")
                .positive(Field::AreaDemoler, messages::AREA_POSITIVE)
                .when(
                    Condition::Equals(Field::TipoDemolicion, "parcial"),
                    StepRules::new().required(
                        Field::PlanoDemolicionParcial,
                        "El plano de demolición parcial es requerido",
                    ),
                ),
            2 => StepRules::new()
                .required(Field::PartidaRegistral, messages::PARTIDA_REQUIRED)
                .required(Field::Fue, messages::FUE_REQUIRED)
                .required(Field::PlanoUbicacion, "El plano de ubicación es requerido"),
            3 => StepRules::new().required(Field::DeclaracionJurada, messages::DECLARACION_REQUIRED),
            _ => StepRules::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{WizardController, WizardSettings};

    #[test]
    fn test_partial_demolition_requires_plan() {
        let mut c = WizardController::<DemolicionWizard>::new(WizardSettings::default());
        c.on_input_change(Field::AreaDemoler, 60.0);

        c.on_input_change(Field::TipoDemolicion, "parcial");
        assert!(!c.validate_step(1));
        assert!(c.errors().contains("plano_demolicion_parcial"));

        c.on_input_change(Field::TipoDemolicion, "total");
        assert!(c.validate_step(1));
    }
}
