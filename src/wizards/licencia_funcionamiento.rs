use crate::models::ProcedureKind;
use crate::wizard::{Condition, StepDef, StepRules, WizardDefinition};
use crate::wizards::messages;

crate::form_fields! {
    pub enum Field {
        SelectedClient => "selectedClient",
        NombreComercial => "nombre_comercial",
        Giro => "giro",
        AreaLocal => "area_local",
        DireccionLocal => "direccion_local",
        RequiereAutorizacionSectorial => "requiere_autorizacion_sectorial",
        AutorizacionSectorial => "autorizacion_sectorial",
        CertificadoItse => "certificado_itse",
        DeclaracionJurada => "declaracion_jurada",
    }
}

pub struct LicenciaFuncionamientoWizard;

impl WizardDefinition for LicenciaFuncionamientoWizard {
    type Field = Field;
    const KIND: ProcedureKind = ProcedureKind::LicenciaFuncionamiento;

    fn steps() -> Vec<StepDef<Field>> {
        vec![
            StepDef::new("administrado", "Administrado").field(Field::SelectedClient, "Administrado"),
            StepDef::new("establecimiento", "Establecimiento")
                .field(Field::NombreComercial, "Nombre comercial")
                .field(Field::Giro, "Giro")
                .field(Field::AreaLocal, "Área del local (m²)")
                .field(Field::DireccionLocal, "Dirección del local"),
            StepDef::new("requisitos", "Requisitos")
                .field(Field::RequiereAutorizacionSectorial, "¿Requiere autorización sectorial?")
                .field_when(
                    Field::AutorizacionSectorial,
                    "Autorización sectorial",
                    Condition::IsTrue(Field::RequiereAutorizacionSectorial),
                )
                .field(Field::CertificadoItse, "Certificado ITSE"),
            StepDef::new("confirmacion", "Confirmación").field(Field::DeclaracionJurada, "Declaración jurada"),
        ]
    }

    fn step_rules(step: usize) -> StepRules<Field> {
        match step {
            0 => StepRules::new().required(Field::SelectedClient, messages::CLIENT_REQUIRED),
            1 => StepRules::new()
                .required(Field::NombreComercial, "El nombre comercial es requerido")
                .required(Field::Giro, "El giro es requerido")
                .required(Field::AreaLocal, "El área del local es requerida")
                .positive(Field::AreaLocal, messages::AREA_POSITIVE)
                .required(Field::DireccionLocal, "La dirección del local es requerida"),
            2 => StepRules::new()
                .when(
                    Condition::IsTrue(Field::RequiereAutorizacionSectorial),
                    StepRules::new().required(
                        Field::AutorizacionSectorial,
                        "La autorización sectorial es requerida",
                    ),
                )
                .required(Field::CertificadoItse, "El certificado ITSE es requerido"),
            3 => StepRules::new().required(Field::DeclaracionJurada, messages::DECLARACION_REQUIRED),
            _ => StepRules::new(),
        }
    }
}
