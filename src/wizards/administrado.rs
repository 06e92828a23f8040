//! 行政相对人登记 / 编辑

use crate::models::{CreateClientRequest, MaritalStatus, ProcedureKind};
use crate::wizard::{Condition, FormData, StepDef, StepRules, WizardDefinition};
use serde_json::Value as JsonValue;

crate::form_fields! {
    pub enum Field {
        TipoPersona => "tipo_persona",
        Nombres => "nombres",
        Apellidos => "apellidos",
        RazonSocial => "razon_social",
        NumeroDocumento => "numero_documento",
        EstadoCivil => "estado_civil",
        ConyugeNombres => "conyuge_nombres",
        ConyugeDocumento => "conyuge_documento",
        Email => "email",
        Telefono => "telefono",
        Direccion => "direccion",
    }
}

const DNI_PATTERN: &str = r"^\d{8}$";
const RUC_PATTERN: &str = r"^\d{11}$";
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn natural() -> Condition<Field> {
    Condition::Equals(Field::TipoPersona, "natural")
}

fn juridica() -> Condition<Field> {
    Condition::Equals(Field::TipoPersona, "juridica")
}

/// 只有自然人才有婚姻状况
fn casado() -> Condition<Field> {
    Condition::All(vec![
        natural(),
        Condition::Equals(Field::EstadoCivil, MaritalStatus::Casado.as_str()),
    ])
}

pub struct AdministradoWizard;

impl WizardDefinition for AdministradoWizard {
    type Field = Field;
    const KIND: ProcedureKind = ProcedureKind::Administrado;

    fn steps() -> Vec<StepDef<Field>> {
        vec![
            StepDef::new("identificacion", "Identificación")
                .field(Field::TipoPersona, "Tipo de persona")
                .field_when(Field::Nombres, "Nombres", natural())
                .field_when(Field::Apellidos, "Apellidos", natural())
                .field_when(Field::RazonSocial, "Razón social", juridica())
                .field(Field::NumeroDocumento, "DNI / RUC"),
            StepDef::new("estado_civil", "Estado civil")
                .field_when(Field::EstadoCivil, "Estado civil", natural())
                .field_when(Field::ConyugeNombres, "Nombres del cónyuge", casado())
                .field_when(Field::ConyugeDocumento, "Documento del cónyuge", casado()),
            StepDef::new("contacto", "Contacto")
                .field(Field::Email, "Correo electrónico")
                .field(Field::Telefono, "Teléfono")
                .field(Field::Direccion, "Dirección"),
        ]
    }

    fn step_rules(step: usize) -> StepRules<Field> {
        match step {
            0 => StepRules::new()
                .required(Field::TipoPersona, "Seleccione el tipo de persona")
                .required(Field::NumeroDocumento, "El número de documento es requerido")
                .when(
                    natural(),
                    StepRules::new()
                        .required(Field::Nombres, "Los nombres son requeridos")
                        .required(Field::Apellidos, "Los apellidos son requeridos")
                        .pattern(Field::NumeroDocumento, DNI_PATTERN, "El DNI debe tener 8 dígitos"),
                )
                .when(
                    juridica(),
                    StepRules::new()
                        .required(Field::RazonSocial, "La razón social es requerida")
                        .pattern(Field::NumeroDocumento, RUC_PATTERN, "El RUC debe tener 11 dígitos"),
                ),
            1 => StepRules::new()
                .when(
                    natural(),
                    StepRules::new().required(Field::EstadoCivil, "Seleccione el estado civil"),
                )
                .when(
                    casado(),
                    StepRules::new()
                        .required(Field::ConyugeNombres, "Los nombres del cónyuge son requeridos")
                        .required(Field::ConyugeDocumento, "El documento del cónyuge es requerido"),
                ),
            2 => StepRules::new()
                .required(Field::Email, "El correo electrónico es requerido")
                .pattern(Field::Email, EMAIL_PATTERN, "El correo electrónico no es válido")
                .required(Field::Telefono, "El teléfono es requerido")
                .required(Field::Direccion, "La dirección es requerida"),
            _ => StepRules::new(),
        }
    }

    fn initial_form() -> FormData<Field> {
        FormData::new().with(Field::TipoPersona, "natural")
    }

    fn payload(form: &FormData<Field>) -> JsonValue {
        serde_json::to_value(client_request(form)).unwrap_or_default()
    }
}

/// 把表单转换为行政相对人请求体
pub fn client_request(form: &FormData<Field>) -> CreateClientRequest {
    let text = |field: Field| {
        let value = form.text(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    };
    let es_natural = natural().holds(form);
    let con_conyuge = casado().holds(form);

    CreateClientRequest {
        tipo_persona: form.text(Field::TipoPersona).trim().to_string(),
        nombres: text(Field::Nombres),
        apellidos: text(Field::Apellidos),
        razon_social: text(Field::RazonSocial),
        numero_documento: form.text(Field::NumeroDocumento).trim().to_string(),
        estado_civil: es_natural
            .then(|| marital_status(form.text(Field::EstadoCivil)))
            .flatten(),
        conyuge_nombres: con_conyuge.then(|| text(Field::ConyugeNombres)).flatten(),
        conyuge_documento: con_conyuge.then(|| text(Field::ConyugeDocumento)).flatten(),
        email: text(Field::Email),
        telefono: text(Field::Telefono),
        direccion: text(Field::Direccion),
    }
}

fn marital_status(value: &str) -> Option<MaritalStatus> {
    match value.trim() {
        "soltero" => Some(MaritalStatus::Soltero),
        "casado" => Some(MaritalStatus::Casado),
        "divorciado" => Some(MaritalStatus::Divorciado),
        "viudo" => Some(MaritalStatus::Viudo),
        "conviviente" => Some(MaritalStatus::Conviviente),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{WizardController, WizardSettings};

    fn controller() -> WizardController<AdministradoWizard> {
        WizardController::new(WizardSettings::default())
    }

    fn fill_identity(c: &mut WizardController<AdministradoWizard>) {
        c.on_input_change(Field::Nombres, "Rosa");
        c.on_input_change(Field::Apellidos, "Mamani Flores");
        c.on_input_change(Field::NumeroDocumento, "40123456");
    }

    #[test]
    fn test_spouse_required_only_when_married() {
        let mut c = controller();
        fill_identity(&mut c);
        assert!(c.handle_next());

        c.on_input_change(Field::EstadoCivil, "casado");
        assert!(!c.validate_step(1));
        assert!(c.errors().contains("conyuge_nombres"));
        assert!(c.errors().contains("conyuge_documento"));

        c.on_input_change(Field::EstadoCivil, "soltero");
        assert!(c.validate_step(1));
        assert!(!c.errors().contains("conyuge_nombres"));
    }

    #[test]
    fn test_switch_to_juridica_drops_spouse_requirement() {
        let mut c = controller();
        c.on_input_change(Field::EstadoCivil, "casado");
        assert!(!c.validate_step(1));

        c.on_input_change(Field::TipoPersona, "juridica");
        assert!(c.validate_step(1));
        assert!(!c.errors().contains("conyuge_nombres"));

        let request = client_request(c.form());
        assert_eq!(request.tipo_persona, "juridica");
        assert!(request.estado_civil.is_none());
        assert!(request.conyuge_nombres.is_none());
    }

    #[test]
    fn test_document_format_depends_on_person_type() {
        let mut c = controller();
        fill_identity(&mut c);
        c.on_input_change(Field::NumeroDocumento, "1234");
        assert!(!c.validate_step(0));
        assert_eq!(c.errors().get("numero_documento"), Some("El DNI debe tener 8 dígitos"));

        c.on_input_change(Field::TipoPersona, "juridica");
        c.on_input_change(Field::NumeroDocumento, "20123456789");
        assert!(!c.validate_step(0));
        assert!(c.errors().contains("razon_social"));
        assert!(!c.errors().contains("numero_documento"));
        assert!(!c.errors().contains("apellidos"));
    }

    #[test]
    fn test_missing_document_reports_required_first() {
        let mut c = controller();
        c.validate_step(0);
        assert_eq!(
            c.errors().get("numero_documento"),
            Some("El número de documento es requerido")
        );
    }

    #[test]
    fn test_email_format() {
        let mut c = controller();
        c.on_input_change(Field::Email, "rosa@");
        c.on_input_change(Field::Telefono, "987654321");
        c.on_input_change(Field::Direccion, "Jr. Lima 123");
        assert!(!c.validate_step(2));
        assert_eq!(c.errors().get("email"), Some("El correo electrónico no es válido"));

        c.on_input_change(Field::Email, "rosa@correo.pe");
        assert!(c.validate_step(2));
    }

    #[test]
    fn test_payload_matches_client_request() {
        let form = AdministradoWizard::initial_form()
            .with(Field::Nombres, "Rosa")
            .with(Field::NumeroDocumento, "40123456")
            .with(Field::EstadoCivil, "casado");

        let payload = AdministradoWizard::payload(&form);
        assert_eq!(payload["tipo_persona"], "natural");
        assert_eq!(payload["estado_civil"], "casado");
        assert!(payload.get("razon_social").is_none());

        let back: CreateClientRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(back.numero_documento, "40123456");
    }
}
