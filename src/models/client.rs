use serde::{Deserialize, Serialize};

/// 已选中的行政相对人引用（嵌套在表单数据中）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub documento: String,
}

/// 婚姻状况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Soltero,
    Casado,
    Divorciado,
    Viudo,
    Conviviente,
}

impl MaritalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soltero => "soltero",
            Self::Casado => "casado",
            Self::Divorciado => "divorciado",
            Self::Viudo => "viudo",
            Self::Conviviente => "conviviente",
        }
    }
}

/// 后端返回的行政相对人
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientOut {
    pub id: String,
    #[serde(default)]
    pub tipo_persona: Option<String>,
    #[serde(default)]
    pub nombres: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub razon_social: Option<String>,
    pub numero_documento: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

impl ClientOut {
    /// 展示用名称：法人取公司名，自然人取姓名
    pub fn display_name(&self) -> String {
        if let Some(razon) = self.razon_social.as_deref().filter(|s| !s.trim().is_empty()) {
            return razon.to_string();
        }

        [self.nombres.as_deref(), self.apellidos.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_ref(&self) -> ClientRef {
        ClientRef {
            id: self.id.clone(),
            nombre: self.display_name(),
            documento: self.numero_documento.clone(),
        }
    }
}

/// 创建 / 更新行政相对人的请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub tipo_persona: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razon_social: Option<String>,
    pub numero_documento: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado_civil: Option<MaritalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conyuge_nombres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conyuge_documento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(razon: Option<&str>) -> ClientOut {
        ClientOut {
            id: "c1".to_string(),
            tipo_persona: None,
            nombres: Some("Rosa".to_string()),
            apellidos: Some("Quispe Mamani".to_string()),
            razon_social: razon.map(str::to_string),
            numero_documento: "45871236".to_string(),
            email: None,
            telefono: None,
        }
    }

    #[test]
    fn test_display_name_prefers_razon_social() {
        assert_eq!(client(Some("Inversiones Lima SAC")).display_name(), "Inversiones Lima SAC");
        assert_eq!(client(None).display_name(), "Rosa Quispe Mamani");
        assert_eq!(client(Some("  ")).display_name(), "Rosa Quispe Mamani");
    }

    #[test]
    fn test_create_request_skips_absent_fields() {
        let req = CreateClientRequest {
            tipo_persona: "natural".to_string(),
            numero_documento: "45871236".to_string(),
            estado_civil: Some(MaritalStatus::Casado),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["estado_civil"], "casado");
        assert!(json.get("razon_social").is_none());
    }
}
