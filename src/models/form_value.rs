use crate::models::client::ClientRef;
use crate::models::document::UploadedDocument;
use serde::{Deserialize, Serialize};

/// 表单字段值
///
/// 未填写的字段保持 `Empty`，读取时不会出现"字段不存在"。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    Files(Vec<UploadedDocument>),
    Client(ClientRef),
}

impl FieldValue {
    /// 是否已填写（空字符串、0、false、空文件列表均视为未填写）
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Empty => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Files(files) => !files.is_empty(),
            FieldValue::Client(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => matches!(s.trim(), "true" | "si" | "sí"),
            _ => false,
        }
    }

    pub fn as_files(&self) -> &[UploadedDocument] {
        match self {
            FieldValue::Files(files) => files,
            _ => &[],
        }
    }

    pub fn as_client(&self) -> Option<&ClientRef> {
        match self {
            FieldValue::Client(c) => Some(c),
            _ => None,
        }
    }

    /// 简短描述，用于日志与摘要显示
    pub fn summary(&self) -> String {
        match self {
            FieldValue::Empty => "—".to_string(),
            FieldValue::Bool(true) => "Sí".to_string(),
            FieldValue::Bool(false) => "No".to_string(),
            FieldValue::Number(n) => format!("{n}"),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Files(files) => format!("{} archivo(s)", files.len()),
            FieldValue::Client(c) => format!("{} ({})", c.nombre, c.documento),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<Vec<UploadedDocument>> for FieldValue {
    fn from(files: Vec<UploadedDocument>) -> Self {
        FieldValue::Files(files)
    }
}

impl From<ClientRef> for FieldValue {
    fn from(c: ClientRef) -> Self {
        FieldValue::Client(c)
    }
}

impl From<Option<ClientRef>> for FieldValue {
    fn from(c: Option<ClientRef>) -> Self {
        c.map(FieldValue::Client).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falsy_values_are_not_filled() {
        assert!(!FieldValue::Empty.is_filled());
        assert!(!FieldValue::from("   ").is_filled());
        assert!(!FieldValue::from(0.0).is_filled());
        assert!(!FieldValue::from(false).is_filled());
        assert!(!FieldValue::Files(vec![]).is_filled());
        assert!(!FieldValue::from(None::<ClientRef>).is_filled());
    }

    #[test]
    fn test_truthy_values_are_filled() {
        assert!(FieldValue::from("Av. Grau 120").is_filled());
        assert!(FieldValue::from(3_i64).is_filled());
        assert!(FieldValue::from(true).is_filled());
        assert!(FieldValue::from(ClientRef {
            id: "c1".to_string(),
            nombre: String::new(),
            documento: String::new(),
        })
        .is_filled());
    }

    #[test]
    fn test_untagged_deserialization_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            a: FieldValue,
            b: FieldValue,
            c: FieldValue,
            d: FieldValue,
        }

        let holder: Holder = toml::from_str(
            r#"
            a = true
            b = 120
            c = "casado"
            [d]
            id = "c1"
            nombre = "Rosa"
            "#,
        )
        .unwrap();

        assert_eq!(holder.a, FieldValue::Bool(true));
        assert_eq!(holder.b, FieldValue::Number(120.0));
        assert_eq!(holder.c.as_text(), Some("casado"));
        assert_eq!(holder.d.as_client().map(|c| c.id.as_str()), Some("c1"));
    }
}
