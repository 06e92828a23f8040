use serde::{Deserialize, Serialize};

/// 手续（trámite）类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureKind {
    /// 行政相对人（administrado）登记
    Administrado,
    /// 预项目（anteproyecto）提交
    Anteproyecto,
    /// 建筑许可
    LicenciaEdificacion,
    /// 扩建 / 改建
    AmpliacionRemodelacion,
    /// 拆除
    Demolicion,
    /// 竣工合规
    ConformidadObra,
    /// 营业执照
    LicenciaFuncionamiento,
}

impl ProcedureKind {
    /// 所有手续类型
    pub fn all() -> &'static [ProcedureKind] {
        &[
            Self::Administrado,
            Self::Anteproyecto,
            Self::LicenciaEdificacion,
            Self::AmpliacionRemodelacion,
            Self::Demolicion,
            Self::ConformidadObra,
            Self::LicenciaFuncionamiento,
        ]
    }

    /// 稳定标识（REST 路径片段、草稿文件中的 kind）
    pub fn slug(self) -> &'static str {
        match self {
            Self::Administrado => "administrado",
            Self::Anteproyecto => "anteproyecto",
            Self::LicenciaEdificacion => "licencia_edificacion",
            Self::AmpliacionRemodelacion => "ampliacion_remodelacion",
            Self::Demolicion => "demolicion",
            Self::ConformidadObra => "conformidad_obra",
            Self::LicenciaFuncionamiento => "licencia_funcionamiento",
        }
    }

    /// 标准名称
    pub fn name(self) -> &'static str {
        match self {
            Self::Administrado => "Administrado",
            Self::Anteproyecto => "Anteproyecto",
            Self::LicenciaEdificacion => "Licencia de Edificación",
            Self::AmpliacionRemodelacion => "Ampliación y Remodelación",
            Self::Demolicion => "Demolición",
            Self::ConformidadObra => "Conformidad de Obra",
            Self::LicenciaFuncionamiento => "Licencia de Funcionamiento",
        }
    }

    /// 保存成功后跳转的列表页
    pub fn list_route(self) -> &'static str {
        match self {
            Self::Administrado => "/administrados",
            Self::Anteproyecto => "/anteproyectos",
            Self::LicenciaEdificacion => "/licencias-edificacion",
            Self::AmpliacionRemodelacion => "/ampliaciones",
            Self::Demolicion => "/demoliciones",
            Self::ConformidadObra => "/conformidad-obra",
            Self::LicenciaFuncionamiento => "/licencias-funcionamiento",
        }
    }

    /// 从标识解析（精确匹配）
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.slug() == s)
    }

    /// 宽松查找（忽略大小写、连字符、空格与重音）
    pub fn find(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                'á' => 'a',
                'é' => 'e',
                'í' => 'i',
                'ó' => 'o',
                'ú' => 'u',
                other => other,
            })
            .collect();

        if let Some(kind) = Self::from_slug(&normalized) {
            return Some(kind);
        }

        Self::all()
            .iter()
            .copied()
            .find(|k| {
                normalized.contains(k.slug())
                    || (normalized.len() >= 4 && k.slug().starts_with(&normalized))
            })
    }
}

impl std::fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip_for_every_kind() {
        for kind in ProcedureKind::all() {
            assert_eq!(ProcedureKind::from_slug(kind.slug()), Some(*kind));
        }
    }

    #[test]
    fn test_find_accepts_loose_input() {
        assert_eq!(ProcedureKind::find("Demolición"), Some(ProcedureKind::Demolicion));
        assert_eq!(
            ProcedureKind::find("licencia-funcionamiento"),
            Some(ProcedureKind::LicenciaFuncionamiento)
        );
        assert_eq!(ProcedureKind::find("ante"), Some(ProcedureKind::Anteproyecto));
        assert_eq!(ProcedureKind::find("xyz"), None);
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&ProcedureKind::ConformidadObra).unwrap();
        assert_eq!(json, "\"conformidad_obra\"");
    }
}
