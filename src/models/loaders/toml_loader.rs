use crate::error::{AppError, AppResult, FileError};
use crate::models::draft::Draft;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 解析 TOML 字符串为草稿
pub fn parse_draft(content: &str, origin: &str) -> AppResult<Draft> {
    toml::from_str(content).map_err(|source| {
        AppError::File(FileError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })
    })
}

/// 从 TOML 文件加载草稿
pub async fn load_draft(toml_file_path: &Path) -> AppResult<Draft> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(toml_file_path.display().to_string(), e))?;

    let draft = parse_draft(&content, &toml_file_path.display().to_string())?;

    Ok(draft.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有草稿（按文件名排序，解析失败的文件跳过并告警）
pub async fn load_all_drafts(folder_path: &str) -> AppResult<Vec<Draft>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }));
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut drafts = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_draft(&path).await {
            Ok(draft) => {
                tracing::info!(
                    "成功加载草稿 ({}), {} 个字段",
                    draft.kind,
                    draft.form.len()
                );
                drafts.push(draft);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::procedure::ProcedureKind;

    const SAMPLE: &str = r#"
kind = "anteproyecto"
completed_steps = ["administrado"]

[form]
nombre_proyecto = "Vivienda multifamiliar Los Olivos"
area_terreno = 180.5
es_condominio = false

[form.selectedClient]
id = "c1"
nombre = "Rosa Quispe"
documento = "45871236"

[[uploads]]
field = "partida_registral"
path = "files/partida.pdf"
"#;

    #[test]
    fn test_parse_sample_draft() {
        let draft = parse_draft(SAMPLE, "sample.toml").unwrap();
        assert_eq!(draft.kind, ProcedureKind::Anteproyecto);
        assert_eq!(draft.completed_steps, vec!["administrado".to_string()]);
        assert_eq!(draft.uploads.len(), 1);
        assert_eq!(
            draft.form["selectedClient"].as_client().map(|c| c.id.as_str()),
            Some("c1")
        );
        assert_eq!(draft.form["area_terreno"].as_number(), Some(180.5));
    }

    #[test]
    fn test_parse_error_keeps_origin() {
        let err = parse_draft("kind = \"permiso_de_pesca\"", "bad.toml").unwrap_err();
        match err {
            AppError::File(FileError::TomlParseFailed { path, .. }) => assert_eq!(path, "bad.toml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_folder_is_reported() {
        let err = load_all_drafts("definitely/not/here").await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::DirectoryNotFound { .. })));
    }
}
