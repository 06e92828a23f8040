use crate::error::{AppResult, ConfigError};
use std::str::FromStr;
use std::time::Duration;

/// 上传方式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadMode {
    /// 本地模拟上传（生成 blob URL）
    Local,
    /// 通过后端文档接口上传
    Remote,
}

impl UploadMode {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadMode::Local => "local",
            UploadMode::Remote => "remote",
        }
    }
}

impl FromStr for UploadMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(UploadMode::Local),
            "remote" => Ok(UploadMode::Remote),
            _ => Err(()),
        }
    }
}

/// 保存失败时的处理方式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveFailurePolicy {
    /// 保留可重试的失败状态，供界面展示
    #[default]
    Report,
    /// 只记录日志，状态回到空闲（兼容旧行为）
    LogOnly,
}

impl FromStr for SaveFailurePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(SaveFailurePolicy::Report),
            "log_only" | "log-only" => Ok(SaveFailurePolicy::LogOnly),
            _ => Err(()),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的草稿数量
    pub max_concurrent_drafts: usize,
    /// 草稿 TOML 文件存放目录
    pub drafts_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 保存失败记录文件
    pub failure_journal: String,
    // --- 后端 API 配置 ---
    pub api_base_url: String,
    pub api_token: String,
    pub request_timeout_secs: u64,
    // --- 向导行为 ---
    pub upload_mode: UploadMode,
    /// 校验提示条自动隐藏的秒数
    pub banner_timeout_secs: u64,
    pub save_failure_policy: SaveFailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_drafts: 4,
            drafts_folder: "drafts".to_string(),
            verbose_logging: false,
            output_log_file: "tramites.log".to_string(),
            failure_journal: "failed_saves.txt".to_string(),
            api_base_url: "http://localhost:8000/api".to_string(),
            api_token: String::new(),
            request_timeout_secs: 30,
            upload_mode: UploadMode::Local,
            banner_timeout_secs: 5,
            save_failure_policy: SaveFailurePolicy::Report,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值退回默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_drafts: parsed("MAX_CONCURRENT_DRAFTS").unwrap_or(default.max_concurrent_drafts),
            drafts_folder: std::env::var("DRAFTS_FOLDER").unwrap_or(default.drafts_folder),
            verbose_logging: parsed("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            failure_journal: std::env::var("FAILURE_JOURNAL").unwrap_or(default.failure_journal),
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            api_token: std::env::var("API_TOKEN").unwrap_or(default.api_token),
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS").unwrap_or(default.request_timeout_secs),
            upload_mode: parsed("UPLOAD_MODE").unwrap_or(default.upload_mode),
            banner_timeout_secs: parsed("BANNER_TIMEOUT_SECS").unwrap_or(default.banner_timeout_secs),
            save_failure_policy: parsed("SAVE_FAILURE_MODE").unwrap_or(default.save_failure_policy),
        }
    }

    /// 从环境变量读取配置，遇到无法解析的值直接报错
    pub fn try_from_env() -> AppResult<Self> {
        Self::try_from_lookup(|name| std::env::var(name).ok())
    }

    /// 使用自定义查找函数读取配置（便于测试）
    pub fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            max_concurrent_drafts: strict(&lookup, "MAX_CONCURRENT_DRAFTS", "usize")?
                .unwrap_or(default.max_concurrent_drafts),
            drafts_folder: lookup("DRAFTS_FOLDER").unwrap_or(default.drafts_folder),
            verbose_logging: strict(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            failure_journal: lookup("FAILURE_JOURNAL").unwrap_or(default.failure_journal),
            api_base_url: lookup("API_BASE_URL").unwrap_or(default.api_base_url),
            api_token: lookup("API_TOKEN").unwrap_or(default.api_token),
            request_timeout_secs: strict(&lookup, "REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(default.request_timeout_secs),
            upload_mode: strict(&lookup, "UPLOAD_MODE", "local|remote")?
                .unwrap_or(default.upload_mode),
            banner_timeout_secs: strict(&lookup, "BANNER_TIMEOUT_SECS", "u64")?
                .unwrap_or(default.banner_timeout_secs),
            save_failure_policy: strict(&lookup, "SAVE_FAILURE_MODE", "report|log_only")?
                .unwrap_or(default.save_failure_policy),
        })
    }

    /// 校验提示条的显示时长
    pub fn banner_timeout(&self) -> Duration {
        Duration::from_secs(self.banner_timeout_secs)
    }

    /// HTTP 请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parsed<T: FromStr>(var_name: &str) -> Option<T> {
    std::env::var(var_name).ok().and_then(|v| v.parse().ok())
}

fn strict<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> AppResult<Option<T>> {
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::try_from_lookup(|_| None).unwrap();
        assert_eq!(config.banner_timeout(), Duration::from_secs(5));
        assert_eq!(config.upload_mode, UploadMode::Local);
        assert_eq!(config.save_failure_policy, SaveFailurePolicy::Report);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::try_from_lookup(lookup_from(&[
            ("UPLOAD_MODE", "remote"),
            ("SAVE_FAILURE_MODE", "log_only"),
            ("MAX_CONCURRENT_DRAFTS", "9"),
        ]))
        .unwrap();

        assert_eq!(config.upload_mode, UploadMode::Remote);
        assert_eq!(config.save_failure_policy, SaveFailurePolicy::LogOnly);
        assert_eq!(config.max_concurrent_drafts, 9);
    }

    #[test]
    fn test_bad_value_reports_variable() {
        let err = Config::try_from_lookup(lookup_from(&[("BANNER_TIMEOUT_SECS", "cinco")]))
            .unwrap_err();

        match err {
            AppError::Config(ConfigError::EnvVarParseFailed { var_name, value, .. }) => {
                assert_eq!(var_name, "BANNER_TIMEOUT_SECS");
                assert_eq!(value, "cinco");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
