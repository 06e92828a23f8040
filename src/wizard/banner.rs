use std::time::{Duration, Instant};

/// 默认提示文本
pub const DEFAULT_BANNER_MESSAGE: &str =
    "Por favor complete todos los campos requeridos antes de continuar";

/// 表单顶部的校验提示条
///
/// 校验失败时显示，超过 `timeout` 后自动隐藏；任意字段修改会立即隐藏。
#[derive(Debug, Clone)]
pub struct ValidationBanner {
    message: String,
    shown_at: Option<Instant>,
    timeout: Duration,
}

impl ValidationBanner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            message: DEFAULT_BANNER_MESSAGE.to_string(),
            shown_at: None,
            timeout,
        }
    }

    pub fn show(&mut self, now: Instant) {
        self.shown_at = Some(now);
    }

    pub fn hide(&mut self) {
        self.shown_at = None;
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.shown_at
            .map_or(false, |at| now.saturating_duration_since(at) < self.timeout)
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    /// 过期则隐藏，返回隐藏后是否仍可见
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.shown_at.is_some() && !self.is_visible_at(now) {
            self.shown_at = None;
        }
        self.shown_at.is_some()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ValidationBanner {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_hides_after_timeout() {
        let mut banner = ValidationBanner::default();
        let t0 = Instant::now();
        banner.show(t0);

        assert!(banner.is_visible_at(t0 + Duration::from_secs(4)));
        assert!(!banner.is_visible_at(t0 + Duration::from_secs(5)));
        assert!(!banner.tick(t0 + Duration::from_secs(6)));
        assert!(!banner.is_visible_at(t0));
    }

    #[test]
    fn test_hide_is_immediate() {
        let mut banner = ValidationBanner::new(Duration::from_secs(30));
        let t0 = Instant::now();
        banner.show(t0);
        banner.hide();
        assert!(!banner.is_visible_at(t0));
    }
}
