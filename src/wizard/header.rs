//! 页头标题
//!
//! 进入向导时设置标题，`HeaderGuard` 释放时恢复之前的值。

use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
}

/// 进程内共享的页头状态
#[derive(Debug, Clone, Default)]
pub struct HeaderStore {
    inner: Arc<Mutex<Header>>,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Header {
        match self.inner.lock() {
            Ok(header) => header.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, header: Header) -> Header {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, header)
    }

    /// 设置标题，返回的守卫释放时恢复之前的标题
    pub fn enter(&self, title: impl Into<String>, subtitle: impl Into<String>) -> HeaderGuard {
        let header = Header {
            title: title.into(),
            subtitle: subtitle.into(),
        };
        debug!("页头: {}", header.title);
        let previous = self.replace(header);
        HeaderGuard {
            store: self.clone(),
            previous: Some(previous),
        }
    }
}

pub struct HeaderGuard {
    store: HeaderStore,
    previous: Option<Header>,
}

impl Drop for HeaderGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.store.replace(previous);
        }
    }
}
