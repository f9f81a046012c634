// engine/builder.rs - 目录引擎构建器
//! 使用 Builder 模式构建 CatalogEngine

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{DocumentStore, MemoryStore, SledStore, StoreResult};

use super::core::CatalogEngine;

/// 目录引擎构建器
#[derive(Default)]
pub struct CatalogEngineBuilder {
    config: Option<Arc<AppConfig>>,
    storage_path: Option<PathBuf>,
    store: Option<Arc<dyn DocumentStore>>,
    in_memory: bool,
}

impl CatalogEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置配置
    pub fn with_config(mut self, config: Arc<AppConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// 设置存储路径（覆盖配置中的 storage.path）
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// 使用已有的存储实现
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// 使用内存存储（不落盘）
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// 构建目录引擎
    pub fn build(self) -> StoreResult<CatalogEngine> {
        let config = self.config.unwrap_or_default();

        let store: Arc<dyn DocumentStore> = match (self.store, self.in_memory) {
            (Some(store), _) => store,
            (None, true) => Arc::new(MemoryStore::new()),
            (None, false) => {
                let storage_path = self
                    .storage_path
                    .unwrap_or_else(|| PathBuf::from(&config.storage.path));
                Arc::new(SledStore::open(&storage_path)?)
            }
        };

        Ok(CatalogEngine { store, config })
    }
}
