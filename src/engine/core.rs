// engine/core.rs - 目录引擎核心
//! 把存储和三个服务（目录查询 / 检索 / 上传）封装在一起，
//! 命令行和 HTTP 服务共用同一个入口

use std::sync::Arc;
use std::time::Instant;

use crate::api::{DocumentResponse, SearchRequest, SearchResponse, StatsResponse};
use crate::auth::AdminGrant;
use crate::catalog;
use crate::config::AppConfig;
use crate::error::CatalogResult;
use crate::schema::{Document, Mode, Subject};
use crate::search;
use crate::store::{DocumentStore, StoreResult};
use crate::upload::{self, UploadForm, UploadOutcome};

/// 目录引擎
pub struct CatalogEngine {
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) config: Arc<AppConfig>,
}

impl CatalogEngine {
    /// 获取存储引用
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 首页：所有模式
    pub fn modes(&self) -> &'static [Mode] {
        catalog::modes()
    }

    /// 模式页：校验模式并返回科目列表
    pub fn subjects_for_mode(&self, mode: &str) -> CatalogResult<(Mode, &'static [Subject])> {
        catalog::subjects_for_mode(mode)
    }

    /// 科目页
    pub fn list_by_subject(
        &self,
        mode: &str,
        subject: &str,
    ) -> CatalogResult<(Mode, Subject, Vec<Document>)> {
        catalog::list_by_subject(self.store(), mode, subject)
    }

    /// 单个 PDF 页
    pub fn get_document(&self, subject: &str, filename: &str) -> CatalogResult<Document> {
        catalog::get_by_filename_and_subject(self.store(), subject, filename)
    }

    /// 执行检索
    pub fn search(&self, request: &SearchRequest) -> CatalogResult<SearchResponse> {
        let start = Instant::now();
        let results = search::search(self.store(), &request.query)?;
        let took_ms = start.elapsed().as_millis() as u64;

        let results: Vec<DocumentResponse> =
            results.into_iter().map(DocumentResponse::from).collect();
        Ok(SearchResponse::new(request.query.trim(), results).with_took(took_ms))
    }

    /// 上传 PDF 元数据
    pub fn upload(&self, grant: &AdminGrant, form: UploadForm) -> CatalogResult<UploadOutcome> {
        upload::submit(self.store(), grant, form)
    }

    /// 存储统计
    pub fn stats(&self) -> StoreResult<StatsResponse> {
        Ok(StatsResponse::new(self.store.count()?, self.store.size_on_disk()?))
    }
}
