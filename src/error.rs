// error.rs - 目录服务错误类型

use crate::store::StoreError;

/// 读路径与上传流程共用的错误类型
///
/// 校验失败 / 重复记录不在这里：它们是上传流程的正常结果，
/// 见 [`crate::upload::UploadOutcome`]。
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// 模式或科目不在固定枚举中（对外表现为 404）
    #[error("{0}")]
    InvalidSelector(String),

    /// 选择器合法但没有对应记录
    #[error("PDF not found: {subject}/{filename}")]
    NotFound { subject: String, filename: String },

    /// 存储不可用，不重试
    #[error("Store error: {0}")]
    Infrastructure(#[from] StoreError),
}

impl CatalogError {
    pub fn invalid_selector(message: impl Into<String>) -> Self {
        CatalogError::InvalidSelector(message.into())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
