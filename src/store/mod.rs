// store/mod.rs - 文档存储抽象层
//! 统一的文档存储接口：find / find_one / insert_one
//!
//! `insert_one` 必须原子地保证 (mode, subject, filename) 唯一，
//! 冲突时返回 [`StoreError::Conflict`]。

pub mod filter;
pub mod memory;
pub mod sled_store;

pub use filter::Filter;
pub use memory::MemoryStore;
pub use sled_store::SledStore;

use crate::schema::{Document, DocumentId, NewDocument};

/// 存储层错误类型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Document already exists: {mode}/{subject}/{filename}")]
    Conflict {
        mode: String,
        subject: String,
        filename: String,
    },

    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub(crate) fn conflict(record: &NewDocument) -> Self {
        StoreError::Conflict {
            mode: record.mode.to_string(),
            subject: record.subject.to_string(),
            filename: record.filename.clone(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 文档存储
///
/// 所有调用都是阻塞的；实现需要可跨线程共享。
pub trait DocumentStore: Send + Sync {
    /// 返回所有满足条件的文档，按插入顺序
    fn find(&self, filter: &Filter) -> StoreResult<Vec<Document>>;

    /// 返回第一个满足条件的文档
    fn find_one(&self, filter: &Filter) -> StoreResult<Option<Document>> {
        Ok(self.find(filter)?.into_iter().next())
    }

    /// 插入新记录，返回分配的 ID
    fn insert_one(&self, record: NewDocument) -> StoreResult<DocumentId>;

    /// 文档总数
    fn count(&self) -> StoreResult<usize>;

    /// 占用的磁盘空间（内存实现返回 0）
    fn size_on_disk(&self) -> StoreResult<u64> {
        Ok(0)
    }
}
