// store/sled_store.rs - sled 持久化文档存储
// 两棵树：
//   documents   : id(大端序) -> bincode(Document)
//   unique_keys : mode\x1fsubject\x1ffilename -> id
// 插入在跨两棵树的事务里完成，唯一性检查不会和插入之间产生竞争窗口

use std::path::Path;

use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::{Db, Transactional, Tree};

use super::{DocumentStore, Filter, StoreError, StoreResult};
use crate::schema::{Document, DocumentId, NewDocument};

const DOCUMENTS_TREE: &str = "documents";
const UNIQUE_KEYS_TREE: &str = "unique_keys";

pub struct SledStore {
    db: Db,
    documents: Tree,
    unique_keys: Tree,
}

impl SledStore {
    /// 创建或打开数据库
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = sled::open(path)?;
        let store = Self::from_db(db)?;
        tracing::info!(
            path = %path.display(),
            documents = store.documents.len(),
            "document store opened"
        );
        Ok(store)
    }

    /// 临时数据库（进程退出即删除）
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> StoreResult<Self> {
        let documents = db.open_tree(DOCUMENTS_TREE)?;
        let unique_keys = db.open_tree(UNIQUE_KEYS_TREE)?;
        Ok(Self {
            db,
            documents,
            unique_keys,
        })
    }

    fn decode(data: &[u8]) -> StoreResult<Document> {
        Ok(bincode::deserialize::<Document>(data)?)
    }
}

impl DocumentStore for SledStore {
    fn find(&self, filter: &Filter) -> StoreResult<Vec<Document>> {
        let mut found = Vec::new();
        for entry in self.documents.iter() {
            let (_, data) = entry?;
            let doc = Self::decode(&data)?;
            if filter.matches(&doc) {
                found.push(doc);
            }
        }
        Ok(found)
    }

    fn find_one(&self, filter: &Filter) -> StoreResult<Option<Document>> {
        for entry in self.documents.iter() {
            let (_, data) = entry?;
            let doc = Self::decode(&data)?;
            if filter.matches(&doc) {
                return Ok(Some(doc));
            }
        }
        Ok(None)
    }

    fn insert_one(&self, record: NewDocument) -> StoreResult<DocumentId> {
        let id = DocumentId(self.db.generate_id()?);
        let id_bytes = id.to_be_bytes();
        let unique_key = record.unique_key();
        let doc = record.with_id(id);
        let encoded = bincode::serialize(&doc)?;

        let result: Result<(), TransactionError<()>> = (&self.documents, &self.unique_keys)
            .transaction(|(documents, unique_keys)| {
                if unique_keys.get(unique_key.as_slice())?.is_some() {
                    return Err(ConflictableTransactionError::Abort(()));
                }
                unique_keys.insert(unique_key.as_slice(), &id_bytes[..])?;
                documents.insert(&id_bytes[..], encoded.as_slice())?;
                Ok(())
            });

        match result {
            Ok(()) => {}
            Err(TransactionError::Abort(())) => {
                return Err(StoreError::Conflict {
                    mode: doc.mode.to_string(),
                    subject: doc.subject.to_string(),
                    filename: doc.filename,
                });
            }
            Err(TransactionError::Storage(e)) => return Err(e.into()),
        }

        self.db.flush()?;
        Ok(id)
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.documents.len())
    }

    fn size_on_disk(&self) -> StoreResult<u64> {
        Ok(self.db.size_on_disk()?)
    }
}
