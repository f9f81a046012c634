// store/memory.rs - 内存文档存储
//! 用于测试和演示；唯一性检查与插入在同一把写锁内完成

use std::sync::RwLock;

use super::{DocumentStore, Filter, StoreError, StoreResult};
use crate::schema::{Document, DocumentId, NewDocument};

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    /// 按插入顺序保存
    documents: Vec<Document>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn find(&self, filter: &Filter) -> StoreResult<Vec<Document>> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect())
    }

    fn find_one(&self, filter: &Filter) -> StoreResult<Option<Document>> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.documents.iter().find(|doc| filter.matches(doc)).cloned())
    }

    fn insert_one(&self, record: NewDocument) -> StoreResult<DocumentId> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        let key = record.unique_key();
        if inner.documents.iter().any(|doc| doc.unique_key() == key) {
            return Err(StoreError::conflict(&record));
        }

        inner.next_id += 1;
        let id = DocumentId(inner.next_id);
        inner.documents.push(record.with_id(id));
        Ok(id)
    }

    fn count(&self) -> StoreResult<usize> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, Mode, Subject};

    fn record(mode: Mode, subject: Subject, filename: &str) -> NewDocument {
        NewDocument {
            mode,
            subject,
            title: filename.replace('-', " "),
            filename: filename.to_string(),
            link: format!("http://example.com/{filename}.pdf"),
            description: String::new(),
            photo: String::new(),
        }
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.insert_one(record(Mode::Academic, Subject::Ict, "a")).unwrap();
        let b = store.insert_one(record(Mode::Academic, Subject::Ict, "b")).unwrap();
        assert!(b > a);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_duplicate_key_is_conflict() {
        let store = MemoryStore::new();
        store.insert_one(record(Mode::Academic, Subject::Ict, "a")).unwrap();
        let err = store.insert_one(record(Mode::Academic, Subject::Ict, "a")).unwrap_err();
        assert!(err.is_conflict());

        // 其他模式下同名是允许的
        store.insert_one(record(Mode::Admission, Subject::Ict, "a")).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_find_keeps_insertion_order() {
        let store = MemoryStore::new();
        for name in ["c", "a", "b"] {
            store.insert_one(record(Mode::Academic, Subject::Math1, name)).unwrap();
        }
        store.insert_one(record(Mode::Academic, Subject::Math2, "x")).unwrap();

        let found = store
            .find(&Filter::eq(Field::Subject, "math 1st paper"))
            .unwrap();
        let names: Vec<_> = found.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);

        let one = store.find_one(&Filter::eq(Field::Filename, "x")).unwrap();
        assert_eq!(one.map(|d| d.subject), Some(Subject::Math2));
        assert!(store.find_one(&Filter::eq(Field::Filename, "nope")).unwrap().is_none());
    }
}
