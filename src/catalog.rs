// catalog.rs - 目录查询服务
//! 按 (mode, subject) 列出文档，按 (subject, filename) 取单个文档

use crate::error::{CatalogError, CatalogResult};
use crate::schema::{Document, Field, Mode, Subject};
use crate::store::{DocumentStore, Filter};

/// 所有模式（首页）
pub fn modes() -> &'static [Mode] {
    &Mode::ALL
}

/// 某个模式下的科目（模式页）
pub fn subjects_for_mode(mode: &str) -> CatalogResult<(Mode, &'static [Subject])> {
    let mode = Mode::parse(mode).ok_or_else(|| CatalogError::invalid_selector("Invalid Mode"))?;
    Ok((mode, &Subject::ALL))
}

/// 列出某模式某科目下的全部文档，按插入顺序
///
/// 模式或科目任一不合法都返回 `InvalidSelector`，而不是空列表。
pub fn list_by_subject(
    store: &dyn DocumentStore,
    mode: &str,
    subject: &str,
) -> CatalogResult<(Mode, Subject, Vec<Document>)> {
    let (Some(mode), Some(subject)) = (Mode::parse(mode), Subject::parse(subject)) else {
        return Err(CatalogError::invalid_selector("Invalid Mode or Subject"));
    };

    let filter = Filter::all([
        Filter::eq(Field::Mode, mode.as_str()),
        Filter::eq(Field::Subject, subject.as_str()),
    ]);
    let documents = store.find(&filter)?;
    tracing::debug!(%mode, %subject, count = documents.len(), "listed subject");
    Ok((mode, subject, documents))
}

/// 按科目 + slug 取单个文档
pub fn get_by_filename_and_subject(
    store: &dyn DocumentStore,
    subject: &str,
    filename: &str,
) -> CatalogResult<Document> {
    let subject =
        Subject::parse(subject).ok_or_else(|| CatalogError::invalid_selector("Invalid Subject"))?;

    let filter = Filter::all([
        Filter::eq(Field::Subject, subject.as_str()),
        Filter::eq(Field::Filename, filename),
    ]);
    store
        .find_one(&filter)?
        .ok_or_else(|| CatalogError::NotFound {
            subject: subject.to_string(),
            filename: filename.to_string(),
        })
}
