// search.rs - 全文检索服务
//! 在 title / subject / description 三个字段上做不区分大小写的子串匹配
//!
//! 查询按纯文本处理，用户输入里的 `.*+?()[]` 等字符没有特殊含义。

use crate::error::CatalogResult;
use crate::schema::{Document, Field};
use crate::store::{DocumentStore, Filter};

/// 参与检索的字段
pub const SEARCH_FIELDS: [Field; 3] = [Field::Title, Field::Subject, Field::Description];

/// 构建检索过滤条件；空查询返回 None
pub fn build_search_filter(query: &str) -> Option<Filter> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(Filter::any(
        SEARCH_FIELDS.iter().map(|field| Filter::contains(*field, query)),
    ))
}

/// 执行检索
///
/// 去掉首尾空白后为空的查询直接返回空结果（“还没搜索”），不是错误。
pub fn search(store: &dyn DocumentStore, query: &str) -> CatalogResult<Vec<Document>> {
    let Some(filter) = build_search_filter(query) else {
        return Ok(Vec::new());
    };
    let results = store.find(&filter)?;
    tracing::debug!(query = query.trim(), hits = results.len(), "search finished");
    Ok(results)
}
