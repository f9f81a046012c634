// store/filter.rs - 过滤条件
//! 精确匹配 / 子串匹配谓词，以及它们的与 / 或组合

use crate::schema::{Document, Field};

/// 查询过滤条件
///
/// `Contains` 是纯文本子串匹配（不区分大小写），
/// 不解释任何正则元字符。
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// 匹配所有记录
    Everything,
    /// 字段值完全相等
    Eq(Field, String),
    /// 字段值包含子串（不区分大小写）
    Contains(Field, String),
    /// 所有子条件都满足（Must）
    All(Vec<Filter>),
    /// 任一子条件满足（Should）
    Any(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: Field, value: impl Into<String>) -> Self {
        Filter::Eq(field, value.into())
    }

    pub fn contains(field: Field, needle: impl Into<String>) -> Self {
        Filter::Contains(field, needle.into())
    }

    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::All(filters.into_iter().collect())
    }

    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Any(filters.into_iter().collect())
    }

    /// 判断文档是否满足条件
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::Everything => true,
            Filter::Eq(field, value) => doc.field(*field) == value,
            Filter::Contains(field, needle) => contains_ignore_case(doc.field(*field), needle),
            // 空的 All 恒真，空的 Any 恒假
            Filter::All(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Any(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
