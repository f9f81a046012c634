// schema/fields.rs - 字段名常量定义
//! 统一管理文档记录的字段名，避免魔法字符串

/// 学习模式 (academic / admission)
pub const FIELD_MODE: &str = "mode";
/// 科目
pub const FIELD_SUBJECT: &str = "subject";
/// 标题
pub const FIELD_TITLE: &str = "title";
/// 由标题生成的 slug
pub const FIELD_FILENAME: &str = "filename";
/// 外部 PDF 链接
pub const FIELD_LINK: &str = "link";
/// 描述
pub const FIELD_DESCRIPTION: &str = "description";
/// 缩略图
pub const FIELD_PHOTO: &str = "photo";

/// 可用于过滤条件的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Mode,
    Subject,
    Title,
    Filename,
    Link,
    Description,
    Photo,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Mode => FIELD_MODE,
            Field::Subject => FIELD_SUBJECT,
            Field::Title => FIELD_TITLE,
            Field::Filename => FIELD_FILENAME,
            Field::Link => FIELD_LINK,
            Field::Description => FIELD_DESCRIPTION,
            Field::Photo => FIELD_PHOTO,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
