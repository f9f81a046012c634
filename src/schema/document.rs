// schema/document.rs - 文档记录结构定义
//! 一条记录描述一个外部 PDF（只存链接，不存文件本身）

use serde::{Deserialize, Serialize};

use super::fields::Field;
use super::taxonomy::{Mode, Subject};

/// 存储层分配的文档 ID（单调递增，等同于插入顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

impl DocumentId {
    /// 大端序编码，保证 sled 中按插入顺序遍历
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 待写入的记录（ID 尚未分配）
///
/// 注意：该结构会被 bincode 编码，字段上不要加 `skip_serializing_if`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub mode: Mode,
    pub subject: Subject,
    pub title: String,
    /// 由标题派生的 slug，不能单独设置
    pub filename: String,
    pub link: String,
    pub description: String,
    pub photo: String,
}

impl NewDocument {
    /// 唯一约束的键: (mode, subject, filename)
    pub fn unique_key(&self) -> Vec<u8> {
        unique_key(self.mode, self.subject, &self.filename)
    }

    pub fn with_id(self, id: DocumentId) -> Document {
        Document {
            id,
            mode: self.mode,
            subject: self.subject,
            title: self.title,
            filename: self.filename,
            link: self.link,
            description: self.description,
            photo: self.photo,
        }
    }
}

/// 已存储的文档记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub mode: Mode,
    pub subject: Subject,
    pub title: String,
    pub filename: String,
    pub link: String,
    pub description: String,
    pub photo: String,
}

impl Document {
    /// 按字段名取值（过滤条件使用）
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Mode => self.mode.as_str(),
            Field::Subject => self.subject.as_str(),
            Field::Title => &self.title,
            Field::Filename => &self.filename,
            Field::Link => &self.link,
            Field::Description => &self.description,
            Field::Photo => &self.photo,
        }
    }

    pub fn unique_key(&self) -> Vec<u8> {
        unique_key(self.mode, self.subject, &self.filename)
    }
}

// 0x1f (unit separator) 不会出现在枚举名中
fn unique_key(mode: Mode, subject: Subject, filename: &str) -> Vec<u8> {
    format!("{}\u{1f}{}\u{1f}{}", mode.as_str(), subject.as_str(), filename).into_bytes()
}
