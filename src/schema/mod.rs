// schema/mod.rs - 数据模型定义模块
//! 文档记录、字段名和固定枚举

mod document;
pub mod fields;
pub mod taxonomy;

pub use document::*;
pub use fields::*;
pub use taxonomy::*;
