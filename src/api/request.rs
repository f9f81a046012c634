// api/request.rs - 请求类型
//! 定义检索 / 登录 / 上传请求的结构化类型

use serde::{Deserialize, Serialize};

pub use crate::upload::UploadForm;

/// 检索请求（`GET /search?query=...`）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// 原始查询文本；缺省视为空查询
    #[serde(default)]
    pub query: String,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// 管理员登录请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 批量导入文件的格式：上传表单数组
pub type ImportBatch = Vec<UploadForm>;
