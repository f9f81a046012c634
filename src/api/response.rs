// api/response.rs - 响应类型
//! 定义 JSON 接口返回的结构化响应类型

use serde::{Deserialize, Serialize};

use crate::schema::{Document, Mode, Subject, mode_names, subject_names};
use crate::upload::{MSG_CREATED, UploadForm, UploadOutcome};

/// 单个文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: u64,
    pub mode: String,
    pub subject: String,
    pub title: String,
    /// 由标题生成的 slug
    pub filename: String,
    /// 外部 PDF 链接
    pub link: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub photo: String,
    /// 本服务内的详情页路径
    pub url: String,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            url: document_path(doc.subject, &doc.filename),
            id: doc.id.0,
            mode: doc.mode.to_string(),
            subject: doc.subject.to_string(),
            title: doc.title,
            filename: doc.filename,
            link: doc.link,
            description: doc.description,
            photo: doc.photo,
        }
    }
}

/// 首页：所有模式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    pub modes: Vec<String>,
}

impl HomeResponse {
    pub fn new(modes: &[Mode]) -> Self {
        Self {
            modes: modes.iter().map(Mode::to_string).collect(),
        }
    }
}

/// 模式页：该模式下的科目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeResponse {
    pub mode: String,
    pub subjects: Vec<String>,
}

impl ModeResponse {
    pub fn new(mode: Mode, subjects: &[Subject]) -> Self {
        Self {
            mode: mode.to_string(),
            subjects: subjects.iter().map(Subject::to_string).collect(),
        }
    }
}

/// 科目页：文档列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectResponse {
    pub mode: String,
    pub subject: String,
    pub pdfs: Vec<DocumentResponse>,
}

impl SubjectResponse {
    pub fn new(mode: Mode, subject: Subject, documents: Vec<Document>) -> Self {
        Self {
            mode: mode.to_string(),
            subject: subject.to_string(),
            pdfs: documents.into_iter().map(DocumentResponse::from).collect(),
        }
    }
}

/// 检索响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// 去掉首尾空白后的查询文本
    pub query: String,

    /// 检索结果
    pub results: Vec<DocumentResponse>,

    /// 结果总数
    pub total: usize,

    /// 检索耗时（毫秒）
    pub took_ms: u64,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, results: Vec<DocumentResponse>) -> Self {
        Self {
            query: query.into(),
            total: results.len(),
            results,
            took_ms: 0,
        }
    }

    pub fn with_took(mut self, took_ms: u64) -> Self {
        self.took_ms = took_ms;
        self
    }
}

/// 上传表单的可选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOptionsResponse {
    pub modes: Vec<String>,
    pub subjects: Vec<String>,
}

impl UploadOptionsResponse {
    pub fn new() -> Self {
        Self {
            modes: mode_names().into_iter().map(String::from).collect(),
            subjects: subject_names().into_iter().map(String::from).collect(),
        }
    }
}

impl Default for UploadOptionsResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// 上传结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Created,
    ValidationFailed,
    DuplicateExists,
}

/// 上传响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: UploadStatus,

    /// 展示给提交者的消息（成功提示或逐条错误）
    pub messages: Vec<String>,

    /// 创建成功后跳转的科目页
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub document: Option<DocumentResponse>,

    /// 失败时回传的原始表单，便于修改后重新提交
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub form: Option<UploadForm>,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Created { location, document } => Self {
                status: UploadStatus::Created,
                messages: vec![MSG_CREATED.to_string()],
                location: Some(location.path()),
                document: Some(document.into()),
                form: None,
            },
            UploadOutcome::ValidationFailed { errors, form } => Self {
                status: UploadStatus::ValidationFailed,
                messages: errors,
                location: None,
                document: None,
                form: Some(form),
            },
            UploadOutcome::DuplicateExists { message, form } => Self {
                status: UploadStatus::DuplicateExists,
                messages: vec![message],
                location: None,
                document: None,
                form: Some(form),
            },
        }
    }
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// 仅包含一条消息的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 健康检查
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub documents: usize,
}

/// 存储统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_documents: usize,
    pub storage_size_bytes: u64,
    /// 人类可读格式
    pub storage_size_display: String,
}

impl StatsResponse {
    pub fn new(total_documents: usize, storage_size_bytes: u64) -> Self {
        Self {
            total_documents,
            storage_size_bytes,
            storage_size_display: format_file_size(storage_size_bytes),
        }
    }
}

/// 错误响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// 辅助函数

/// 详情页路径；每个路径段单独做百分号编码
pub fn document_path(subject: Subject, filename: &str) -> String {
    format!(
        "/pdf/{}/{}",
        urlencoding::encode(subject.as_str()),
        urlencoding::encode(filename)
    )
}

pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
