// upload.rs - 上传工作流
//! 规范化 -> 校验 -> 生成 slug -> 唯一性检查 -> 写入
//!
//! 每次提交独立执行，步骤之间不保存状态。唯一性由存储层的
//! 原子插入兜底：并发提交中检查通过但插入失败的一方同样得到
//! `DuplicateExists`。

use serde::{Deserialize, Serialize};

use crate::auth::AdminGrant;
use crate::error::CatalogResult;
use crate::schema::{Document, Field, Mode, NewDocument, Subject};
use crate::slug::slugify;
use crate::store::{DocumentStore, Filter, StoreError};

pub const MSG_INVALID_MODE: &str = "Invalid mode selected.";
pub const MSG_INVALID_SUBJECT: &str = "Invalid subject selected.";
pub const MSG_TITLE_REQUIRED: &str = "Title is required.";
pub const MSG_LINK_REQUIRED: &str = "Link is required.";
pub const MSG_TITLE_NO_SLUG: &str = "Title must contain at least one letter or digit.";
pub const MSG_DUPLICATE: &str = "A PDF with this title already exists for this subject and mode.";
pub const MSG_CREATED: &str = "PDF metadata uploaded successfully!";

/// 原始提交表单（未规范化）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadForm {
    pub mode: String,
    pub subject: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub photo: String,
}

/// 创建成功后跳转的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub mode: Mode,
    pub subject: Subject,
}

impl Location {
    /// 对应科目页的路径，例如 `/academic/ict`
    pub fn path(&self) -> String {
        format!(
            "/{}/{}",
            urlencoding::encode(self.mode.as_str()),
            urlencoding::encode(self.subject.as_str())
        )
    }
}

/// 工作流的终态
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Created {
        location: Location,
        document: Document,
    },
    /// 所有校验错误 + 原始表单（用于回填）
    ValidationFailed {
        errors: Vec<String>,
        form: UploadForm,
    },
    DuplicateExists {
        message: String,
        form: UploadForm,
    },
}

/// 规范化后的表单
struct Normalized {
    mode: String,
    subject: String,
    title: String,
    link: String,
    description: String,
    photo: String,
}

impl Normalized {
    fn from_form(form: &UploadForm) -> Self {
        Self {
            mode: form.mode.to_lowercase(),
            subject: form.subject.to_lowercase(),
            title: form.title.trim().to_string(),
            link: form.link.trim().to_string(),
            description: form.description.trim().to_string(),
            photo: form.photo.trim().to_string(),
        }
    }
}

/// 校验并构建待写入记录；收集全部错误而不是遇到第一个就返回
pub fn validate(form: &UploadForm) -> Result<NewDocument, Vec<String>> {
    let input = Normalized::from_form(form);
    let mut errors = Vec::new();

    let mode = Mode::parse(&input.mode);
    if mode.is_none() {
        errors.push(MSG_INVALID_MODE.to_string());
    }
    let subject = Subject::parse(&input.subject);
    if subject.is_none() {
        errors.push(MSG_INVALID_SUBJECT.to_string());
    }

    let filename = slugify(&input.title);
    if input.title.is_empty() {
        errors.push(MSG_TITLE_REQUIRED.to_string());
    } else if filename.is_empty() {
        errors.push(MSG_TITLE_NO_SLUG.to_string());
    }
    if input.link.is_empty() {
        errors.push(MSG_LINK_REQUIRED.to_string());
    }

    match (mode, subject) {
        (Some(mode), Some(subject)) if errors.is_empty() => Ok(NewDocument {
            mode,
            subject,
            title: input.title,
            filename,
            link: input.link,
            description: input.description,
            photo: input.photo,
        }),
        _ => Err(errors),
    }
}

/// 执行上传工作流
///
/// 只有存储故障会返回 `Err`（`CatalogError::Infrastructure`），不做重试。
pub fn submit(
    store: &dyn DocumentStore,
    _grant: &AdminGrant,
    form: UploadForm,
) -> CatalogResult<UploadOutcome> {
    let record = match validate(&form) {
        Ok(record) => record,
        Err(errors) => {
            tracing::debug!(?errors, "upload rejected by validation");
            return Ok(UploadOutcome::ValidationFailed { errors, form });
        }
    };

    let existing = store.find_one(&Filter::all([
        Filter::eq(Field::Filename, record.filename.as_str()),
        Filter::eq(Field::Subject, record.subject.as_str()),
        Filter::eq(Field::Mode, record.mode.as_str()),
    ]))?;
    if existing.is_some() {
        tracing::info!(
            mode = %record.mode,
            subject = %record.subject,
            filename = %record.filename,
            "duplicate upload rejected"
        );
        return Ok(duplicate(form));
    }

    let location = Location {
        mode: record.mode,
        subject: record.subject,
    };
    let id = match store.insert_one(record.clone()) {
        Ok(id) => id,
        // 检查之后被并发提交抢先写入
        Err(StoreError::Conflict { .. }) => {
            tracing::info!(
                mode = %record.mode,
                subject = %record.subject,
                filename = %record.filename,
                "duplicate upload lost insert race"
            );
            return Ok(duplicate(form));
        }
        Err(e) => return Err(e.into()),
    };

    let document = record.with_id(id);
    tracing::info!(
        id = %id,
        path = %location.path(),
        filename = %document.filename,
        "pdf metadata uploaded"
    );
    Ok(UploadOutcome::Created { location, document })
}

fn duplicate(form: UploadForm) -> UploadOutcome {
    UploadOutcome::DuplicateExists {
        message: MSG_DUPLICATE.to_string(),
        form,
    }
}
