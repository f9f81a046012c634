// schema/taxonomy.rs - 固定的模式 / 科目枚举
//! 查询和上传两条路径共用同一套枚举，保证校验一致

use serde::{Deserialize, Serialize};

/// 目录顶层分区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Academic,
    Admission,
}

impl Mode {
    /// 按展示顺序排列
    pub const ALL: [Mode; 2] = [Mode::Academic, Mode::Admission];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Academic => "academic",
            Mode::Admission => "admission",
        }
    }

    /// 大小写不敏感地解析（转小写后比较，不去除空白）
    pub fn parse(raw: &str) -> Option<Mode> {
        let normalized = normalize(raw);
        Self::ALL.into_iter().find(|m| m.as_str() == normalized)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 模式下的科目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "physics 1st paper")]
    Physics1,
    #[serde(rename = "physics 2nd paper")]
    Physics2,
    #[serde(rename = "chemistry 1st paper")]
    Chemistry1,
    #[serde(rename = "chemistry 2nd paper")]
    Chemistry2,
    #[serde(rename = "math 1st paper")]
    Math1,
    #[serde(rename = "math 2nd paper")]
    Math2,
    #[serde(rename = "biology 1st paper")]
    Biology1,
    #[serde(rename = "biology 2nd paper")]
    Biology2,
    #[serde(rename = "english 1st paper")]
    English1,
    #[serde(rename = "bangla 1st paper")]
    Bangla1,
    #[serde(rename = "bangla 2nd paper")]
    Bangla2,
    #[serde(rename = "ict")]
    Ict,
}

impl Subject {
    /// 按展示顺序排列
    pub const ALL: [Subject; 12] = [
        Subject::Physics1,
        Subject::Physics2,
        Subject::Chemistry1,
        Subject::Chemistry2,
        Subject::Math1,
        Subject::Math2,
        Subject::Biology1,
        Subject::Biology2,
        Subject::English1,
        Subject::Bangla1,
        Subject::Bangla2,
        Subject::Ict,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Physics1 => "physics 1st paper",
            Subject::Physics2 => "physics 2nd paper",
            Subject::Chemistry1 => "chemistry 1st paper",
            Subject::Chemistry2 => "chemistry 2nd paper",
            Subject::Math1 => "math 1st paper",
            Subject::Math2 => "math 2nd paper",
            Subject::Biology1 => "biology 1st paper",
            Subject::Biology2 => "biology 2nd paper",
            Subject::English1 => "english 1st paper",
            Subject::Bangla1 => "bangla 1st paper",
            Subject::Bangla2 => "bangla 2nd paper",
            Subject::Ict => "ict",
        }
    }

    pub fn parse(raw: &str) -> Option<Subject> {
        let normalized = normalize(raw);
        Self::ALL.into_iter().find(|s| s.as_str() == normalized)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 所有模式名（用于首页 / 上传表单）
pub fn mode_names() -> Vec<&'static str> {
    Mode::ALL.iter().map(Mode::as_str).collect()
}

/// 所有科目名（用于模式页 / 上传表单）
pub fn subject_names() -> Vec<&'static str> {
    Subject::ALL.iter().map(Subject::as_str).collect()
}

fn normalize(raw: &str) -> String {
    raw.to_lowercase()
}
