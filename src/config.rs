// 配置模块 - 支持外部配置文件 + 环境变量覆盖
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 默认配置文件路径
pub const CONFIG_FILE: &str = "./config.toml";

/// 环境变量（优先级高于配置文件）
pub const ENV_ADMIN_USERNAME: &str = "PDF_CATALOG_ADMIN_USERNAME";
pub const ENV_ADMIN_PASSWORD: &str = "PDF_CATALOG_ADMIN_PASSWORD";
pub const ENV_STORAGE_PATH: &str = "PDF_CATALOG_STORAGE_PATH";

/// 配置加载错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============== 配置结构体 ==============

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub bind: String,
    /// 监听端口
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// sled 数据目录
    pub path: String,
}

/// 共享的管理员账号；任一项为空则禁止登录
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    /// 登录会话有效期（秒）
    pub session_ttl_secs: u64,
}

// ============== 默认配置 ==============

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            session_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "./storage".to_string(),
        }
    }
}

// ============== 配置加载 ==============

impl AppConfig {
    /// 从默认路径加载，失败则使用默认配置；最后应用环境变量覆盖
    pub fn load() -> Self {
        Self::load_or_default(CONFIG_FILE)
    }

    /// 从指定路径加载，失败则使用默认配置；最后应用环境变量覆盖
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let config = match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "configuration loaded");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "cannot load configuration, using defaults"
                );
                Self::default()
            }
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// 从指定文件加载配置（不应用环境变量）
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 应用环境变量覆盖；`lookup` 便于测试时注入
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = lookup(ENV_ADMIN_USERNAME) {
            self.admin.username = username;
        }
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.admin.password = password;
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            self.storage.path = path;
        }
        self
    }

    /// 生成默认配置文件
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let default_content = include_str!("../config.toml");
        fs::write(path, default_content)?;
        Ok(())
    }

    /// 服务监听地址 "bind:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}
