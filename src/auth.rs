// auth.rs - 管理员凭据与会话注册表
// 只有一个共享的管理员账号；登录成功后发放随机令牌，
// 上传流程只接受 AdminGrant，不读取任何会话状态

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

use rand::RngCore;

use crate::config::AdminConfig;

/// 管理员授权凭证（能力值）
///
/// 只能通过登录校验、会话查询或 [`AdminGrant::local`] 获得。
#[derive(Debug, Clone)]
pub struct AdminGrant {
    _private: (),
}

impl AdminGrant {
    /// 本地可信调用方（命令行导入等）使用
    pub fn local() -> Self {
        Self { _private: () }
    }
}

/// 共享的管理员凭据
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into().trim().to_string(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    /// 用户名或密码为空时禁止登录
    pub fn is_enabled(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// 校验输入（先 trim），成功返回授权
    pub fn verify(&self, username: &str, password: &str) -> Option<AdminGrant> {
        if !self.is_enabled() {
            return None;
        }
        if username.trim() == self.username && password.trim() == self.password {
            Some(AdminGrant::local())
        } else {
            None
        }
    }
}

/// 默认会话有效期
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// 会话状态
#[derive(Debug, Clone)]
pub struct SessionState {
    /// 登录时间
    pub created_at: Instant,
}

impl SessionState {
    fn is_live(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() < ttl
    }
}

/// 会话注册表 - 线程安全的令牌集合
///
/// 会话超过有效期后失效；过期记录在下次登录或校验时清除。
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<String, SessionState>>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    // 锁被污染时照常使用，令牌集合本身不会处于不一致状态
    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SessionState>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// 登录：校验凭据，成功则发放新令牌
    pub fn login(
        &self,
        credentials: &Credentials,
        username: &str,
        password: &str,
    ) -> Option<String> {
        credentials.verify(username, password)?;

        let token = new_token();
        let mut inner = self.write();
        let before = inner.len();
        inner.retain(|_, state| state.is_live(self.ttl));
        if inner.len() < before {
            tracing::debug!(expired = before - inner.len(), "swept expired admin sessions");
        }
        inner.insert(
            token.clone(),
            SessionState {
                created_at: Instant::now(),
            },
        );
        Some(token)
    }

    /// 注销令牌，返回令牌之前是否存在
    pub fn logout(&self, token: &str) -> bool {
        self.write().remove(token).is_some()
    }

    /// 令牌存在且未过期则返回授权；过期令牌顺便删除
    pub fn authorize(&self, token: &str) -> Option<AdminGrant> {
        let mut inner = self.write();
        let live = inner.get(token)?.is_live(self.ttl);
        if !live {
            inner.remove(token);
            tracing::info!("expired admin session rejected");
            return None;
        }
        Some(AdminGrant::local())
    }

    /// 当前有效会话数
    pub fn active_sessions(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.values().filter(|state| state.is_live(self.ttl)).count()
    }
}

/// 32 字节随机数，十六进制编码
fn new_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
