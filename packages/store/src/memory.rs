use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::backend::{AuthBackend, NotificationBackend};
use crate::error::ClientError;
use crate::models::{NotificationId, NotificationRecord, RegisterRequest, User, UserId};

/// In-memory backend for testing the stores without HTTP.
///
/// Mirrors the backend's behaviour: one server-side session, `/register` that
/// does not log in unless told to, notifications scoped to the session user.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
    check_session_gate: Option<Arc<Notify>>,
    fetch_gate: Option<Arc<Notify>>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<(User, String)>,
    current: Option<UserId>,
    notifications: Vec<NotificationRecord>,
    offline: bool,
    fail_mark_read: bool,
    auto_login_on_register: bool,
    calls: HashMap<&'static str, usize>,
}

/// Releases one gated backend call.
#[derive(Clone, Debug)]
pub struct Gate(Arc<Notify>);

impl Gate {
    pub fn open(&self) {
        self.0.notify_one();
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User, password: &str) -> Self {
        self.lock().accounts.push((user, password.to_string()));
        self
    }

    pub fn auto_login_on_register(self) -> Self {
        self.lock().auto_login_on_register = true;
        self
    }

    /// Make `check_session` wait for the returned gate after computing its answer.
    pub fn gate_check_session(&mut self) -> Gate {
        let notify = Arc::new(Notify::new());
        self.check_session_gate = Some(notify.clone());
        Gate(notify)
    }

    /// Make `fetch_notifications` wait for the returned gate after computing its answer.
    pub fn gate_fetch(&mut self) -> Gate {
        let notify = Arc::new(Notify::new());
        self.fetch_gate = Some(notify.clone());
        Gate(notify)
    }

    pub fn open_session(&self, user_id: UserId) {
        self.lock().current = Some(user_id);
    }

    pub fn close_session(&self) {
        self.lock().current = None;
    }

    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    pub fn set_fail_mark_read(&self, fail: bool) {
        self.lock().fail_mark_read = fail;
    }

    pub fn set_notifications(&self, notifications: Vec<NotificationRecord>) {
        self.lock().notifications = notifications;
    }

    pub fn server_notification(&self, id: NotificationId) -> Option<NotificationRecord> {
        self.lock().notifications.iter().find(|n| n.id == id).cloned()
    }

    pub fn calls(&self, name: &str) -> usize {
        self.lock().calls.get(name).copied().unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, name: &'static str) -> Result<MutexGuard<'_, Inner>, ClientError> {
        let mut inner = self.lock();
        *inner.calls.entry(name).or_default() += 1;
        if inner.offline {
            return Err(ClientError::network("backend unreachable"));
        }
        Ok(inner)
    }

    fn current_user(inner: &Inner) -> Result<User, ClientError> {
        inner
            .current
            .and_then(|id| inner.accounts.iter().find(|(u, _)| u.id == id))
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ClientError::auth("Authentication required"))
    }
}

impl AuthBackend for MemoryBackend {
    async fn check_session(&self) -> Result<User, ClientError> {
        let result = self.enter("check_session").and_then(|inner| Self::current_user(&inner));
        if let Some(gate) = &self.check_session_gate {
            gate.notified().await;
        }
        result
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let mut inner = self.enter("login")?;
        let user = inner
            .accounts
            .iter()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ClientError::auth("Invalid credentials"))?;
        inner.current = Some(user.id);
        Ok(user)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Option<User>, ClientError> {
        let mut inner = self.enter("register")?;
        if inner.accounts.iter().any(|(u, _)| u.email == request.email) {
            return Err(ClientError::validation("Email already registered"));
        }
        let id = inner.accounts.iter().map(|(u, _)| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            username: request.username.clone(),
            email: request.email.clone(),
            is_admin: false,
            is_banned: false,
            created_at: None,
        };
        inner.accounts.push((user.clone(), request.password.clone()));
        if inner.auto_login_on_register {
            inner.current = Some(id);
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.enter("logout")?.current = None;
        Ok(())
    }
}

impl NotificationBackend for MemoryBackend {
    async fn fetch_notifications(&self) -> Result<Vec<NotificationRecord>, ClientError> {
        let result = self.enter("fetch_notifications").and_then(|inner| {
            Self::current_user(&inner)?;
            Ok(inner.notifications.clone())
        });
        if let Some(gate) = &self.fetch_gate {
            gate.notified().await;
        }
        result
    }

    async fn mark_read(&self, id: NotificationId) -> Result<NotificationRecord, ClientError> {
        let mut inner = self.enter("mark_read")?;
        if inner.fail_mark_read {
            return Err(ClientError::server("Internal server error"));
        }
        let record = inner
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ClientError::not_found("Notification not found"))?;
        record.read = true;
        Ok(record.clone())
    }
}
