//! # Auth session store
//!
//! [`SessionStore`] is the single owner of the client's [`Session`]. Views get
//! snapshots through [`SessionStore::session`]; only the operations below
//! mutate it, each as one lock-scoped transition.
//!
//! | Operation | Success | Failure |
//! |-----------|---------|---------|
//! | [`initialize`](SessionStore::initialize) | `user = Some`, settled | absorbed: `user = None`, settled |
//! | [`login`](SessionStore::login) | `user = Some`, settled | session unchanged, error returned |
//! | [`register`](SessionStore::register) | session only if the backend opened one | session unchanged, error returned |
//! | [`logout`](SessionStore::logout) | `user = None` | `user = None` anyway, error returned for logging |
//!
//! Every explicit action bumps an epoch. A session check that started before
//! a login/logout and resolves after it only settles `loading`, so a slow
//! `/check_session` cannot overwrite a newer login.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::AuthBackend;
use crate::error::ClientError;
use crate::models::{RegisterRequest, Session, User};

/// What a successful registration produced.
#[derive(Clone, Debug, PartialEq)]
pub enum RegisterOutcome {
    /// The backend opened a session for the new account.
    Authenticated(User),
    /// The account exists; the user still has to log in.
    LoginRequired,
}

#[derive(Debug, Default)]
struct Inner {
    session: Session,
    epoch: u64,
}

/// Owner of the authenticated-user state.
#[derive(Clone, Debug)]
pub struct SessionStore<B> {
    backend: B,
    inner: Arc<Mutex<Inner>>,
}

impl<B> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.lock().session.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply an explicit user action and invalidate in-flight session checks.
    fn transition(&self, session: Session) -> Session {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.session = session;
        inner.session.clone()
    }
}

impl<B: AuthBackend> SessionStore<B> {
    /// Resynchronize with the backend session. Never fails: any error means
    /// "nobody is logged in".
    pub async fn initialize(&self) -> Session {
        let epoch = {
            let mut inner = self.lock();
            inner.session.loading = true;
            inner.epoch
        };

        let result = self.backend.check_session().await;

        let mut inner = self.lock();
        if inner.epoch != epoch {
            tracing::debug!("session check superseded by a newer auth action");
            inner.session.loading = false;
            return inner.session.clone();
        }
        inner.session = match result {
            Ok(user) => {
                tracing::info!(user_id = user.id, "session restored");
                Session::authenticated(user)
            }
            Err(e) => {
                tracing::debug!("no active session: {e}");
                Session::anonymous()
            }
        };
        inner.session.clone()
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::validation("Email and password are required"));
        }

        let user = self.backend.login(email, password).await.map_err(|e| {
            tracing::warn!("login failed: {e}");
            e
        })?;

        tracing::info!(user_id = user.id, "logged in");
        self.transition(Session::authenticated(user.clone()));
        Ok(user)
    }

    /// Create an account. Establishes a session only if the backend confirmed one.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ClientError> {
        let request = request.validated()?;

        match self.backend.register(&request).await {
            Ok(Some(user)) => {
                tracing::info!(user_id = user.id, "registered and logged in");
                self.transition(Session::authenticated(user.clone()));
                Ok(RegisterOutcome::Authenticated(user))
            }
            Ok(None) => {
                tracing::info!("registered, login required");
                Ok(RegisterOutcome::LoginRequired)
            }
            Err(e) => {
                tracing::warn!("registration failed: {e}");
                Err(e)
            }
        }
    }

    /// Log out. The local session is cleared whatever the backend answers.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self.backend.logout().await;
        self.transition(Session::anonymous());
        match &result {
            Ok(()) => tracing::info!("logged out"),
            Err(e) => tracing::warn!("backend logout failed, session cleared locally: {e}"),
        }
        result
    }
}
