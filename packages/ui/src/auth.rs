//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the [`SessionStore`] and mirrors its session into a
//! signal so components re-render when the user logs in or out. Components
//! never write the signal directly; they go through [`AuthContext`].

use api::ApiClient;
use dioxus::prelude::*;
use store::{ClientError, RegisterOutcome, RegisterRequest, Session, SessionStore, User};

/// Session store plus the signal views subscribe to.
#[derive(Clone)]
pub struct AuthContext {
    store: SessionStore<ApiClient>,
    session: Signal<Session>,
}

impl AuthContext {
    /// Current session. Reading it subscribes the calling component.
    pub fn session(&self) -> Session {
        (self.session)()
    }

    pub fn signal(&self) -> Signal<Session> {
        self.session
    }

    pub async fn initialize(&self) -> Session {
        let session = self.store.initialize().await;
        self.publish();
        session
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let result = self.store.login(email, password).await;
        self.publish();
        result
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ClientError> {
        let result = self.store.register(request).await;
        self.publish();
        result
    }

    /// Always ends logged out; the error is only worth logging.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self.store.logout().await;
        self.publish();
        result
    }

    fn publish(&self) {
        let mut session = self.session;
        let next = self.store.session();
        if *session.peek() != next {
            session.set(next);
        }
    }
}

/// Get the authentication context provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Provider component that manages authentication state.
/// Expects an [`ApiClient`] in context.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_context::<ApiClient>();
    let session = use_signal(Session::default);
    let auth = use_context_provider(|| AuthContext {
        store: SessionStore::new(client),
        session,
    });

    // Resolve the backend session on mount
    let _ = use_resource(move || {
        let auth = auth.clone();
        async move {
            let session = auth.initialize().await;
            tracing::debug!(authenticated = session.user.is_some(), "session resolved");
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let onclick = move |_| {
        let auth = auth.clone();
        async move {
            if let Err(e) = auth.logout().await {
                tracing::warn!("logout request failed: {e}");
            }
            nav.replace(store::guard::LOGIN_PATH);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
