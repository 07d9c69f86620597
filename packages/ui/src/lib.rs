//! This crate contains all shared UI for the workspace.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod format;
pub use format::{format_timestamp, parse_coordinate};

mod auth;
pub use auth::{use_auth, AuthContext, AuthProvider, LogoutButton};

mod notifications;
pub use notifications::{
    use_notifications, NotificationBadge, NotificationContext, NotificationDropdown,
    NotificationProvider,
};

mod guards;
pub use guards::{AdminRoute, LoadingSpinner, PrivateRoute};

mod navbar;
pub use navbar::Navbar;

mod incidents;
pub use incidents::{CreateIncidentForm, EditIncidentForm, IncidentCard, IncidentList, StatusSelect};

mod feedback;
pub use feedback::{CommentSection, ReactionBar, ReviewSection};

mod users;
pub use users::UserManagement;

mod error_banner;
pub use error_banner::ErrorBanner;
