use dioxus::prelude::*;

mod layout;
pub use layout::AppLayout;

mod landing;
pub use landing::Landing;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::Dashboard;

mod admin;
pub use admin::Admin;

/// Bump `reload` every `[incidents] refresh_interval_secs` so lists pick up
/// changes made by other users.
pub(crate) fn use_periodic_reload(mut reload: Signal<u32>) {
    let interval = use_context::<store::ClientConfig>().incidents.refresh_interval();
    use_effect(move || {
        let Some(interval) = interval else {
            return;
        };
        spawn(async move {
            loop {
                store::timer::sleep(interval).await;
                reload += 1;
            }
        });
    });
}
