//! # Notification poller
//!
//! [`NotificationCenter`] owns the current user's [`NotificationState`] and keeps
//! it fresh by polling the backend on a fixed interval.
//!
//! ## Merge policy
//!
//! A fetch is a set union, not a replacement: only ids never seen before are
//! appended (in the order the backend returned them). Existing records are
//! never removed or overwritten by a fetch, so a racing fetch cannot turn a
//! confirmed-read record back into an unread one.
//!
//! ## Lifecycle
//!
//! [`start`](NotificationCenter::start) returns a [`PollHandle`] for a
//! settled, authenticated session; the caller drives
//! [`run`](NotificationCenter::run) with it on its executor. Every
//! `start`/`stop` bumps a generation counter under the state lock. A tick
//! checks its handle's generation in the same critical section that applies
//! the merge, so a response that arrives after `stop()` is dropped.
//!
//! ## Failures
//!
//! Fetch failures are recorded in [`NotificationState::last_error`] and the
//! loop keeps going; the next success clears it. [`mark_as_read`](NotificationCenter::mark_as_read)
//! is user-initiated, so its failure is returned to the caller and the local
//! record stays untouched.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::NotificationBackend;
use crate::config::NotificationsConfig;
use crate::error::{ClientError, ErrorKind};
use crate::models::{NotificationId, NotificationRecord, Session};
use crate::timer;

/// Locally cached notifications, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationState {
    pub items: Vec<NotificationRecord>,
    pub last_error: Option<ErrorKind>,
}

impl NotificationState {
    /// Append records whose id is not known yet. Returns how many were added.
    pub fn merge(&mut self, fetched: Vec<NotificationRecord>) -> usize {
        let mut known: HashSet<NotificationId> = self.items.iter().map(|n| n.id).collect();
        let before = self.items.len();
        for record in fetched {
            if known.insert(record.id) {
                self.items.push(record);
            }
        }
        self.items.len() - before
    }

    /// Flip `read` for `id`. Returns `false` when the id is unknown.
    fn confirm_read(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(record) => {
                record.read = true;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: NotificationId) -> Option<&NotificationRecord> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn ids(&self) -> Vec<NotificationId> {
        self.items.iter().map(|n| n.id).collect()
    }
}

/// Result of a single poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The fetch succeeded and `added` new records were merged.
    Applied { added: usize },
    /// The fetch failed; `last_error` was updated.
    Failed(ErrorKind),
    /// The handle was stopped or superseded; nothing changed.
    Discarded,
}

#[derive(Debug, Default)]
struct Shared {
    state: NotificationState,
    generation: u64,
}

type SharedRef = Arc<Mutex<Shared>>;

fn lock(shared: &SharedRef) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cancellation token for one polling loop.
#[derive(Clone, Debug)]
pub struct PollHandle {
    generation: u64,
    shared: SharedRef,
}

impl PollHandle {
    /// Whether this handle still owns the polling loop.
    pub fn is_active(&self) -> bool {
        lock(&self.shared).generation == self.generation
    }

    /// Stop this loop. A no-op if a newer `start` already superseded it.
    pub fn stop(&self) {
        let mut shared = lock(&self.shared);
        if shared.generation == self.generation {
            shared.generation += 1;
        }
    }
}

/// Owner of the notification cache and its polling loop.
#[derive(Clone, Debug)]
pub struct NotificationCenter<B> {
    backend: B,
    config: NotificationsConfig,
    shared: SharedRef,
}

impl<B> NotificationCenter<B> {
    pub fn new(backend: B, config: &NotificationsConfig) -> Self {
        Self {
            backend,
            config: config.clone(),
            shared: Arc::new(Mutex::new(Shared::default())),
        }
    }

    /// Snapshot of the cached notifications.
    pub fn state(&self) -> NotificationState {
        lock(&self.shared).state.clone()
    }

    /// Begin a polling loop for `session`. Refuses while the session is
    /// loading or anonymous; any previous handle is invalidated.
    pub fn start(&self, session: &Session) -> Option<PollHandle> {
        let Some(user) = session.authenticated_user() else {
            tracing::debug!("not starting notification polling without a user");
            self.stop();
            return None;
        };

        let mut shared = lock(&self.shared);
        shared.generation += 1;
        tracing::debug!(user_id = user.id, generation = shared.generation, "notification polling started");
        Some(PollHandle {
            generation: shared.generation,
            shared: self.shared.clone(),
        })
    }

    /// Invalidate the active handle. In-flight responses are discarded.
    pub fn stop(&self) {
        lock(&self.shared).generation += 1;
    }

    /// Stop polling and forget every cached notification.
    pub fn clear(&self) {
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        shared.state = NotificationState::default();
    }
}

impl<B: NotificationBackend> NotificationCenter<B> {
    /// Fetch once and merge, unless `handle` is no longer active.
    pub async fn tick(&self, handle: &PollHandle) -> TickOutcome {
        if !handle.is_active() {
            return TickOutcome::Discarded;
        }

        let result = self.backend.fetch_notifications().await;

        let mut shared = lock(&self.shared);
        if shared.generation != handle.generation {
            tracing::debug!("discarding notification response after stop");
            return TickOutcome::Discarded;
        }
        match result {
            Ok(records) => {
                let added = shared.state.merge(records);
                shared.state.last_error = None;
                if added > 0 {
                    tracing::debug!(added, "merged new notifications");
                }
                TickOutcome::Applied { added }
            }
            Err(e) => {
                tracing::warn!("notification fetch failed: {e}");
                shared.state.last_error = Some(e.kind);
                TickOutcome::Failed(e.kind)
            }
        }
    }

    /// Poll immediately, then every interval, until `handle` is stopped.
    /// `on_change` sees the state after every applied or failed tick.
    pub async fn run(&self, handle: PollHandle, mut on_change: impl FnMut(&NotificationState)) {
        let mut failures = 0u32;
        loop {
            match self.tick(&handle).await {
                TickOutcome::Applied { .. } => failures = 0,
                TickOutcome::Failed(_) => failures = failures.saturating_add(1),
                TickOutcome::Discarded => break,
            }
            on_change(&self.state());

            timer::sleep(self.config.delay_after(failures)).await;
            if !handle.is_active() {
                break;
            }
        }
        tracing::debug!("notification polling loop exited");
    }

    /// Persist the read flag, then reflect it locally. On failure nothing
    /// changes locally and the error is returned.
    pub async fn mark_as_read(&self, id: NotificationId) -> Result<(), ClientError> {
        let record = self.backend.mark_read(id).await.map_err(|e| {
            tracing::error!(id, "marking notification read failed: {e}");
            e
        })?;

        let mut shared = lock(&self.shared);
        if !shared.state.confirm_read(id) {
            tracing::debug!(id = record.id, "read confirmation for an uncached notification");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::memory::MemoryBackend;
    use crate::models::{NotificationKind, User};

    fn note(id: NotificationId) -> NotificationRecord {
        NotificationRecord {
            id,
            message: format!("notification {id}"),
            kind: NotificationKind::Info,
            created_at: "2024-05-01T10:00:00".to_string(),
            read: false,
        }
    }

    fn ana() -> User {
        User {
            id: 1,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            is_admin: false,
            is_banned: false,
            created_at: None,
        }
    }

    fn logged_in_backend() -> MemoryBackend {
        let backend = MemoryBackend::new().with_user(ana(), "secret1");
        backend.open_session(1);
        backend
    }

    fn center(backend: MemoryBackend) -> NotificationCenter<MemoryBackend> {
        NotificationCenter::new(backend, &NotificationsConfig::default())
    }

    #[test]
    fn test_merge_keeps_first_seen_order_without_duplicates() {
        let mut state = NotificationState::default();
        assert_eq!(state.merge(vec![note(3), note(1), note(3)]), 2);
        assert_eq!(state.merge(vec![note(1), note(7), note(2)]), 2);
        assert_eq!(state.merge(vec![]), 0);
        assert_eq!(state.ids(), vec![3, 1, 7, 2]);
    }

    #[test]
    fn test_merge_never_overwrites_existing_records() {
        let mut state = NotificationState::default();
        state.merge(vec![note(1)]);
        assert!(state.confirm_read(1));

        let mut stale = note(1);
        stale.message = "changed".to_string();
        state.merge(vec![stale]);

        let record = state.get(1).unwrap();
        assert!(record.read);
        assert_eq!(record.message, "notification 1");
        assert_eq!(state.unread_count(), 0);
    }

    #[test]
    fn test_start_refuses_without_user() {
        let center = center(MemoryBackend::new());
        assert!(center.start(&Session::default()).is_none());
        assert!(center.start(&Session::anonymous()).is_none());

        let loading = Session {
            user: Some(ana()),
            loading: true,
        };
        assert!(center.start(&loading).is_none());
        assert!(center.start(&Session::authenticated(ana())).is_some());
    }

    #[tokio::test]
    async fn test_overlapping_ticks_union_in_order() {
        let backend = logged_in_backend();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();

        backend.set_notifications(vec![note(1), note(2)]);
        assert_eq!(center.tick(&handle).await, TickOutcome::Applied { added: 2 });

        backend.set_notifications(vec![note(2), note(3)]);
        assert_eq!(center.tick(&handle).await, TickOutcome::Applied { added: 1 });

        assert_eq!(center.state().ids(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_union_over_many_ticks() {
        let backend = logged_in_backend();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();

        let batches: [&[NotificationId]; 4] = [&[5, 4], &[4, 9, 5], &[], &[1, 9, 2, 5]];
        for batch in batches {
            backend.set_notifications(batch.iter().copied().map(note).collect());
            center.tick(&handle).await;
        }
        assert_eq!(center.state().ids(), vec![5, 4, 9, 1, 2]);
    }

    #[tokio::test]
    async fn test_failed_tick_records_error_and_keeps_items() {
        let backend = logged_in_backend();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();

        backend.set_notifications(vec![note(1)]);
        center.tick(&handle).await;

        backend.set_offline(true);
        assert_eq!(center.tick(&handle).await, TickOutcome::Failed(ErrorKind::Network));
        assert_eq!(center.tick(&handle).await, TickOutcome::Failed(ErrorKind::Network));
        let state = center.state();
        assert_eq!(state.ids(), vec![1]);
        assert_eq!(state.last_error, Some(ErrorKind::Network));

        backend.set_offline(false);
        center.tick(&handle).await;
        assert_eq!(center.state().last_error, None);
    }

    #[tokio::test]
    async fn test_every_failure_updates_last_error() {
        let backend = logged_in_backend();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();

        backend.set_offline(true);
        center.tick(&handle).await;
        assert_eq!(center.state().last_error, Some(ErrorKind::Network));

        backend.set_offline(false);
        backend.close_session();
        center.tick(&handle).await;
        assert_eq!(center.state().last_error, Some(ErrorKind::Auth));
    }

    #[tokio::test]
    async fn test_response_after_stop_is_discarded() {
        let mut backend = logged_in_backend();
        let gate = backend.gate_fetch();
        backend.set_notifications(vec![note(1)]);
        let center = center(backend);
        let handle = center.start(&Session::authenticated(ana())).unwrap();

        let (outcome, _) = tokio::join!(center.tick(&handle), async {
            center.stop();
            gate.open();
        });

        assert_eq!(outcome, TickOutcome::Discarded);
        assert_eq!(center.state(), NotificationState::default());
    }

    #[tokio::test]
    async fn test_restart_discards_previous_handle() {
        let backend = logged_in_backend();
        backend.set_notifications(vec![note(1)]);
        let center = center(backend);

        let old = center.start(&Session::authenticated(ana())).unwrap();
        let new = center.start(&Session::authenticated(ana())).unwrap();
        assert!(!old.is_active());
        assert_eq!(center.tick(&old).await, TickOutcome::Discarded);

        old.stop();
        assert!(new.is_active());
        assert_eq!(center.tick(&new).await, TickOutcome::Applied { added: 1 });
    }

    #[tokio::test]
    async fn test_mark_as_read_after_confirmation() {
        let backend = logged_in_backend();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();
        backend.set_notifications(vec![note(1), note(2)]);
        center.tick(&handle).await;

        center.mark_as_read(2).await.unwrap();
        let state = center.state();
        assert!(!state.get(1).unwrap().read);
        assert!(state.get(2).unwrap().read);
        assert!(backend.server_notification(2).unwrap().read);
        assert_eq!(state.unread_count(), 1);
    }

    #[tokio::test]
    async fn test_mark_as_read_failure_leaves_state() {
        let backend = logged_in_backend();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();
        backend.set_notifications(vec![note(1)]);
        center.tick(&handle).await;
        let before = center.state();

        backend.set_fail_mark_read(true);
        let err = center.mark_as_read(1).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(center.state(), before);

        backend.set_fail_mark_read(false);
        let err = center.mark_as_read(42).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(center.state(), before);
    }

    #[tokio::test]
    async fn test_tick_after_mark_read_does_not_resurrect_unread() {
        let backend = logged_in_backend();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();
        backend.set_notifications(vec![note(1)]);
        center.tick(&handle).await;
        center.mark_as_read(1).await.unwrap();

        // server still reports the stale unread copy
        backend.set_notifications(vec![note(1), note(2)]);
        center.tick(&handle).await;
        assert!(center.state().get(1).unwrap().read);
    }

    #[tokio::test]
    async fn test_mark_read_during_inflight_fetch_stays_read() {
        let mut backend = logged_in_backend();
        let gate = backend.gate_fetch();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();
        backend.set_notifications(vec![note(1)]);
        gate.open();
        center.tick(&handle).await;

        // The fetch snapshots 1 as unread, then waits while the mark confirms.
        backend.set_notifications(vec![note(1), note(2)]);
        let (outcome, marked) = tokio::join!(center.tick(&handle), async {
            let marked = center.mark_as_read(1).await;
            gate.open();
            marked
        });

        marked.unwrap();
        assert_eq!(outcome, TickOutcome::Applied { added: 1 });
        assert!(backend.server_notification(1).unwrap().read);
        let state = center.state();
        assert!(state.get(1).unwrap().read);
        assert_eq!(state.unread_count(), 1);
    }

    #[tokio::test]
    async fn test_clear_forgets_items() {
        let backend = logged_in_backend();
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();
        backend.set_notifications(vec![note(1)]);
        center.tick(&handle).await;

        center.clear();
        assert!(!handle.is_active());
        assert_eq!(center.state(), NotificationState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_on_interval_until_stopped() {
        let backend = logged_in_backend();
        backend.set_notifications(vec![note(1)]);
        let center = center(backend.clone());
        let handle = center.start(&Session::authenticated(ana())).unwrap();

        let mut updates = 0;
        let stopper = handle.clone();
        tokio::join!(
            center.run(handle, |_| updates += 1),
            async {
                tokio::time::sleep(Duration::from_secs(65)).await;
                stopper.stop();
            }
        );

        // ticks at 0s, 30s and 60s; the loop notices the stop after its next sleep
        assert_eq!(backend.calls("fetch_notifications"), 3);
        assert_eq!(updates, 3);
        assert_eq!(center.state().ids(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_backs_off_when_enabled() {
        let backend = logged_in_backend();
        backend.set_offline(true);
        let config = NotificationsConfig {
            backoff: true,
            ..NotificationsConfig::default()
        };
        let center = NotificationCenter::new(backend.clone(), &config);
        let handle = center.start(&Session::authenticated(ana())).unwrap();

        let stopper = handle.clone();
        tokio::join!(center.run(handle, |_| {}), async {
            tokio::time::sleep(Duration::from_secs(100)).await;
            stopper.stop();
        });

        // failures at 0s and 60s; the next attempt would be at 180s
        assert_eq!(backend.calls("fetch_notifications"), 2);
        assert_eq!(center.state().last_error, Some(ErrorKind::Network));
    }
}
