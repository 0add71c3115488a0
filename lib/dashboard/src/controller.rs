//! Subscription list synchronization and cancellation.

use std::future::Future;
use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use watchdash_client::DashboardApi;
use watchdash_core::{ApiError, Subscription, SubscriptionId, UserProfile};

use crate::state::{CancelOutcome, DashboardState, LoadStatus};

/// The dashboard controller.
///
/// Owns two state slices — the subscription collection and the viewer
/// profile — and is the only thing allowed to mutate them. All mutation
/// happens through [`refresh_subscriptions`](Dashboard::refresh_subscriptions),
/// [`refresh_profile`](Dashboard::refresh_profile) and
/// [`cancel_subscription`](Dashboard::cancel_subscription), and only after
/// the server confirmed.
///
/// Every in-flight request is raced against the controller's cancellation
/// token: after [`shutdown`](Dashboard::shutdown) (or drop) pending
/// operations resolve to [`ApiError::Cancelled`] and late completions never
/// touch state.
pub struct Dashboard {
    api: DashboardApi,
    state: RwLock<Inner>,
    cancel: CancellationToken,
}

struct Inner {
    subscriptions: Vec<Subscription>,
    subscriptions_status: LoadStatus,
    profile: Option<UserProfile>,
    profile_status: LoadStatus,
}

impl Dashboard {
    pub fn new(api: DashboardApi) -> Self {
        Self {
            api,
            state: RwLock::new(Inner {
                subscriptions: Vec::new(),
                subscriptions_status: LoadStatus::NotLoaded,
                profile: None,
                profile_status: LoadStatus::NotLoaded,
            }),
            cancel: CancellationToken::new(),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Current subscription collection, in server order.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.state.read().unwrap().subscriptions.clone()
    }

    /// Last successfully fetched profile, if any.
    pub fn profile(&self) -> Option<UserProfile> {
        self.state.read().unwrap().profile.clone()
    }

    /// Full snapshot of both slices and their load statuses.
    pub fn state(&self) -> DashboardState {
        let inner = self.state.read().unwrap();
        DashboardState {
            subscriptions: inner.subscriptions.clone(),
            subscriptions_status: inner.subscriptions_status,
            profile: inner.profile.clone(),
            profile_status: inner.profile_status,
        }
    }

    // ── Initialization ──────────────────────────────────────────────

    /// Run both initial fetches concurrently.
    ///
    /// The two requests have no ordering dependency; each failure is
    /// isolated and leaves the other slice's outcome untouched.
    pub async fn initialize(&self) -> (Result<usize, ApiError>, Result<(), ApiError>) {
        tokio::join!(self.refresh_subscriptions(), self.refresh_profile())
    }

    /// Fire-and-forget initialization.
    ///
    /// Spawns [`initialize`](Dashboard::initialize) on the runtime; the
    /// work is abandoned when the controller shuts down. The handle is
    /// returned so embedders can await completion if they want to.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            debug!("dashboard initial load started");
            let (subscriptions, profile) = self.initialize().await;
            debug!(
                subscriptions_ok = subscriptions.is_ok(),
                profile_ok = profile.is_ok(),
                "dashboard initial load finished"
            );
        })
    }

    /// Fetch the subscription list and replace the collection wholesale.
    ///
    /// On failure the collection keeps its current value (empty on first
    /// call) and only the slice status moves to `Failed`. Returns the
    /// number of entries on success.
    pub async fn refresh_subscriptions(&self) -> Result<usize, ApiError> {
        match self.guarded(self.api.list_subscriptions()).await {
            Ok(subscriptions) => {
                let count = subscriptions.len();
                let mut inner = self.state.write().unwrap();
                inner.subscriptions = subscriptions;
                inner.subscriptions_status = LoadStatus::Loaded;
                debug!(count, "subscription list replaced");
                Ok(count)
            }
            Err(err) => {
                if !matches!(err, ApiError::Cancelled) {
                    self.state.write().unwrap().subscriptions_status =
                        LoadStatus::Failed(err.kind());
                    warn!(error = %err, "subscription fetch failed; collection unchanged");
                }
                Err(err)
            }
        }
    }

    /// Fetch the viewer profile and replace it.
    ///
    /// On failure the profile keeps its current value (absent on first
    /// call) and only the slice status moves to `Failed`.
    pub async fn refresh_profile(&self) -> Result<(), ApiError> {
        match self.guarded(self.api.current_user()).await {
            Ok(profile) => {
                let mut inner = self.state.write().unwrap();
                inner.profile = Some(profile);
                inner.profile_status = LoadStatus::Loaded;
                debug!("profile replaced");
                Ok(())
            }
            Err(err) => {
                if !matches!(err, ApiError::Cancelled) {
                    self.state.write().unwrap().profile_status = LoadStatus::Failed(err.kind());
                    warn!(error = %err, "profile fetch failed; profile unchanged");
                }
                Err(err)
            }
        }
    }

    // ── Cancel ──────────────────────────────────────────────────────

    /// Cancel one subscription.
    ///
    /// The matching entry is removed from the local collection only after
    /// the server confirms; remaining entries keep their relative order.
    /// No re-fetch follows. On failure the collection is untouched and the
    /// tagged error is returned. Concurrent cancels for distinct ids are
    /// independent: removal-by-id applies safely in any completion order,
    /// and an id already absent reports [`CancelOutcome::NotListed`].
    pub async fn cancel_subscription(
        &self,
        id: &SubscriptionId,
    ) -> Result<CancelOutcome, ApiError> {
        match self.guarded(self.api.cancel_subscription(id)).await {
            Ok(()) => {
                let mut inner = self.state.write().unwrap();
                let before = inner.subscriptions.len();
                inner.subscriptions.retain(|s| s.id != *id);
                if inner.subscriptions.len() < before {
                    debug!(%id, "subscription removed after confirmed cancel");
                    Ok(CancelOutcome::Removed)
                } else {
                    debug!(%id, "cancel confirmed for id not held locally");
                    Ok(CancelOutcome::NotListed)
                }
            }
            Err(err) => {
                if !matches!(err, ApiError::Cancelled) {
                    warn!(%id, error = %err, "cancel failed; collection unchanged");
                }
                Err(err)
            }
        }
    }

    // ── Teardown ────────────────────────────────────────────────────

    /// Abandon all in-flight requests.
    ///
    /// Pending operations resolve to [`ApiError::Cancelled`]; responses
    /// that arrive afterwards are dropped without mutating state.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Race a request against controller teardown.
    ///
    /// Also refuses to deliver a success that completed in the same
    /// instant as teardown, so state is never mutated after shutdown.
    async fn guarded<T>(
        &self,
        fut: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let res = tokio::select! {
            _ = self.cancel.cancelled() => return Err(ApiError::Cancelled),
            res = fut => res,
        };
        if self.cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        res
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
