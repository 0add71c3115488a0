//! Controller-owned view state.

use watchdash_core::{ErrorKind, Subscription, UserProfile};

/// Load status of one state slice.
///
/// A failed fetch never clobbers the slice's data — it only moves the
/// status to `Failed`, so the presentation layer can tell "no data yet"
/// from "fetch failed" and offer a retry affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// No fetch has completed for this slice.
    NotLoaded,
    /// The slice holds the last successfully fetched value.
    Loaded,
    /// The most recent fetch failed; data is stale or absent.
    Failed(ErrorKind),
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }
}

/// Point-in-time snapshot of the controller's state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Subscriptions in server order, minus confirmed cancellations.
    pub subscriptions: Vec<Subscription>,
    pub subscriptions_status: LoadStatus,
    /// Absent until fetched; never partially updated.
    pub profile: Option<UserProfile>,
    pub profile_status: LoadStatus,
}

/// Local effect of a confirmed cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The matching entry was removed from the local collection.
    Removed,
    /// The server confirmed, but no entry with that id was held locally.
    NotListed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_status_predicates() {
        assert!(!LoadStatus::NotLoaded.is_loaded());
        assert!(LoadStatus::Loaded.is_loaded());
        assert!(LoadStatus::Failed(ErrorKind::Transport).is_failed());
        assert!(!LoadStatus::Loaded.is_failed());
    }
}
