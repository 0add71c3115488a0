//! The dashboard controller.
//!
//! Owns the viewer's subscription list and profile, keeps them in sync
//! with the remote service, and funnels the one write operation (cancel)
//! through a confirmed, order-preserving local update.

pub mod controller;
pub mod state;

pub use controller::Dashboard;
pub use state::{CancelOutcome, DashboardState, LoadStatus};
