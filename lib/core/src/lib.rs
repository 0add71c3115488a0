pub mod error;
pub mod model;

pub use error::{ApiError, ErrorKind};
pub use model::{Subscription, SubscriptionId, UserProfile, DEFAULT_AVATAR};
