use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Avatar shown when a profile has no image of its own.
pub const DEFAULT_AVATAR: &str = "/static/images/default-avatar.png";

/// Subscription identifier.
///
/// The server emits integer ids today, but the contract allows strings;
/// both decode into the same canonical string form, so `"2"` and `2`
/// compare equal and build the same cancel URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for SubscriptionId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for SubscriptionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for SubscriptionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SubscriptionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = SubscriptionId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer subscription id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(SubscriptionId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(SubscriptionId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(SubscriptionId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// One entry of the subscription list.
///
/// `type` on the wire is a category label ("Anime", "Manga", ...); the Rust
/// field is `kind` because `type` is reserved. `progress` is freeform server
/// text ("12 episodes", "40 chapters") and is never interpreted client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub progress: String,
    pub image: String,
}

/// The signed-in viewer, as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UserProfile {
    /// Image to render for this profile.
    ///
    /// Falls back to [`DEFAULT_AVATAR`] when the server sent no image or an
    /// empty string.
    pub fn avatar_url(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_AVATAR,
        }
    }
}
