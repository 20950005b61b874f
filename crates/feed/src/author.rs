//! Author shaping: user records to feed author objects.

use restfeed_core::content::User;
use serde::{Deserialize, Serialize};

/// Pixel size requested for author avatars.
pub const AVATAR_SIZE: u32 = 512;

/// A feed author object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AuthorRef {
    /// Build from a user record.
    ///
    /// `url` prefers the user's own site, then their Twitter profile.
    /// `avatar` prefers an explicit avatar, then Gravatar when enabled.
    pub fn from_user(user: &User, gravatar: bool) -> Self {
        let url = user
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(str::to_string)
            .or_else(|| user.twitter.as_deref().and_then(twitter_url));

        let avatar = user
            .avatar
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .map(str::to_string)
            .or_else(|| {
                if gravatar {
                    gravatar_url(&user.email, AVATAR_SIZE)
                } else {
                    None
                }
            });

        Self {
            name: user.display_name.clone(),
            url,
            avatar,
        }
    }
}

/// Profile URL for a Twitter handle; a single leading "@" is dropped.
pub fn twitter_url(handle: &str) -> Option<String> {
    let handle = handle.trim();
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    if handle.is_empty() {
        return None;
    }
    Some(format!("https://twitter.com/{handle}"))
}

/// Gravatar URL for an email address.
pub fn gravatar_url(email: &str, size: u32) -> Option<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return None;
    }
    let hash = md5::compute(email.as_bytes());
    Some(format!(
        "https://secure.gravatar.com/avatar/{hash:x}?s={size}&d=mm"
    ))
}
