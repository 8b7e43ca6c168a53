use serde::Serialize;

use super::user::UserError;

/// Reference to an image hosted by the media provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn parse(raw: &str) -> Result<Self, UserError> {
        let trimmed = raw.trim();

        let has_scheme = trimmed.starts_with("https://") || trimmed.starts_with("http://");
        if !has_scheme || trimmed.chars().any(char::is_whitespace) {
            return Err(UserError::InvalidImageUrl);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
