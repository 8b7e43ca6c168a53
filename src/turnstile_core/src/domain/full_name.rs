use serde::Serialize;

use super::user::UserError;

const MAX_FULL_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    pub fn parse(raw: &str) -> Result<Self, UserError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.chars().count() > MAX_FULL_NAME_LENGTH {
            return Err(UserError::InvalidFullName);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
