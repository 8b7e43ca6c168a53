use super::{
    email::Email,
    user::{UserAccount, UserError},
    username::Username,
};

/// What a user typed to identify themselves at login: a username, an email, or both.
///
/// When both are supplied an account matching either one is accepted, and a
/// username match takes precedence over an email match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentifier {
    username: Option<Username>,
    email: Option<Email>,
}

impl LoginIdentifier {
    /// Blank fields are treated as absent. A supplied field that is not a
    /// well-formed username or email can never match an account, so it is
    /// dropped rather than rejected.
    pub fn parse(username: Option<&str>, email: Option<&str>) -> Result<Self, UserError> {
        let username = non_blank(username);
        let email = non_blank(email);

        if username.is_none() && email.is_none() {
            return Err(UserError::MissingIdentifier);
        }

        Ok(Self {
            username: username.and_then(|u| Username::parse(u).ok()),
            email: email.and_then(|e| Email::parse(e).ok()),
        })
    }

    /// True when nothing usable was supplied, so no account can match.
    pub fn is_unmatchable(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn matches_username(&self, account: &UserAccount) -> bool {
        self.username.as_ref() == Some(&account.username)
    }

    pub fn matches_email(&self, account: &UserAccount) -> bool {
        self.email.as_ref() == Some(&account.email)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
