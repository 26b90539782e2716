#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubscriberEmail(String);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("Please enter your email")]
    Empty,
    #[error("Please enter a valid email address")]
    Malformed,
}

impl SubscriberEmail {
    /// Checks the `local@domain.tld` shape and lowercases the address.
    pub fn parse(email: &str) -> Result<SubscriberEmail, EmailError> {
        if email.trim().is_empty() {
            return Err(EmailError::Empty);
        }

        if !has_email_shape(email) {
            return Err(EmailError::Malformed);
        }

        Ok(Self(email.to_lowercase()))
    }
}

fn has_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Needs at least one character on each side of some dot in the domain.
    domain
        .char_indices()
        .any(|(index, char)| char == '.' && index > 0 && index + 1 < domain.len())
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
