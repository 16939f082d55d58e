//! Email/password login.

use std::fmt;

use crate::Result;
use crate::error::InvalidInputError;

/// What the buyer types into the login form.
///
/// The email is trimmed and lowercased; the password is kept verbatim and
/// redacted from `Debug`.
///
/// ```
/// use ticketera_core::Credentials;
///
/// let creds = Credentials::new(" Ana@Example.CL ", "s3creta").unwrap();
/// assert_eq!(creds.email(), "ana@example.cl");
/// assert!(Credentials::new("ana", "s3creta").is_err());
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: &str, password: impl Into<String>) -> Result<Self> {
        let email = email.trim().to_lowercase();
        let password = password.into();

        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(InvalidInputError::Field {
                    field: "email",
                    reason: format!("'{}' is not an email address", email),
                }
                .into());
            }
        }
        if password.is_empty() {
            return Err(InvalidInputError::Field {
                field: "password",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Only for building the login body.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credentials({}, ***)", self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let creds = Credentials::new("  ANA@example.cl", "x").unwrap();
        assert_eq!(creds.email(), "ana@example.cl");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Credentials::new("", "x").is_err());
        assert!(Credentials::new("@example.cl", "x").is_err());
        assert!(Credentials::new("ana@localhost", "x").is_err());
        assert!(Credentials::new("ana@example.cl", "").is_err());
    }

    #[test]
    fn debug_omits_password() {
        let creds = Credentials::new("ana@example.cl", "secret123").unwrap();
        let debug = format!("{:?}", creds);
        assert_eq!(debug, "Credentials(ana@example.cl, ***)");
    }
}
