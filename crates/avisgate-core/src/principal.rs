use std::collections::BTreeSet;
use std::fmt;

/// A user known to the principal store.
///
/// The identifier is the user's email address and is what bearer tokens carry as
/// their subject. The gateway only ever reads principals; creating them is the
/// registration flow's job.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    pub identifier: String,
    pub full_name: Option<String>,
    pub credential_hash: String,
    pub authorities: BTreeSet<String>,
}

impl Principal {
    pub fn new(identifier: impl Into<String>, credential_hash: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            full_name: None,
            credential_hash: credential_hash.into(),
            authorities: BTreeSet::new(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authorities.insert(authority.into());
        self
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}

// The credential hash stays out of logs.
impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("identifier", &self.identifier)
            .field("full_name", &self.full_name)
            .field("credential_hash", &"[REDACTED]")
            .field("authorities", &self.authorities)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_credential_hash() {
        let principal = Principal::new("a@b.com", "$2b$04$secrethashvalue");
        let rendered = format!("{:?}", principal);

        assert!(rendered.contains("a@b.com"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secrethashvalue"));
    }

    #[test]
    fn test_authorities() {
        let principal = Principal::new("a@b.com", "hash")
            .with_authority("ADMIN")
            .with_authority("ADMIN");

        assert!(principal.has_authority("ADMIN"));
        assert!(!principal.has_authority("USER"));
        assert_eq!(principal.authorities.len(), 1);
    }
}
