//! User entity - a registered citizen account

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User entity representing a citizen account.
///
/// The password hash is deliberately not part of the entity; it is stored and
/// fetched separately so user values can cross layer boundaries without
/// carrying credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub forename: String,
    pub surname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new User with required fields
    #[must_use]
    pub fn new(email: String, forename: String, surname: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            forename,
            surname,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Full display name: forename + surname
    pub fn display_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }

    /// Check if the account has been soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// The placeholder address a soft-deleted account's email is rewritten to.
    ///
    /// Frees the real address for re-registration while keeping the row
    /// internally unique.
    pub fn anonymized_email(id: Uuid) -> String {
        format!("{id}@deleted.local")
    }

    /// Update forename and surname
    pub fn set_name(&mut self, forename: String, surname: String) {
        self.forename = forename;
        self.surname = surname;
        self.updated_at = Utc::now();
    }

    /// Update the email address
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }
}
