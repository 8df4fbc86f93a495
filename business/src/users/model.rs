//! Wire and cache representations of user resources.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user as served by the remote collection.
///
/// `id` and `avatar` are assigned by the server; every other field may be
/// replaced wholesale by an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub avatar: String,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Copy of this record with the draft's editable fields applied.
    #[must_use]
    pub fn with_draft(&self, draft: &UserDraft) -> Self {
        Self {
            id: self.id,
            email: draft.email.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            avatar: self.avatar.clone(),
        }
    }

    /// Editable fields of this record, e.g. to pre-fill an edit form.
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Fields a caller supplies when creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),
}

impl UserDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Form-level checks: every field filled and the email at least looks
    /// like `local@domain`. The remote API does its own validation.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.first_name.trim().is_empty() {
            return Err(DraftError::MissingField("first name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(DraftError::MissingField("last name"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(DraftError::MissingField("email"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(DraftError::InvalidEmail(email.to_owned())),
        }
    }
}

/// Envelope of `GET /users?page=..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    pub data: Vec<UserRecord>,
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    pub total_pages: u32,
    pub total: u64,
}

/// Envelope of `GET /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleUser {
    pub data: UserRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_envelope_ignores_extra_fields() {
        let body = serde_json::json!({
            "page": 2,
            "per_page": 6,
            "total": 12,
            "total_pages": 2,
            "data": [{
                "id": 7,
                "email": "michael.lawson@reqres.in",
                "first_name": "Michael",
                "last_name": "Lawson",
                "avatar": "https://reqres.in/img/faces/7-image.jpg"
            }],
            "support": { "url": "https://reqres.in/#support-heading", "text": "..." }
        });

        let page: UserPage = serde_json::from_value(body).unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total, 12);
        assert_eq!(page.data[0].full_name(), "Michael Lawson");
    }

    #[test]
    fn test_page_envelope_requires_pagination_fields() {
        let body = serde_json::json!({ "data": [] });
        assert!(serde_json::from_value::<UserPage>(body).is_err());
    }

    #[test]
    fn test_draft_validation() {
        assert!(UserDraft::new("A", "B", "a@b.com").validate().is_ok());
        assert_eq!(
            UserDraft::new(" ", "B", "a@b.com").validate(),
            Err(DraftError::MissingField("first name"))
        );
        assert_eq!(
            UserDraft::new("A", "B", "not-an-email").validate(),
            Err(DraftError::InvalidEmail("not-an-email".to_owned()))
        );
        assert_eq!(
            UserDraft::new("A", "B", "@b.com").validate(),
            Err(DraftError::InvalidEmail("@b.com".to_owned()))
        );
    }

    #[test]
    fn test_with_draft_keeps_identity() {
        let record = UserRecord {
            id: 3,
            email: "old@reqres.in".to_owned(),
            first_name: "Emma".to_owned(),
            last_name: "Wong".to_owned(),
            avatar: "https://reqres.in/img/faces/3-image.jpg".to_owned(),
        };

        let edited = record.with_draft(&UserDraft::new("Em", "W", "new@reqres.in"));

        assert_eq!(edited.id, 3);
        assert_eq!(edited.avatar, record.avatar);
        assert_eq!(edited.email, "new@reqres.in");
        assert_eq!(edited.to_draft(), UserDraft::new("Em", "W", "new@reqres.in"));
    }
}
