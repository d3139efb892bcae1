//! Ticket payload schema and validation boundary
//!
//! Every payload is validated here before it reaches storage. A failed
//! validation must produce zero side effects, so the service calls
//! `validate()` before touching the repository.

use serde::{Deserialize, Serialize};

use super::error::TicketError;

/// Ticket severity. Closed set; unknown values are rejected at the
/// boundary rather than coerced or defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl Risk {
    /// The persisted string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Risk::Low => "low",
            Risk::Medium => "medium",
            Risk::High => "high",
        }
    }

    /// Parse the persisted/wire string form
    pub fn parse(s: &str) -> Result<Self, TicketError> {
        match s {
            "low" => Ok(Risk::Low),
            "medium" => Ok(Risk::Medium),
            "high" => Ok(Risk::High),
            other => Err(TicketError::SchemaValidation {
                field: "risk".to_string(),
                reason: format!("'{}' is not one of low, medium, high", other),
            }),
        }
    }
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new-ticket payload, before any server-generated fields exist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDraft {
    pub user_id: String,
    pub thread_id: String,
    pub user_name: String,
    pub subject: String,
    pub description: String,
    pub risk: Risk,
}

impl TicketDraft {
    /// Validate field constraints. All string fields are required and
    /// non-empty; `risk` is already a closed enum by construction.
    pub fn validate(&self) -> Result<(), TicketError> {
        require_non_empty("user_id", &self.user_id)?;
        require_non_empty("thread_id", &self.thread_id)?;
        require_non_empty("user_name", &self.user_name)?;
        require_non_empty("subject", &self.subject)?;
        require_non_empty("description", &self.description)?;
        Ok(())
    }
}

/// A partial update to an existing ticket. Only supplied fields change;
/// this is the authoritative edit contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<Risk>,
}

impl TicketPatch {
    /// True when the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.subject.is_none()
            && self.description.is_none()
            && self.risk.is_none()
    }

    /// Validate the fields that were supplied. A patch with no fields
    /// at all is rejected; it would be a silent no-op edit.
    pub fn validate(&self) -> Result<(), TicketError> {
        if self.is_empty() {
            return Err(TicketError::SchemaValidation {
                field: "patch".to_string(),
                reason: "at least one field must be supplied".to_string(),
            });
        }
        if let Some(user_name) = &self.user_name {
            require_non_empty("user_name", user_name)?;
        }
        if let Some(subject) = &self.subject {
            require_non_empty("subject", subject)?;
        }
        if let Some(description) = &self.description {
            require_non_empty("description", description)?;
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), TicketError> {
    if value.trim().is_empty() {
        return Err(TicketError::SchemaValidation {
            field: field.to_string(),
            reason: "must be a non-empty string".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TicketDraft {
        TicketDraft {
            user_id: "u1".to_string(),
            thread_id: "u1:chat-001".to_string(),
            user_name: "Ana".to_string(),
            subject: "Login issue".to_string(),
            description: "Cannot sign in".to_string(),
            risk: Risk::Medium,
        }
    }

    #[test]
    fn test_risk_round_trip() {
        for s in ["low", "medium", "high"] {
            assert_eq!(Risk::parse(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_risk_rejects_unknown_values() {
        for s in ["urgent", "LOW", "critical", ""] {
            assert!(matches!(
                Risk::parse(s),
                Err(TicketError::SchemaValidation { .. })
            ));
        }
    }

    #[test]
    fn test_draft_validates() {
        assert!(draft().validate().is_ok());

        let mut d = draft();
        d.subject = "   ".to_string();
        assert!(matches!(
            d.validate(),
            Err(TicketError::SchemaValidation { ref field, .. }) if field == "subject"
        ));
    }

    #[test]
    fn test_patch_validates_only_supplied_fields() {
        let patch = TicketPatch {
            risk: Some(Risk::High),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
        assert!(!patch.is_empty());

        let bad = TicketPatch {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        assert!(TicketPatch::default().is_empty());
        assert!(TicketPatch::default().validate().is_err());
    }
}
