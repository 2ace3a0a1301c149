//! Core domain models for the report lifecycle.
//!
//! These types are the source of truth for what roles and statuses exist.
//! The `db` crate stores both as plain `TEXT`; the canonical string forms
//! are defined by the `Display`/`FromStr` impls here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Access level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Citizen,
    Official,
    Admin,
}

impl UserRole {
    /// The canonical database/API string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "CITIZEN",
            Self::Official => "OFFICIAL",
            Self::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CITIZEN" => Ok(Self::Citizen),
            "OFFICIAL" => Ok(Self::Official),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// ReportStatus
// ---------------------------------------------------------------------------

/// Lifecycle label on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Open,
    InProgress,
    Approved,
    Resolved,
    Rejected,
}

impl ReportStatus {
    /// The canonical database/API string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Approved => "APPROVED",
            Self::Resolved => "RESOLVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "APPROVED" => Ok(Self::Approved),
            "RESOLVED" => Ok(Self::Resolved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("unknown report status: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// NewReport
// ---------------------------------------------------------------------------

/// A citizen's report submission, before it has been persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub user_id: Uuid,
    pub category: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub ward_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            ReportStatus::Open,
            ReportStatus::InProgress,
            ReportStatus::Approved,
            ReportStatus::Resolved,
            ReportStatus::Rejected,
        ] {
            assert_eq!(ReportStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(ReportStatus::from_str("CLOSED").is_err());
        assert!(ReportStatus::from_str("open").is_err());
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [UserRole::Citizen, UserRole::Official, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()), Ok(role));
        }
    }
}
