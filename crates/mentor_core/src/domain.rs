//! crates/mentor_core/src/domain.rs
//!
//! Defines the pure, core data structures for the tutoring platform.
//! These structs double as the stored document shapes: every field except
//! `id` is (de)serialized, because the id is the document key in the store
//! and is attached to the struct on load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

//=========================================================================================
// User Accounts
//=========================================================================================

/// The role a user signed up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    Volunteer,
}

impl Role {
    /// Parses a role name as it arrives from the UI. Returns `None` for
    /// anything outside the two known roles.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "student" => Some(Role::Student),
            "volunteer" => Some(Role::Volunteer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Volunteer => write!(f, "volunteer"),
        }
    }
}

/// A login account, created at signup and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Document key in the `users` collection; not stored as a field.
    #[serde(skip)]
    pub id: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl UserAccount {
    // TODO: hash passwords (argon2) instead of storing and comparing plaintext.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

//=========================================================================================
// Student Profiles
//=========================================================================================

/// Who produced a chat turn in a student's mentoring history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Student,
    Mentor,
}

impl TurnRole {
    /// Label used when a turn is rendered into the model prompt.
    pub fn label(&self) -> &'static str {
        match self {
            TurnRole::Student => "Student",
            TurnRole::Mentor => "Mentor",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnRole::Student => write!(f, "student"),
            TurnRole::Mentor => write!(f, "mentor"),
        }
    }
}

/// A single message in a student's conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub message: String,
}

/// Per-student record. History is append-only and never pruned in storage;
/// only the prompt context is windowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub weak_topics: Vec<String>,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

//=========================================================================================
// Volunteer Profiles
//=========================================================================================

/// A volunteer's self-reported presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolunteerStatus {
    Available,
    Busy,
    #[default]
    Offline,
}

impl VolunteerStatus {
    /// Parses a status name as it arrives from the UI. Returns `None` for
    /// anything outside the three known statuses.
    pub fn parse(value: &str) -> Option<VolunteerStatus> {
        match value {
            "available" => Some(VolunteerStatus::Available),
            "busy" => Some(VolunteerStatus::Busy),
            "offline" => Some(VolunteerStatus::Offline),
            _ => None,
        }
    }
}

impl std::fmt::Display for VolunteerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolunteerStatus::Available => write!(f, "available"),
            VolunteerStatus::Busy => write!(f, "busy"),
            VolunteerStatus::Offline => write!(f, "offline"),
        }
    }
}

/// An availability window on one weekday, as time-of-day strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

/// Per-volunteer record. The counters only ever advance through session
/// completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerProfile {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub status: VolunteerStatus,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub availability: BTreeMap<String, TimeWindow>,
    #[serde(default)]
    pub students_assigned: Vec<String>,
    #[serde(default)]
    pub sessions_completed: u64,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub rating: f64,
}

//=========================================================================================
// Mentoring Sessions
//=========================================================================================

/// Lifecycle of a mentoring session: `scheduled` transitions to either
/// `completed` or `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Scheduled => write!(f, "scheduled"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A scheduled or finished mentoring engagement between one volunteer and
/// one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(skip)]
    pub id: String,
    pub volunteer_id: String,
    pub student_id: String,
    pub topic: String,
    pub scheduled_time: String,
    pub status: SessionStatus,
    /// Whole minutes, recorded on completion; 0 while scheduled.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

//=========================================================================================
// Derived Statistics
//=========================================================================================

/// Volunteer-facing statistics, projected off the current profile on every
/// call. Not stored anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerStats {
    pub sessions_completed: u64,
    pub total_hours: f64,
    pub students_helped: usize,
    pub rating: f64,
    pub topics: Vec<String>,
    pub status: VolunteerStatus,
}
