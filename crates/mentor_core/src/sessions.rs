//! crates/mentor_core/src/sessions.rs
//!
//! The session ledger: creates, lists, completes and cancels mentoring
//! sessions, and advances the owning volunteer's counters on completion.

use crate::domain::{Session, SessionStatus, VolunteerProfile};
use crate::ports::{from_fields, to_fields, DatabaseService, PortResult};
use crate::profiles::ProfileStore;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const SESSIONS_COLLECTION: &str = "sessions";

/// Store-backed ledger of mentoring sessions.
///
/// The intended lifecycle is `scheduled → completed | cancelled`, both
/// terminal. `complete` and `cancel` do not check the current status before
/// writing: a second call on the same session re-overwrites the terminal
/// fields and, for `complete`, increments the volunteer's counters again.
/// That gap is inherited behavior and is pinned by a test below rather than
/// patched here.
#[derive(Clone)]
pub struct SessionLedger {
    db: Arc<dyn DatabaseService>,
    volunteers: ProfileStore<VolunteerProfile>,
}

impl SessionLedger {
    pub fn new(db: Arc<dyn DatabaseService>, volunteers: ProfileStore<VolunteerProfile>) -> Self {
        Self { db, volunteers }
    }

    /// Creates a scheduled session under a fresh id and returns the id.
    pub async fn create(
        &self,
        volunteer_id: &str,
        student_id: &str,
        topic: &str,
        scheduled_time: &str,
    ) -> PortResult<String> {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            volunteer_id: volunteer_id.to_string(),
            student_id: student_id.to_string(),
            topic: topic.to_string(),
            scheduled_time: scheduled_time.to_string(),
            status: SessionStatus::Scheduled,
            duration: 0,
            notes: String::new(),
            created_at: Utc::now(),
            completed_at: None,
            cancelled_at: None,
            cancellation_reason: None,
        };
        self.db
            .set(SESSIONS_COLLECTION, &session.id, to_fields(&session)?)
            .await?;
        info!("Created session: {}", session.id);
        Ok(session.id)
    }

    /// Upcoming sessions for one volunteer: equality filter on the volunteer
    /// id and status=scheduled, in store iteration order.
    pub async fn list_scheduled(&self, volunteer_id: &str) -> PortResult<Vec<Session>> {
        let rows = self
            .db
            .find_eq(
                SESSIONS_COLLECTION,
                &[
                    ("volunteer_id", json!(volunteer_id)),
                    ("status", json!("scheduled")),
                ],
                None,
            )
            .await?;

        let mut sessions = Vec::with_capacity(rows.len());
        for (id, fields) in rows {
            let mut session: Session = from_fields(fields)?;
            session.id = id;
            sessions.push(session);
        }
        Ok(sessions)
    }

    /// Marks a session completed, records duration and notes, and advances
    /// the owning volunteer's `sessions_completed` and `total_hours`.
    ///
    /// Returns `false` (not an error) when the session id does not exist.
    /// The counter update is a plain load-modify-save on the profile, so two
    /// racing completions can double-count.
    pub async fn complete(
        &self,
        session_id: &str,
        duration_minutes: u32,
        notes: &str,
    ) -> PortResult<bool> {
        let fields = match self.db.get(SESSIONS_COLLECTION, session_id).await? {
            Some(fields) => fields,
            None => return Ok(false),
        };
        let mut session: Session = from_fields(fields)?;
        session.id = session_id.to_string();

        session.status = SessionStatus::Completed;
        session.duration = duration_minutes;
        session.notes = notes.to_string();
        session.completed_at = Some(Utc::now());
        self.db
            .set(SESSIONS_COLLECTION, session_id, to_fields(&session)?)
            .await?;

        let mut volunteer = self.volunteers.load(&session.volunteer_id).await?;
        volunteer.sessions_completed += 1;
        volunteer.total_hours += f64::from(duration_minutes) / 60.0;
        self.volunteers.save(&volunteer).await?;

        info!("Completed session {}", session_id);
        Ok(true)
    }

    /// Marks a session cancelled with a reason. Same existence contract as
    /// `complete`; never touches volunteer counters.
    pub async fn cancel(&self, session_id: &str, reason: &str) -> PortResult<bool> {
        let fields = match self.db.get(SESSIONS_COLLECTION, session_id).await? {
            Some(fields) => fields,
            None => return Ok(false),
        };
        let mut session: Session = from_fields(fields)?;
        session.id = session_id.to_string();

        session.status = SessionStatus::Cancelled;
        session.cancellation_reason = Some(reason.to_string());
        session.cancelled_at = Some(Utc::now());
        self.db
            .set(SESSIONS_COLLECTION, session_id, to_fields(&session)?)
            .await?;

        info!("Cancelled session {}", session_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::profiles::Profile;

    fn ledger() -> (Arc<dyn DatabaseService>, SessionLedger, ProfileStore<VolunteerProfile>) {
        let db: Arc<dyn DatabaseService> = Arc::new(MemoryStore::new());
        let volunteers = ProfileStore::new(db.clone());
        let ledger = SessionLedger::new(db.clone(), volunteers.clone());
        (db, ledger, volunteers)
    }

    #[tokio::test]
    async fn created_session_shows_up_as_scheduled() {
        let (_, ledger, _) = ledger();

        let id = ledger
            .create("v1", "s1", "DSA", "2024-03-01 17:00")
            .await
            .unwrap();

        let scheduled = ledger.list_scheduled("v1").await.unwrap();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].id, id);
        assert_eq!(scheduled[0].status, SessionStatus::Scheduled);
        assert_eq!(scheduled[0].duration, 0);
        assert_eq!(scheduled[0].notes, "");

        assert!(ledger.list_scheduled("v2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completing_a_session_advances_the_volunteer_counters() {
        let (_, ledger, volunteers) = ledger();
        let id = ledger
            .create("v1", "s1", "OS", "2024-03-01 17:00")
            .await
            .unwrap();

        let done = ledger.complete(&id, 60, "went well").await.unwrap();
        assert!(done);

        let volunteer = volunteers.load("v1").await.unwrap();
        assert_eq!(volunteer.sessions_completed, 1);
        assert_eq!(volunteer.total_hours, 1.0);

        // The completed session left the scheduled list.
        assert!(ledger.list_scheduled("v1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completing_an_unknown_session_reports_false_and_mutates_nothing() {
        let (db, ledger, _) = ledger();

        let done = ledger.complete("nonexistent", 60, "").await.unwrap();
        assert!(!done);

        // Neither a session nor a volunteer profile was written.
        assert!(db.get("sessions", "nonexistent").await.unwrap().is_none());
        assert!(db
            .find_eq(VolunteerProfile::COLLECTION, &[], None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn cancelling_records_the_reason_and_leaves_counters_alone() {
        let (db, ledger, volunteers) = ledger();
        let id = ledger
            .create("v1", "s1", "DBMS", "2024-03-02 10:00")
            .await
            .unwrap();

        let done = ledger.cancel(&id, "student unavailable").await.unwrap();
        assert!(done);
        assert!(ledger.list_scheduled("v1").await.unwrap().is_empty());

        let fields = db.get("sessions", &id).await.unwrap().unwrap();
        assert_eq!(fields["status"], "cancelled");
        assert_eq!(fields["cancellation_reason"], "student unavailable");
        assert!(fields.contains_key("cancelled_at"));

        let volunteer = volunteers.load("v1").await.unwrap();
        assert_eq!(volunteer.sessions_completed, 0);
        assert_eq!(volunteer.total_hours, 0.0);

        assert!(!ledger.cancel("nonexistent", "").await.unwrap());
    }

    /// Known hazard, preserved on purpose: there is no terminal-state guard,
    /// so completing the same session twice reports success twice and counts
    /// the volunteer's stats twice.
    #[tokio::test]
    async fn completing_twice_double_counts_volunteer_stats() {
        let (_, ledger, volunteers) = ledger();
        let id = ledger
            .create("v1", "s1", "OS", "2024-03-01 17:00")
            .await
            .unwrap();

        assert!(ledger.complete(&id, 30, "").await.unwrap());
        assert!(ledger.complete(&id, 30, "").await.unwrap());

        let volunteer = volunteers.load("v1").await.unwrap();
        assert_eq!(volunteer.sessions_completed, 2);
        assert_eq!(volunteer.total_hours, 1.0);
    }

    #[tokio::test]
    async fn sessions_store_documents_without_an_id_field() {
        let (db, ledger, _) = ledger();

        let id = ledger.create("v1", "s1", "AI", "soon").await.unwrap();

        let fields = db.get("sessions", &id).await.unwrap().unwrap();
        assert_eq!(fields["volunteer_id"], "v1");
        assert_eq!(fields["status"], "scheduled");
        assert!(!fields.contains_key("id"));
        // Creating a session does not touch the volunteer's profile.
        assert!(db
            .get(VolunteerProfile::COLLECTION, "v1")
            .await
            .unwrap()
            .is_none());
    }
}
