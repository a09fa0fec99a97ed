//! crates/mentor_core/src/roster.rs
//!
//! Volunteer profile setters (status, weekly availability) and the list of
//! students assigned to a volunteer.

use crate::domain::{StudentProfile, TimeWindow, VolunteerProfile, VolunteerStatus};
use crate::ports::{from_fields, DatabaseService, PortResult};
use crate::profiles::{Profile, ProfileStore};
use std::sync::Arc;
use tracing::info;

/// Status and availability upkeep for volunteers, plus resolution of their
/// assigned students.
#[derive(Clone)]
pub struct VolunteerRoster {
    db: Arc<dyn DatabaseService>,
    volunteers: ProfileStore<VolunteerProfile>,
}

impl VolunteerRoster {
    pub fn new(db: Arc<dyn DatabaseService>, volunteers: ProfileStore<VolunteerProfile>) -> Self {
        Self { db, volunteers }
    }

    /// Sets the volunteer's status. Validation of the incoming status string
    /// happens at the boundary (`VolunteerStatus::parse`); by the time a
    /// value reaches here it is one of the three known statuses.
    pub async fn set_status(
        &self,
        volunteer_id: &str,
        status: VolunteerStatus,
    ) -> PortResult<()> {
        let mut profile = self.volunteers.load(volunteer_id).await?;
        profile.status = status;
        self.volunteers.save(&profile).await?;
        info!("Updated status for {} to {}", volunteer_id, status);
        Ok(())
    }

    /// Upserts the `{start, end}` window for one weekday.
    pub async fn set_availability(
        &self,
        volunteer_id: &str,
        day: &str,
        start: &str,
        end: &str,
    ) -> PortResult<()> {
        let mut profile = self.volunteers.load(volunteer_id).await?;
        profile.availability.insert(
            day.to_string(),
            TimeWindow {
                start: start.to_string(),
                end: end.to_string(),
            },
        );
        self.volunteers.save(&profile).await?;
        info!("Updated availability for {} on {}", volunteer_id, day);
        Ok(())
    }

    /// Resolves the volunteer's `students_assigned` ids into profiles.
    /// Uses non-creating point reads: an id with no stored student profile
    /// is silently skipped rather than lazily created.
    pub async fn assigned_students(&self, volunteer_id: &str) -> PortResult<Vec<StudentProfile>> {
        let profile = self.volunteers.load(volunteer_id).await?;

        let mut students = Vec::new();
        for student_id in &profile.students_assigned {
            if let Some(fields) = self.db.get(StudentProfile::COLLECTION, student_id).await? {
                let mut student: StudentProfile = from_fields(fields)?;
                student.id = student_id.clone();
                students.push(student);
            }
        }
        Ok(students)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::ports::to_fields;

    fn roster() -> (Arc<dyn DatabaseService>, VolunteerRoster, ProfileStore<VolunteerProfile>) {
        let db: Arc<dyn DatabaseService> = Arc::new(MemoryStore::new());
        let volunteers = ProfileStore::new(db.clone());
        let roster = VolunteerRoster::new(db.clone(), volunteers.clone());
        (db, roster, volunteers)
    }

    #[tokio::test]
    async fn set_status_persists_the_new_status() {
        let (_, roster, volunteers) = roster();

        roster
            .set_status("v1", VolunteerStatus::Available)
            .await
            .unwrap();

        let profile = volunteers.load("v1").await.unwrap();
        assert_eq!(profile.status, VolunteerStatus::Available);
    }

    #[tokio::test]
    async fn set_availability_upserts_the_day_window() {
        let (_, roster, volunteers) = roster();

        roster
            .set_availability("v1", "Monday", "17:00", "19:00")
            .await
            .unwrap();
        roster
            .set_availability("v1", "Monday", "18:00", "20:00")
            .await
            .unwrap();
        roster
            .set_availability("v1", "Friday", "09:00", "11:00")
            .await
            .unwrap();

        let profile = volunteers.load("v1").await.unwrap();
        assert_eq!(profile.availability.len(), 2);
        assert_eq!(
            profile.availability["Monday"],
            TimeWindow {
                start: "18:00".to_string(),
                end: "20:00".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn assigned_students_skips_ids_without_a_profile() {
        let (db, roster, volunteers) = roster();

        let known = StudentProfile {
            id: "s1".to_string(),
            weak_topics: vec!["recursion".to_string()],
            history: Vec::new(),
        };
        db.set(StudentProfile::COLLECTION, "s1", to_fields(&known).unwrap())
            .await
            .unwrap();

        let mut profile = volunteers.load("v1").await.unwrap();
        profile.students_assigned = vec!["s1".to_string(), "s-ghost".to_string()];
        volunteers.save(&profile).await.unwrap();

        let students = roster.assigned_students("v1").await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, "s1");
        assert_eq!(students[0].weak_topics, vec!["recursion".to_string()]);

        // The skipped id was not lazily created either.
        assert!(db
            .get(StudentProfile::COLLECTION, "s-ghost")
            .await
            .unwrap()
            .is_none());
    }
}
