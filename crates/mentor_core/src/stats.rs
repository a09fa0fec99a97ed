//! crates/mentor_core/src/stats.rs
//!
//! Volunteer-facing statistics, projected off the current profile.

use crate::domain::{VolunteerProfile, VolunteerStats};
use crate::ports::PortResult;
use crate::profiles::ProfileStore;

/// Pure projection over the volunteer profile store: no storage of its own,
/// no caching, always reflects the latest saved profile.
#[derive(Clone)]
pub struct StatsAggregator {
    volunteers: ProfileStore<VolunteerProfile>,
}

impl StatsAggregator {
    pub fn new(volunteers: ProfileStore<VolunteerProfile>) -> Self {
        Self { volunteers }
    }

    /// Derives the stats for one volunteer. An unseen id gets the default
    /// profile created on the way (load-or-create), so this never fails for
    /// a valid id.
    pub async fn stats(&self, volunteer_id: &str) -> PortResult<VolunteerStats> {
        let profile = self.volunteers.load(volunteer_id).await?;
        Ok(VolunteerStats {
            sessions_completed: profile.sessions_completed,
            total_hours: profile.total_hours,
            students_helped: profile.students_assigned.len(),
            rating: profile.rating,
            topics: profile.topics,
            status: profile.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VolunteerStatus;
    use crate::memory::MemoryStore;
    use std::sync::Arc;

    fn aggregator() -> (StatsAggregator, ProfileStore<VolunteerProfile>) {
        let volunteers: ProfileStore<VolunteerProfile> =
            ProfileStore::new(Arc::new(MemoryStore::new()));
        (StatsAggregator::new(volunteers.clone()), volunteers)
    }

    #[tokio::test]
    async fn unseen_volunteer_projects_all_zero_stats() {
        let (aggregator, _) = aggregator();

        let stats = aggregator.stats("v-new").await.unwrap();

        assert_eq!(stats.sessions_completed, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.students_helped, 0);
        assert_eq!(stats.rating, 0.0);
        assert!(stats.topics.is_empty());
        assert_eq!(stats.status, VolunteerStatus::Offline);
    }

    #[tokio::test]
    async fn stats_reflect_the_latest_saved_profile() {
        let (aggregator, volunteers) = aggregator();

        let mut profile = volunteers.load("v1").await.unwrap();
        profile.sessions_completed = 4;
        profile.total_hours = 6.5;
        profile.students_assigned = vec!["s1".to_string(), "s2".to_string()];
        profile.topics = vec!["OS".to_string()];
        profile.status = VolunteerStatus::Available;
        volunteers.save(&profile).await.unwrap();

        let stats = aggregator.stats("v1").await.unwrap();
        assert_eq!(stats.sessions_completed, 4);
        assert_eq!(stats.total_hours, 6.5);
        assert_eq!(stats.students_helped, 2);
        assert_eq!(stats.topics, vec!["OS".to_string()]);
        assert_eq!(stats.status, VolunteerStatus::Available);
    }
}
