//! crates/mentor_core/src/topics.rs
//!
//! Topic tags on volunteer profiles, and the reverse lookup from a topic to
//! the volunteers who mentor it.

use crate::domain::VolunteerProfile;
use crate::ports::{from_fields, DatabaseService, PortResult};
use crate::profiles::{Profile, ProfileStore};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Manages the `topics` set on volunteer profiles.
#[derive(Clone)]
pub struct TopicDirectory {
    db: Arc<dyn DatabaseService>,
    volunteers: ProfileStore<VolunteerProfile>,
}

impl TopicDirectory {
    pub fn new(db: Arc<dyn DatabaseService>, volunteers: ProfileStore<VolunteerProfile>) -> Self {
        Self { db, volunteers }
    }

    /// Adds a topic the volunteer can mentor. Returns `false` without
    /// saving when the topic is already present, so `topics` never holds
    /// duplicates.
    pub async fn add_topic(&self, volunteer_id: &str, topic: &str) -> PortResult<bool> {
        let mut profile = self.volunteers.load(volunteer_id).await?;

        if profile.topics.iter().any(|t| t == topic) {
            return Ok(false);
        }
        profile.topics.push(topic.to_string());
        self.volunteers.save(&profile).await?;
        info!("Added topic {} for volunteer {}", topic, volunteer_id);
        Ok(true)
    }

    /// Removes every listed topic that is present. Always persists and
    /// always reports `true`, even when nothing changed. The asymmetry with
    /// `add_topic` is inherited behavior, kept as-is.
    pub async fn remove_topics(&self, volunteer_id: &str, topics: &[String]) -> PortResult<bool> {
        let mut profile = self.volunteers.load(volunteer_id).await?;

        profile.topics.retain(|t| !topics.contains(t));
        self.volunteers.save(&profile).await?;
        info!(
            "Removed {} topics from volunteer {}",
            topics.len(),
            volunteer_id
        );
        Ok(true)
    }

    /// All volunteer profiles whose topics contain `topic` exactly.
    /// Case-sensitive: "os" does not match "OS".
    pub async fn by_topic(&self, topic: &str) -> PortResult<Vec<VolunteerProfile>> {
        let rows = self
            .db
            .find_array_contains(VolunteerProfile::COLLECTION, "topics", json!(topic))
            .await?;

        let mut volunteers = Vec::with_capacity(rows.len());
        for (id, fields) in rows {
            let mut profile: VolunteerProfile = from_fields(fields)?;
            profile.id = id;
            volunteers.push(profile);
        }
        Ok(volunteers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn directory() -> (TopicDirectory, ProfileStore<VolunteerProfile>) {
        let db: Arc<dyn DatabaseService> = Arc::new(MemoryStore::new());
        let volunteers = ProfileStore::new(db.clone());
        (TopicDirectory::new(db, volunteers.clone()), volunteers)
    }

    #[tokio::test]
    async fn adding_the_same_topic_twice_reports_false_and_keeps_one_entry() {
        let (directory, volunteers) = directory();

        assert!(directory.add_topic("v1", "DSA").await.unwrap());
        assert!(!directory.add_topic("v1", "DSA").await.unwrap());

        let profile = volunteers.load("v1").await.unwrap();
        assert_eq!(profile.topics, vec!["DSA".to_string()]);
    }

    #[tokio::test]
    async fn removing_an_absent_topic_still_reports_true_and_changes_nothing() {
        let (directory, volunteers) = directory();
        directory.add_topic("v1", "DSA").await.unwrap();

        let removed = directory
            .remove_topics("v1", &["X".to_string()])
            .await
            .unwrap();
        assert!(removed);

        let profile = volunteers.load("v1").await.unwrap();
        assert_eq!(profile.topics, vec!["DSA".to_string()]);
    }

    #[tokio::test]
    async fn remove_topics_drops_every_listed_topic_that_is_present() {
        let (directory, volunteers) = directory();
        for topic in ["DSA", "OS", "DBMS"] {
            directory.add_topic("v1", topic).await.unwrap();
        }

        directory
            .remove_topics("v1", &["OS".to_string(), "DBMS".to_string(), "X".to_string()])
            .await
            .unwrap();

        let profile = volunteers.load("v1").await.unwrap();
        assert_eq!(profile.topics, vec!["DSA".to_string()]);
    }

    #[tokio::test]
    async fn by_topic_matches_case_sensitively() {
        let (directory, _) = directory();
        directory.add_topic("v1", "OS").await.unwrap();
        directory.add_topic("v2", "os").await.unwrap();
        directory.add_topic("v3", "OS").await.unwrap();

        let mut matching: Vec<String> = directory
            .by_topic("OS")
            .await
            .unwrap()
            .into_iter()
            .map(|profile| profile.id)
            .collect();
        matching.sort();

        assert_eq!(matching, vec!["v1".to_string(), "v3".to_string()]);
        assert!(directory.by_topic("DSA").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saving_a_stale_profile_loses_the_earlier_topic_edit() {
        let (directory, volunteers) = directory();
        directory.add_topic("v1", "DSA").await.unwrap();

        // Two read-modify-write sequences starting from the same snapshot.
        let mut first = volunteers.load("v1").await.unwrap();
        let mut second = volunteers.load("v1").await.unwrap();

        first.topics.push("OS".to_string());
        volunteers.save(&first).await.unwrap();

        second.topics.push("DBMS".to_string());
        volunteers.save(&second).await.unwrap();

        // The second save is a full overwrite of the unversioned document,
        // so the first edit is silently gone.
        let profile = volunteers.load("v1").await.unwrap();
        assert_eq!(profile.topics, vec!["DSA".to_string(), "DBMS".to_string()]);
    }
}
