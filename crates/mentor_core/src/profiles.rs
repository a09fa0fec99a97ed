//! crates/mentor_core/src/profiles.rs
//!
//! Generic load-or-create / save semantics over the two profile kinds.
//! Each kind supplies its collection name and its default template; the
//! store itself is the same for both.

use crate::domain::{StudentProfile, VolunteerProfile};
use crate::ports::{from_fields, to_fields, DatabaseService, PortResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::info;

/// A profile kind the generic store can manage: where it lives, what a brand
/// new one looks like, and how its id is attached after a load.
pub trait Profile: Serialize + DeserializeOwned + Clone + Send + Sync {
    const COLLECTION: &'static str;

    /// The default template persisted for an id seen for the first time.
    fn fresh(id: &str) -> Self;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: &str);
}

impl Profile for StudentProfile {
    const COLLECTION: &'static str = "student_profiles";

    fn fresh(id: &str) -> Self {
        StudentProfile {
            id: id.to_string(),
            weak_topics: Vec::new(),
            history: Vec::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Profile for VolunteerProfile {
    const COLLECTION: &'static str = "volunteers";

    fn fresh(id: &str) -> Self {
        VolunteerProfile {
            id: id.to_string(),
            status: Default::default(),
            topics: Vec::new(),
            availability: Default::default(),
            students_assigned: Vec::new(),
            sessions_completed: 0,
            total_hours: 0.0,
            rating: 0.0,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// Load-or-create / save access to one profile collection.
///
/// `save` is an unversioned full overwrite: two callers that load, mutate and
/// save concurrently silently lose one update. That last-write-wins contract
/// is part of the store's documented behavior, not something this layer
/// compensates for.
#[derive(Clone)]
pub struct ProfileStore<P: Profile> {
    db: Arc<dyn DatabaseService>,
    _kind: PhantomData<P>,
}

impl<P: Profile> ProfileStore<P> {
    pub fn new(db: Arc<dyn DatabaseService>) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }

    /// Returns the stored profile, or creates, persists and returns the
    /// kind's default template when the id has never been seen. A repeated
    /// load returns the identical profile.
    pub async fn load(&self, id: &str) -> PortResult<P> {
        match self.db.get(P::COLLECTION, id).await? {
            Some(fields) => {
                let mut profile: P = from_fields(fields)?;
                profile.set_id(id);
                info!("Loaded profile {}/{}", P::COLLECTION, id);
                Ok(profile)
            }
            None => {
                let profile = P::fresh(id);
                self.db
                    .set(P::COLLECTION, id, to_fields(&profile)?)
                    .await?;
                info!("Created new profile {}/{}", P::COLLECTION, id);
                Ok(profile)
            }
        }
    }

    /// Idempotent full overwrite of the document at the profile's id, all
    /// fields except the id itself.
    pub async fn save(&self, profile: &P) -> PortResult<()> {
        self.db
            .set(P::COLLECTION, profile.id(), to_fields(profile)?)
            .await?;
        info!("Saved profile {}/{}", P::COLLECTION, profile.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VolunteerStatus;
    use crate::memory::MemoryStore;

    fn volunteers() -> ProfileStore<VolunteerProfile> {
        ProfileStore::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn unseen_volunteer_gets_the_default_template() {
        let store = volunteers();

        let profile = store.load("v-new").await.unwrap();

        assert_eq!(profile.id, "v-new");
        assert_eq!(profile.status, VolunteerStatus::Offline);
        assert!(profile.topics.is_empty());
        assert!(profile.availability.is_empty());
        assert!(profile.students_assigned.is_empty());
        assert_eq!(profile.sessions_completed, 0);
        assert_eq!(profile.total_hours, 0.0);
        assert_eq!(profile.rating, 0.0);
    }

    #[tokio::test]
    async fn repeated_load_returns_the_identical_profile() {
        let store = volunteers();

        let first = store.load("v1").await.unwrap();
        let second = store.load("v1").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn save_round_trips_a_mutation() {
        let db = Arc::new(MemoryStore::new());
        let store: ProfileStore<StudentProfile> = ProfileStore::new(db);

        let mut profile = store.load("s1").await.unwrap();
        profile.weak_topics.push("pointers".to_string());
        store.save(&profile).await.unwrap();

        let reloaded = store.load("s1").await.unwrap();
        assert_eq!(reloaded.weak_topics, vec!["pointers".to_string()]);
    }
}
