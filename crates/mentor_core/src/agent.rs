//! crates/mentor_core/src/agent.rs
//!
//! The student-facing mentor loop: append the incoming turn, build a prompt
//! with a bounded slice of history, call the model, persist the reply.

use crate::domain::{ChatTurn, StudentProfile, TurnRole};
use crate::ports::{MentorModelService, PortResult};
use crate::profiles::ProfileStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// How many trailing history entries (of any role) are rendered into the
/// prompt. Storage keeps the full history; only the prompt is windowed.
const HISTORY_WINDOW: usize = 5;

const MENTOR_PROMPT_TEMPLATE: &str = r#"You are a friendly college mentor for engineering / medicine / arts students.
Explain clearly, step by step, and give practical tips.

Student ID: {user_id}
Known weak topics: {weak_topics}

Recent conversation:
{history}

Reply to the student's latest message:
"""{message}""""#;

//=========================================================================================
// The Conversation Agent
//=========================================================================================

/// Drives one student/mentor exchange per call to [`ConversationAgent::ask`].
///
/// There is no compensation on failure: the student's turn only reaches the
/// store together with the mentor's reply, in one profile save at the end.
/// A model fault therefore loses the turn, and the profile that was lazily
/// created on first contact stays behind with an empty history.
#[derive(Clone)]
pub struct ConversationAgent {
    students: ProfileStore<StudentProfile>,
    model: Arc<dyn MentorModelService>,
}

impl ConversationAgent {
    pub fn new(students: ProfileStore<StudentProfile>, model: Arc<dyn MentorModelService>) -> Self {
        Self { students, model }
    }

    /// Answers one student message and records both turns in the profile.
    pub async fn ask(&self, user_id: &str, message: &str) -> PortResult<String> {
        info!("Student message | user_id={} | msg={}", user_id, message);

        let mut profile = self.students.load(user_id).await?;
        profile.history.push(ChatTurn {
            role: TurnRole::Student,
            message: message.to_string(),
        });

        let prompt = Self::build_prompt(user_id, &profile, message);

        let model_start = Instant::now();
        let reply = self.model.generate(&prompt).await?;
        info!("⏱️ Mentor model took: {:?}", model_start.elapsed());

        let reply = reply.trim().to_string();
        profile.history.push(ChatTurn {
            role: TurnRole::Mentor,
            message: reply.clone(),
        });
        self.students.save(&profile).await?;
        info!("Mentor reply | user_id={} | chars={}", user_id, reply.len());

        Ok(reply)
    }

    /// Renders the mentor prompt. The history window is a plain slice of the
    /// trailing entries, student and mentor turns alike.
    fn build_prompt(user_id: &str, profile: &StudentProfile, message: &str) -> String {
        let window_start = profile.history.len().saturating_sub(HISTORY_WINDOW);
        let history_text = profile.history[window_start..]
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.message))
            .collect::<Vec<_>>()
            .join("\n");

        MENTOR_PROMPT_TEMPLATE
            .replace("{user_id}", user_id)
            .replace("{weak_topics}", &format!("{:?}", profile.weak_topics))
            .replace("{history}", &history_text)
            .replace("{message}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::ports::{DatabaseService, PortError};
    use crate::profiles::Profile;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct CannedMentor {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedMentor {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MentorModelService for CannedMentor {
        async fn generate(&self, prompt: &str) -> PortResult<String> {
            self.prompts.lock().await.push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingMentor;

    #[async_trait]
    impl MentorModelService for FailingMentor {
        async fn generate(&self, _prompt: &str) -> PortResult<String> {
            Err(PortError::Model("model endpoint unavailable".to_string()))
        }
    }

    fn agent_with(
        model: Arc<dyn MentorModelService>,
    ) -> (Arc<dyn DatabaseService>, ConversationAgent, ProfileStore<StudentProfile>) {
        let db: Arc<dyn DatabaseService> = Arc::new(MemoryStore::new());
        let students = ProfileStore::new(db.clone());
        let agent = ConversationAgent::new(students.clone(), model);
        (db, agent, students)
    }

    #[tokio::test]
    async fn first_ask_records_exactly_two_turns() {
        let mentor = Arc::new(CannedMentor::new("  A linked list is a chain of nodes. \n"));
        let (_, agent, students) = agent_with(mentor.clone());

        let reply = agent.ask("s1", "Explain linked lists").await.unwrap();
        assert_eq!(reply, "A linked list is a chain of nodes.");

        let profile = students.load("s1").await.unwrap();
        assert_eq!(profile.history.len(), 2);
        assert_eq!(profile.history[0].role, TurnRole::Student);
        assert_eq!(profile.history[0].message, "Explain linked lists");
        assert_eq!(profile.history[1].role, TurnRole::Mentor);
        assert_eq!(profile.history[1].message, reply);
    }

    #[tokio::test]
    async fn prompt_windows_history_to_the_last_five_turns() {
        let mentor = Arc::new(CannedMentor::new("ok"));
        let (_, agent, students) = agent_with(mentor.clone());

        let mut profile = students.load("s1").await.unwrap();
        profile.weak_topics = vec!["recursion".to_string()];
        for n in 1..=6 {
            profile.history.push(ChatTurn {
                role: if n % 2 == 1 { TurnRole::Student } else { TurnRole::Mentor },
                message: format!("turn {n}"),
            });
        }
        students.save(&profile).await.unwrap();

        agent.ask("s1", "turn 7").await.unwrap();

        let prompts = mentor.prompts.lock().await;
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];

        // Window covers the newest five turns, both roles, and nothing older.
        assert!(prompt.contains("Student: turn 3"));
        assert!(prompt.contains("Mentor: turn 4"));
        assert!(prompt.contains("Student: turn 7"));
        assert!(!prompt.contains("turn 1"));
        assert!(!prompt.contains("turn 2"));

        assert!(prompt.contains("Student ID: s1"));
        assert!(prompt.contains("Known weak topics: [\"recursion\"]"));
        assert!(prompt.contains("\"\"\"turn 7\"\"\""));
    }

    #[tokio::test]
    async fn model_failure_loses_the_student_turn() {
        let (db, agent, students) = agent_with(Arc::new(FailingMentor));

        let err = agent.ask("s1", "Explain recursion").await.unwrap_err();
        assert!(matches!(err, PortError::Model(_)));

        // The lazily-created profile was persisted by the load, but the
        // student's turn never reached the store.
        let fields = db
            .get(StudentProfile::COLLECTION, "s1")
            .await
            .unwrap()
            .expect("profile should have been created on load");
        assert_eq!(fields["history"], serde_json::json!([]));

        let profile = students.load("s1").await.unwrap();
        assert!(profile.history.is_empty());
    }
}
