pub mod accounts;
pub mod agent;
pub mod domain;
pub mod memory;
pub mod ports;
pub mod profiles;
pub mod roster;
pub mod sessions;
pub mod stats;
pub mod topics;

pub use domain::{ChatTurn, Role, Session, SessionStatus, StudentProfile, TimeWindow, TurnRole,
    UserAccount, VolunteerProfile, VolunteerStats, VolunteerStatus};
pub use ports::{DatabaseService, Fields, MentorModelService, PortError, PortResult};
