//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use mentor_core::accounts::Accounts;
use mentor_core::agent::ConversationAgent;
use mentor_core::roster::VolunteerRoster;
use mentor_core::sessions::SessionLedger;
use mentor_core::stats::StatsAggregator;
use mentor_core::topics::TopicDirectory;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// Every component carries its own store handle; there is no global database
/// client anywhere below this point.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub accounts: Accounts,
    pub agent: ConversationAgent,
    pub ledger: SessionLedger,
    pub topics: TopicDirectory,
    pub stats: StatsAggregator,
    pub roster: VolunteerRoster,
}
