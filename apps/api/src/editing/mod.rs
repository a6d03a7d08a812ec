// Report sessions: the edit/commit state machine and the registry that owns sessions.

pub mod handlers;
pub mod registry;
pub mod session;
