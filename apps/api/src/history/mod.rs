// Topic history: most-recent-first list of generated topics over an injected key-value store.

pub mod handlers;
pub mod store;
pub mod topics;
