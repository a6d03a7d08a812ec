// Export: replays a layout plan onto a document writer and serves the result.

pub mod handlers;
pub mod pdf;
pub mod writer;
