// Report schema: the fixed six-section document every other module passes around.

pub mod schema;

pub use schema::{validate, Report, SchemaError, SectionKind};
