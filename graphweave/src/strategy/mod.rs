//! Extraction strategies.
//!
//! A strategy names the entity and relation vocabulary an extraction run may
//! use, the granularity knobs that drive sampling parameters, and a few opaque
//! rule bags passed through to templates and the engine.

mod cache;
mod schema;
mod store;
mod types;

pub use cache::StrategyCache;
pub use schema::{COMMON_SECTION, SchemaCatalog, SchemaDescriptor, SchemaDocument};
pub use store::StrategyStore;
pub use types::*;
