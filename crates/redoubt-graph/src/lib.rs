//! redoubt-graph: the in-memory Graph Store and Breach Catalog.
//!
//! Construction is the only interesting lifecycle event: both structures
//! are built once from already-parsed input records and are read-only for
//! the remainder of the run. There is no database here — the facility
//! graph is small enough, and the run batch enough, that an in-memory
//! structure replicated per worker is the simpler and faster design.

pub mod catalog;
pub mod error;
pub mod records;
pub mod store;

pub use catalog::BreachCatalog;
pub use error::GraphError;
pub use records::{BreachRecord, EdgeRecord, NodeRecord};
pub use store::GraphStore;
