//! Process state for the model-serving backend.
//! - Replaces an implicit global dictionary with an explicitly constructed,
//!   shareable `ProcessState` passed by `Arc` to the components that need it.
//! - Well-known slots are typed; open-ended keys live in a JSON map.
//! - Reads and writes never fail; a missing value is `None`.

pub mod bootstrap;
pub mod errors;
pub mod key;
pub mod snapshot;
pub mod status;
pub mod store;

pub use bootstrap::bootstrap;
pub use errors::StateError;
pub use key::{StateKey, StateValue};
pub use snapshot::StateSnapshot;
pub use status::ModelStatus;
pub use store::ProcessState;
