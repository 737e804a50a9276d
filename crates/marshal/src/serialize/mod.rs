//! Property serializer
//!
//! Two output shapes are built from the same typed object:
//!
//! - [`flatten`]: the REST property map, nested objects as nested maps
//! - [`build_batch_properties`]: the gRPC message, arrays split by element kind
//!
//! Both skip null and unreadable fields and both carry a [`CycleGuard`]
//! through the walk, so a back-reference to an ancestor becomes an empty
//! nested value instead of recursing forever.
//!
//! [`CycleGuard`]: crate::guard::CycleGuard

pub mod batch;
pub mod canonical;
pub mod flatten;

pub use batch::{build_batch_properties, build_batch_properties_shared};
pub use flatten::{flatten, flatten_shared};
