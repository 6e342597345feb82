pub mod bounds;
pub mod error;
pub mod policies;

pub use bounds::BoundStats;
pub use error::DataError;
pub use policies::{Policy, PolicySpace};
