pub mod goal;
pub mod macros;
pub mod store;

pub use goal::{Goal, GoalId, GoalTitle};
pub use store::{GoalProvider, JsonFileProvider, StoreError};
