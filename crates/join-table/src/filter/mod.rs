pub mod condition;
pub mod group;
pub mod translate;

pub use condition::{Condition, OpCondition, Operator};
pub use group::{Filter, FilterGroup};
pub use translate::translate;
