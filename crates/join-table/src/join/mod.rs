pub mod context;
pub mod resolver;
pub mod spec;

pub use context::SearchContext;
pub use resolver::resolve;
pub use spec::{Hop, JoinField, JoinFieldInfo, JoinFieldLookup, JoinSpec};
