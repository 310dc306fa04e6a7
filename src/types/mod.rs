pub mod dependency_type;
pub mod pos_tag;
pub mod span;

pub use dependency_type::{DependencyType, UnknownDependencyType};
pub use pos_tag::{PosTag, UnknownPosTag};
pub use span::Span;
