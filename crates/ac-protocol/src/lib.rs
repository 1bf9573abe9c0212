pub mod crop;
pub mod diagnosis;
pub mod severity;

pub use crop::*;
pub use diagnosis::*;
pub use severity::*;
