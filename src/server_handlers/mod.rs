pub mod catalog;
pub mod docs;
pub mod optimize;
pub mod runs;

pub use catalog::*;
pub use docs::*;
pub use optimize::*;
pub use runs::*;
