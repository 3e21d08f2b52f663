pub mod arena;
pub mod intern;
pub mod linalg;
pub mod sarray;

pub use arena::{Arena, ArenaKey};
pub use intern::intern;
pub use linalg::Matrix;
pub use sarray::{SArray, Shape};
