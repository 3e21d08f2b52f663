pub mod audit;
pub mod evaluate;
pub mod filter;
pub mod front;
pub mod novelty;
pub mod recombine;
pub mod speciate;

pub use audit::*;
pub use evaluate::*;
pub use filter::*;
pub use front::*;
pub use novelty::*;
pub use recombine::*;
pub use speciate::*;
