pub mod alter;
pub mod arithmetic;
pub mod blend;
pub mod crossover;
pub mod gaussian;
pub mod intermediate;
pub mod invert;
pub mod mean;
pub mod multipoint;
pub mod mutate;
pub mod pmx;
pub mod scramble;
pub mod shuffle;
pub mod simulated_binary;
pub mod swap;
pub mod uniform;

pub use alter::*;
pub use arithmetic::*;
pub use blend::*;
pub use crossover::*;
pub use gaussian::*;
pub use intermediate::*;
pub use invert::*;
pub use mean::*;
pub use multipoint::*;
pub use mutate::*;
pub use pmx::*;
pub use scramble::*;
pub use shuffle::*;
pub use simulated_binary::*;
pub use swap::*;
pub use uniform::*;

// https://ictactjournals.in/paper/IJSC_V6_I1_paper_4_pp_1083_1092.pdf

// https://www.ijcsit.com/docs/Volume%205/vol5issue06/ijcsit2014050673.pdf
