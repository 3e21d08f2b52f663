pub mod blend;
pub mod intermediate;
pub mod mean;
pub mod multipoint;
pub mod pmx;
pub mod shuffle;
pub mod simulated_binary;
pub mod uniform;

pub use blend::BlendCrossover;
pub use intermediate::IntermediateCrossover;
pub use mean::MeanCrossover;
pub use multipoint::MultiPointCrossover;
pub use pmx::PMXCrossover;
pub use shuffle::ShuffleCrossover;
pub use simulated_binary::SimulatedBinaryCrossover;
pub use uniform::UniformCrossover;
