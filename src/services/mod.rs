pub mod location;
pub mod ranking;
pub mod recommendations;
pub mod relaxation;
pub mod scoring;

pub use location::LocationVocabulary;
pub use recommendations::{recommend, Recommendation};
pub use scoring::{DemandModel, HeuristicDemand, LinearDemandModel, RentSampler, ThreadRngSampler};
