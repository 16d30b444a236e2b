//! Trait seams between the engines and their collaborators.

mod generator;
mod store;

pub use generator::{GeneratedPrediction, IPredictionGenerator, MatchContext};
pub use store::IPredictionStore;
