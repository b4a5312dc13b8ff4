use std::sync::Arc;

use crate::{
    db::Dataset,
    services::{DemandModel, HeuristicDemand, RentSampler, ThreadRngSampler},
};

/// Shared application state
///
/// Everything here is read-only after startup, so requests share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub sampler: Arc<dyn RentSampler>,
    pub model: Arc<dyn DemandModel>,
}

impl AppState {
    /// State with heuristic scoring and thread-local rent sampling
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            sampler: Arc::new(ThreadRngSampler),
            model: Arc::new(HeuristicDemand),
        }
    }

    pub fn with_model(mut self, model: Arc<dyn DemandModel>) -> Self {
        self.model = model;
        self
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn RentSampler>) -> Self {
        self.sampler = sampler;
        self
    }
}
