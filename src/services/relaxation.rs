use std::fmt::Display;

use crate::{
    db::Dataset,
    models::{Property, PropertyQuery, ReraStatus},
};

/// Which filter produced the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationStep {
    /// Location, bhk, amenities and (when present) RERA status all matched
    Strict,
    BhkOnly,
    LocationOnly,
    /// Entire dataset, last resort
    Unfiltered,
}

impl Display for RelaxationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RelaxationStep::Strict => "strict",
            RelaxationStep::BhkOnly => "bhk_only",
            RelaxationStep::LocationOnly => "location_only",
            RelaxationStep::Unfiltered => "unfiltered",
        };
        write!(f, "{}", name)
    }
}

/// Candidate rows plus the step that produced them
#[derive(Debug, Clone)]
pub struct Selection {
    pub rows: Vec<Property>,
    pub step: RelaxationStep,
}

/// Selects candidate properties, loosening the filter until something matches
///
/// Every step re-queries the full dataset. The order is strict match, then
/// bhk alone, then location alone (skipped when the location did not
/// resolve), then everything. Rows are cloned out so callers never share
/// intermediate state.
pub fn select(dataset: &Dataset, query: &PropertyQuery, location: Option<&str>) -> Selection {
    let rera = dataset
        .has_rera_column()
        .then(|| ReraStatus::from(query.rera));

    let strict = filter(dataset, |p| {
        location.map_or(true, |loc| p.location == loc)
            && p.bhk == query.bhk
            && p.gym_available == query.gym
            && p.pool_available == query.pool
            && rera.map_or(true, |status| p.rera_status == Some(status))
    });
    if !strict.is_empty() {
        return Selection {
            rows: strict,
            step: RelaxationStep::Strict,
        };
    }

    let by_bhk = filter(dataset, |p| p.bhk == query.bhk);
    if !by_bhk.is_empty() {
        return Selection {
            rows: by_bhk,
            step: RelaxationStep::BhkOnly,
        };
    }

    if let Some(loc) = location {
        let by_location = filter(dataset, |p| p.location == loc);
        if !by_location.is_empty() {
            return Selection {
                rows: by_location,
                step: RelaxationStep::LocationOnly,
            };
        }
    }

    Selection {
        rows: dataset.properties().to_vec(),
        step: RelaxationStep::Unfiltered,
    }
}

fn filter<F>(dataset: &Dataset, predicate: F) -> Vec<Property>
where
    F: Fn(&Property) -> bool,
{
    dataset
        .properties()
        .iter()
        .filter(|&p| predicate(p))
        .cloned()
        .collect()
}
