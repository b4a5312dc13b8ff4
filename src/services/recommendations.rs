use crate::{
    db::Dataset,
    error::{AppError, AppResult},
    models::{PropertyQuery, ScoredProperty},
    services::{
        ranking,
        relaxation::{self, RelaxationStep},
        scoring::{self, DemandModel, RentSampler},
    },
};

/// Ranked properties for one query, with how they were found
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub properties: Vec<ScoredProperty>,
    pub resolved_location: Option<String>,
    pub step: RelaxationStep,
    pub candidates: usize,
}

/// Recommends properties for a query
///
/// Resolves the location, selects candidates with filter relaxation,
/// scores the whole candidate set and returns the top ranked rows.
/// An unknown location drops the location predicate instead of failing.
pub fn recommend(
    dataset: &Dataset,
    query: &PropertyQuery,
    sampler: &dyn RentSampler,
    model: &dyn DemandModel,
) -> AppResult<Recommendation> {
    let resolved_location = dataset
        .locations()
        .resolve(&query.location)
        .map(str::to_string);

    if resolved_location.is_none() {
        tracing::info!(
            location = %query.location,
            "Unknown location, skipping location filter"
        );
    }

    let selection = relaxation::select(dataset, query, resolved_location.as_deref());
    if selection.rows.is_empty() {
        return Err(AppError::NoPropertiesAvailable);
    }

    let candidates = selection.rows.len();
    tracing::debug!(
        step = %selection.step,
        candidates,
        model = model.name(),
        "Candidates selected"
    );

    let scored = scoring::score(selection.rows, sampler, model)?;
    let properties = ranking::rank(scored);

    Ok(Recommendation {
        properties,
        resolved_location,
        step: selection.step,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Property,
        services::scoring::{HeuristicDemand, MockRentSampler, ThreadRngSampler},
    };

    fn property(name: &str, location: &str, bhk: u8, price: f64, gym: bool, pool: bool) -> Property {
        Property {
            society_name: name.to_string(),
            location: location.to_string(),
            bhk,
            average_price: price,
            gym_available: gym,
            pool_available: pool,
            rera_status: None,
        }
    }

    fn query(location: &str, bhk: u8, gym: bool, pool: bool) -> PropertyQuery {
        PropertyQuery {
            location: location.to_string(),
            bhk,
            gym,
            pool,
            rera: false,
        }
    }

    fn pune_dataset() -> Dataset {
        Dataset::from_properties(vec![
            property("Row One", "Pune", 1, 5_000_000.0, true, false),
            property("Row Two", "Pune", 2, 6_000_000.0, false, false),
        ])
    }

    #[test]
    fn test_strict_single_match_is_neutral() {
        let result = recommend(
            &pune_dataset(),
            &query("pune", 1, true, false),
            &ThreadRngSampler,
            &HeuristicDemand,
        )
        .unwrap();

        assert_eq!(result.step, RelaxationStep::Strict);
        assert_eq!(result.resolved_location.as_deref(), Some("Pune"));
        assert_eq!(result.properties.len(), 1);
        assert_eq!(result.properties[0].property.society_name, "Row One");
        assert_eq!(result.properties[0].star_rating, 3.0);
    }

    #[test]
    fn test_unknown_location_skips_filter() {
        let dataset = Dataset::from_properties(vec![
            property("Mumbai 2", "Mumbai", 2, 8_000_000.0, false, false),
            property("Pune 2", "Pune", 2, 6_000_000.0, false, false),
            property("Pune 1", "Pune", 1, 4_000_000.0, false, false),
        ]);

        let result = recommend(
            &dataset,
            &query("Atlantis", 2, false, false),
            &ThreadRngSampler,
            &HeuristicDemand,
        )
        .unwrap();

        assert!(result.resolved_location.is_none());
        assert_eq!(result.step, RelaxationStep::Strict);
        assert_eq!(result.candidates, 2);
        assert!(result.properties.iter().all(|p| p.property.bhk == 2));
    }

    #[test]
    fn test_empty_dataset_reports_no_properties() {
        let result = recommend(
            &Dataset::default(),
            &query("Pune", 1, false, false),
            &ThreadRngSampler,
            &HeuristicDemand,
        );
        assert!(matches!(result, Err(AppError::NoPropertiesAvailable)));
    }

    #[test]
    fn test_output_is_ranked_and_bounded() {
        let rows = (0..30)
            .map(|i| {
                property(
                    &format!("Tower {}", i),
                    "Pune",
                    3,
                    1_000_000.0 + 100_000.0 * i as f64,
                    i % 2 == 0,
                    i % 3 == 0,
                )
            })
            .collect();
        let dataset = Dataset::from_properties(rows);

        let mut sampler = MockRentSampler::new();
        sampler.expect_sample().times(5).returning(|low, _| low);

        let result = recommend(
            &dataset,
            &query("Pune", 3, true, true),
            &sampler,
            &HeuristicDemand,
        )
        .unwrap();

        assert_eq!(result.candidates, 5);
        assert_eq!(result.properties.len(), 5);
        assert!(result
            .properties
            .windows(2)
            .all(|pair| pair[0].demand_score >= pair[1].demand_score));
        assert!(result
            .properties
            .iter()
            .all(|p| (0.0..=5.0).contains(&p.star_rating)));
    }

    #[test]
    fn test_truncates_unfiltered_fallback() {
        let rows = (0..30)
            .map(|i| property(&format!("Villa {}", i), "Goa", 1, 2_000_000.0 + i as f64, false, false))
            .collect();
        let dataset = Dataset::from_properties(rows);

        let result = recommend(
            &dataset,
            &query("Pune", 3, false, false),
            &ThreadRngSampler,
            &HeuristicDemand,
        )
        .unwrap();

        assert_eq!(result.step, RelaxationStep::Unfiltered);
        assert_eq!(result.candidates, 30);
        assert_eq!(result.properties.len(), 10);
    }
}
