use std::cmp::Ordering;

use crate::models::ScoredProperty;

/// Maximum number of properties returned per request
pub const TOP_N: usize = 10;

/// Orders by demand score, highest first, and keeps the top `TOP_N`
///
/// The sort is stable, so ties keep their input order.
pub fn rank(mut candidates: Vec<ScoredProperty>) -> Vec<ScoredProperty> {
    candidates.sort_by(|a, b| {
        b.demand_score
            .partial_cmp(&a.demand_score)
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(TOP_N);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Property;

    fn candidate(name: &str, demand_score: f64) -> ScoredProperty {
        ScoredProperty {
            property: Property {
                society_name: name.to_string(),
                location: "Pune".to_string(),
                bhk: 2,
                average_price: 1.0,
                gym_available: false,
                pool_available: false,
                rera_status: None,
            },
            estimated_rent: 10_000,
            demand_score,
            star_rating: 0.0,
        }
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank(vec![
            candidate("low", 1.0),
            candidate("high", 3.0),
            candidate("mid", 2.0),
        ]);
        let names: Vec<_> = ranked.iter().map(|c| c.property.society_name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let candidates = (0..25).map(|i| candidate(&i.to_string(), i as f64)).collect();
        let ranked = rank(candidates);

        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0].demand_score, 24.0);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].demand_score >= pair[1].demand_score));
    }

    #[test]
    fn test_short_input_kept_whole() {
        let ranked = rank(vec![candidate("only", 0.5)]);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![
            candidate("first", 1.0),
            candidate("top", 2.0),
            candidate("second", 1.0),
            candidate("third", 1.0),
        ]);
        let names: Vec<_> = ranked.iter().map(|c| c.property.society_name.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
