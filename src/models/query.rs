use serde::Deserialize;
use validator::Validate;

/// Body of `POST /predict`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictionRequest {
    #[validate(range(min = 1, max = 3, message = "bhk must be 1, 2 or 3"))]
    pub bhk: i64,
    pub location: String,
    #[serde(default)]
    pub rera: bool,
    pub gym: String,
    pub pool: String,
}

/// Normalized search criteria for one request
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyQuery {
    pub location: String,
    pub bhk: u8,
    pub gym: bool,
    pub pool: bool,
    pub rera: bool,
}

impl TryFrom<PredictionRequest> for PropertyQuery {
    type Error = validator::ValidationErrors;

    fn try_from(request: PredictionRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        Ok(PropertyQuery {
            location: request.location,
            // range-checked above
            bhk: request.bhk as u8,
            gym: parse_yes_no(&request.gym),
            pool: parse_yes_no(&request.pool),
            rera: request.rera,
        })
    }
}

/// Free-text amenity answer. Anything other than "yes" counts as no.
pub fn parse_yes_no(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(bhk: i64, gym: &str, pool: &str) -> PredictionRequest {
        PredictionRequest {
            bhk,
            location: "Pune".to_string(),
            rera: true,
            gym: gym.to_string(),
            pool: pool.to_string(),
        }
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("yes"));
        assert!(parse_yes_no(" Yes "));
        assert!(parse_yes_no("YES"));
        assert!(!parse_yes_no("no"));
        assert!(!parse_yes_no("y"));
        assert!(!parse_yes_no(""));
    }

    #[test]
    fn test_valid_request_converts() {
        let query = PropertyQuery::try_from(request(2, "Yes", "no")).unwrap();
        assert_eq!(query.bhk, 2);
        assert!(query.gym);
        assert!(!query.pool);
        assert!(query.rera);
        assert_eq!(query.location, "Pune");
    }

    #[test]
    fn test_bhk_out_of_range_rejected() {
        for bhk in [0, 4, -1, 300] {
            assert!(PropertyQuery::try_from(request(bhk, "no", "no")).is_err());
        }
    }

    #[test]
    fn test_unparseable_amenities_are_permissive() {
        let query = PropertyQuery::try_from(request(1, "sometimes", "???")).unwrap();
        assert!(!query.gym);
        assert!(!query.pool);
    }
}
