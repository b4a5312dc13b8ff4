use serde::Serialize;

pub mod property;
pub mod query;

pub use property::{Property, PropertyRow, RawLocation, ReraStatus};
pub use query::{parse_yes_no, PredictionRequest, PropertyQuery};

/// A property annotated with the per-query derived fields
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProperty {
    pub property: Property,
    pub estimated_rent: u32,
    pub demand_score: f64,
    pub star_rating: f64,
}

/// One entry of the `/predict` response
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertyView {
    pub society_name: String,
    pub location: String,
    pub price: f64,
    pub bhk: u8,
    pub gym_available: bool,
    pub pool_available: bool,
    pub estimated_rent: u32,
    pub star_rating: f64,
}

impl From<ScoredProperty> for PropertyView {
    fn from(scored: ScoredProperty) -> Self {
        let ScoredProperty {
            property,
            estimated_rent,
            star_rating,
            ..
        } = scored;

        Self {
            society_name: property.society_name,
            location: property.location,
            price: property.average_price,
            bhk: property.bhk,
            gym_available: property.gym_available,
            pool_available: property.pool_available,
            estimated_rent,
            star_rating,
        }
    }
}

/// Successful `/predict` response, ordered by descending demand
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub properties: Vec<PropertyView>,
}
