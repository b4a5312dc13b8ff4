use std::{ops::Range, path::Path};

use rand::Rng;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Property, ReraStatus, ScoredProperty},
};

/// Fallback monthly rent for bedroom counts outside the known tiers
pub const DEFAULT_BASE_RENT: u32 = 10_000;
pub const GYM_MULTIPLIER: f64 = 1.05;
pub const POOL_MULTIPLIER: f64 = 1.07;
/// Most expensive property in the set adds this fraction to the rent
pub const PRICE_TIER_WEIGHT: f64 = 0.1;
/// Rating given to every row when demand scores do not vary
pub const NEUTRAL_STAR_RATING: f64 = 3.0;
pub const MAX_STAR_RATING: f64 = 5.0;

/// Source of uniformly distributed base rents
#[cfg_attr(test, mockall::automock)]
pub trait RentSampler: Send + Sync {
    /// Uniform integer in `low..high`
    fn sample(&self, low: u32, high: u32) -> u32;
}

/// Samples from the calling thread's generator, so requests never contend
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSampler;

impl RentSampler for ThreadRngSampler {
    fn sample(&self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..high)
    }
}

/// Base rent range for a bedroom count, `None` for the fixed default
///
/// 2-BHK is split by amenities: none draws from the lower band, both from
/// the upper band, exactly one from the full range.
pub fn base_rent_range(bhk: u8, gym: bool, pool: bool) -> Option<Range<u32>> {
    match bhk {
        1 => Some(7_000..15_000),
        2 => match (gym, pool) {
            (false, false) => Some(13_000..20_000),
            (true, true) => Some(20_000..25_000),
            _ => Some(13_000..25_000),
        },
        3 => Some(20_000..35_000),
        _ => None,
    }
}

/// Simulated monthly rent for one property
///
/// `max_price` is the highest price in the current result set; a zero
/// maximum leaves the price tier factor at 1.
pub fn estimate_rent(property: &Property, max_price: f64, sampler: &dyn RentSampler) -> u32 {
    let base = match base_rent_range(property.bhk, property.gym_available, property.pool_available)
    {
        Some(range) => sampler.sample(range.start, range.end),
        None => DEFAULT_BASE_RENT,
    };

    let mut rent = f64::from(base);
    if property.gym_available {
        rent *= GYM_MULTIPLIER;
    }
    if property.pool_available {
        rent *= POOL_MULTIPLIER;
    }
    if max_price > 0.0 {
        rent *= 1.0 + (property.average_price / max_price) * PRICE_TIER_WEIGHT;
    }

    // saturating cast: NaN and negatives become 0
    rent.max(0.0) as u32
}

/// Maxima over the result set that demand scores are relative to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub max_price: f64,
    pub max_rent: f64,
}

impl PopulationStats {
    pub fn from_candidates(candidates: &[ScoredProperty]) -> Self {
        let max_price = candidates
            .iter()
            .map(|c| c.property.average_price)
            .fold(0.0, f64::max);
        let max_rent = candidates
            .iter()
            .map(|c| f64::from(c.estimated_rent))
            .fold(0.0, f64::max);
        Self {
            max_price,
            max_rent,
        }
    }
}

/// Strategy that turns an annotated property into a raw demand score
pub trait DemandModel: Send + Sync {
    fn name(&self) -> &'static str;

    fn demand(&self, candidate: &ScoredProperty, stats: &PopulationStats) -> AppResult<f64>;
}

/// Cheaper price and rent score higher (weighted 3:2), plus one point per amenity
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDemand;

impl HeuristicDemand {
    pub const PRICE_WEIGHT: f64 = 3.0;
    pub const RENT_WEIGHT: f64 = 2.0;
    pub const AMENITY_BONUS: f64 = 1.0;
}

impl DemandModel for HeuristicDemand {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn demand(&self, candidate: &ScoredProperty, stats: &PopulationStats) -> AppResult<f64> {
        Ok(demand_score(
            &candidate.property,
            candidate.estimated_rent,
            stats,
        ))
    }
}

/// Heuristic demand score; zero maxima contribute nothing
pub fn demand_score(property: &Property, estimated_rent: u32, stats: &PopulationStats) -> f64 {
    let price_factor = relative_discount(stats.max_price, property.average_price);
    let rent_factor = relative_discount(stats.max_rent, f64::from(estimated_rent));

    let mut score =
        price_factor * HeuristicDemand::PRICE_WEIGHT + rent_factor * HeuristicDemand::RENT_WEIGHT;
    if property.gym_available {
        score += HeuristicDemand::AMENITY_BONUS;
    }
    if property.pool_available {
        score += HeuristicDemand::AMENITY_BONUS;
    }
    score
}

fn relative_discount(max: f64, value: f64) -> f64 {
    if max == 0.0 {
        0.0
    } else {
        (max - value) / max
    }
}

/// Trained linear regression over property features, exported as JSON
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinearDemandModel {
    pub intercept: f64,
    pub bhk: f64,
    pub price: f64,
    pub estimated_rent: f64,
    pub gym: f64,
    pub pool: f64,
    pub rera: f64,
}

impl LinearDemandModel {
    pub async fn load(path: &Path) -> AppResult<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Model(format!("failed to read {}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| AppError::Model(format!("failed to parse {}: {}", path.display(), e)))
    }
}

impl DemandModel for LinearDemandModel {
    fn name(&self) -> &'static str {
        "linear_model"
    }

    fn demand(&self, candidate: &ScoredProperty, _stats: &PopulationStats) -> AppResult<f64> {
        let property = &candidate.property;
        let indicator = |flag: bool| if flag { 1.0 } else { 0.0 };

        let prediction = self.intercept
            + self.bhk * f64::from(property.bhk)
            + self.price * property.average_price
            + self.estimated_rent * f64::from(candidate.estimated_rent)
            + self.gym * indicator(property.gym_available)
            + self.pool * indicator(property.pool_available)
            + self.rera * indicator(property.rera_status == Some(ReraStatus::Registered));

        if !prediction.is_finite() {
            return Err(AppError::Model(format!(
                "non-finite prediction for {}",
                property.society_name
            )));
        }
        Ok(prediction)
    }
}

/// Min-max scales demand scores into `0..=5` in place
///
/// A set whose scores are all equal (including one row) is rated neutral.
pub fn assign_star_ratings(candidates: &mut [ScoredProperty]) {
    let (min, max) = candidates.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), c| (min.min(c.demand_score), max.max(c.demand_score)),
    );

    // Finite scores can still span more than f64::MAX; rescale so the
    // differences below stay finite.
    let scale = if max > min && (max - min).is_infinite() {
        min.abs().max(max.abs())
    } else {
        1.0
    };
    let (min, max) = (min / scale, max / scale);

    for candidate in candidates.iter_mut() {
        candidate.star_rating = if max > min {
            ((candidate.demand_score / scale - min) / (max - min) * MAX_STAR_RATING)
                .clamp(0.0, MAX_STAR_RATING)
        } else {
            NEUTRAL_STAR_RATING
        };
    }
}

/// Annotates a result set with rent, demand and star rating
pub fn score(
    rows: Vec<Property>,
    sampler: &dyn RentSampler,
    model: &dyn DemandModel,
) -> AppResult<Vec<ScoredProperty>> {
    let max_price = rows.iter().map(|p| p.average_price).fold(0.0, f64::max);

    let mut candidates: Vec<ScoredProperty> = rows
        .into_iter()
        .map(|property| ScoredProperty {
            estimated_rent: estimate_rent(&property, max_price, sampler),
            property,
            demand_score: 0.0,
            star_rating: 0.0,
        })
        .collect();

    let stats = PopulationStats::from_candidates(&candidates);
    let demand = candidates
        .iter()
        .map(|candidate| model.demand(candidate, &stats))
        .collect::<AppResult<Vec<f64>>>()?;
    for (candidate, score) in candidates.iter_mut().zip(demand) {
        candidate.demand_score = score;
    }

    assign_star_ratings(&mut candidates);
    Ok(candidates)
}
