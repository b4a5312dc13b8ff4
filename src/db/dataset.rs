use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::{Property, PropertyRow, RawLocation},
    services::location::LocationVocabulary,
};

/// The read-only property table shared by every request
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    properties: Vec<Property>,
    locations: LocationVocabulary,
    has_rera_column: bool,
}

impl Dataset {
    /// Builds a dataset from already-decoded properties, deriving the
    /// location vocabulary from the rows themselves
    pub fn from_properties(properties: Vec<Property>) -> Self {
        let mut locations = LocationVocabulary::default();
        let properties = properties
            .into_iter()
            .map(|mut property| {
                property.location = locations.canonicalize(&property.location);
                property
            })
            .collect();
        Self::assemble(properties, locations)
    }

    /// Decodes raw rows against a vocabulary. Encoded locations must be in
    /// range; named locations are canonicalized and added when unknown.
    pub fn from_rows(rows: Vec<PropertyRow>, mut locations: LocationVocabulary) -> AppResult<Self> {
        let mut properties = Vec::with_capacity(rows.len());

        for (idx, row) in rows.into_iter().enumerate() {
            if !row.average_price.is_finite() || row.average_price <= 0.0 {
                return Err(AppError::Dataset(format!(
                    "row {} ({}): price must be positive, got {}",
                    idx, row.society_name, row.average_price
                )));
            }

            let location = match &row.location {
                RawLocation::Code(code) => locations
                    .decode(*code)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AppError::Dataset(format!(
                            "row {} ({}): unknown location code {}",
                            idx, row.society_name, code
                        ))
                    })?,
                RawLocation::Name(name) => locations.canonicalize(name),
            };

            properties.push(row.into_property(location));
        }

        Ok(Self::assemble(properties, locations))
    }

    fn assemble(properties: Vec<Property>, locations: LocationVocabulary) -> Self {
        let has_rera_column = properties.iter().any(|p| p.rera_status.is_some());
        Self {
            properties,
            locations,
            has_rera_column,
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn locations(&self) -> &LocationVocabulary {
        &self.locations
    }

    /// Whether the RERA status column is present in this dataset variant
    pub fn has_rera_column(&self) -> bool {
        self.has_rera_column
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Source of the property table, read once at startup
#[async_trait::async_trait]
pub trait DatasetLoader: Send + Sync {
    async fn load(&self) -> AppResult<Dataset>;
}

/// Loads the dataset from a JSON array of rows, with an optional JSON
/// array of location classes used to decode label-encoded locations
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    dataset_path: PathBuf,
    locations_path: Option<PathBuf>,
}

impl JsonFileLoader {
    pub fn new(dataset_path: impl Into<PathBuf>, locations_path: Option<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            locations_path,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Dataset(format!("failed to read {}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| AppError::Dataset(format!("failed to parse {}: {}", path.display(), e)))
    }
}

#[async_trait::async_trait]
impl DatasetLoader for JsonFileLoader {
    async fn load(&self) -> AppResult<Dataset> {
        let locations = match &self.locations_path {
            Some(path) => {
                let classes: Vec<String> = Self::read_json(path).await?;
                LocationVocabulary::new(classes)
            }
            None => LocationVocabulary::default(),
        };

        let rows: Vec<PropertyRow> = Self::read_json(&self.dataset_path).await?;
        let dataset = Dataset::from_rows(rows, locations)?;

        tracing::info!(
            path = %self.dataset_path.display(),
            properties = dataset.len(),
            locations = dataset.locations().len(),
            rera_column = dataset.has_rera_column(),
            "Dataset loaded"
        );

        Ok(dataset)
    }
}
