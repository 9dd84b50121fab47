use crate::error::{PollinationsError, Result};
use crate::models::common::{ModelCategory, ModelInfo};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_DIMENSION: u32 = 64;
pub const MAX_DIMENSION: u32 = 2048;
/// Random seeds are drawn from `[0, SEED_RANGE)`.
pub const SEED_RANGE: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageModel {
    #[default]
    Flux,
    FluxRealism,
    FluxCablyai,
    FluxAnime,
    #[serde(rename = "flux-3d")]
    Flux3d,
    AnyDark,
    FluxPro,
    Turbo,
}

impl ImageModel {
    pub const ALL: [ImageModel; 8] = [
        ImageModel::Flux,
        ImageModel::FluxRealism,
        ImageModel::FluxCablyai,
        ImageModel::FluxAnime,
        ImageModel::Flux3d,
        ImageModel::AnyDark,
        ImageModel::FluxPro,
        ImageModel::Turbo,
    ];

    pub fn info(&self) -> ModelInfo {
        let (id, label, censored, paid) = match self {
            ImageModel::Flux => ("flux", "Flux", false, false),
            ImageModel::FluxRealism => ("flux-realism", "Flux Realism", true, false),
            ImageModel::FluxCablyai => ("flux-cablyai", "Flux CablyAI", true, true),
            ImageModel::FluxAnime => ("flux-anime", "Flux Anime", true, false),
            ImageModel::Flux3d => ("flux-3d", "Flux 3D", true, false),
            ImageModel::AnyDark => ("any-dark", "Any Dark", true, false),
            ImageModel::FluxPro => ("flux-pro", "Flux Pro", true, true),
            ImageModel::Turbo => ("turbo", "Turbo", false, false),
        };
        ModelInfo {
            id,
            label,
            category: ModelCategory::Image,
            censored,
            paid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.info().id
    }

    pub fn catalog() -> Vec<ModelInfo> {
        Self::ALL.iter().map(|m| m.info()).collect()
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageModel {
    type Err = PollinationsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                PollinationsError::ValidationError(format!("Unknown image model: {}", s))
            })
    }
}

/// Pins a requested edge length into `[MIN_DIMENSION, MAX_DIMENSION]`.
pub fn clamp_dimension(value: i64) -> u32 {
    value.clamp(MIN_DIMENSION as i64, MAX_DIMENSION as i64) as u32
}

pub fn random_seed() -> i64 {
    rand::thread_rng().gen_range(0..SEED_RANGE)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model: ImageModel,
    pub width: u32,
    pub height: u32,
    pub seed: i64,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>, model: ImageModel) -> Self {
        Self {
            prompt: prompt.into(),
            model,
            width: crate::config::DEFAULT_DIMENSION,
            height: crate::config::DEFAULT_DIMENSION,
            seed: 0,
        }
    }

    pub fn with_dimensions(mut self, width: i64, height: i64) -> Self {
        self.width = clamp_dimension(width);
        self.height = clamp_dimension(height);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(PollinationsError::ValidationError(
                "Image prompt is required".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ImageGenerationResponse {
    /// The request URL; it doubles as the image reference for display.
    pub url: String,
    pub model: ImageModel,
    pub seed: i64,
    pub content_type: Option<String>,
}
