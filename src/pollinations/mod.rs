pub mod image_client;
pub mod request_builder;
pub mod text_client;
pub mod traits;

use crate::{
    config::Config,
    error::{PollinationsError, Result},
    models::{ImageModel, ModelInfo, TextModel},
};
use reqwest::Client;

pub use image_client::ImageClient;
pub use text_client::TextClient;
pub use traits::{ImageGenerator, TextGenerator};

/// One HTTP connection pool shared by the image and text endpoints.
#[derive(Clone)]
pub struct PollinationsClient {
    text_client: TextClient,
    image_client: ImageClient,
    config: Config,
}

impl PollinationsClient {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PollinationsError::ConfigError(format!("HTTP client: {}", e)))?;

        log::debug!(
            "Pollinations client ready (image: {}, text: {})",
            config.image_base_url,
            config.text_base_url
        );

        Ok(Self {
            text_client: TextClient::new(client.clone(), config.text_base_url.clone()),
            image_client: ImageClient::new(client, config.image_base_url.clone()),
            config,
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn image_models() -> Vec<ModelInfo> {
        ImageModel::catalog()
    }

    pub fn text_models() -> Vec<ModelInfo> {
        TextModel::catalog()
    }
}
