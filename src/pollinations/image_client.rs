use crate::{
    error::{PollinationsError, Result},
    logger,
    models::{ImageGenerationRequest, ImageGenerationResponse},
    pollinations::{request_builder, traits::ImageGenerator},
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    base_url: String,
}

impl ImageClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        request.validate()?;
        let url = request_builder::image_url(&self.base_url, &request);

        log::info!(
            "Generating image with model: {} ({}x{}, seed {})",
            request.model,
            request.width,
            request.height,
            request.seed
        );
        log::debug!("Image request URL: {}", url);
        let _timer = logger::timer("image generation");

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::error!("Image request transport failure: {}", e);
            PollinationsError::RequestError(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Image endpoint returned {}: {}", status, body);
            return Err(PollinationsError::ResponseError(format!(
                "Image endpoint returned {}",
                status
            )));
        }

        // Success is the status line alone; the payload is left unread.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(ImageGenerationResponse {
            url,
            model: request.model,
            seed: request.seed,
            content_type,
        })
    }

    /// Fetches the image payload behind a previously generated URL.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Downloading image from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PollinationsError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollinationsError::ResponseError(format!(
                "Image download returned {}",
                status
            )));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| PollinationsError::ResponseError(e.to_string()))?;
        log::debug!("Received {} bytes of image data", data.len());
        Ok(data.to_vec())
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    fn image_url(&self, request: &ImageGenerationRequest) -> String {
        request_builder::image_url(&self.base_url, request)
    }

    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        ImageClient::generate(self, request).await
    }
}
