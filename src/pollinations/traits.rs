use crate::{
    error::Result,
    models::{
        ImageGenerationRequest, ImageGenerationResponse, TextGenerationRequest,
        TextGenerationResponse,
    },
};
use async_trait::async_trait;

/// Anything that can turn a validated image request into a fetched image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// The URL a request resolves to, without performing it.
    fn image_url(&self, request: &ImageGenerationRequest) -> String;

    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn text_url(&self, request: &TextGenerationRequest) -> String;

    async fn generate(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse>;
}
