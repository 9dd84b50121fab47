use crate::{
    error::{PollinationsError, Result},
    logger,
    models::{TextGenerationRequest, TextGenerationResponse},
    pollinations::{request_builder, traits::TextGenerator},
};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Clone)]
pub struct TextClient {
    client: Client,
    base_url: String,
}

impl TextClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse> {
        request.validate()?;
        let url = request_builder::text_url(&self.base_url, &request);

        log::info!("Invoking text model: {}", request.model);
        log::debug!("Text request URL: {}", url);
        let _timer = logger::timer("text generation");

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::error!("Text request transport failure: {}", e);
            PollinationsError::RequestError(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Text endpoint returned {}", status);
            return Err(PollinationsError::ResponseError(format!(
                "Text endpoint returned {}",
                status
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| PollinationsError::ResponseError(e.to_string()))?;

        Ok(TextGenerationResponse {
            text,
            model: request.model,
        })
    }
}

#[async_trait]
impl TextGenerator for TextClient {
    fn text_url(&self, request: &TextGenerationRequest) -> String {
        request_builder::text_url(&self.base_url, request)
    }

    async fn generate(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse> {
        TextClient::generate(self, request).await
    }
}
