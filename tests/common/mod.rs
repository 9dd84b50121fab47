#![allow(dead_code)]

use async_trait::async_trait;
use pollinai::{
    request_builder, CollectingNotifier, Config, ImageController, ImageGenerationRequest,
    ImageGenerationResponse, ImageGenerator, PollinationsClient, PollinationsError, RacePolicy,
    TextController, TextGenerationRequest, TextGenerationResponse, TextGenerator,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> PollinationsClient {
    let config = Config::new()
        .with_image_base_url(server.uri())
        .with_text_base_url(server.uri());
    PollinationsClient::new(config).expect("client builds")
}

pub fn image_controller(server: &MockServer) -> (ImageController, CollectingNotifier) {
    let notifier = CollectingNotifier::new();
    let controller = ImageController::from_client(&client_for(server), Arc::new(notifier.clone()));
    (controller, notifier)
}

pub fn text_controller(server: &MockServer) -> (TextController, CollectingNotifier) {
    let notifier = CollectingNotifier::new();
    let controller = TextController::from_client(&client_for(server), Arc::new(notifier.clone()));
    (controller, notifier)
}

type Reply = Result<(), PollinationsError>;

/// Image generator whose responses are released by the test, one prompt at
/// a time, so settle order can be scripted independently of submit order.
#[derive(Clone)]
pub struct GatedImageGenerator {
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<Reply>>>>,
    started: mpsc::UnboundedSender<String>,
}

pub struct Gate {
    release: oneshot::Sender<Reply>,
}

impl Gate {
    pub fn succeed(self) {
        let _ = self.release.send(Ok(()));
    }

    pub fn fail(self) {
        let _ = self
            .release
            .send(Err(PollinationsError::ResponseError("HTTP 500".into())));
    }
}

impl GatedImageGenerator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let generator = Self {
            gates: Arc::default(),
            started: tx,
        };
        (generator, rx)
    }

    pub fn gate(&self, prompt: &str) -> Gate {
        let (release, wait) = oneshot::channel();
        self.gates.lock().unwrap().insert(prompt.to_string(), wait);
        Gate { release }
    }
}

#[async_trait]
impl ImageGenerator for GatedImageGenerator {
    fn image_url(&self, request: &ImageGenerationRequest) -> String {
        request_builder::image_url("https://images.test", request)
    }

    async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> pollinai::Result<ImageGenerationResponse> {
        let wait = self
            .gates
            .lock()
            .unwrap()
            .remove(&request.prompt)
            .expect("gate registered for prompt");
        let _ = self.started.send(request.prompt.clone());

        wait.await
            .unwrap_or_else(|_| Err(PollinationsError::RequestError("gate dropped".into())))?;

        Ok(ImageGenerationResponse {
            url: self.image_url(&request),
            model: request.model,
            seed: request.seed,
            content_type: Some("image/jpeg".into()),
        })
    }
}

pub fn gated_controller(
    policy: RacePolicy,
) -> (
    ImageController,
    GatedImageGenerator,
    mpsc::UnboundedReceiver<String>,
    CollectingNotifier,
) {
    let (generator, started) = GatedImageGenerator::new();
    let notifier = CollectingNotifier::new();
    let controller = ImageController::new(Arc::new(generator.clone()), Arc::new(notifier.clone()))
        .with_race_policy(policy);
    (controller, generator, started, notifier)
}

/// Text counterpart of `GatedImageGenerator`; a released prompt answers
/// with `"answer to <prompt>"`.
#[derive(Clone)]
pub struct GatedTextGenerator {
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<Reply>>>>,
    started: mpsc::UnboundedSender<String>,
}

impl GatedTextGenerator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let generator = Self {
            gates: Arc::default(),
            started: tx,
        };
        (generator, rx)
    }

    pub fn gate(&self, prompt: &str) -> Gate {
        let (release, wait) = oneshot::channel();
        self.gates.lock().unwrap().insert(prompt.to_string(), wait);
        Gate { release }
    }
}

#[async_trait]
impl TextGenerator for GatedTextGenerator {
    fn text_url(&self, request: &TextGenerationRequest) -> String {
        request_builder::text_url("https://text.test", request)
    }

    async fn generate(
        &self,
        request: TextGenerationRequest,
    ) -> pollinai::Result<TextGenerationResponse> {
        let wait = self
            .gates
            .lock()
            .unwrap()
            .remove(&request.prompt)
            .expect("gate registered for prompt");
        let _ = self.started.send(request.prompt.clone());

        wait.await
            .unwrap_or_else(|_| Err(PollinationsError::RequestError("gate dropped".into())))?;

        Ok(TextGenerationResponse {
            text: format!("answer to {}", request.prompt),
            model: request.model,
        })
    }
}

pub fn gated_text_controller(
    policy: RacePolicy,
) -> (
    TextController,
    GatedTextGenerator,
    mpsc::UnboundedReceiver<String>,
    CollectingNotifier,
) {
    let (generator, started) = GatedTextGenerator::new();
    let notifier = CollectingNotifier::new();
    let controller = TextController::new(Arc::new(generator.clone()), Arc::new(notifier.clone()))
        .with_race_policy(policy);
    (controller, generator, started, notifier)
}
