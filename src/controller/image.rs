use crate::{
    config::RacePolicy,
    controller::{lock, GenerationStatus, Notifier, Ticket},
    error::{PollinationsError, Result},
    models::{
        clamp_dimension, random_seed, ImageGenerationRequest, ImageGenerationResponse, ImageModel,
    },
    pollinations::{ImageGenerator, PollinationsClient},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const IMAGE_ERROR_MESSAGE: &str = "Error generating image. Please try again.";
pub const IMAGE_SUCCESS_MESSAGE: &str = "Image generated successfully.";

/// The editable fields of the image form. Dimension setters clamp, so the
/// stored width and height are always within the accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageForm {
    pub prompt: String,
    pub model: Option<ImageModel>,
    width: u32,
    height: u32,
    seed: i64,
    randomize_seed: bool,
}

impl ImageForm {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            prompt: String::new(),
            model: None,
            width: clamp_dimension(width as i64),
            height: clamp_dimension(height as i64),
            seed: random_seed(),
            randomize_seed: false,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn randomize_seed(&self) -> bool {
        self.randomize_seed
    }

    pub fn set_width(&mut self, width: i64) {
        self.width = clamp_dimension(width);
    }

    pub fn set_height(&mut self, height: i64) {
        self.height = clamp_dimension(height);
    }

    pub fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    /// Switching randomization on draws a fresh seed straight away.
    pub fn set_randomize_seed(&mut self, enabled: bool) {
        if enabled && !self.randomize_seed {
            self.seed = random_seed();
        }
        self.randomize_seed = enabled;
    }

    pub fn reroll_seed(&mut self) -> i64 {
        self.seed = random_seed();
        self.seed
    }

    /// Validates the prompt and freezes the form into a request. With
    /// randomization on, the seed is redrawn first and the form keeps it.
    pub fn to_request(&mut self) -> Result<ImageGenerationRequest> {
        self.validate()?;
        if self.randomize_seed {
            self.seed = random_seed();
        }
        self.snapshot_request()
    }

    /// The request for the form exactly as it stands, with no seed redraw.
    pub fn snapshot_request(&self) -> Result<ImageGenerationRequest> {
        self.validate()?;
        Ok(ImageGenerationRequest {
            prompt: self.prompt.clone(),
            model: self.model.unwrap_or_default(),
            width: self.width,
            height: self.height,
            seed: self.seed,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(PollinationsError::ValidationError(
                "Image prompt is required".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ImageForm {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_DIMENSION,
            crate::config::DEFAULT_DIMENSION,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageResult {
    pub url: String,
    pub model: ImageModel,
    pub width: u32,
    pub height: u32,
    pub seed: i64,
    pub submission_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageState {
    pub form: ImageForm,
    pub status: GenerationStatus,
    pub result: Option<ImageResult>,
    pub loading: bool,
    #[serde(skip)]
    latest_generation: u64,
}

impl ImageState {
    fn new(form: ImageForm) -> Self {
        Self {
            form,
            status: GenerationStatus::Idle,
            result: None,
            loading: false,
            latest_generation: 0,
        }
    }

    /// The image to show: only a successful submission displays anything.
    pub fn displayed_image(&self) -> Option<&ImageResult> {
        match self.status {
            GenerationStatus::Success => self.result.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ImageOutcome {
    Generated(ImageGenerationResponse),
    Failed(PollinationsError),
    /// A newer submission started before this one settled; its response
    /// was dropped.
    Superseded,
}

/// Owns one image form and drives its `Idle → Pending → Success | Error`
/// lifecycle. Clones share the same state.
#[derive(Clone)]
pub struct ImageController {
    generator: Arc<dyn ImageGenerator>,
    notifier: Arc<dyn Notifier>,
    policy: RacePolicy,
    state: Arc<Mutex<ImageState>>,
}

impl ImageController {
    pub fn new(generator: Arc<dyn ImageGenerator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            generator,
            notifier,
            policy: RacePolicy::default(),
            state: Arc::new(Mutex::new(ImageState::new(ImageForm::default()))),
        }
    }

    pub fn from_client(client: &PollinationsClient, notifier: Arc<dyn Notifier>) -> Self {
        let config = client.config();
        Self::new(Arc::new(client.image().clone()), notifier)
            .with_race_policy(config.race_policy)
            .with_form(ImageForm::new(config.default_width, config.default_height))
    }

    pub fn with_race_policy(mut self, policy: RacePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_form(self, form: ImageForm) -> Self {
        lock(&self.state).form = form;
        self
    }

    pub fn edit_form<R>(&self, edit: impl FnOnce(&mut ImageForm) -> R) -> R {
        edit(&mut lock(&self.state).form)
    }

    pub fn set_randomize_seed(&self, enabled: bool) {
        self.edit_form(|form| form.set_randomize_seed(enabled));
    }

    pub fn snapshot(&self) -> ImageState {
        lock(&self.state).clone()
    }

    pub fn status(&self) -> GenerationStatus {
        lock(&self.state).status
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn displayed_image(&self) -> Option<ImageResult> {
        lock(&self.state).displayed_image().cloned()
    }

    /// URL for the form's current values, without submitting it. With
    /// randomization on, this shows the seed currently in the form; the
    /// next `submit` draws a new one.
    pub fn preview_url(&self) -> Result<String> {
        let request = lock(&self.state).form.snapshot_request()?;
        Ok(self.generator.image_url(&request))
    }

    /// Runs one submission of the current form. A missing prompt is the
    /// only error returned; request failures land in the state and the
    /// outcome, leaving the form usable.
    pub async fn submit(&self) -> Result<ImageOutcome> {
        let (request, ticket) = {
            let mut state = lock(&self.state);
            let request = state.form.to_request()?;
            let ticket = Ticket::next(&mut state.latest_generation);
            state.result = None;
            state.status = GenerationStatus::Pending;
            state.loading = true;
            (request, ticket)
        };

        log::info!(
            "[req:{}] Submitting image prompt with {} ({}x{}, seed {})",
            ticket.id,
            request.model,
            request.width,
            request.height,
            request.seed
        );

        let outcome = self.generator.generate(request.clone()).await;

        let mut state = lock(&self.state);
        if self.policy == RacePolicy::LastSubmittedWins
            && ticket.generation != state.latest_generation
        {
            log::debug!("[req:{}] Discarding superseded image response", ticket.id);
            return Ok(ImageOutcome::Superseded);
        }
        state.loading = false;

        match outcome {
            Ok(response) => {
                state.result = Some(ImageResult {
                    url: response.url.clone(),
                    model: request.model,
                    width: request.width,
                    height: request.height,
                    seed: request.seed,
                    submission_id: ticket.id,
                    generated_at: Utc::now(),
                });
                state.status = GenerationStatus::Success;
                drop(state);

                log::info!("[req:{}] Image ready: {}", ticket.id, response.url);
                self.notifier.success(IMAGE_SUCCESS_MESSAGE);
                Ok(ImageOutcome::Generated(response))
            }
            Err(e) => {
                state.result = None;
                state.status = GenerationStatus::Error;
                drop(state);

                log::error!("[req:{}] Error generating image: {}", ticket.id, e);
                self.notifier.error(IMAGE_ERROR_MESSAGE);
                Ok(ImageOutcome::Failed(e))
            }
        }
    }

    /// Draws a new seed into the form and submits again.
    pub async fn regenerate(&self) -> Result<ImageOutcome> {
        let seed = self.edit_form(|form| form.reroll_seed());
        log::debug!("Regenerating image with seed {}", seed);
        self.submit().await
    }
}
