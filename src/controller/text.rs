use crate::{
    config::RacePolicy,
    controller::{lock, Notifier, Ticket},
    error::{PollinationsError, Result},
    models::{TextGenerationRequest, TextModel},
    pollinations::{PollinationsClient, TextGenerator},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Shown in place of the generated text when a request fails.
pub const TEXT_ERROR_MESSAGE: &str = "Error generating text. Please try again.";
pub const TEXT_SUCCESS_MESSAGE: &str = "Text generated successfully.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextForm {
    pub prompt: String,
    pub model: Option<TextModel>,
}

impl TextForm {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: TextModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn to_request(&self) -> Result<TextGenerationRequest> {
        let request =
            TextGenerationRequest::new(self.prompt.clone(), self.model.unwrap_or_default());
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextResult {
    /// Response body verbatim, or the failure placeholder.
    pub text: String,
    pub failed: bool,
    pub model: TextModel,
    pub submission_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TextState {
    pub form: TextForm,
    pub result: Option<TextResult>,
    pub loading: bool,
    #[serde(skip)]
    latest_generation: u64,
}

impl TextState {
    pub fn displayed_text(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.text.as_str())
    }
}

#[derive(Debug)]
pub enum TextOutcome {
    Generated(String),
    Failed(PollinationsError),
    Superseded,
}

/// Owns one text form. Unlike the image flow there is no status machine:
/// only a loading flag, and failures are written into the result itself.
#[derive(Clone)]
pub struct TextController {
    generator: Arc<dyn TextGenerator>,
    notifier: Arc<dyn Notifier>,
    policy: RacePolicy,
    state: Arc<Mutex<TextState>>,
}

impl TextController {
    pub fn new(generator: Arc<dyn TextGenerator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            generator,
            notifier,
            policy: RacePolicy::default(),
            state: Arc::new(Mutex::new(TextState::default())),
        }
    }

    pub fn from_client(client: &PollinationsClient, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(Arc::new(client.text().clone()), notifier)
            .with_race_policy(client.config().race_policy)
    }

    pub fn with_race_policy(mut self, policy: RacePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_form(self, form: TextForm) -> Self {
        lock(&self.state).form = form;
        self
    }

    pub fn edit_form<R>(&self, edit: impl FnOnce(&mut TextForm) -> R) -> R {
        edit(&mut lock(&self.state).form)
    }

    pub fn snapshot(&self) -> TextState {
        lock(&self.state).clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn displayed_text(&self) -> Option<String> {
        lock(&self.state).displayed_text().map(String::from)
    }

    pub fn preview_url(&self) -> Result<String> {
        let request = lock(&self.state).form.to_request()?;
        Ok(self.generator.text_url(&request))
    }

    /// Runs one submission. The previous result stays visible until this
    /// one settles.
    pub async fn submit(&self) -> Result<TextOutcome> {
        let (request, ticket) = {
            let mut state = lock(&self.state);
            let request = state.form.to_request()?;
            let ticket = Ticket::next(&mut state.latest_generation);
            state.loading = true;
            (request, ticket)
        };

        log::info!(
            "[req:{}] Submitting text prompt with {}",
            ticket.id,
            request.model
        );

        let model = request.model;
        let outcome = self.generator.generate(request).await;

        let mut state = lock(&self.state);
        if self.policy == RacePolicy::LastSubmittedWins
            && ticket.generation != state.latest_generation
        {
            log::debug!("[req:{}] Discarding superseded text response", ticket.id);
            return Ok(TextOutcome::Superseded);
        }
        state.loading = false;

        let (text, failed, outcome) = match outcome {
            Ok(response) => {
                log::info!(
                    "[req:{}] Received {} characters of text",
                    ticket.id,
                    response.text.chars().count()
                );
                let text = response.text;
                (text.clone(), false, TextOutcome::Generated(text))
            }
            Err(e) => {
                log::error!("[req:{}] Error generating text: {}", ticket.id, e);
                (TEXT_ERROR_MESSAGE.to_string(), true, TextOutcome::Failed(e))
            }
        };

        state.result = Some(TextResult {
            text,
            failed,
            model,
            submission_id: ticket.id,
            generated_at: Utc::now(),
        });
        drop(state);

        if failed {
            self.notifier.error(TEXT_ERROR_MESSAGE);
        } else {
            self.notifier.success(TEXT_SUCCESS_MESSAGE);
        }
        Ok(outcome)
    }
}
