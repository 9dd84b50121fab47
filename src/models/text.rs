use crate::error::{PollinationsError, Result};
use crate::models::common::{ModelCategory, ModelInfo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextModel {
    #[default]
    Openai,
    Mistral,
    MistralLarge,
    Llama,
    CommandR,
    Unity,
    Midijourney,
    Rtist,
    Searchgpt,
    Evil,
}

impl TextModel {
    pub const ALL: [TextModel; 10] = [
        TextModel::Openai,
        TextModel::Mistral,
        TextModel::MistralLarge,
        TextModel::Llama,
        TextModel::CommandR,
        TextModel::Unity,
        TextModel::Midijourney,
        TextModel::Rtist,
        TextModel::Searchgpt,
        TextModel::Evil,
    ];

    pub fn info(&self) -> ModelInfo {
        let (id, label, censored) = match self {
            TextModel::Openai => ("openai", "OpenAI GPT-4", true),
            TextModel::Mistral => ("mistral", "Mistral Nemo", false),
            TextModel::MistralLarge => ("mistral-large", "Mistral Large (v2)", false),
            TextModel::Llama => ("llama", "Llama 3.1", true),
            TextModel::CommandR => ("command-r", "Command-R", false),
            TextModel::Unity => ("unity", "Unity with Mistral Large", false),
            TextModel::Midijourney => ("midijourney", "Midijourney", true),
            TextModel::Rtist => ("rtist", "Rtist", true),
            TextModel::Searchgpt => ("searchgpt", "SearchGPT", true),
            TextModel::Evil => ("evil", "Evil Mode", false),
        };
        ModelInfo {
            id,
            label,
            category: ModelCategory::Text,
            censored,
            paid: false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.info().id
    }

    pub fn catalog() -> Vec<ModelInfo> {
        Self::ALL.iter().map(|m| m.info()).collect()
    }
}

impl fmt::Display for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextModel {
    type Err = PollinationsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                PollinationsError::ValidationError(format!("Unknown text model: {}", s))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextGenerationRequest {
    pub prompt: String,
    pub model: TextModel,
}

impl TextGenerationRequest {
    pub fn new(prompt: impl Into<String>, model: TextModel) -> Self {
        Self {
            prompt: prompt.into(),
            model,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(PollinationsError::ValidationError(
                "Text prompt is required".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationResponse {
    pub text: String,
    pub model: TextModel,
}
