use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Text,
    Image,
}

/// Display metadata for one selectable model. The flags are informational
/// only; nothing is enforced on either side of the wire.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub category: ModelCategory,
    pub censored: bool,
    pub paid: bool,
}

impl ModelInfo {
    pub fn censorship_badge(&self) -> &'static str {
        if self.censored {
            "Censored"
        } else {
            "Uncensored (NSFW)"
        }
    }

    pub fn paid_badge(&self) -> Option<&'static str> {
        self.paid.then_some("PAID")
    }
}

impl fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label, self.censorship_badge())?;
        if let Some(badge) = self.paid_badge() {
            write!(f, " [{}]", badge)?;
        }
        Ok(())
    }
}
