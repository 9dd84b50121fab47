//! Client and per-session state holders for the Pollinations image and
//! text generation endpoints.
//!
//! ```no_run
//! use pollinai::{Config, ImageController, ImageModel, LogNotifier, PollinationsClient};
//! use std::sync::Arc;
//!
//! # async fn run() -> pollinai::Result<()> {
//! let client = PollinationsClient::new(Config::new())?;
//! let images = ImageController::from_client(&client, Arc::new(LogNotifier));
//! images.edit_form(|form| {
//!     form.prompt = "a red fox".into();
//!     form.model = Some(ImageModel::Flux);
//!     form.set_width(512);
//!     form.set_height(512);
//! });
//! images.submit().await?;
//! if let Some(image) = images.displayed_image() {
//!     println!("{}", image.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod logger;
pub mod models;
pub mod pollinations;

pub use config::{Config, RacePolicy};
pub use controller::{
    CollectingNotifier, GenerationStatus, ImageController, ImageForm, ImageOutcome, ImageResult,
    LogNotifier, Notification, NotificationKind, Notifier, TextController, TextForm, TextOutcome,
    TextResult,
};
pub use error::{PollinationsError, Result};
pub use models::*;
pub use pollinations::{
    request_builder, ImageClient, ImageGenerator, PollinationsClient, TextClient, TextGenerator,
};
