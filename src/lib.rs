//! Client-side orchestration for the Shock style generator.
//!
//! Turns raw user input (free-text prompt, a chosen style, an optional
//! reference photo) into a well-formed generation request, tracks the
//! request lifecycle, and runs the short-lived attached-image pipeline
//! (acquire → normalize → encode) that feeds it. Generation itself happens
//! behind the [`GenerationClient`] trait; rendering, permission dialogs and
//! the share UI stay in the host application.

mod acquisition;
mod client;
mod encoder;
mod error;
mod export;
mod models;
mod orchestrator;
mod picker;
mod prompt;
mod styles;

pub use acquisition::{normalize_image_bytes, ImageAcquisitionPipeline, NormalizeOptions};
pub use client::{ClientError, GenerationClient, HttpGenerationClient};
pub use encoder::encode_data_url;
pub use error::{Error, Permission};
pub use export::download_for_share;
pub use models::{AcquiredImage, GenerationRequest, GenerationResponse, RequestState};
pub use orchestrator::{Callbacks, GenerationParams, RequestOrchestrator};
pub use picker::{ImageSource, PickOutcome, PickerOptions, PermissionStatus};
pub use prompt::PromptComposer;
pub use styles::{StyleCatalog, StyleDefinition};
