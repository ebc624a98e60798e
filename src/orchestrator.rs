use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};

use crate::acquisition::ImageAcquisitionPipeline;
use crate::client::GenerationClient;
use crate::encoder::encode_data_url;
use crate::error::Error;
use crate::models::{AcquiredImage, GenerationRequest, RequestState};
use crate::prompt::PromptComposer;

/// Raw user input for one submission.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    pub prompt: String,
    pub style_id: String,
    pub additional_instructions: Option<String>,
}

impl GenerationParams {
    pub fn new(prompt: impl Into<String>, style_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style_id: style_id.into(),
            additional_instructions: None,
        }
    }
}

/// Terminal notifications. Exactly one of these fires per completed
/// submission; neither fires for rejected or cancelled calls.
#[derive(Default)]
pub struct Callbacks {
    pub on_success: Option<Box<dyn Fn(&str) + Send + Sync>>,
    pub on_error: Option<Box<dyn Fn(&Error) + Send + Sync>>,
}

// The two slots only this orchestrator may write. The lock is never held
// across an await.
struct Slots {
    state: RequestState,
    selected: Option<AcquiredImage>,
}

/// Owns the request lifecycle: composes the prompt, encodes the selected
/// reference image, invokes the generation endpoint, and tracks
/// `Idle → Pending → Succeeded | Failed` with a single-flight guarantee.
pub struct RequestOrchestrator {
    composer: PromptComposer,
    pipeline: ImageAcquisitionPipeline,
    client: Arc<dyn GenerationClient>,
    callbacks: Callbacks,
    slots: Mutex<Slots>,
}

impl RequestOrchestrator {
    pub fn new(
        composer: PromptComposer,
        pipeline: ImageAcquisitionPipeline,
        client: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            composer,
            pipeline,
            client,
            callbacks: Callbacks::default(),
            slots: Mutex::new(Slots {
                state: RequestState::Idle,
                selected: None,
            }),
        }
    }

    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn state(&self) -> RequestState {
        self.slots.lock().state.clone()
    }

    pub fn selected_image(&self) -> Option<AcquiredImage> {
        self.slots.lock().selected.clone()
    }

    /// Capture a reference photo; a new acquisition silently replaces the
    /// previously selected one. Cancellation leaves everything unchanged.
    pub async fn capture_from_camera(&self) -> Result<Option<AcquiredImage>, Error> {
        let acquired = self.pipeline.capture_from_camera().await?;
        Ok(self.install(acquired))
    }

    pub async fn pick_from_library(&self) -> Result<Option<AcquiredImage>, Error> {
        let acquired = self.pipeline.pick_from_library().await?;
        Ok(self.install(acquired))
    }

    fn install(&self, acquired: Option<AcquiredImage>) -> Option<AcquiredImage> {
        if let Some(image) = &acquired {
            let mut slots = self.slots.lock();
            if slots.selected.is_some() {
                info!("🖼️ Replacing previously selected reference image");
            }
            slots.selected = Some(image.clone());
        }
        acquired
    }

    /// Permitted in any state; does not touch the request lifecycle.
    pub fn clear_selected_image(&self) {
        self.slots.lock().selected = None;
    }

    /// Back to `Idle`, dropping the selected image and any terminal
    /// result. Rejected while a request is in flight.
    pub fn reset(&self) -> Result<(), Error> {
        let mut slots = self.slots.lock();
        if slots.state.is_pending() {
            return Err(Error::RequestInFlight);
        }
        slots.state = RequestState::Idle;
        slots.selected = None;
        Ok(())
    }

    /// Run one generation request to completion. Validation failures and
    /// in-flight rejections return before any state change and fire no
    /// callback; accepted submissions make exactly one endpoint call and
    /// fire exactly one of the terminal callbacks.
    pub async fn submit(&self, params: GenerationParams) -> Result<String, Error> {
        if params.prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }
        if params.style_id.is_empty() {
            return Err(Error::MissingStyle);
        }

        let selected = {
            let slots = self.slots.lock();
            if slots.state.is_pending() {
                return Err(Error::RequestInFlight);
            }
            slots.selected.clone()
        };

        // Encoding strictly precedes the network call; an encoding failure
        // surfaces before the state machine is touched.
        let input_image = match &selected {
            Some(image) => Some(encode_data_url(image).await?),
            None => None,
        };

        let request = GenerationRequest {
            prompt: self.composer.compose(
                &params.style_id,
                &params.prompt,
                params.additional_instructions.as_deref(),
            ),
            style: params.style_id,
            input_image,
        };

        {
            let mut slots = self.slots.lock();
            if slots.state.is_pending() {
                return Err(Error::RequestInFlight);
            }
            slots.state = RequestState::Pending;
        }

        info!("🚀 Submitting generation request, style: {}", request.style);
        match self.client.generate(&request).await {
            Ok(response) => {
                {
                    let mut slots = self.slots.lock();
                    slots.state = RequestState::Succeeded {
                        image_url: response.image_url.clone(),
                    };
                    // Successful generation consumes the reference image.
                    slots.selected = None;
                }
                info!("✅ Generation succeeded: {}", response.image_url);
                if let Some(on_success) = &self.callbacks.on_success {
                    on_success(&response.image_url);
                }
                Ok(response.image_url)
            }
            Err(client_err) => {
                let failure = Error::Generation(client_err.to_string());
                {
                    let mut slots = self.slots.lock();
                    slots.state = RequestState::Failed {
                        message: client_err.to_string(),
                    };
                    // Selected image is kept so the user can retry.
                }
                error!("❌ Generation failed: {}", client_err);
                if let Some(on_error) = &self.callbacks.on_error {
                    on_error(&failure);
                }
                Err(failure)
            }
        }
    }
}
