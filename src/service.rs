//! Async front for the blocking renderer.
//!
//! Rendering runs on tokio's blocking pool so the caller's executor keeps
//! serving other requests. A configured timeout abandons the result; the
//! blocking task itself still runs to completion.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use xibao_config::Config;
use xibao_fonts::FontCatalog;
use xibao_render::{Canvas, RenderError, Renderer};

use crate::command::{CommandError, RenderRequest, parse_command};
use crate::presets::{Preset, PresetStyle};

/// Failure of one service request.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// The render did not finish within the configured timeout.
    #[error("Render timed out after {0} ms")]
    Timeout(u64),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Shared state for answering render requests.
///
/// Holds the font catalog (inside the renderer), one fallback cache shared
/// by every request, and each preset's decoded background.
pub struct RenderService {
    renderer: Renderer,
    max_message_chars: usize,
    timeout_ms: Option<u64>,
    presets: HashMap<Preset, (PresetStyle, Canvas)>,
}

impl RenderService {
    /// Resolve the primary typeface and decode both preset backgrounds.
    pub fn new(catalog: Arc<FontCatalog>, config: &Config) -> Result<Self, ServiceError> {
        let renderer = Renderer::new(catalog, config)?;
        let mut presets = HashMap::new();
        for preset in Preset::all() {
            let style = PresetStyle::from_config(preset, config);
            let canvas = Canvas::load(&style.background)?;
            presets.insert(preset, (style, canvas));
        }
        log::info!(
            "Render service ready (base {}, timeout {:?} ms)",
            renderer.base_typeface(),
            config.render_timeout_ms
        );

        Ok(Self {
            renderer,
            max_message_chars: config.max_message_chars,
            timeout_ms: config.render_timeout_ms,
            presets,
        })
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Parse a chat message and render it.
    pub async fn handle_message(&self, message: &str) -> Result<Vec<u8>, ServiceError> {
        let request = parse_command(message, self.max_message_chars)?;
        self.render(request).await
    }

    /// Render a request to PNG bytes.
    pub async fn render(&self, request: RenderRequest) -> Result<Vec<u8>, ServiceError> {
        let (style, canvas) = self
            .presets
            .get(&request.preset)
            .cloned()
            .ok_or_else(|| CommandError::UnknownCommand(request.preset.to_string()))?;
        let renderer = self.renderer.clone();

        let task = tokio::task::spawn_blocking(move || {
            renderer.render(&canvas, &request.text, &style.style, request.font_size)
        });

        let bytes = match self.timeout_ms {
            Some(ms) => tokio::time::timeout(Duration::from_millis(ms), task)
                .await
                .map_err(|_| {
                    log::warn!("Render exceeded {} ms, discarding result", ms);
                    ServiceError::Timeout(ms)
                })???,
            None => task.await??,
        };
        Ok(bytes)
    }
}
