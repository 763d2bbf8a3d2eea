use log::{debug, warn};
use rcf_core::{ClosedFormHandle, RcfError, RenderConfig};
use serde::{Deserialize, Serialize};

use crate::structured::StructuredRenderer;
use crate::text::TextRenderer;

/// Identifies which rendering path produced a notation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    /// Decoded from per-term coefficient and base buffers.
    Structured,
    /// Rewritten from the handle's generic string form.
    Text,
}

/// One way of turning a closed-form handle into canonical notation.
///
/// Implementations only read the handle; releasing it stays with the owner.
pub trait ClosedFormRenderer {
    /// Which path this renderer implements.
    fn kind(&self) -> RendererKind;

    /// Renders `handle` with the precision and variable of `config`.
    fn render(
        &self,
        handle: &dyn ClosedFormHandle,
        config: &RenderConfig,
    ) -> Result<String, RcfError>;
}

/// Canonical notation together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    /// Canonical notation.
    pub text: String,
    /// Renderer that produced `text`.
    pub renderer: RendererKind,
}

/// Renders `handle`, preferring structured access and falling back to text.
///
/// Structured rendering is chosen when the handle exposes per-term buffers.
/// A render error from malformed buffers switches to the text path instead of
/// failing; only an invalid `config` is reported as an error.
pub fn render_closed_form(
    handle: &dyn ClosedFormHandle,
    config: &RenderConfig,
) -> Result<Rendered, RcfError> {
    config.validate()?;
    if handle.term_structure().is_some() {
        match StructuredRenderer.render(handle, config) {
            Ok(text) => {
                return Ok(Rendered {
                    text,
                    renderer: RendererKind::Structured,
                })
            }
            Err(RcfError::Render(info)) => {
                warn!("structured rendering failed, using text fallback: {info}");
            }
            Err(other) => return Err(other),
        }
    } else {
        debug!("handle exposes no term structure, rendering from its notation");
    }
    let text = TextRenderer.render(handle, config)?;
    Ok(Rendered {
        text,
        renderer: RendererKind::Text,
    })
}

/// Renders `handle` at `precision` with the default variable.
pub fn render(handle: &dyn ClosedFormHandle, precision: u32) -> Result<String, RcfError> {
    let config = RenderConfig::new(precision)?;
    Ok(render_closed_form(handle, &config)?.text)
}
