use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::CaptionError;
use crate::pipeline::traits::CaptionRenderer;
use crate::types::RenderTarget;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOverlay {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlayDocument {
    pub target: Option<RenderTarget>,
    pub overlays: Vec<TextOverlay>,
}

/// Collects overlays in memory for a downstream compositor; the handle is the
/// overlay's index.
#[derive(Debug, Default)]
pub struct JsonOverlayRenderer {
    target: Option<RenderTarget>,
    overlays: Vec<TextOverlay>,
}

impl JsonOverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlays(&self) -> &[TextOverlay] {
        &self.overlays
    }

    pub fn into_document(self) -> OverlayDocument {
        OverlayDocument {
            target: self.target,
            overlays: self.overlays,
        }
    }

    pub fn to_json(&self) -> Result<String, CaptionError> {
        let document = OverlayDocument {
            target: self.target,
            overlays: self.overlays.clone(),
        };
        serde_json::to_string_pretty(&document)
            .map_err(|e| CaptionError::json("serialize overlays", e))
    }

    pub fn write_to(&self, path: &Path) -> Result<(), CaptionError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CaptionError::io("create overlay directory", e))?;
        }
        let mut file =
            File::create(path).map_err(|e| CaptionError::io("create overlay file", e))?;
        file.write_all(self.to_json()?.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .map_err(|e| CaptionError::io("write overlay file", e))
    }
}

impl CaptionRenderer for JsonOverlayRenderer {
    type Overlay = usize;

    fn prepare(&mut self, target: &RenderTarget) -> Result<(), CaptionError> {
        self.target = Some(*target);
        self.overlays.clear();
        Ok(())
    }

    fn overlay(&mut self, text: &str, start: f64, duration: f64) -> Result<usize, CaptionError> {
        if duration <= 0.0 {
            return Err(CaptionError::render(format!(
                "overlay {text:?} at {start:.3}s has non-positive duration {duration}"
            )));
        }
        self.overlays.push(TextOverlay {
            text: text.to_string(),
            start,
            duration,
        });
        Ok(self.overlays.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_handles_are_indices() {
        let mut renderer = JsonOverlayRenderer::new();
        assert_eq!(renderer.overlay("hi", 0.0, 0.3).unwrap(), 0);
        assert_eq!(renderer.overlay("there", 0.38, 0.25).unwrap(), 1);
        assert_eq!(renderer.overlays()[1].text, "there");
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let mut renderer = JsonOverlayRenderer::new();
        assert!(matches!(
            renderer.overlay("x", 1.0, 0.0),
            Err(CaptionError::Render { .. })
        ));
    }

    #[test]
    fn prepare_resets_and_records_target() {
        let mut renderer = JsonOverlayRenderer::new();
        renderer.overlay("stale", 0.0, 0.3).unwrap();
        let target = RenderTarget {
            width: 720,
            height: 1280,
            duration: 30.0,
        };
        renderer.prepare(&target).unwrap();
        assert!(renderer.overlays().is_empty());

        let json = renderer.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["target"]["width"], 720);
        assert_eq!(value["overlays"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn write_to_creates_file() {
        let mut renderer = JsonOverlayRenderer::new();
        renderer.overlay("hi", 0.0, 0.3).unwrap();
        let path = std::env::temp_dir()
            .join("caption_sync_overlay_test")
            .join("overlays.json");
        renderer.write_to(&path).expect("write overlays");
        let document: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document["overlays"][0]["text"], "hi");
        let _ = std::fs::remove_file(&path);
    }
}
