//! Gesture scenario definition

use std::path::Path;

use anyhow::{Context, Result};
use flick_core::{GestureEvent, Size};
use flick_scroll::ScrollConfig;
use serde::Deserialize;

/// A surface plus a sequence of gesture steps
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Viewport size
    pub viewport: Size,
    /// Content extent
    pub content: Size,
    /// Scroller configuration (overridden by `--config`)
    #[serde(default)]
    pub config: Option<ScrollConfig>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text, validating any inline config
    pub fn from_json(input: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(input)?;
        if let Some(config) = &scenario.config {
            config.validate().context("Invalid inline config")?;
        }
        Ok(scenario)
    }

    /// Load a scenario from file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// One scenario step
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    DragStart { x: f64, y: f64 },
    Drag { dx: f64, dy: f64 },
    DragFinish,
    Flick { vx: f64, vy: f64 },
    Hold,
    Wheel { dx: f64, dy: f64 },
    /// Deliver up to `frames` animation frames
    Tick { frames: u32 },
    /// Deliver frames until the scroller rests; fails past `max_frames`
    Settle {
        #[serde(default = "default_max_frames")]
        max_frames: u32,
    },
    Resize { width: f64, height: f64 },
    Content { width: f64, height: f64 },
    ScrollTo { x: f64, y: f64 },
}

fn default_max_frames() -> u32 {
    600
}

impl ScenarioStep {
    /// The gesture this step delivers, if it is an input step
    pub fn gesture(&self) -> Option<GestureEvent> {
        match *self {
            ScenarioStep::DragStart { x, y } => Some(GestureEvent::DragStart { x, y }),
            ScenarioStep::Drag { dx, dy } => Some(GestureEvent::Drag { dx, dy }),
            ScenarioStep::DragFinish => Some(GestureEvent::DragFinish),
            ScenarioStep::Flick { vx, vy } => Some(GestureEvent::Flick {
                velocity_x: vx,
                velocity_y: vy,
            }),
            ScenarioStep::Hold => Some(GestureEvent::Hold),
            ScenarioStep::Wheel { dx, dy } => Some(GestureEvent::Wheel {
                delta_x: dx,
                delta_y: dy,
            }),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioStep::DragStart { .. } => "drag_start",
            ScenarioStep::Drag { .. } => "drag",
            ScenarioStep::DragFinish => "drag_finish",
            ScenarioStep::Flick { .. } => "flick",
            ScenarioStep::Hold => "hold",
            ScenarioStep::Wheel { .. } => "wheel",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Settle { .. } => "settle",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::Content { .. } => "content",
            ScenarioStep::ScrollTo { .. } => "scroll_to",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flick_scroll::AxisMode;

    #[test]
    fn test_parse_tagged_steps() {
        let scenario = Scenario::from_json(
            r#"{
                "viewport": { "width": 300, "height": 200 },
                "content": { "width": 300, "height": 500 },
                "steps": [
                    { "type": "drag_start", "x": 0, "y": -6 },
                    { "type": "drag", "dx": 0, "dy": -50 },
                    { "type": "drag_finish" },
                    { "type": "settle" },
                    { "type": "tick", "frames": 3 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.viewport, Size::new(300.0, 200.0));
        assert!(scenario.config.is_none());
        assert_eq!(scenario.steps.len(), 5);
        assert_eq!(scenario.steps[3], ScenarioStep::Settle { max_frames: 600 });
        assert_eq!(
            scenario.steps[1].gesture(),
            Some(GestureEvent::Drag { dx: 0.0, dy: -50.0 })
        );
        assert_eq!(scenario.steps[4].gesture(), None);
    }

    #[test]
    fn test_inline_config() {
        let scenario = Scenario::from_json(
            r#"{
                "viewport": { "width": 100, "height": 100 },
                "content": { "width": 100, "height": 100 },
                "config": { "vertical": "auto", "horizontal": "hidden" },
                "steps": []
            }"#,
        )
        .unwrap();

        let config = scenario.config.unwrap();
        assert_eq!(config.vertical, AxisMode::AutoScroll);
        assert_eq!(config.horizontal, AxisMode::Hidden);
        assert!(config.prevent_drag_propagation);
    }

    #[test]
    fn test_invalid_inline_config_rejected() {
        let err = Scenario::from_json(
            r#"{
                "viewport": { "width": 100, "height": 100 },
                "content": { "width": 100, "height": 400 },
                "config": { "kinetic": { "deceleration": -500 } },
                "steps": [{ "type": "flick", "vx": 0, "vy": -900 }]
            }"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("kinetic.deceleration"));
    }

    #[test]
    fn test_unknown_step_rejected() {
        let err = Scenario::from_json(
            r#"{
                "viewport": { "width": 1, "height": 1 },
                "content": { "width": 1, "height": 1 },
                "steps": [{ "type": "pinch" }]
            }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_bundled_scenarios_parse() {
        for raw in [
            include_str!("../scenarios/drag_and_fling.json"),
            include_str!("../scenarios/pull_past_top.json"),
        ] {
            let scenario = Scenario::from_json(raw).unwrap();
            assert!(!scenario.steps.is_empty());
        }
    }
}
