use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    core::{ArgbColor, Axis},
    error::{StitchError, StitchResult},
    math::dp_to_px,
};
use crate::layout::ScalePriority;

/// User preferences consumed by a stitch. Spacing is in device-independent units.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StitchPreferences {
    /// Stack left-to-right when `true`, top-to-bottom otherwise.
    pub stack_horizontally: bool,
    /// `true` upscales images to cover the perpendicular axis, `false` downscales to fit it.
    pub scale_priority: bool,
    /// Gap between vertically stacked images.
    pub image_spacing_vertical: u32,
    /// Gap between horizontally stacked images.
    pub image_spacing_horizontal: u32,
    /// Background color; alpha 0 disables the fill.
    pub bg_fill_color: ArgbColor,
}

impl Default for StitchPreferences {
    fn default() -> Self {
        Self {
            stack_horizontally: false,
            scale_priority: false,
            image_spacing_vertical: 0,
            image_spacing_horizontal: 0,
            bg_fill_color: ArgbColor::TRANSPARENT,
        }
    }
}

impl StitchPreferences {
    /// Stitching axis.
    pub fn axis(&self) -> Axis {
        Axis::from_stack_horizontally(self.stack_horizontally)
    }

    /// Scale policy.
    pub fn priority(&self) -> ScalePriority {
        ScalePriority::from_flag(self.scale_priority)
    }

    /// Spacing (dp) along the configured axis.
    pub fn spacing_dp(&self) -> u32 {
        match self.axis() {
            Axis::Horizontal => self.image_spacing_horizontal,
            Axis::Vertical => self.image_spacing_vertical,
        }
    }

    /// Spacing along the configured axis in pixels, for `density` px/dp and zoom `scale`.
    pub fn spacing_px(&self, density: f64, scale: f64) -> StitchResult<u32> {
        dp_to_px(self.spacing_dp(), density, scale)
    }

    /// Parse from JSON text. Missing fields take their defaults.
    pub fn from_json(text: &str) -> StitchResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| StitchError::config(format!("preferences json: {e}")))
    }

    /// Read and parse a JSON file.
    pub fn from_json_path(path: &Path) -> StitchResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read preferences '{}'", path.display()))?;
        Self::from_json(&text)
    }
}

/// Externally persisted preferences, read once per stitch.
pub trait PreferenceStore: Send + Sync {
    /// Current snapshot.
    fn load(&self) -> StitchResult<StitchPreferences>;
}

impl PreferenceStore for StitchPreferences {
    fn load(&self) -> StitchResult<StitchPreferences> {
        Ok(self.clone())
    }
}

/// Preferences stored in a JSON file, re-read on every [`PreferenceStore::load`].
#[derive(Clone, Debug)]
pub struct JsonPreferenceFile {
    path: PathBuf,
}

impl JsonPreferenceFile {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist `prefs` as pretty JSON.
    pub fn save(&self, prefs: &StitchPreferences) -> StitchResult<()> {
        let text = serde_json::to_string_pretty(prefs)
            .map_err(|e| StitchError::config(format!("serialize preferences: {e}")))?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("write preferences '{}'", self.path.display()))?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceFile {
    fn load(&self) -> StitchResult<StitchPreferences> {
        StitchPreferences::from_json_path(&self.path)
    }
}
