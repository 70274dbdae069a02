use crate::gm_error::GmError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// What interpolation uses as the next frame when the current frame is the
/// last one
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seam {
    /// Keep showing the last frame until playback loops
    #[default]
    Hold,
    /// Interpolate from the last frame towards the first
    Wrap,
}

/// How subdivision treats edges with only one face
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Use the interior rules everywhere. A boundary edge point averages
    /// its endpoints and its single face point.
    #[default]
    Average,
    /// Keep boundaries sharp with the cubic B-spline curve rules
    Crease,
    /// Refuse meshes that are not closed
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    pub interpolate: bool,
    pub speed: f32,
    pub seam: Seam,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            interpolate: false,
            speed: 1.0f32,
            seam: Seam::Hold,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubdivideOptions {
    pub levels: usize,
    pub boundary: Boundary,
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self {
            levels: 1,
            boundary: Boundary::Average,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveOptions {
    /// Segments in the arc length table
    pub steps: usize,
    /// Arc length between uniform samples
    pub spacing: f32,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            steps: crate::curve::DEFAULT_STEPS,
            spacing: 2.0f32,
        }
    }
}

fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, GmError> {
    Ok(serde_yaml::from_str(yaml)?)
}

impl PlaybackOptions {
    /// Reads options from YAML. Missing fields take their default values.
    ///
    /// # Errors
    /// May return `GmError::SerdeYamlError`
    pub fn from_yaml(yaml: &str) -> Result<Self, GmError> {
        from_yaml(yaml)
    }
}

impl SubdivideOptions {
    /// Reads options from YAML. Missing fields take their default values.
    ///
    /// # Errors
    /// May return `GmError::SerdeYamlError`
    pub fn from_yaml(yaml: &str) -> Result<Self, GmError> {
        from_yaml(yaml)
    }
}

impl CurveOptions {
    /// Reads options from YAML. Missing fields take their default values.
    ///
    /// # Errors
    /// May return `GmError::SerdeYamlError`
    pub fn from_yaml(yaml: &str) -> Result<Self, GmError> {
        from_yaml(yaml)
    }
}
