use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::AppError;

/// Camera angle a clip was recorded from.
///
/// The angle of a stored clip is not tracked separately; it is derived from the
/// object key by substring match (see [`CameraAngle::matches_key`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraAngle {
    Front,
    Back,
    Left,
    Right,
}

impl CameraAngle {
    /// All angles in the default check order.
    pub const ALL: [CameraAngle; 4] = [
        CameraAngle::Front,
        CameraAngle::Back,
        CameraAngle::Left,
        CameraAngle::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraAngle::Front => "front",
            CameraAngle::Back => "back",
            CameraAngle::Left => "left",
            CameraAngle::Right => "right",
        }
    }

    /// Whether an object key belongs to this angle.
    pub fn matches_key(&self, key: &str) -> bool {
        key.contains(self.as_str())
    }
}

impl FromStr for CameraAngle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(CameraAngle::Front),
            "back" => Ok(CameraAngle::Back),
            "left" => Ok(CameraAngle::Left),
            "right" => Ok(CameraAngle::Right),
            other => Err(anyhow::anyhow!("Unknown camera angle: '{}'", other)),
        }
    }
}

impl Display for CameraAngle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Camera named by a request.
///
/// Any non-empty name is accepted. Names outside the four angles never own a
/// clip, so they resolve to the placeholder once the listing succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedCamera {
    Angle(CameraAngle),
    Unknown(String),
}

impl RequestedCamera {
    pub fn angle(&self) -> Option<CameraAngle> {
        match self {
            RequestedCamera::Angle(angle) => Some(*angle),
            RequestedCamera::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestedCamera::Angle(angle) => angle.as_str(),
            RequestedCamera::Unknown(name) => name,
        }
    }
}

impl FromStr for RequestedCamera {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AppError::MissingCameraParameter);
        }
        Ok(s.parse::<CameraAngle>()
            .map(RequestedCamera::Angle)
            .unwrap_or_else(|_| RequestedCamera::Unknown(s.to_string())))
    }
}

impl From<CameraAngle> for RequestedCamera {
    fn from(angle: CameraAngle) -> Self {
        RequestedCamera::Angle(angle)
    }
}

impl Display for RequestedCamera {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One object from a store listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipObject {
    pub key: String,
    /// Reported by the store; ranking uses the timestamp embedded in `key` instead.
    pub last_modified: Option<DateTime<Utc>>,
}

impl ClipObject {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            last_modified: None,
        }
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }
}
