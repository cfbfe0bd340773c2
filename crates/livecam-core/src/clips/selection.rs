use std::collections::BTreeMap;

use crate::constants::{DEFAULT_ANGLE_ORDER, DEFAULT_SCAN_WINDOW};
use crate::models::{CameraAngle, ClipObject};

/// How far down a ranked listing the selector looks, and in which order it
/// tests a key against the camera angles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub scan_window: usize,
    pub angle_order: Vec<CameraAngle>,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            scan_window: DEFAULT_SCAN_WINDOW,
            angle_order: DEFAULT_ANGLE_ORDER.to_vec(),
        }
    }
}

/// Newest clip per camera angle. Angles without a clip in the scanned window are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestClips {
    winners: BTreeMap<CameraAngle, ClipObject>,
}

impl LatestClips {
    pub fn get(&self, angle: CameraAngle) -> Option<&ClipObject> {
        self.winners.get(&angle)
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CameraAngle, &ClipObject)> {
        self.winners.iter().map(|(angle, clip)| (*angle, clip))
    }
}

/// Picks the first clip per angle from a newest-first listing.
///
/// Only the first `policy.scan_window` entries are inspected, even when some
/// angles are still unresolved at that point. Each entry goes to the first
/// angle in `policy.angle_order` that its key mentions and that has no winner
/// yet, so a key naming two angles can still fill the second one.
pub fn select_latest_per_camera(ranked: &[ClipObject], policy: &SelectionPolicy) -> LatestClips {
    let mut latest = LatestClips::default();

    for clip in ranked.iter().take(policy.scan_window) {
        let open_angle = policy
            .angle_order
            .iter()
            .copied()
            .find(|angle| angle.matches_key(&clip.key) && !latest.winners.contains_key(angle));

        if let Some(angle) = open_angle {
            latest.winners.insert(angle, clip.clone());
        }
    }

    latest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(ts: &str, angle: &str) -> ClipObject {
        ClipObject::new(format!("cams/streams/2024-01-01/{}-{}.mp4", ts, angle))
    }

    #[test]
    fn test_picks_first_per_angle() {
        let ranked = vec![
            clip("2024-01-01_10-00-05", "front"),
            clip("2024-01-01_10-00-04", "back"),
            clip("2024-01-01_10-00-03", "front"),
            clip("2024-01-01_10-00-02", "left"),
            clip("2024-01-01_10-00-01", "right"),
        ];
        let latest = select_latest_per_camera(&ranked, &SelectionPolicy::default());

        assert_eq!(latest.len(), 4);
        assert_eq!(latest.get(CameraAngle::Front), Some(&ranked[0]));
        assert_eq!(latest.get(CameraAngle::Back), Some(&ranked[1]));
        assert_eq!(latest.get(CameraAngle::Left), Some(&ranked[3]));
        assert_eq!(latest.get(CameraAngle::Right), Some(&ranked[4]));
    }

    #[test]
    fn test_winner_keys_contain_their_angle() {
        let ranked = vec![
            clip("2024-01-01_10-00-05", "right"),
            clip("2024-01-01_10-00-04", "garage"),
            clip("2024-01-01_10-00-03", "back"),
            clip("2024-01-01_10-00-02", "right"),
        ];
        let latest = select_latest_per_camera(&ranked, &SelectionPolicy::default());
        assert_eq!(latest.len(), 2);
        for (angle, winner) in latest.iter() {
            assert!(winner.key.contains(angle.as_str()));
        }
    }

    #[test]
    fn test_clip_beyond_scan_window_is_never_selected() {
        let mut ranked: Vec<ClipObject> = (0..8)
            .map(|i| clip(&format!("2024-01-01_10-00-{:02}", 59 - i), "back"))
            .collect();
        ranked.push(clip("2024-01-01_09-00-00", "front"));

        let latest = select_latest_per_camera(&ranked, &SelectionPolicy::default());
        assert_eq!(latest.get(CameraAngle::Front), None);
        assert_eq!(latest.get(CameraAngle::Back), Some(&ranked[0]));

        let wider = SelectionPolicy {
            scan_window: 9,
            ..SelectionPolicy::default()
        };
        let latest = select_latest_per_camera(&ranked, &wider);
        assert_eq!(latest.get(CameraAngle::Front), Some(&ranked[8]));
    }

    #[test]
    fn test_ambiguous_key_falls_through_to_unfilled_angle() {
        let ranked = vec![
            clip("2024-01-01_10-00-02", "front"),
            clip("2024-01-01_10-00-01", "front-left"),
        ];

        let latest = select_latest_per_camera(&ranked, &SelectionPolicy::default());
        assert_eq!(latest.get(CameraAngle::Front), Some(&ranked[0]));
        assert_eq!(latest.get(CameraAngle::Left), Some(&ranked[1]));
    }

    #[test]
    fn test_ambiguous_key_goes_to_first_angle_in_order() {
        let ranked = vec![clip("2024-01-01_10-00-00", "front-left")];

        let latest = select_latest_per_camera(&ranked, &SelectionPolicy::default());
        assert!(latest.get(CameraAngle::Front).is_some());
        assert!(latest.get(CameraAngle::Left).is_none());

        let left_first = SelectionPolicy {
            angle_order: vec![
                CameraAngle::Left,
                CameraAngle::Front,
                CameraAngle::Back,
                CameraAngle::Right,
            ],
            ..SelectionPolicy::default()
        };
        let latest = select_latest_per_camera(&ranked, &left_first);
        assert!(latest.get(CameraAngle::Left).is_some());
        assert!(latest.get(CameraAngle::Front).is_none());
    }

    #[test]
    fn test_empty_and_short_listings() {
        assert!(select_latest_per_camera(&[], &SelectionPolicy::default()).is_empty());

        let ranked = vec![clip("2024-01-01_10-00-00", "left")];
        let latest = select_latest_per_camera(&ranked, &SelectionPolicy::default());
        assert_eq!(latest.len(), 1);
    }
}
