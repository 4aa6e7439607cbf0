use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One timed slide of the storyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Unique key, also selects the background theme
    pub id: u32,
    /// Short ordinal name shown above the headline
    pub label: String,
    pub headline: String,
    /// Description of the intended visual treatment
    pub visual_cue: String,
    /// Description of the sound bed, absent for silent scenes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_cue: Option<String>,
    /// Seconds the scene stays on screen
    pub duration: f32,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog contains no scenes")]
    Empty,

    #[error("scene {id} has invalid duration {duration}, expected a positive number of seconds")]
    InvalidDuration { id: u32, duration: f32 },

    #[error("scene id {0} is used more than once")]
    DuplicateId(u32),

    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered, validated, immutable sequence of scenes.
///
/// Sequencing is by position; ids only key the scenes for styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    scenes: Vec<Scene>,
    lengths: Vec<Duration>, // Scene durations as timer lengths, never zero
    offsets: Vec<f32>,    // Start of each scene, in seconds from the start of a pass
    total_duration: f32,
}

impl Catalog {
    pub fn new(scenes: Vec<Scene>) -> Result<Self, CatalogError> {
        if scenes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(scenes.len());
        let mut lengths = Vec::with_capacity(scenes.len());
        for scene in &scenes {
            // Sub-nanosecond lengths round to zero and would re-fire forever
            let length = Duration::try_from_secs_f32(scene.duration)
                .ok()
                .filter(|length| !length.is_zero());
            let Some(length) = length else {
                return Err(CatalogError::InvalidDuration { id: scene.id, duration: scene.duration });
            };
            if !seen.insert(scene.id) {
                return Err(CatalogError::DuplicateId(scene.id));
            }
            lengths.push(length);
        }

        let mut offsets = Vec::with_capacity(scenes.len());
        let mut total_duration = 0.0;
        for scene in &scenes {
            offsets.push(total_duration);
            total_duration += scene.duration;
        }

        Ok(Self { scenes, lengths, offsets, total_duration })
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Never zero, the catalog is validated non-empty.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Panics if `index` is out of range.
    pub fn scene(&self, index: usize) -> &Scene {
        &self.scenes[index]
    }

    /// How long the scene at `index` stays active.
    pub fn length_of(&self, index: usize) -> Duration {
        self.lengths[index]
    }

    /// Sum of the durations of every scene before `index`.
    pub fn offset_of(&self, index: usize) -> f32 {
        self.offsets[index]
    }

    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    /// Index of the scene that follows `index`, wrapping after the last one.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.scenes.len()
    }
}

#[cfg(test)]
pub(crate) fn scene(id: u32, duration: f32) -> Scene {
    Scene {
        id,
        label: format!("Scene {}", id + 1),
        headline: format!("Headline {}", id),
        visual_cue: format!("Visual {}", id),
        audio_cue: None,
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_duration_is_sum_of_durations() {
        let catalog = Catalog::new(vec![
            scene(0, 2.0), scene(1, 2.0), scene(2, 3.0), scene(3, 3.0), scene(4, 3.0),
        ]).unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.total_duration(), 13.0);
        assert_eq!(catalog.offset_of(0), 0.0);
        assert_eq!(catalog.offset_of(2), 4.0);
        assert_eq!(catalog.offset_of(4), 10.0);
    }

    #[test]
    fn next_index_wraps() {
        let catalog = Catalog::new(vec![scene(0, 1.0), scene(1, 1.0), scene(2, 1.0)]).unwrap();
        assert_eq!(catalog.next_index(0), 1);
        assert_eq!(catalog.next_index(2), 0);
    }

    #[test]
    fn single_scene_wraps_onto_itself() {
        let catalog = Catalog::new(vec![scene(7, 1.5)]).unwrap();
        assert_eq!(catalog.next_index(0), 0);
        assert_eq!(catalog.total_duration(), 1.5);
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn rejects_non_positive_durations() {
        for bad in [0.0, -1.0, 1e-12, 1e30, f32::NAN, f32::INFINITY] {
            let result = Catalog::new(vec![scene(0, 2.0), scene(1, bad)]);
            assert!(
                matches!(result, Err(CatalogError::InvalidDuration { id: 1, .. })),
                "duration {bad} should be rejected"
            );
        }
    }

    #[test]
    fn keeps_scene_lengths_as_durations() {
        let catalog = Catalog::new(vec![scene(0, 2.0), scene(1, 0.5), scene(2, 1e-6)]).unwrap();
        assert_eq!(catalog.length_of(0), Duration::from_secs(2));
        assert_eq!(catalog.length_of(1), Duration::from_millis(500));
        assert!(!catalog.length_of(2).is_zero());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Catalog::new(vec![scene(3, 1.0), scene(4, 1.0), scene(3, 2.0)]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(3))));
    }

    #[test]
    fn ids_do_not_drive_order() {
        let catalog = Catalog::new(vec![scene(9, 1.0), scene(2, 1.0)]).unwrap();
        assert_eq!(catalog.scene(0).id, 9);
        assert_eq!(catalog.scene(1).id, 2);
    }

    #[test]
    fn audio_cue_is_optional_in_json() {
        let json = r#"{"id":1,"label":"A","headline":"H","visualCue":"V","duration":2}"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.audio_cue, None);
        assert_eq!(scene.visual_cue, "V");
        assert_eq!(scene.duration, 2.0);
    }
}
