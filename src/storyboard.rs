use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use serde::Deserialize;
use tracing::debug;
use crate::scene::{Catalog, CatalogError, Scene};

const BUILTIN: &str = include_str!("../catalogs/life_compass.en.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Static page copy that surrounds the scenes. The controller never looks at it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Presentation {
    pub title: String,
    pub description: String,
    pub direction: Direction,
    pub tagline: String,
    pub call_to_action: String,
    pub pace: String,
    pub audio_label: String,
    /// `{seconds}` is replaced with the active scene's duration
    pub duration_label: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            title: "Storyboard".to_string(),
            description: String::new(),
            direction: Direction::Ltr,
            tagline: String::new(),
            call_to_action: String::new(),
            pace: String::new(),
            audio_label: "Audio:".to_string(),
            duration_label: "Duration: {seconds} s".to_string(),
        }
    }
}

impl Presentation {
    pub fn duration_text(&self, scene: &Scene) -> String {
        self.duration_label.replace("{seconds}", &scene.duration.to_string())
    }
}

#[derive(Deserialize)]
struct StoryboardFile {
    #[serde(flatten)]
    presentation: Presentation,
    scenes: Vec<Scene>,
}

/// A validated catalog together with the copy rendered around it.
#[derive(Debug, Clone)]
pub struct Storyboard {
    pub presentation: Presentation,
    pub catalog: Catalog,
}

impl Storyboard {
    /// The "Life Compass" storyboard compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: StoryboardFile = serde_json::from_str(json)?;
        let catalog = Catalog::new(file.scenes)?;
        Ok(Self { presentation: file.presentation, catalog })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        let storyboard = Self::from_json(&json)?;
        debug!(?path, scenes = storyboard.catalog.len(), "loaded storyboard");
        Ok(storyboard)
    }

    /// Every distinct character the page can display, for rasterising a font.
    pub fn glyphs(&self) -> String {
        let p = &self.presentation;
        let mut chars: BTreeSet<char> = ('0'..='9').chain(" /.s".chars()).collect();
        let page_text = [&p.tagline, &p.call_to_action, &p.pace, &p.audio_label, &p.duration_label];
        for text in page_text {
            chars.extend(text.chars());
        }
        for scene in self.catalog.scenes() {
            chars.extend(scene.label.chars());
            chars.extend(scene.headline.chars());
            chars.extend(scene.visual_cue.chars());
            if let Some(audio) = &scene.audio_cue {
                chars.extend(audio.chars());
            }
        }
        chars.retain(|c| !c.is_control());
        chars.into_iter().collect()
    }
}
