/// Mutable slideshow position: which scene is active and how far into it we are.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ControllerState {
    pub active_index: usize,  // Position in the catalog, wraps to 0 after the last scene
    pub scene_progress: f32,  // Fraction of the active scene elapsed, in [0, 1]
}

impl ControllerState {
    pub fn new() -> Self {
        Self {
            active_index: 0,
            scene_progress: 0.0,
        }
    }

    /// Moves to `index` and forgets any progress made in the previous scene.
    pub fn enter(&mut self, index: usize) {
        self.active_index = index;
        self.scene_progress = 0.0;
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}
