use raylib::prelude::*;

/// Background treatment of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub top: Color,
    pub bottom: Color,
    pub glow: Color,   // Soft radial light behind the text
    pub accent: Color, // Timeline fill and call-to-action
}

const FALLBACK: Theme = Theme {
    top: Color::new(14, 16, 28, 255),
    bottom: Color::new(4, 5, 10, 255),
    glow: Color::new(120, 130, 200, 60),
    accent: Color::new(230, 200, 140, 255),
};

const THEMES: [Theme; 5] = [
    // Dark, a faint pulse of light
    Theme {
        top: Color::new(10, 12, 24, 255),
        bottom: Color::new(2, 2, 6, 255),
        glow: Color::new(90, 110, 200, 70),
        accent: Color::new(150, 170, 255, 255),
    },
    // Fog at a fork in the road
    Theme {
        top: Color::new(44, 52, 66, 255),
        bottom: Color::new(14, 18, 26, 255),
        glow: Color::new(200, 210, 230, 60),
        accent: Color::new(200, 215, 235, 255),
    },
    // Gathering threads of light
    Theme {
        top: Color::new(36, 20, 60, 255),
        bottom: Color::new(8, 6, 22, 255),
        glow: Color::new(250, 200, 110, 90),
        accent: Color::new(250, 200, 110, 255),
    },
    // Book cover
    Theme {
        top: Color::new(24, 34, 58, 255),
        bottom: Color::new(6, 10, 22, 255),
        glow: Color::new(230, 190, 120, 80),
        accent: Color::new(235, 195, 125, 255),
    },
    // Morning light
    Theme {
        top: Color::new(96, 70, 54, 255),
        bottom: Color::new(30, 22, 30, 255),
        glow: Color::new(255, 210, 150, 100),
        accent: Color::new(255, 205, 140, 255),
    },
];

/// Maps a scene id to its theme. Ids without a theme get a neutral dark one.
pub fn theme_for(id: u32) -> Theme {
    THEMES.get(id as usize).copied().unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_storyboard_scene_has_its_own_theme() {
        let themes: Vec<Theme> = (0..5).map(theme_for).collect();
        for (i, a) in themes.iter().enumerate() {
            for b in &themes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_ids_fall_back() {
        assert_eq!(theme_for(5), FALLBACK);
        assert_eq!(theme_for(u32::MAX), FALLBACK);
    }
}
