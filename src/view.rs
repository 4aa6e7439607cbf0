use raylib::prelude::*;
use crate::constants::*;
use crate::controller::Snapshot;
use crate::particles::PARTICLES;
use crate::storyboard::{Direction, Presentation};
use crate::theme::{theme_for, Theme};

const TEXT: Color = Color::new(245, 240, 232, 255);
const MUTED: Color = Color::new(200, 196, 210, 255);
const TRACK: Color = Color::new(255, 255, 255, 40);
const BUTTON_TEXT: Color = Color::new(20, 16, 24, 255);

/// Whole seconds, rounding halves up.
pub fn format_time(seconds: f32) -> String {
    format!("{}s", seconds.round() as i64)
}

pub fn timer_text(snapshot: &Snapshot<'_>) -> String {
    format!("{} / {}", format_time(snapshot.elapsed), format_time(snapshot.total_duration))
}

/// Greedy word wrap. A single word wider than `max_width` gets a line of its own.
pub fn wrap_lines(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", line, word);
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Draws one frame of the storyboard page from a controller snapshot.
pub struct StoryboardView<F: RaylibFont> {
    font: F,
    presentation: Presentation,
}

impl<F: RaylibFont> StoryboardView<F> {
    pub fn new(font: F, presentation: Presentation) -> Self {
        Self { font, presentation }
    }

    /// `t` is seconds since mount, used for the decorative animation only.
    pub fn draw(&self, d: &mut RaylibDrawHandle, snapshot: &Snapshot<'_>, t: f32) {
        let theme = theme_for(snapshot.active_scene.id);
        self.draw_background(d, &theme, t);

        let scene = snapshot.active_scene;
        let p = &self.presentation;
        let mut y = CONTENT_TOP;

        y = self.draw_block(d, &scene.label, LABEL_SIZE, theme.accent, y) + LINE_GAP;
        y = self.draw_block(d, &scene.headline, HEADLINE_SIZE, TEXT, y) + LINE_GAP;
        y = self.draw_block(d, &scene.visual_cue, BODY_SIZE, MUTED, y) + LINE_GAP;
        if let Some(audio) = &scene.audio_cue {
            let row = format!("{} {}", p.audio_label, audio);
            y = self.draw_block(d, &row, META_SIZE, MUTED, y);
        }

        y += LINE_GAP * 3.0;
        y = self.draw_timeline(d, snapshot, &theme, y) + LINE_GAP * 3.0;

        if !p.tagline.is_empty() {
            y = self.draw_block(d, &p.tagline, META_SIZE, MUTED, y) + LINE_GAP;
        }
        if !p.call_to_action.is_empty() {
            y = self.draw_button(d, &p.call_to_action, &theme, y) + LINE_GAP * 2.0;
        }

        let mut meta = p.duration_text(scene);
        if !p.pace.is_empty() {
            meta = format!("{}    {}", meta, p.pace);
        }
        self.draw_block(d, &meta, META_SIZE, MUTED, y);
    }

    fn draw_background(&self, d: &mut RaylibDrawHandle, theme: &Theme, t: f32) {
        d.draw_rectangle_gradient_v(0, 0, RENDER_WIDTH, RENDER_HEIGHT, theme.top, theme.bottom);

        let pulse = 0.9 + 0.1 * (t * 1.5).sin();
        d.draw_circle_gradient(
            RENDER_WIDTH / 2,
            RENDER_HEIGHT / 2,
            RENDER_HEIGHT as f32 * 0.6 * pulse,
            theme.glow,
            Color::new(theme.glow.r, theme.glow.g, theme.glow.b, 0),
        );

        for particle in PARTICLES.iter() {
            particle.draw(d, t, theme.accent);
        }
    }

    fn measure(&self, text: &str, size: f32) -> f32 {
        self.font.measure_text(text, size, TEXT_SPACING).x
    }

    fn line_x(&self, width: f32) -> f32 {
        let left = (RENDER_WIDTH as f32 - CONTENT_WIDTH) * 0.5;
        match self.presentation.direction {
            Direction::Ltr => left,
            Direction::Rtl => left + CONTENT_WIDTH - width,
        }
    }

    // Wrapped paragraph, returns the y just below it
    fn draw_block(&self, d: &mut RaylibDrawHandle, text: &str, size: f32, color: Color, mut y: f32) -> f32 {
        for line in wrap_lines(text, CONTENT_WIDTH, |s| self.measure(s, size)) {
            let x = self.line_x(self.measure(&line, size));
            d.draw_text_ex(&self.font, &line, Vector2::new(x, y), size, TEXT_SPACING, color);
            y += size + LINE_GAP * 0.5;
        }
        y
    }

    fn draw_timeline(&self, d: &mut RaylibDrawHandle, snapshot: &Snapshot<'_>, theme: &Theme, y: f32) -> f32 {
        let time = timer_text(snapshot);
        let time_width = self.measure(&time, META_SIZE);
        let bars_width = CONTENT_WIDTH - time_width - BAR_GAP * 2.0;
        let count = snapshot.scene_count as f32;
        let bar_width = (bars_width - BAR_GAP * (count - 1.0)) / count;
        let bar_y = y + (META_SIZE - BAR_HEIGHT) * 0.5;

        let left = (RENDER_WIDTH as f32 - CONTENT_WIDTH) * 0.5;
        let rtl = self.presentation.direction == Direction::Rtl;
        let (bars_left, time_x) = if rtl {
            (left + time_width + BAR_GAP * 2.0, left)
        } else {
            (left, left + CONTENT_WIDTH - time_width)
        };

        for i in 0..snapshot.scene_count {
            // Right to left pages read the timeline from the right
            let slot = if rtl { snapshot.scene_count - 1 - i } else { i };
            let x = bars_left + slot as f32 * (bar_width + BAR_GAP);
            let fill = bar_width * snapshot.bar_fill(i);

            d.draw_rectangle_rounded(Rectangle::new(x, bar_y, bar_width, BAR_HEIGHT), 1.0, 8, TRACK);
            if fill > 0.0 {
                let fill_x = if rtl { x + bar_width - fill } else { x };
                d.draw_rectangle_rounded(Rectangle::new(fill_x, bar_y, fill, BAR_HEIGHT), 1.0, 8, theme.accent);
            }
        }

        d.draw_text_ex(&self.font, &time, Vector2::new(time_x, y), META_SIZE, TEXT_SPACING, TEXT);
        y + META_SIZE
    }

    // Decorative only, nothing reacts to it
    fn draw_button(&self, d: &mut RaylibDrawHandle, label: &str, theme: &Theme, y: f32) -> f32 {
        let text_width = self.measure(label, BODY_SIZE);
        let width = text_width + BODY_SIZE * 2.0;
        let height = BODY_SIZE * 2.0;
        let x = self.line_x(width);

        d.draw_rectangle_rounded(Rectangle::new(x, y, width, height), 0.5, 12, theme.accent);
        d.draw_text_ex(
            &self.font,
            label,
            Vector2::new(x + BODY_SIZE, y + BODY_SIZE * 0.5),
            BODY_SIZE,
            TEXT_SPACING,
            BUTTON_TEXT,
        );
        y + height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::controller::SlideshowController;
    use crate::scene::{scene, Catalog};

    // Every character is 10 units wide
    fn mono(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_lines("we all get lost sometimes", 100.0, mono);
        assert_eq!(lines, vec!["we all get", "lost", "sometimes"]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_lines("Life Compass", 500.0, mono), vec!["Life Compass"]);
    }

    #[test]
    fn long_word_gets_its_own_line() {
        let lines = wrap_lines("a extraordinarily b", 50.0, mono);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_lines("   ", 100.0, mono).is_empty());
    }

    #[test]
    fn time_rounds_to_whole_seconds() {
        assert_eq!(format_time(0.0), "0s");
        assert_eq!(format_time(2.4), "2s");
        assert_eq!(format_time(2.5), "3s");
        assert_eq!(format_time(13.0), "13s");
    }

    #[test]
    fn timer_text_shows_elapsed_over_total() {
        let catalog = Catalog::new(vec![
            scene(0, 2.0), scene(1, 2.0), scene(2, 3.0), scene(3, 3.0), scene(4, 3.0),
        ]).unwrap();
        let mut controller = SlideshowController::new(catalog, Duration::ZERO);
        controller.tick(Duration::from_secs(4));
        controller.sample_frame(Duration::from_millis(5400));

        assert_eq!(timer_text(&controller.snapshot()), "5s / 13s");
    }
}
