use std::path::PathBuf;
use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod clock;
mod constants;
mod controller;
mod ffmpeg;
mod particles;
mod scene;
mod state;
mod storyboard;
mod theme;
mod view;

use crate::clock::{FixedStepClock, FrameClock, RealtimeClock};
use crate::constants::*;
use crate::controller::{SlideshowController, Snapshot};
use crate::ffmpeg::Ffmpeg;
use crate::storyboard::Storyboard;
use crate::view::StoryboardView;

#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Plays a timed storyboard of narrative scenes", long_about = None)]
struct Args {
    /// Storyboard JSON file, the built-in storyboard is played when omitted
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// TTF/OTF font used for all text, needed for non-Latin storyboards
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render to this video file through ffmpeg instead of playing in real time
    #[arg(short, long)]
    record: Option<PathBuf>,

    /// Passes through the storyboard to record or dry-run
    #[arg(long, default_value_t = 1)]
    passes: u64,

    /// Frames per second
    #[arg(long, default_value_t = FPS, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Drive the slideshow without a window and log every scene change
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    let storyboard = match &args.catalog {
        Some(path) => Storyboard::load(path)
            .with_context(|| format!("Failed to load storyboard {}", path.display()))?,
        None => Storyboard::builtin().context("Built-in storyboard is invalid")?,
    };
    info!(
        title = %storyboard.presentation.title,
        scenes = storyboard.catalog.len(),
        total = storyboard.catalog.total_duration(),
        "storyboard loaded"
    );

    if args.dry_run {
        dry_run(&storyboard, &args);
        return Ok(());
    }

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title(&storyboard.presentation.title)
        .vsync()
        .resizable()
        .build();
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    if args.record.is_none() {
        rl.set_target_fps(args.fps);
    }

    let result = match &args.font {
        Some(path) => {
            let path_str = path.to_str()
                .ok_or_else(|| anyhow!("Font path {} is not valid UTF-8", path.display()))?;
            let glyphs = storyboard.glyphs();
            let font = rl.load_font_ex(&thread, path_str, GLYPH_SIZE, Some(glyphs.as_str()))
                .map_err(|e| anyhow!("Failed to load font {}: {}", path.display(), e))?;
            play(&mut rl, &thread, &args, &storyboard, font)
        }
        None => {
            let font = rl.get_font_default();
            play(&mut rl, &thread, &args, &storyboard, font)
        }
    };

    if let Err(e) = &result {
        error!("Playback failed: {:#}", e);
    }
    result
}

/// Logs once per scene entry.
fn log_scene_changes() -> impl FnMut(&Snapshot<'_>) + 'static {
    let mut last = None;
    move |snapshot: &Snapshot<'_>| {
        let key = (snapshot.passes, snapshot.active_index);
        if last == Some(key) {
            return;
        }
        last = Some(key);
        let scene = snapshot.active_scene;
        info!(
            index = snapshot.active_index,
            id = scene.id,
            label = %scene.label,
            duration = scene.duration,
            elapsed = snapshot.elapsed,
            "{}",
            scene.headline
        );
    }
}

fn dry_run(storyboard: &Storyboard, args: &Args) {
    let mut clock = FixedStepClock::new(args.fps);
    let mut controller = SlideshowController::new(storyboard.catalog.clone(), clock.next_frame());
    controller.subscribe(log_scene_changes());

    let passes = args.passes.max(1);
    while controller.passes() < passes {
        controller.tick(clock.next_frame());
    }
    controller.shutdown();
    info!(passes, "dry run finished");
}

fn play<F: RaylibFont>(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    args: &Args,
    storyboard: &Storyboard,
    font: F,
) -> Result<()> {
    let view = StoryboardView::new(font, storyboard.presentation.clone());

    let mut framebuffer = rl.load_render_texture(thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("Failed to create render texture: {}", e))?;

    // Start ffmpeg process and connect pipes so we can send rendered frames
    let mut recorder = match &args.record {
        Some(path) => {
            info!(?path, passes = args.passes.max(1), "recording storyboard");
            Some(Ffmpeg::spawn(RENDER_WIDTH, RENDER_HEIGHT, args.fps, path).context("Failed to start ffmpeg")?)
        }
        None => None,
    };

    // Exported video must not depend on how fast frames render
    let mut clock: Box<dyn FrameClock> = if recorder.is_some() {
        Box::new(FixedStepClock::new(args.fps))
    } else {
        Box::new(RealtimeClock::new())
    };

    let mut controller = SlideshowController::new(storyboard.catalog.clone(), Duration::ZERO);
    controller.subscribe(log_scene_changes());

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = clock.next_frame();
        controller.tick(now);
        if recorder.is_some() && controller.passes() >= args.passes.max(1) {
            break;
        }

        // --- Render each frame into fixed size "framebuffer" ---
        let snapshot = controller.snapshot();
        let t = now.as_secs_f32();
        rl.draw_texture_mode(thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            d.clear_background(Color::BLACK);
            view.draw(&mut d, &snapshot, t);
        });

        // Draw inverted copy of framebuffer to the screen for feedback
        let mut d2 = rl.begin_drawing(thread);
        let sw = d2.get_screen_width() as f32;
        let sh = d2.get_screen_height() as f32;
        d2.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d2);

        if let Some(ffmpeg) = recorder.as_mut() {
            let image = framebuffer.load_image()
                .map_err(|e| anyhow!("Failed to read back framebuffer: {}", e))?;
            ffmpeg.write(&image).context("Failed to send frame to ffmpeg")?;
        }
    }

    controller.shutdown();

    if let Some(ffmpeg) = recorder {
        let frames = ffmpeg.frames();
        ffmpeg.finish().context("ffmpeg failed to encode the video")?;
        info!(frames, "video written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_defaults_to_render_rate() {
        let args = Args::try_parse_from(["storyboard"]).unwrap();
        assert_eq!(args.fps, FPS);
        assert_eq!(args.passes, 1);
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(Args::try_parse_from(["storyboard", "--fps", "0"]).is_err());
        assert!(Args::try_parse_from(["storyboard", "--fps", "30"]).is_ok());
    }
}
