use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use raylib::prelude::*;
use tracing::{debug, warn};

/// Encodes raw RGBA frames to an H.264 file through an `ffmpeg` child process.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
    frames: u64,
}

impl Ffmpeg {
    pub fn spawn(width: i32, height: i32, fps: u32, output: &Path) -> io::Result<Ffmpeg> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(output)
            .spawn()?;
        let stdin = process.stdin.take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "ffmpeg stdin is not piped"))?;
        debug!(?output, width, height, fps, "ffmpeg started");
        Ok(Ffmpeg { process, stdin: Some(stdin), frames: 0 })
    }

    pub fn write(&mut self, image: &Image) -> io::Result<()> {
        let stdin = self.stdin.as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "ffmpeg stdin already closed"))?;

        let width = image.width() as usize;
        let height = image.height() as usize;
        let row_len = width * 4; // RGBA
        let pixels = unsafe {
            std::slice::from_raw_parts(image.data() as *const u8, row_len * height)
        };

        // Render textures come back bottom-up, ffmpeg wants top-down
        for row in pixels.chunks_exact(row_len).rev() {
            stdin.write_all(row)?;
        }
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Closes the pipe and waits for the encoder to flush the file.
    pub fn finish(mut self) -> io::Result<()> {
        self.stdin = None;
        let status = self.process.wait()?;
        if status.success() {
            debug!(frames = self.frames, "ffmpeg finished");
            Ok(())
        } else {
            Err(io::Error::other(format!("ffmpeg exited with {}", status)))
        }
    }
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        // No-op after finish(): the child has already been reaped
        self.stdin = None;
        if let Err(e) = self.process.wait() {
            warn!("failed to wait for ffmpeg: {}", e);
        }
    }
}
