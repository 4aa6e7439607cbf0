pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Default frames per second

pub const CONTENT_WIDTH: f32 = 1180.0;        // Width of the text column
pub const CONTENT_TOP: f32 = 170.0;           // Top of the text column

pub const LABEL_SIZE: f32 = 28.0;
pub const HEADLINE_SIZE: f32 = 64.0;
pub const BODY_SIZE: f32 = 32.0;
pub const META_SIZE: f32 = 24.0;
pub const TEXT_SPACING: f32 = 2.0;
pub const LINE_GAP: f32 = 14.0;

pub const BAR_HEIGHT: f32 = 8.0;              // Height of a timeline bar
pub const BAR_GAP: f32 = 12.0;                // Gap between timeline bars

pub const GLYPH_SIZE: i32 = 96;               // Rasterised size of a loaded font
