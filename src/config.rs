//! Application settings.
//!
//! Everything the demo would otherwise hard-code lives in [`AppConfig`]; the
//! defaults reproduce the classic spinning-cube setup.

use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    /// Window size in logical pixels. The window cannot be resized.
    pub width: u32,
    pub height: u32,
    pub shader_path: PathBuf,
    pub texture_path: PathBuf,
    pub clear_colour: wgpu::Color,
    /// Red channel step per frame of the tint animation.
    pub color_step: f32,
    /// Green, blue and alpha of the tint.
    pub tint: [f32; 3],
    /// Radians per second about the cube's rotation axis.
    pub rotation_speed: f32,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// `env_logger` filter, e.g. "info" or "spinning_cube=debug,wgpu=warn".
    /// Falls back to `RUST_LOG`, then to "info".
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Rendering a square".to_string(),
            width: 800,
            height: 600,
            shader_path: PathBuf::from("res/shaders/Basic.shader"),
            texture_path: PathBuf::from("res/textures/texture0.png"),
            clear_colour: wgpu::Color::BLACK,
            color_step: 0.05,
            tint: [0.3, 0.8, 1.0],
            rotation_speed: 1.0,
            fovy_degrees: 45.0,
            znear: 0.1,
            zfar: 100.0,
            log_filter: None,
        }
    }
}
