//! spinning-cube
//!
//! A small real-time 3D demo: a textured cube rotating in a window while its
//! tint pulses, drawn with wgpu. The crate wraps the few GPU objects the demo
//! needs in thin owning types so the frame code reads like a classic
//! buffer/shader/texture/renderer program.
//!
//! High-level modules
//! - `app`: window, event loop and the initializing/running/terminating phases
//! - `context`: surface, device and queue for the window
//! - `data_structures`: vertex and index buffers, vertex layouts, textures
//! - `shader`: combined shader files and named uniforms
//! - `render`: pipeline creation, draw calls and GPU error checking
//! - `scene`: the cube itself and its per-frame state
//! - `camera` / `animation`: transforms and the colour oscillator
//! - `resources`: loading files from `res/`
//!

pub mod animation;
pub mod app;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;

pub use config::AppConfig;
