//! GPU-side data: buffers, vertex layouts, textures and the cube geometry.
//!
//! - `buffer` holds vertex and index buffers
//! - `vertex` describes vertex formats and their layouts
//! - `vertex_array` pairs vertex buffers with layouts
//! - `texture` contains image decoding, sampled textures and the depth target
//! - `cube` is the geometry the demo draws

pub mod buffer;
pub mod cube;
pub mod texture;
pub mod vertex;
pub mod vertex_array;
