//! Vertex buffers paired with their layouts.
//!
//! wgpu has no vertex array object; the closest thing is the list of
//! `VertexBufferLayout`s handed to a pipeline plus the buffers bound to the
//! matching slots. [`VertexArray`] keeps both together.

use super::{buffer::VertexBuffer, vertex::VertexLayout};

#[derive(Debug)]
struct BoundBuffer {
    buffer: VertexBuffer,
    stride: wgpu::BufferAddress,
    attributes: Vec<wgpu::VertexAttribute>,
}

#[derive(Debug, Default)]
pub struct VertexArray {
    buffers: Vec<BoundBuffer>,
}

impl VertexArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `buffer` to the next slot. Shader locations continue where the
    /// previous buffer stopped, so the first buffer starts at location 0.
    pub fn add_buffer(&mut self, buffer: VertexBuffer, layout: &VertexLayout) {
        let first_location = self.attribute_count();
        log::debug!(
            "vertex array slot {}: {} bytes, stride {} bytes, locations {}..{}",
            self.buffers.len(),
            buffer.size(),
            layout.stride(),
            first_location,
            first_location as usize + layout.elements().len()
        );
        self.buffers.push(BoundBuffer {
            buffer,
            stride: layout.stride(),
            attributes: layout.attributes(first_location),
        });
    }

    fn attribute_count(&self) -> u32 {
        self.buffers
            .iter()
            .map(|bound| bound.attributes.len() as u32)
            .sum()
    }

    /// Buffer layouts for pipeline creation, one per slot.
    pub fn layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.buffers
            .iter()
            .map(|bound| wgpu::VertexBufferLayout {
                array_stride: bound.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &bound.attributes,
            })
            .collect()
    }

    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for (slot, bound) in self.buffers.iter().enumerate() {
            bound.buffer.bind(render_pass, slot as u32);
        }
    }
}
