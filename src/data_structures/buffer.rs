//! GPU vertex and index buffers.
//!
//! Both are uploaded once at construction and never mutated afterwards. The
//! wgpu buffer is released when the wrapper is dropped.

use wgpu::util::DeviceExt;

#[derive(Debug)]
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
}

impl VertexBuffer {
    pub fn new<T: bytemuck::Pod>(device: &wgpu::Device, data: &[T], label: &str) -> Self {
        let buffer = crate::gpu_call!(
            device,
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        );
        Self { buffer }
    }

    /// Size in bytes.
    pub fn size(&self) -> wgpu::BufferAddress {
        self.buffer.size()
    }

    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>, slot: u32) {
        render_pass.set_vertex_buffer(slot, self.buffer.slice(..));
    }
}

#[derive(Debug)]
pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl IndexBuffer {
    pub fn new(device: &wgpu::Device, indices: &[u32], label: &str) -> Self {
        let buffer = crate::gpu_call!(
            device,
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        );
        Self {
            buffer,
            count: indices.len() as u32,
        }
    }

    /// Number of indices, used as the element count of indexed draws.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_index_buffer(self.buffer.slice(..), wgpu::IndexFormat::Uint32);
    }
}
