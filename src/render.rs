//! Draw calls and GPU error checking.
//!
//! [`Renderer`] owns the render pipeline (blending, depth test, primitive
//! setup) and issues the indexed draw for a vertex array, index buffer and
//! shader. [`gpu_call!`](crate::gpu_call) wraps any GPU call in a validation
//! error scope and aborts with the failing call, file and line if wgpu
//! reports an error.

use std::{future::Future, iter};

use crate::{
    data_structures::{
        buffer::IndexBuffer,
        texture::{self, DepthTexture},
        vertex_array::VertexArray,
    },
    pipelines::basic::mk_render_pipeline,
    shader::Shader,
};

/// Run a GPU call inside a validation error scope.
///
/// Any validation error raised by the call is fatal: it is logged with the
/// call's source text and location, then the program panics.
#[macro_export]
macro_rules! gpu_call {
    ($device:expr, $call:expr) => {{
        let scope = $device.push_error_scope(::wgpu::ErrorFilter::Validation);
        let result = $call;
        $crate::render::check_error_scope(scope.pop(), stringify!($call), file!(), line!());
        result
    }};
}

/// Wait for a popped error scope and abort if it caught an error.
pub fn check_error_scope<F>(popped: F, call: &str, file: &str, line: u32)
where
    F: Future<Output = Option<wgpu::Error>>,
{
    if let Some(error) = futures::executor::block_on(popped) {
        log::error!("[wgpu error] {call} {file}:{line}\n{error}");
        panic!("wgpu error in `{call}` at {file}:{line}: {error}");
    }
}

/// Finish `encoder` and submit it, checking for errors.
pub fn submit(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    encoder: wgpu::CommandEncoder,
) -> wgpu::SubmissionIndex {
    gpu_call!(device, queue.submit(iter::once(encoder.finish())))
}

#[derive(Debug)]
pub struct Renderer {
    pipeline: wgpu::RenderPipeline,
}

impl Renderer {
    /// Build the pipeline for drawing `vertex_array` with `shader` into
    /// targets of `color_format`, with one texture bound at unit 0.
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        shader: &Shader,
        vertex_array: &VertexArray,
    ) -> Self {
        let texture_layout = texture::bind_group_layout(device);
        let layout = gpu_call!(
            device,
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[shader.bind_group_layout(), &texture_layout],
                immediate_size: 0,
            })
        );
        let pipeline = gpu_call!(
            device,
            mk_render_pipeline(
                device,
                &layout,
                shader,
                color_format,
                Some(wgpu::BlendState::ALPHA_BLENDING),
                Some(DepthTexture::DEPTH_FORMAT),
                &vertex_array.layouts(),
            )
        );
        Self { pipeline }
    }

    /// Begin a render pass that clears both the colour and the depth target.
    pub fn clear<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear_colour: wgpu::Color,
    ) -> wgpu::RenderPass<'encoder> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        })
    }

    /// Bind everything and draw all indices as triangles.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        vertex_array: &VertexArray,
        index_buffer: &IndexBuffer,
        shader: &Shader,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        shader.bind(render_pass);
        vertex_array.bind(render_pass);
        index_buffer.bind(render_pass);
        render_pass.draw_indexed(0..index_buffer.count(), 0, 0..1);
    }
}
