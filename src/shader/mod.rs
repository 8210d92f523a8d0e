//! Shader programs.
//!
//! A [`Shader`] is built from a combined source file (see [`source`]) and owns
//! the compiled vertex and fragment modules together with the uniform buffer
//! the program reads at `@group(0) @binding(0)`.

use std::path::Path;

use anyhow::Context as _;
use cgmath::Matrix4;
use wgpu::util::DeviceExt;

pub mod source;
pub mod uniform;

pub use source::{ShaderProgramSource, parse_shader};
pub use uniform::{UniformBlock, UniformKind, UniformLayout};

use crate::resources;

/// Bind group index of the uniform block.
pub const UNIFORM_GROUP: u32 = 0;

#[derive(Debug)]
pub struct Shader {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    uniforms: UniformBlock,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl Shader {
    pub const VERTEX_ENTRY: &'static str = "vs_main";
    pub const FRAGMENT_ENTRY: &'static str = "fs_main";

    /// Read, split and compile a combined shader file.
    pub async fn load(
        device: &wgpu::Device,
        path: &Path,
        uniforms: UniformLayout,
    ) -> anyhow::Result<Self> {
        let text = resources::load_string(path).await?;
        let source =
            parse_shader(&text).with_context(|| format!("invalid shader {}", path.display()))?;
        Ok(Self::from_source(
            device,
            &path.display().to_string(),
            &source,
            uniforms,
        ))
    }

    /// Compile both stages. Compilation errors abort through [`crate::gpu_call!`].
    pub fn from_source(
        device: &wgpu::Device,
        label: &str,
        source: &ShaderProgramSource,
        uniforms: UniformLayout,
    ) -> Self {
        let vertex = crate::gpu_call!(
            device,
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{label} (vertex)")),
                source: wgpu::ShaderSource::Wgsl(source.vertex.as_str().into()),
            })
        );
        let fragment = crate::gpu_call!(
            device,
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{label} (fragment)")),
                source: wgpu::ShaderSource::Wgsl(source.fragment.as_str().into()),
            })
        );

        let uniforms = UniformBlock::new(uniforms);
        let buffer = crate::gpu_call!(
            device,
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} uniforms")),
                contents: uniforms.bytes(),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        );
        let bind_group_layout = crate::gpu_call!(
            device,
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            })
        );
        let bind_group = crate::gpu_call!(
            device,
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("uniform_bind_group"),
            })
        );

        log::debug!(
            "shader {label}: {} uniforms, {} bytes",
            uniforms.layout().fields().len(),
            uniforms.layout().size()
        );

        Self {
            vertex,
            fragment,
            uniforms,
            buffer,
            bind_group_layout,
            bind_group,
        }
    }

    pub fn set_uniform_1i(&mut self, name: &str, value: i32) {
        self.uniforms.set_1i(name, value);
    }

    pub fn set_uniform_4f(&mut self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        self.uniforms.set_4f(name, v0, v1, v2, v3);
    }

    pub fn set_uniform_mat4(&mut self, name: &str, matrix: &Matrix4<f32>) {
        self.uniforms.set_mat4(name, matrix);
    }

    /// Copy changed uniforms to the GPU. The write lands before the next
    /// submitted command buffer executes.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        if self.uniforms.take_dirty() {
            crate::gpu_call!(
                device,
                queue.write_buffer(&self.buffer, 0, self.uniforms.bytes())
            );
        }
    }

    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(UNIFORM_GROUP, &self.bind_group, &[]);
    }

    pub fn uniforms(&self) -> &UniformBlock {
        &self.uniforms
    }

    pub fn vertex_module(&self) -> &wgpu::ShaderModule {
        &self.vertex
    }

    pub fn fragment_module(&self) -> &wgpu::ShaderModule {
        &self.fragment
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }
}
