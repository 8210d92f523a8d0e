//! The spinning cube: every GPU resource the demo draws with, plus the state
//! that changes from frame to frame.
//!
//! The scene renders into whatever colour and depth views it is given, so the
//! window loop and offscreen rendering share the same code.

use cgmath::Deg;

use crate::{
    animation::ColorOscillator,
    camera::{self, Projection},
    config::AppConfig,
    data_structures::{
        buffer::{IndexBuffer, VertexBuffer},
        cube,
        texture::Texture,
        vertex::Vertex,
        vertex_array::VertexArray,
    },
    render::{self, Renderer},
    resources,
    shader::{Shader, UniformLayout},
};

/// The cube samples its texture from unit 0.
pub const TEXTURE_UNIT: u32 = 0;

#[derive(Debug)]
pub struct CubeScene {
    vertex_array: VertexArray,
    index_buffer: IndexBuffer,
    shader: Shader,
    texture: Texture,
    renderer: Renderer,
    projection: Projection,
    color: ColorOscillator,
    tint: [f32; 3],
    rotation_speed: f32,
    frames: u64,
}

impl CubeScene {
    /// Upload geometry, load shader and texture and build the pipeline.
    ///
    /// `size` is the framebuffer size; it fixes the projection's aspect ratio.
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        size: [u32; 2],
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        let mut vertex_array = VertexArray::new();
        let vertex_buffer = VertexBuffer::new(device, &cube::VERTICES, "Cube Vertex Buffer");
        vertex_array.add_buffer(vertex_buffer, &Vertex::layout()?);
        let index_buffer = IndexBuffer::new(device, &cube::INDICES, "Cube Index Buffer");

        let mut shader = Shader::load(device, &config.shader_path, UniformLayout::basic()).await?;
        let [g, b, a] = config.tint;
        shader.set_uniform_4f("u_Color", 0.2, g, b, a);

        let texture = resources::load_texture(device, queue, &config.texture_path).await?;
        shader.set_uniform_1i("u_Texture", TEXTURE_UNIT as i32);

        let renderer = Renderer::new(device, color_format, &shader, &vertex_array);
        let projection = Projection::new(
            size[0],
            size[1],
            Deg(config.fovy_degrees),
            config.znear,
            config.zfar,
        );
        log::info!(
            "scene ready: {} indices, aspect {:.3}",
            index_buffer.count(),
            projection.aspect()
        );

        Ok(Self {
            vertex_array,
            index_buffer,
            shader,
            texture,
            renderer,
            projection,
            color: ColorOscillator::new(config.color_step, 0.0, 1.0),
            tint: config.tint,
            rotation_speed: config.rotation_speed,
            frames: 0,
        })
    }

    /// Draw one frame `elapsed_secs` after start-up and submit it.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear_colour: wgpu::Color,
        elapsed_secs: f32,
    ) {
        let mut encoder = crate::gpu_call!(
            device,
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            })
        );
        {
            let mut render_pass =
                self.renderer
                    .clear(&mut encoder, color_view, depth_view, clear_colour);

            let [g, b, a] = self.tint;
            self.shader
                .set_uniform_4f("u_Color", self.color.value(), g, b, a);
            self.shader.set_uniform_mat4(
                "model",
                &camera::model_at(elapsed_secs * self.rotation_speed),
            );
            self.shader.set_uniform_mat4("view", &camera::view());
            self.shader
                .set_uniform_mat4("projection", &self.projection.calc_matrix());
            self.shader.upload(device, queue);

            self.texture.bind(&mut render_pass, TEXTURE_UNIT);
            self.renderer.draw(
                &mut render_pass,
                &self.vertex_array,
                &self.index_buffer,
                &self.shader,
            );
        }
        render::submit(device, queue, encoder);

        self.color.advance();
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!("{} frames rendered", self.frames);
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn color(&self) -> &ColorOscillator {
        &self.color
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn shader(&self) -> &Shader {
        &self.shader
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}
