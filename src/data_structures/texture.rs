//! GPU textures.
//!
//! [`Texture`] is a sampled 2D colour texture with its own bind group, ready
//! to be bound to a texture unit. [`DepthTexture`] is the depth attachment
//! that gives the render pass depth testing.

use anyhow::{Context as _, bail};

/// Bind group index of texture unit 0. Unit `n` lives at `TEXTURE_GROUP + n`.
pub const TEXTURE_GROUP: u32 = 1;

/// Decoded pixels ready for upload.
#[derive(Debug)]
pub struct DecodedImage {
    pub pixels: image::RgbaImage,
    /// Channel count of the source image before RGBA conversion.
    pub channels: u8,
}

/// Decode an image file and flip it vertically.
///
/// The cube's texture coordinates put v = 0 at the bottom of the image, so
/// the first uploaded row has to be the bottom one.
pub fn decode_rgba(bytes: &[u8]) -> anyhow::Result<DecodedImage> {
    let img = image::load_from_memory(bytes).context("failed to decode image")?;
    let channels = img.color().channel_count();
    let pixels = img.flipv().to_rgba8();
    Ok(DecodedImage { pixels, channels })
}

/// Layout shared by every colour texture: the texture at binding 0, its
/// sampler at binding 1.
pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    crate::gpu_call!(
        device,
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("texture_bind_group_layout"),
        })
    )
}

/// A sampled 2D texture.
#[derive(Debug)]
pub struct Texture {
    #[allow(unused)]
    texture: wgpu::Texture,
    #[allow(unused)]
    view: wgpu::TextureView,
    #[allow(unused)]
    sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    channels: u8,
}

impl Texture {
    /// Decode image file contents and upload them.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> anyhow::Result<Self> {
        let decoded = decode_rgba(bytes).with_context(|| format!("texture {label}"))?;
        let (width, height) = decoded.pixels.dimensions();
        let max = device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            bail!("texture {label} is {width}x{height}, the device allows at most {max}x{max}");
        }
        Ok(Self::from_image(device, queue, decoded, label))
    }

    /// Upload decoded pixels. The CPU copy is dropped once the upload is queued.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: DecodedImage,
        label: &str,
    ) -> Self {
        let DecodedImage { pixels, channels } = image;
        let (width, height) = pixels.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = crate::gpu_call!(
            device,
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            })
        );

        crate::gpu_call!(
            device,
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                },
                &pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                size,
            )
        );
        drop(pixels);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = crate::gpu_call!(
            device,
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some(label),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                ..Default::default()
            })
        );
        let layout = bind_group_layout(device);
        let bind_group = crate::gpu_call!(
            device,
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
                label: Some(label),
            })
        );

        log::info!("texture {label}: {width}x{height}, {channels} channels");

        Self {
            texture,
            view,
            sampler,
            bind_group,
            width,
            height,
            channels,
        }
    }

    /// Bind to texture `unit` for the draws that follow in this pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>, unit: u32) {
        render_pass.set_bind_group(TEXTURE_GROUP + unit, &self.bind_group, &[]);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }
}

/// Depth attachment for depth-tested render passes.
#[derive(Debug)]
pub struct DepthTexture {
    #[allow(unused)]
    texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// `size` is [width, height] in pixels; zero sizes are bumped to 1.
    pub fn new(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let texture = crate::gpu_call!(
            device,
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}
