#![cfg(feature = "integration-tests")]

mod common;

use std::{io::Cursor, panic::AssertUnwindSafe};

use common::test_utils::headless_device;
use spinning_cube::data_structures::texture::Texture;

fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn oversized_textures_are_rejected_before_upload() {
    let Some((device, queue)) = headless_device() else {
        eprintln!("no GPU adapter available, skipping");
        return;
    };
    let max = device.limits().max_texture_dimension_2d;

    let err = Texture::from_bytes(&device, &queue, &encode_png(max + 1, 1), "too wide")
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("too wide"), "{message}");
    assert!(message.contains(&format!("at most {max}x{max}")), "{message}");

    let texture = Texture::from_bytes(&device, &queue, &encode_png(4, 2), "small").unwrap();
    assert_eq!((texture.width(), texture.height()), (4, 2));
}

#[test]
fn failing_calls_abort_with_call_site() {
    let Some((device, _queue)) = headless_device() else {
        eprintln!("no GPU adapter available, skipping");
        return;
    };
    let too_wide = device.limits().max_texture_dimension_2d + 1;

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        spinning_cube::gpu_call!(
            device,
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("too wide"),
                size: wgpu::Extent3d {
                    width: too_wide,
                    height: 1,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            })
        )
    }));

    let payload = result.expect_err("validation error should abort");
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(message.contains("device.create_texture"), "{message}");
    assert!(message.contains("gpu_errors_test.rs"), "{message}");
}
