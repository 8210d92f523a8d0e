//! Vertex data and the layout descriptor that tells the pipeline how to read it.
//!
//! A [`VertexLayout`] is built by pushing elements in the order they appear in
//! memory. The layout then computes the stride and the byte offset of every
//! attribute, so buffers can be described to wgpu without hand-written offsets.

use anyhow::bail;

/// A single cube vertex: position followed by texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            tex_coords,
        }
    }

    /// Position (3 floats) then texture coordinates (2 floats).
    pub fn layout() -> anyhow::Result<VertexLayout> {
        let mut layout = VertexLayout::new();
        layout.push::<f32>(3)?.push::<f32>(2)?;
        Ok(layout)
    }
}

/// Scalar types that can be pushed onto a [`VertexLayout`].
pub trait VertexElement {
    /// The wgpu format for `count` consecutive values of this type, if wgpu has one.
    fn format(count: u32) -> Option<wgpu::VertexFormat>;
}

impl VertexElement for f32 {
    fn format(count: u32) -> Option<wgpu::VertexFormat> {
        match count {
            1 => Some(wgpu::VertexFormat::Float32),
            2 => Some(wgpu::VertexFormat::Float32x2),
            3 => Some(wgpu::VertexFormat::Float32x3),
            4 => Some(wgpu::VertexFormat::Float32x4),
            _ => None,
        }
    }
}

impl VertexElement for u32 {
    fn format(count: u32) -> Option<wgpu::VertexFormat> {
        match count {
            1 => Some(wgpu::VertexFormat::Uint32),
            2 => Some(wgpu::VertexFormat::Uint32x2),
            3 => Some(wgpu::VertexFormat::Uint32x3),
            4 => Some(wgpu::VertexFormat::Uint32x4),
            _ => None,
        }
    }
}

// Bytes are read as normalized values, e.g. packed colours.
impl VertexElement for u8 {
    fn format(count: u32) -> Option<wgpu::VertexFormat> {
        match count {
            2 => Some(wgpu::VertexFormat::Unorm8x2),
            4 => Some(wgpu::VertexFormat::Unorm8x4),
            _ => None,
        }
    }
}

/// One attribute of a vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutElement {
    pub format: wgpu::VertexFormat,
    pub count: u32,
}

impl LayoutElement {
    pub fn size(&self) -> wgpu::BufferAddress {
        self.format.size()
    }
}

/// Ordered list of vertex attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexLayout {
    elements: Vec<LayoutElement>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` values of `T` to the layout.
    pub fn push<T: VertexElement>(&mut self, count: u32) -> anyhow::Result<&mut Self> {
        let Some(format) = T::format(count) else {
            bail!(
                "no vertex format for {} x {}",
                count,
                std::any::type_name::<T>()
            );
        };
        self.elements.push(LayoutElement { format, count });
        Ok(self)
    }

    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    /// Size of one vertex in bytes.
    pub fn stride(&self) -> wgpu::BufferAddress {
        self.elements.iter().map(LayoutElement::size).sum()
    }

    /// Attributes with cumulative offsets, numbered from `first_location`.
    pub fn attributes(&self, first_location: u32) -> Vec<wgpu::VertexAttribute> {
        let mut offset = 0;
        self.elements
            .iter()
            .zip(first_location..)
            .map(|(element, shader_location)| {
                let attribute = wgpu::VertexAttribute {
                    format: element.format,
                    offset,
                    shader_location,
                };
                offset += element.size();
                attribute
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_vertex_layout_is_five_floats() {
        let layout = Vertex::layout().unwrap();
        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.stride() as usize, std::mem::size_of::<Vertex>());

        let attributes = layout.attributes(0);
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[0].shader_location, 0);
        assert_eq!(attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attributes[1].offset, 12);
        assert_eq!(attributes[1].shader_location, 1);
        assert_eq!(attributes[1].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn attributes_keep_push_order_and_start_location() {
        let mut layout = VertexLayout::new();
        layout
            .push::<f32>(4)
            .unwrap()
            .push::<u8>(4)
            .unwrap()
            .push::<u32>(1)
            .unwrap();

        let attributes = layout.attributes(3);
        let offsets: Vec<_> = attributes.iter().map(|a| a.offset).collect();
        let locations: Vec<_> = attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(offsets, vec![0, 16, 20]);
        assert_eq!(locations, vec![3, 4, 5]);
        assert_eq!(layout.stride(), 24);
    }

    #[test]
    fn unsupported_counts_are_rejected() {
        let mut layout = VertexLayout::new();
        assert!(layout.push::<f32>(5).is_err());
        assert!(layout.push::<u8>(3).is_err());
        assert!(layout.elements().is_empty());
    }
}
