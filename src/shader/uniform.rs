//! Named uniforms packed into a single uniform buffer.
//!
//! wgpu has no per-name uniform locations, so the shader's uniform struct is
//! mirrored by a [`UniformLayout`] and a uniform's "location" is its byte
//! offset in that struct. Offsets follow the WGSL uniform address space
//! rules: every member is aligned to its own alignment and the struct size
//! is rounded up to 16 bytes.

use std::collections::{HashMap, HashSet};

use cgmath::Matrix4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UniformKind {
    /// `i32`
    Int,
    /// `vec4<f32>`
    Vec4,
    /// `mat4x4<f32>`
    Mat4,
}

impl UniformKind {
    pub fn size(self) -> u64 {
        match self {
            UniformKind::Int => 4,
            UniformKind::Vec4 => 16,
            UniformKind::Mat4 => 64,
        }
    }

    pub fn align(self) -> u64 {
        match self {
            UniformKind::Int => 4,
            UniformKind::Vec4 | UniformKind::Mat4 => 16,
        }
    }
}

fn align_up(value: u64, align: u64) -> u64 {
    value.div_ceil(align) * align
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniformField {
    pub name: String,
    pub kind: UniformKind,
    pub offset: u64,
}

/// Field list of a uniform struct, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UniformLayout {
    fields: Vec<UniformField>,
}

impl UniformLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// The uniform struct of `res/shaders/Basic.shader`.
    pub fn basic() -> Self {
        Self::new()
            .with("u_Color", UniformKind::Vec4)
            .with("u_Texture", UniformKind::Int)
            .with("model", UniformKind::Mat4)
            .with("view", UniformKind::Mat4)
            .with("projection", UniformKind::Mat4)
    }

    pub fn with(mut self, name: &str, kind: UniformKind) -> Self {
        let offset = align_up(self.end(), kind.align());
        self.fields.push(UniformField {
            name: name.to_string(),
            kind,
            offset,
        });
        self
    }

    fn end(&self) -> u64 {
        self.fields
            .last()
            .map_or(0, |field| field.offset + field.kind.size())
    }

    pub fn fields(&self) -> &[UniformField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&UniformField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Buffer size in bytes.
    pub fn size(&self) -> u64 {
        align_up(self.end().max(1), 16)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UniformLocation {
    pub offset: u64,
    pub kind: UniformKind,
}

/// CPU-side copy of a uniform buffer plus the name lookup cache.
#[derive(Debug)]
pub struct UniformBlock {
    layout: UniformLayout,
    staging: Vec<u8>,
    locations: HashMap<String, Option<UniformLocation>>,
    mismatches: HashSet<String>,
    writes: HashMap<String, u32>,
    dirty: bool,
}

impl UniformBlock {
    pub fn new(layout: UniformLayout) -> Self {
        let staging = vec![0; layout.size() as usize];
        Self {
            layout,
            staging,
            locations: HashMap::new(),
            mismatches: HashSet::new(),
            writes: HashMap::new(),
            dirty: true,
        }
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    /// Cached lookup. Unknown names are remembered too, so they are only
    /// reported once.
    pub fn location(&mut self, name: &str) -> Option<UniformLocation> {
        if let Some(location) = self.locations.get(name) {
            return *location;
        }
        let location = self.layout.field(name).map(|field| UniformLocation {
            offset: field.offset,
            kind: field.kind,
        });
        if location.is_none() {
            log::warn!("uniform '{name}' doesn't exist");
        }
        self.locations.insert(name.to_string(), location);
        location
    }

    pub fn cached_lookups(&self) -> usize {
        self.locations.len()
    }

    fn write(&mut self, name: &str, kind: UniformKind, bytes: &[u8]) {
        let Some(location) = self.location(name) else {
            return;
        };
        if location.kind != kind {
            if self.mismatches.insert(name.to_string()) {
                log::warn!(
                    "uniform '{name}' is a {:?}, ignoring {:?} writes",
                    location.kind,
                    kind
                );
            }
            return;
        }
        let start = location.offset as usize;
        self.staging[start..start + bytes.len()].copy_from_slice(bytes);
        *self.writes.entry(name.to_string()).or_default() += 1;
        self.dirty = true;
    }

    /// How many writes to `name` have landed. Ignored writes are not counted.
    pub fn write_count(&self, name: &str) -> u32 {
        self.writes.get(name).copied().unwrap_or(0)
    }

    pub fn set_1i(&mut self, name: &str, value: i32) {
        self.write(name, UniformKind::Int, bytemuck::bytes_of(&value));
    }

    pub fn set_4f(&mut self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        self.write(name, UniformKind::Vec4, bytemuck::bytes_of(&[v0, v1, v2, v3]));
    }

    pub fn set_mat4(&mut self, name: &str, matrix: &Matrix4<f32>) {
        let columns: [[f32; 4]; 4] = (*matrix).into();
        self.write(name, UniformKind::Mat4, bytemuck::bytes_of(&columns));
    }

    pub fn bytes(&self) -> &[u8] {
        &self.staging
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
