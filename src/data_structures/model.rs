//! CPU-side meshes, materials and the vertex layout shared with the GPU.
//!
//! Buffer creation is left to the renderer; it uploads `Mesh::vertices` and
//! `Mesh::indices` with the layout from [`Vertex::desc`].

/// Anything that can describe itself as a vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One vertex of a generated mesh.
///
/// `normal` is unit length and `bitangent == normal × tangent`, so the three
/// vectors form a right-handed frame for normal mapping.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl ModelVertex {
    pub fn new(
        position: cgmath::Vector3<f32>,
        normal: cgmath::Vector3<f32>,
        tex_coords: [f32; 2],
        tangent: cgmath::Vector3<f32>,
    ) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
            tex_coords,
            tangent: tangent.into(),
            bitangent: normal.cross(tangent).into(),
        }
    }
}

/**
 * Shader locations 0..=4 in declaration order: position, normal, uv, tangent, bitangent.
 * The instance layout continues at location 5.
 */
impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 11]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Opaque reference to a texture owned by the renderer. `0` means unbound.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const PLACEHOLDER: TextureHandle = TextureHandle(0);

    pub fn is_placeholder(&self) -> bool {
        self.0 == 0
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Material {
    pub diffuse: TextureHandle,
    pub normal_map: Option<TextureHandle>,
}

impl Material {
    pub fn new(diffuse: TextureHandle) -> Self {
        Self {
            diffuse,
            normal_map: None,
        }
    }

    /// A normal map that failed to load is treated as absent.
    pub fn with_normal_map(mut self, normal_map: TextureHandle) -> Self {
        self.normal_map = (!normal_map.is_placeholder()).then_some(normal_map);
        self
    }
}

/// Immutable triangle mesh produced by one of the generators in
/// [`crate::resources::mesh`].
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub material: Material,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn triangles(&self) -> impl Iterator<Item = [&ModelVertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| {
            [
                &self.vertices[c[0] as usize],
                &self.vertices[c[1] as usize],
                &self.vertices[c[2] as usize],
            ]
        })
    }
}

/// Stable index of a mesh inside a [`MeshLibrary`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

/// Arena holding every mesh built at startup. Entities refer to meshes by
/// [`MeshId`] so the same geometry is shared without aliasing.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: Vec<Mesh>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes.iter().enumerate().map(|(i, m)| (MeshId(i), m))
    }
}
