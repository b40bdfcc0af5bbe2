use wgpu::util::DeviceExt;

pub const VERTICES_PER_PARTICLE: usize = 6;

/// Two triangles, counter clockwise, as unit offsets.
const QUAD_CORNERS: [[f32; 2]; VERTICES_PER_PARTICLE] = [
    [-1., -1.],
    [1., -1.],
    [1., 1.],
    [1., 1.],
    [-1., 1.],
    [-1., -1.],
];

const QUAD_UVS: [[f32; 2]; VERTICES_PER_PARTICLE] = [
    [0., 1.],
    [1., 1.],
    [1., 0.],
    [1., 0.],
    [0., 0.],
    [0., 1.],
];

/// Static geometry for every particle. Vertices carry no per-particle
/// placement: the vertex shader looks it up in the position texture through
/// `references`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleGeometry {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub references: Vec<[f32; 2]>,
}

pub struct ParticleMesh {
    pub position_buffer: wgpu::Buffer,
    pub uv_buffer: wgpu::Buffer,
    pub reference_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl ParticleGeometry {
    pub fn new(width: u32, radius: f32) -> Self {
        let particle_count = (width * width) as usize;
        let vertex_count = particle_count * VERTICES_PER_PARTICLE;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for _ in 0..particle_count {
            for [x, y] in QUAD_CORNERS {
                positions.push([x * radius, y * radius, 0.]);
            }

            uvs.extend_from_slice(&QUAD_UVS);
        }

        let references = (0..vertex_count)
            .map(|i| Self::reference(i, width))
            .collect();

        Self {
            positions,
            uvs,
            references,
        }
    }

    /// Normalized grid cell of the particle owning vertex `vertex_idx`.
    pub fn reference(vertex_idx: usize, width: u32) -> [f32; 2] {
        let particle_idx = vertex_idx / VERTICES_PER_PARTICLE;
        let width_usize = width as usize;
        let x = (particle_idx % width_usize) as f32 / width as f32;
        let y = (particle_idx / width_usize) as f32 / width as f32;

        [x, y]
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn upload(&self, device: &wgpu::Device) -> ParticleMesh {
        let create = |label: &str, contents: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
        };

        ParticleMesh {
            position_buffer: create("Particle position buffer", bytemuck::cast_slice(&self.positions)),
            uv_buffer: create("Particle uv buffer", bytemuck::cast_slice(&self.uvs)),
            reference_buffer: create("Particle reference buffer", bytemuck::cast_slice(&self.references)),
            vertex_count: self.vertex_count() as u32,
        }
    }
}

impl ParticleMesh {
    /// Slot 0 quad offset, slot 1 uv, slot 2 reference.
    pub fn desc<'a>() -> [wgpu::VertexBufferLayout<'a>; 3] {
        use std::mem;

        const POSITION: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        const UV: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];
        const REFERENCE: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x2];

        [
            wgpu::VertexBufferLayout {
                array_stride: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION,
            },
            wgpu::VertexBufferLayout {
                array_stride: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &UV,
            },
            wgpu::VertexBufferLayout {
                array_stride: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &REFERENCE,
            },
        ]
    }

    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.uv_buffer.slice(..));
        render_pass.set_vertex_buffer(2, self.reference_buffer.slice(..));
    }
}
