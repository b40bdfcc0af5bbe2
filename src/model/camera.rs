use super::uniform::CameraUniform;
use crate::util::UniformContext;
use cgmath::{Matrix4, Point3, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Orthographic camera looking down -z at the particle plane. One world unit
/// is one logical pixel. Bounds are fixed at startup.
pub struct Camera {
    pub half_resolution: [f32; 2],
    pub uniform: UniformContext,
    position: Point3<f32>,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(device: &wgpu::Device, half_resolution: [f32; 2]) -> Self {
        let position = Point3::new(0., 0., 1.);
        let near = 0.5;
        let far = 1.5;

        let content = CameraUniform {
            view_proj: Self::build_view_proj(half_resolution, position, near, far).into(),
        };

        let uniform = UniformContext::from_content(
            bytemuck::bytes_of(&content),
            device,
            "Camera",
            wgpu::ShaderStages::VERTEX,
        );

        Self {
            half_resolution,
            uniform,
            position,
            near,
            far,
        }
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        Self::build_view_proj(self.half_resolution, self.position, self.near, self.far)
    }

    fn build_view_proj(
        half_resolution: [f32; 2],
        position: Point3<f32>,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        let [half_x, half_y] = half_resolution;
        let view = Matrix4::look_at_rh(position, Point3::new(0., 0., 0.), Vector3::unit_y());
        let proj = cgmath::ortho(-half_x, half_x, -half_y, half_y, near, far);

        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn project(half_resolution: [f32; 2], point: Vector4<f32>) -> Vector4<f32> {
        let view_proj = Camera::build_view_proj(half_resolution, Point3::new(0., 0., 1.), 0.5, 1.5);
        view_proj * point
    }

    #[test]
    fn corners_map_to_clip_edges() {
        let clip = project([640., 360.], Vector4::new(640., -360., 0., 1.));

        assert!((clip.x - 1.).abs() < 1e-5);
        assert!((clip.y + 1.).abs() < 1e-5);
    }

    #[test]
    fn particle_plane_inside_depth_range() {
        let clip = project([640., 360.], Vector4::new(0., 0., 0., 1.));

        assert!(clip.z > 0. && clip.z < 1.);
        assert!((clip.z - 0.5).abs() < 1e-5);
    }
}
