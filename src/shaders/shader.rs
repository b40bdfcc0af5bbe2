use crate::error::GfxError;
use crate::traits::CustomShader;
use std::{borrow::Cow, fs, path::Path};

pub const DECLARATIONS: &str = include_str!("declarations.wgsl");

pub const VELOCITY_SDR: &str = "velocity.wgsl";
pub const POSITION_SDR: &str = "position.wgsl";
pub const PARTICLE_SDR: &str = "particle.wgsl";
pub const BACKGROUND_SDR: &str = "background.wgsl";

/// WGSL text for the four programs. Each is compiled with
/// `declarations.wgsl` prepended.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub velocity: String,
    pub position: String,
    pub particle: String,
    pub background: String,
}

impl ShaderSources {
    pub fn builtin() -> Self {
        Self {
            velocity: include_str!("velocity.wgsl").to_string(),
            position: include_str!("position.wgsl").to_string(),
            particle: include_str!("particle.wgsl").to_string(),
            background: include_str!("background.wgsl").to_string(),
        }
    }

    /// Reads overrides from `dir`, files keep their builtin names.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, GfxError> {
        let dir = dir.as_ref();

        let read = |filename: &str| {
            let path = dir.join(filename);

            fs::read_to_string(&path).map_err(|source| GfxError::ShaderSource {
                path: path.display().to_string(),
                source,
            })
        };

        Ok(Self {
            velocity: read(VELOCITY_SDR)?,
            position: read(POSITION_SDR)?,
            particle: read(PARTICLE_SDR)?,
            background: read(BACKGROUND_SDR)?,
        })
    }
}

impl CustomShader for wgpu::Device {
    fn create_shader(&self, shader_str_raw: &str, label: &str) -> wgpu::ShaderModule {
        let shader_str = [DECLARATIONS, shader_str_raw].join("\n");

        self.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(shader_str)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources_declare_their_uniforms() {
        let sources = ShaderSources::builtin();

        assert!(sources.velocity.contains("var<uniform> sim: SimUniform"));
        assert!(sources.position.contains("var<uniform> sim: SimUniform"));
        assert!(sources.particle.contains("var<uniform> params: RenderUniform"));
        assert!(sources.background.contains("var<uniform> params: RenderUniform"));
        assert!(DECLARATIONS.contains("texture_width: u32"));
    }

    #[test]
    fn from_dir_reads_every_program() {
        let dir = std::env::temp_dir().join(format!("sph_field_shaders_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        for name in [VELOCITY_SDR, POSITION_SDR, PARTICLE_SDR, BACKGROUND_SDR] {
            fs::write(dir.join(name), format!("// {}", name)).unwrap();
        }

        let sources = ShaderSources::from_dir(&dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(sources.velocity, "// velocity.wgsl");
        assert_eq!(sources.background, "// background.wgsl");
    }

    #[test]
    fn from_dir_reports_missing_file() {
        let dir = std::env::temp_dir().join("sph_field_shaders_missing");
        let err = ShaderSources::from_dir(&dir).unwrap_err();

        assert!(matches!(err, GfxError::ShaderSource { .. }));
        assert!(err.to_string().contains(VELOCITY_SDR));
    }
}
