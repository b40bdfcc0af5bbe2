pub mod shader;

pub use shader::ShaderSources;
