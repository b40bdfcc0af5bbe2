use thiserror::Error;

#[derive(Error, Debug)]
pub enum GfxError {
    #[error("No suitable GPU adapter found")]
    AdapterNotFound,

    #[error("Failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("Surface has no supported texture format for this adapter")]
    SurfaceNotSupported,

    /// Validation diagnostic raised while building a shader or pipeline.
    #[error("Pipeline '{label}' failed to build: {message}")]
    Pipeline { label: String, message: String },

    #[error("Failed to map readback buffer: {0}")]
    Readback(#[from] wgpu::BufferAsyncError),

    #[error("Readback finished without reporting a result")]
    ReadbackDropped,

    #[error("Can't read shader '{path}': {source}")]
    ShaderSource {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
