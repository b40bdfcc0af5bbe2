pub mod background;
pub mod camera;
pub mod clock;
pub mod compute;
pub mod gfx_state;
pub mod mesh;
pub mod particle_state;
pub mod ping_pong;
pub mod state;
pub mod uniform;

pub use background::BackgroundState;
pub use camera::Camera;
pub use clock::Clock;
pub use compute::{ComputeState, CreateComputeOptions};
pub use gfx_state::GfxState;
pub use mesh::{ParticleGeometry, ParticleMesh};
pub use particle_state::{CreateRenderOptions, ParticleState};
pub use ping_pong::PingPongState;
pub use state::{FrameStatus, State};
pub use uniform::{CameraUniform, RenderUniform, SimUniform};
