use init::InitApp;
use model::{FrameStatus, State};
use winit::event::Event::*;
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window;

pub mod cpu;
pub mod error;
pub mod init;
pub mod model;
pub mod shaders;
pub mod texture;
pub mod traits;
pub mod util;

pub fn start(init_app: InitApp) {
    env_logger::init();

    let event_loop = EventLoop::new();

    let window = match window::WindowBuilder::new()
        .with_decorations(true)
        .with_transparent(false)
        .with_title("sph_field")
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(err) => {
            log::error!("Can't create window: {}", err);
            return;
        }
    };

    let mut state = match State::new(init_app, window) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Can't start simulation: {:#}", err);
            return;
        }
    };

    let main_window_id = state.gfx_state.window_id();

    event_loop.run(move |event, _, control_flow| {
        match event {
            RedrawRequested(window_id) if window_id == main_window_id => {
                state.update();

                if state.render() == FrameStatus::Exit {
                    *control_flow = ControlFlow::Exit;
                }
            }
            MainEventsCleared => {
                state.gfx_state.request_redraw();
            }
            WindowEvent { event, window_id } if window_id == main_window_id => match event {
                winit::event::WindowEvent::Resized(size) => {
                    state.resize(size);
                }
                winit::event::WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    state.resize(*new_inner_size);
                }
                winit::event::WindowEvent::CloseRequested
                | winit::event::WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } => {
                    *control_flow = ControlFlow::Exit;
                }
                _ => {}
            },
            _ => (),
        }
    });
}
