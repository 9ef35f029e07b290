pub mod state;
pub mod camera;
pub mod controller;
pub mod input;
pub mod settings;
pub mod scene;
pub mod texture;
pub mod vertex;
pub mod mesh;
pub mod material;

use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};
use anyhow::{Context, Result};
use clap::Parser;
use crate::scene::Scene;
use crate::settings::{CliArgs, SceneKind, Settings};

#[async_std::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from(CliArgs::parse());
    let scene = match settings.scene {
        SceneKind::Prism => Scene::prism_field(&mut rand::thread_rng()),
        SceneKind::Lit => Scene::lit_showcase(),
    };
    log::info!("starting {:?} scene", settings.scene);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(settings.scene.title())
        .with_inner_size(LogicalSize::new(settings.width, settings.height))
        .build(&event_loop)
        .context("Failed to create window")?;
    if let Err(e) = window.set_cursor_grab(true) {
        log::warn!("could not grab cursor: {}", e);
    }
    window.set_cursor_visible(false);

    let mut state = state::State::new(&window, &settings, scene).await?;
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if state.input(event) {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested =>
                        *control_flow = ControlFlow::Exit,
                    WindowEvent::KeyboardInput {
                        input,
                        ..
                    } => {
                        match input {
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            } => *control_flow = ControlFlow::Exit,
                            _ => {}
                        }
                    },
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        state.resize(**new_inner_size);
                    }
                    _ => (),
                }
            },
            Event::MainEventsCleared => {
                window.request_redraw();
            },
            Event::RedrawRequested(_) => {
                state.update();
                match state.render() {
                    Ok(_) => {},
                    Err(wgpu::SwapChainError::Lost) => state.resize(state.size),
                    Err(wgpu::SwapChainError::OutOfMemory) => {
                        log::error!("out of GPU memory, exiting");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => log::warn!("{:?}", e),
                }
            },
            _ => (),
        }
    });
}
