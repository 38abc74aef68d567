use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use chipvm_base::{
    processor::{Key, KeyState, Processor, ProcessorBuilderError},
    screen::Screen,
};
use clap::Parser;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{self, fmt::format::FmtSpan, EnvFilter};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use crate::presenter::Presenter;

mod presenter;

trait TryIntoKey {
    type Error;

    fn try_into_key(&self) -> Result<Key, Self::Error>;
}

impl TryIntoKey for VirtualKeyCode {
    type Error = ();

    /// Map the left-hand 4x4 block of a QWERTY keyboard onto the hex keypad.
    fn try_into_key(&self) -> Result<Key, Self::Error> {
        use VirtualKeyCode::*;

        match *self {
            // row 1
            Key1 => Ok(Key::K1),
            Key2 => Ok(Key::K2),
            Key3 => Ok(Key::K3),
            Key4 => Ok(Key::KC),
            // row 2
            Q => Ok(Key::K4),
            W => Ok(Key::K5),
            E => Ok(Key::K6),
            R => Ok(Key::KD),
            // row 3
            A => Ok(Key::K7),
            S => Ok(Key::K8),
            D => Ok(Key::K9),
            F => Ok(Key::KE),
            // row 4
            Z => Ok(Key::KA),
            X => Ok(Key::K0),
            C => Ok(Key::KB),
            V => Ok(Key::KF),
            _ => Err(()),
        }
    }
}

trait IntoKeyState {
    fn into_key_state(&self) -> KeyState;
}

impl IntoKeyState for ElementState {
    fn into_key_state(&self) -> KeyState {
        match *self {
            ElementState::Pressed => KeyState::Pressed,
            ElementState::Released => KeyState::NotPressed,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(version, about)]
struct CliOpts {
    /// Factor the 64x32 display is scaled up by.
    #[clap(value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,
    /// Minimum time between two machine cycles, in milliseconds.
    #[clap(value_parser)]
    delay: u64,
    /// The path to the file containing the ROM.
    /// The file's contents will be loaded into the machine's memory,
    /// starting at address 0x200.
    #[clap(value_parser)]
    rom_file: PathBuf,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("could not read ROM file {}", .path.display())]
    ReadRom {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    LoadRom(#[from] ProcessorBuilderError),
    #[error("could not create the window")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Pixels(#[from] pixels::Error),
}

fn main() -> Result<(), AppError> {
    let cli_opts = CliOpts::parse();

    tracing_subscriber::fmt()
        .pretty()
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let program = std::fs::read(&cli_opts.rom_file).map_err(|source| AppError::ReadRom {
        path: cli_opts.rom_file.clone(),
        source,
    })?;
    let mut processor = Processor::builder().program(&program)?.build();
    info!(rom_file = %cli_opts.rom_file.display(), len = program.len(), "program loaded");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("chipvm")
        .with_inner_size(PhysicalSize::new(
            Screen::WIDTH as u32 * cli_opts.scale,
            Screen::HEIGHT as u32 * cli_opts.scale,
        ))
        .build(&event_loop)?;
    let mut presenter = Presenter::new(&window)?;

    let cycle_delay = Duration::from_millis(cli_opts.delay);
    let mut last_cycle = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("window closed, exiting...");
                    control_flow.set_exit();
                }
                WindowEvent::Resized(size) => {
                    if let Err(error) = presenter.resize(size.width, size.height) {
                        error!(?error, "failed to resize the surface texture");
                        control_flow.set_exit_with_code(1);
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state,
                            virtual_keycode: Some(virtual_keycode),
                            ..
                        },
                    ..
                } => {
                    debug!(?virtual_keycode, ?state, "key state changed");
                    if virtual_keycode == VirtualKeyCode::Escape && state == ElementState::Pressed {
                        info!("escape key pressed, exiting...");
                        control_flow.set_exit();
                    } else if let Ok(key) = virtual_keycode.try_into_key() {
                        processor.set_key_state(key, state.into_key_state());
                    }
                }
                _ => (),
            },
            Event::MainEventsCleared => {
                let elapsed = last_cycle.elapsed();
                if elapsed < cycle_delay {
                    spin_sleep::sleep(cycle_delay - elapsed);
                }
                last_cycle = Instant::now();

                match processor.cycle() {
                    Ok(()) => window.request_redraw(),
                    Err(error) => {
                        error!(%error, "machine fault, stopping");
                        control_flow.set_exit_with_code(1);
                    }
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(error) = presenter.present(processor.screen().pixels(), Screen::PITCH) {
                    error!(?error, "pixels failed to draw pixel buffer to surface texture");
                    control_flow.set_exit_with_code(1);
                }
            }
            _ => (),
        }
    })
}
