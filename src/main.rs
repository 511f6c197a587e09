use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use gridcaster::caster::crossings;
use gridcaster::renderer::{self, Overlay};
use gridcaster::scaler::Upscaler;
use gridcaster::{Color, Config, Error, InputState, Motion, Player, Result, Scene, assemble};

const DEFAULT_CONFIG: &str = "gridcaster.toml";

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    config: Config,
    scene: Scene<Color>,
    player: Player,
    motion: Motion,

    // HUD
    frame_counter: u32,
    last_fps_log: Instant,

    // Internal framebuffer, stretched to the window on present
    fb: Vec<u32>,
    fb_w: usize,
    fb_h: usize,
    upscaler: Upscaler,

    input: InputState,
    inspect_ray: bool,
    last_tick: Instant,
}

impl App {
    fn new(config: Config, scene: Scene<Color>) -> Self {
        let player = config.player.spawn(scene.size());
        let motion = config.player.motion();
        log::info!(
            "Scene {}x{}, player at ({:.2}, {:.2}) facing {:.2} rad",
            scene.size().0,
            scene.size().1,
            player.position.x,
            player.position.y,
            player.direction
        );

        Self {
            window: None,
            surface: None,
            config,
            scene,
            player,
            motion,

            frame_counter: 0,
            last_fps_log: Instant::now(),

            fb: Vec::new(),
            fb_w: 0,
            fb_h: 0,
            upscaler: Upscaler::default(),

            input: InputState::default(),
            inspect_ray: false,
            last_tick: Instant::now(),
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| Error::Window(e.to_string()))?,
        );
        let context =
            softbuffer::Context::new(window.clone()).map_err(|e| Error::Window(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| Error::Window(e.to_string()))?;

        let size = window.inner_size();
        self.rebuild_framebuffer(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        window.request_redraw();
        self.window = Some(window);
        self.last_tick = Instant::now();
        Ok(())
    }

    fn key(
        &mut self,
        code: KeyCode,
        state: ElementState,
        repeat: bool,
        event_loop: &ActiveEventLoop,
    ) {
        let pressed = state == ElementState::Pressed;
        match code {
            KeyCode::KeyW => self.input.forward = pressed,
            KeyCode::KeyS => self.input.back = pressed,
            KeyCode::KeyA => self.input.turn_left = pressed,
            KeyCode::KeyD => self.input.turn_right = pressed,
            KeyCode::Tab if pressed && !repeat => {
                self.inspect_ray = !self.inspect_ray;
                log::debug!("Ray inspector {}", if self.inspect_ray { "on" } else { "off" });
            }
            KeyCode::Escape if pressed => event_loop.exit(),
            _ => (),
        }
    }

    fn tick(&mut self) {
        // Cap dt to avoid huge jumps if the app was paused
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_tick)
            .min(Duration::from_millis(100));
        self.last_tick = now;

        self.player.update(&self.input, dt.as_secs_f64(), &self.motion);
    }

    fn draw(&mut self, id: WindowId) -> Result<()> {
        let Some(window) = self.window.as_ref().filter(|w| w.id() == id) else {
            return Ok(());
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        if self.upscaler.dst_size() != (dw.get() as usize, dh.get() as usize) {
            let (w, h) = (dw.get() as usize, dh.get() as usize);
            self.rebuild_framebuffer(w, h);
        }

        let render = &self.config.render;
        let frame = assemble(&self.scene, &self.player, render);
        let overlay = Overlay {
            minimap_cell: self.config.window.minimap_cell,
            crossings: if self.inspect_ray {
                let aim = frame.wedge.sample(render.resolution / 2, render.resolution);
                crossings(&self.scene, self.player.position, aim, &render.tuning())
            } else {
                Vec::new()
            },
        };
        renderer::render_frame(
            &mut self.fb,
            self.fb_w,
            self.fb_h,
            &self.scene,
            &frame,
            &overlay,
        );

        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface.resize(dw, dh).map_err(|e| Error::Window(e.to_string()))?;
        let mut buf = surface
            .buffer_mut()
            .map_err(|e| Error::Window(e.to_string()))?;
        self.upscaler.blit(&mut buf, dw.get() as usize, &self.fb, self.fb_w);
        buf.present().map_err(|e| Error::Window(e.to_string()))?;

        self.frame_counter += 1;
        let elapsed = self.last_fps_log.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            log::debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_log = Instant::now();
        }
        Ok(())
    }

    /// Keep the internal height fixed and follow the window's aspect ratio.
    fn rebuild_framebuffer(&mut self, dst_w: usize, dst_h: usize) {
        let target_h = self.config.window.internal_height;
        let aspect = if dst_h > 0 {
            dst_w as f32 / dst_h as f32
        } else {
            1.0
        };

        let mut target_w = ((target_h as f32 * aspect).round() as usize).max(160);
        if target_w % 2 != 0 {
            target_w += 1;
        }

        if target_w != self.fb_w || target_h != self.fb_h {
            self.fb_w = target_w;
            self.fb_h = target_h;
            self.fb = vec![0u32; self.fb_w * self.fb_h];
            log::debug!("Internal framebuffer {}x{}", self.fb_w, self.fb_h);
        }
        self.upscaler = Upscaler::new(dst_w, dst_h, self.fb_w, self.fb_h);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.open_window(event_loop) {
            log::error!("{e}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => self.key(code, state, repeat, event_loop),

            WindowEvent::RedrawRequested => {
                self.tick();
                if let Err(e) = self.draw(id) {
                    log::error!("{e}");
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_framebuffer(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = Config::load(&path)?;
    let scene = config.scene()?;
    let mut app = App::new(config, scene);

    let event_loop = EventLoop::new().map_err(|e| Error::Window(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Window(e.to_string()))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
