use anyhow::{Context, Result};
use backdrop_capture::CaptureStore;
use backdrop_common::{BackdropConfig, Viewport};
use backdrop_input::PointerTracker;
use backdrop_render_wgpu::TerrainRenderer;
use backdrop_runtime::{DisplayCaps, FrameLoop, FrameScheduler, FrameTimer, evaluate_gate};
use backdrop_scene::Scene;
use backdrop_tools::SceneInspector;
use backdrop_ui::{BadgeTransform, FormStatus, Keyframes, NotifyForm, RevealObserver, StatusBadge};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const SERVICES: &[(&str, &str)] = &[
    ("Brand sites", "Launch pages with a living backdrop"),
    ("Product reveals", "Countdowns that move before the product does"),
    ("Event splashes", "One-night pages for one-night shows"),
    ("Portfolio shells", "Quiet motion behind loud work"),
    ("Status pages", "Calm waves while everything is green"),
    ("Holding pages", "Something worth watching while you build"),
];

#[derive(Parser)]
#[command(name = "backdrop-desktop", about = "Animated terrain backdrop with page overlay")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Tuning configuration file (YAML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the notify capture store
    #[arg(long, default_value = "./backdrop_data")]
    data_dir: PathBuf,

    /// Treat the device as touch-first, which disables the animated backdrop
    #[arg(long)]
    touch: bool,
}

/// Frame scheduling through winit redraw requests. Requests cannot be
/// retracted; the frame loop drops stale deliveries instead.
struct RedrawScheduler {
    window: Arc<Window>,
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }

    fn cancel_frame(&mut self) {}
}

/// GPU surface shared by the terrain layer and the page overlay.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

/// The animated backdrop itself; absent when the capability gate disabled it
/// or initialization failed.
struct TerrainLayer {
    scene: Scene,
    renderer: TerrainRenderer,
}

struct BackdropApp {
    config: BackdropConfig,
    assume_touch: bool,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    terrain: Option<TerrainLayer>,
    scheduler: Option<RedrawScheduler>,
    frame_loop: FrameLoop,
    pointer: PointerTracker,
    frame_timer: FrameTimer,
    last_frame: Instant,

    // Page overlay state
    badge: StatusBadge,
    press_anim: Option<(Keyframes, Instant)>,
    reveal: RevealObserver,
    form: NotifyForm,
    capture: Option<CaptureStore>,

    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl BackdropApp {
    fn new(config: BackdropConfig, data_dir: &Path, assume_touch: bool) -> Self {
        let capture = match CaptureStore::open(data_dir) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("capture store unavailable: {e}");
                None
            }
        };

        let badge = StatusBadge::new(config.page.badge_press_ms);
        let reveal = RevealObserver::new(
            SERVICES.len(),
            config.page.reveal_threshold,
            config.page.reveal_stagger_ms,
        );

        Self {
            config,
            assume_touch,
            window: None,
            gpu: None,
            terrain: None,
            scheduler: None,
            frame_loop: FrameLoop::new(),
            pointer: PointerTracker::new(Viewport::new(1280, 720)),
            frame_timer: FrameTimer::new(120),
            last_frame: Instant::now(),
            badge,
            press_anim: None,
            reveal,
            form: NotifyForm::new(),
            capture,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn logical_viewport(window: &Window) -> Viewport {
        let physical = window.inner_size();
        let scale = window.scale_factor();
        Viewport::new(
            ((physical.width as f64 / scale) as u32).max(1),
            ((physical.height as f64 / scale) as u32).max(1),
        )
    }

    /// Physical surface size with the display scale capped.
    fn surface_size(&self, window: &Window) -> (u32, u32) {
        Self::logical_viewport(window)
            .surface_size(window.scale_factor(), self.config.surface.pixel_ratio_cap)
    }

    fn init_gpu(&self, window: Arc<Window>) -> Result<Gpu> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("backdrop_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("request device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let (width, height) = self.surface_size(&window);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Gpu {
            surface,
            device,
            queue,
            config,
        })
    }

    fn draw_page(&mut self, ctx: &EguiContext) {
        let summary = self.terrain.as_ref().map(|t| SceneInspector::summary(&t.scene));

        // Keep repainting while the badge pulses or a press animation plays,
        // even when the terrain loop is not driving redraws.
        let press = self.press_anim.and_then(|(anim, started)| {
            let elapsed = started.elapsed().as_millis() as u64;
            if elapsed >= anim.duration_ms {
                None
            } else {
                Some(anim.sample(elapsed))
            }
        });
        if press.is_none() {
            self.press_anim = None;
        }
        if self.terrain.is_none() && (self.badge.pulsing() || press.is_some()) {
            ctx.request_repaint_after(std::time::Duration::from_millis(33));
        }

        egui::SidePanel::right("page")
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Backdrop");
                ui.separator();

                // Status badge: pulses while unpressed, hops on click.
                let pose = press.unwrap_or(BadgeTransform::REST);
                let pulse = if self.badge.pulsing() {
                    let t = ui.input(|i| i.time);
                    0.6 + 0.4 * ((t * std::f64::consts::TAU / 1.4).sin() as f32).abs()
                } else {
                    1.0
                };
                ui.add_space(8.0 + pose.translate_y);
                let color = egui::Color32::from_rgb(
                    (31.0 * pulse) as u8,
                    (217.0 * pulse) as u8,
                    (168.0 * pulse) as u8,
                );
                let label = if self.badge.pressed() {
                    "status: muted"
                } else {
                    "status: live"
                };
                let badge_text = egui::RichText::new(label)
                    .color(color)
                    .size(14.0 * pose.scale);
                if ui.button(badge_text).clicked() {
                    let anim = self.badge.toggle();
                    self.press_anim = Some((anim, Instant::now()));
                }
                ui.add_space(8.0 - pose.translate_y);
                ui.separator();

                // Services: revealed one-shot as they scroll into view.
                ui.heading("Services");
                let mut fractions = vec![0.0f32; SERVICES.len()];
                egui::ScrollArea::vertical()
                    .max_height(260.0)
                    .show(ui, |ui| {
                        let clip = ui.clip_rect();
                        for (i, (title, detail)) in SERVICES.iter().enumerate() {
                            let revealed = self.reveal.is_revealed(i);
                            let response = ui
                                .scope(|ui| {
                                    if !revealed {
                                        ui.disable();
                                        ui.set_opacity(0.15);
                                    }
                                    ui.label(egui::RichText::new(*title).strong());
                                    ui.label(*detail);
                                    ui.add_space(10.0);
                                })
                                .response;
                            let rect = response.rect;
                            if rect.height() > 0.0 {
                                let visible = clip.intersect(rect).height().max(0.0);
                                fractions[i] = visible / rect.height();
                            }
                        }
                    });
                for event in self.reveal.update(&fractions) {
                    tracing::debug!(
                        index = event.index,
                        delay_ms = event.delay_ms,
                        "service revealed"
                    );
                }
                ui.separator();

                // Notify form: client-side capture only.
                ui.heading("Get notified");
                ui.horizontal(|ui| {
                    let submitted = ui
                        .text_edit_singleline(&mut self.form.input)
                        .lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (ui.button("Notify me").clicked() || submitted)
                        && let Some(store) = &mut self.capture
                    {
                        self.form.submit(store);
                    }
                });
                if let Some(status) = self.form.status() {
                    let color = match status {
                        FormStatus::Accepted => egui::Color32::from_rgb(0xc9, 0xff, 0xd9),
                        FormStatus::Rejected => egui::Color32::from_rgb(0xff, 0xb3, 0xb3),
                    };
                    ui.colored_label(color, status.message());
                }

                ui.separator();
                match &summary {
                    Some(summary) => {
                        ui.small(format!(
                            "frame {} | phase {:.3} | avg {:.1?}",
                            summary.frame,
                            summary.phase,
                            self.frame_timer.average()
                        ));
                    }
                    None => {
                        ui.small("backdrop disabled");
                    }
                }
            });
    }
}

impl ApplicationHandler for BackdropApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Backdrop")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let viewport = Self::logical_viewport(&window);
        self.pointer = PointerTracker::new(viewport);

        let gpu = match self.init_gpu(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("GPU initialization failed, window stays blank: {e:#}");
                self.window = Some(window);
                return;
            }
        };

        // One-time capability check; never re-evaluated on resize.
        let caps = DisplayCaps {
            touch_input: self.assume_touch,
            viewport_width: viewport.width,
        };
        let decision = evaluate_gate(caps, &self.config.gate);
        if let backdrop_runtime::GateDecision::Disabled(reason) = decision {
            tracing::info!("backdrop disabled at startup: {reason}");
        }

        let mut scheduler = RedrawScheduler {
            window: window.clone(),
        };

        if decision.is_enabled() {
            match Scene::new(self.config.clone(), viewport) {
                Ok(scene) => {
                    let renderer = TerrainRenderer::new(
                        &gpu.device,
                        gpu.config.format,
                        gpu.config.width,
                        gpu.config.height,
                        &scene,
                    );
                    self.terrain = Some(TerrainLayer { scene, renderer });
                    self.frame_loop.start(&mut scheduler);
                }
                Err(e) => {
                    // Same end state as the gate's disabled branch.
                    tracing::error!("scene initialization failed: {e}");
                }
            }
        }

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        self.last_frame = Instant::now();
        self.window = Some(window.clone());
        self.gpu = Some(gpu);
        self.scheduler = Some(scheduler);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        // Paint the page at least once even when the backdrop never runs.
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(&window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                let viewport = Self::logical_viewport(&window);
                self.pointer.set_viewport(viewport);
                let (width, height) = self.surface_size(&window);
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = width;
                    gpu.config.height = height;
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    if let Some(terrain) = &mut self.terrain {
                        terrain.scene.set_viewport(viewport);
                        terrain.renderer.resize(&gpu.device, width, height);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(terrain) = &mut self.terrain {
                    let logical = position.to_logical::<f64>(window.scale_factor());
                    terrain
                        .scene
                        .set_pointer(self.pointer.normalize(logical.x, logical.y));
                }
            }
            WindowEvent::Occluded(occluded) => {
                if let Some(sched) = &mut self.scheduler
                    && self.terrain.is_some()
                {
                    self.frame_loop.set_visible(!occluded, sched);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                self.frame_timer.record(now - self.last_frame);
                self.last_frame = now;

                let animate = match &mut self.scheduler {
                    Some(sched) => self.frame_loop.begin_frame(sched),
                    None => false,
                };
                if animate && let Some(terrain) = &mut self.terrain {
                    terrain.scene.advance_frame();
                }

                let Some(gpu) = &self.gpu else {
                    return;
                };

                let output = match gpu.surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.surface.configure(&gpu.device, &gpu.config);
                        return;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        // Degrade to the same end state as the disabled gate.
                        tracing::error!("surface out of memory, disabling backdrop");
                        self.terrain = None;
                        if let Some(sched) = &mut self.scheduler {
                            self.frame_loop.set_visible(false, sched);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(terrain) = &self.terrain {
                    terrain
                        .renderer
                        .render(&gpu.device, &gpu.queue, &view, &terrain.scene);
                } else {
                    clear_view(gpu, &view, &self.config);
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .expect("egui initialized with gpu")
                    .take_egui_input(&window);
                let egui_ctx = self.egui_ctx.clone();
                let full_output = egui_ctx.run(raw_input, |ctx| {
                    self.draw_page(ctx);
                });

                self.egui_winit
                    .as_mut()
                    .expect("egui initialized with gpu")
                    .handle_platform_output(&window, full_output.platform_output);

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let gpu = self.gpu.as_ref().expect("gpu checked above");
                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [gpu.config.width, gpu.config.height],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self
                        .egui_renderer
                        .as_mut()
                        .expect("egui initialized with gpu");
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
                    }
                    let mut encoder =
                        gpu.device
                            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                                label: Some("page_encoder"),
                            });
                    egui_renderer.update_buffers(
                        &gpu.device,
                        &gpu.queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("page_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    gpu.queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
            }
            _ => {}
        }
    }
}

/// Clear to the page background when no terrain layer exists.
fn clear_view(gpu: &Gpu, view: &wgpu::TextureView, config: &BackdropConfig) {
    let clear = config.palette.clear;
    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("clear_encoder"),
        });
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("clear_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color {
                    r: clear.r as f64,
                    g: clear.g as f64,
                    b: clear.b as f64,
                    a: 1.0,
                }),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        ..Default::default()
    });
    gpu.queue.submit(std::iter::once(encoder.finish()));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => BackdropConfig::from_yaml_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BackdropConfig::default(),
    };

    tracing::info!("backdrop-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = BackdropApp::new(config, &cli.data_dir, cli.touch);
    event_loop.run_app(&mut app)?;

    Ok(())
}
