//! Native preview window.
//!
//! Runs the warp field in a winit window: frames are rasterized on the CPU by
//! a [`PixelSurface`] and handed to the [`Presenter`] for display. Redraw
//! requests stand in for the browser's animation frames.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::driver::{Driver, FrameHost};
use crate::error::ViewerError;
use crate::gpu::Presenter;
use crate::raster::PixelSurface;
use crate::surface::Surface;
use crate::time::FrameClock;

const TITLE: &str = "warpfield";

/// Schedules frames through winit redraw requests.
///
/// A requested redraw cannot be withdrawn, so cancelling is a no-op and the
/// stopped driver absorbs the extra frame.
pub struct WindowHost {
    window: Arc<Window>,
    next_handle: u64,
}

impl WindowHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_handle: 0,
        }
    }
}

impl FrameHost for WindowHost {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.window.request_redraw();
        self.next_handle += 1;
        Some(self.next_handle)
    }

    fn cancel_frame(&mut self, _handle: u64) {}
}

/// winit application running one warp field.
pub struct App {
    config: FieldConfig,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    driver: Option<Driver<PixelSurface, WindowHost>>,
    clock: FrameClock,
    error: Option<ViewerError>,
}

impl App {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            window: None,
            presenter: None,
            driver: None,
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone()))?;

        let size = window.inner_size();
        let surface = PixelSurface::new(size.width, size.height);
        let mut driver = Driver::mount(
            Some(surface),
            WindowHost::new(window.clone()),
            self.config.clone(),
        )?;
        driver.start();

        self.window = Some(window);
        self.presenter = Some(presenter);
        self.driver = Some(driver);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(driver), Some(presenter)) = (&mut self.driver, &mut self.presenter) else {
            return;
        };
        driver.on_frame();
        if !driver.is_running() {
            return;
        }
        let Some(surface) = driver.surface() else {
            return;
        };

        let (width, height) = surface.size();
        match presenter.render(surface.as_raw(), width, height) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => presenter.resize(winit::dpi::PhysicalSize {
                width: presenter.config.width,
                height: presenter.config.height,
            }),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory; closing preview");
                driver.stop();
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if self.clock.update() {
            if let Some(window) = &self.window {
                window.set_title(&title(&self.clock));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(driver) = &mut self.driver {
                    driver.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(physical_size);
                }
                if let Some(driver) = &mut self.driver {
                    driver.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Window title with the frame rate, frame count and run time.
fn title(clock: &FrameClock) -> String {
    format!(
        "{} - {:.0} fps - frame {} - {}s",
        TITLE,
        clock.fps(),
        clock.frame(),
        clock.elapsed().as_secs()
    )
}

/// Open a preview window and run until it is closed.
pub fn run(config: FieldConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_reports_clock() {
        let mut clock = FrameClock::with_interval(std::time::Duration::from_secs(3600));
        for _ in 0..3 {
            clock.update();
        }
        assert_eq!(title(&clock), "warpfield - 0 fps - frame 3 - 0s");
    }
}
