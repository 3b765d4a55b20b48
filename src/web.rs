//! Browser host: an HTML canvas, `requestAnimationFrame` and window resizes.
//!
//! ```js
//! import init, { WarpCanvas } from "./warpfield.js";
//!
//! await init();
//! const warp = WarpCanvas.mount("warp");
//! // on teardown
//! warp.stop();
//! ```

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::color::Color;
use crate::config::FieldConfig;
use crate::driver::{Driver, FrameHost};
use crate::surface::Surface;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type SharedDriver = Rc<RefCell<Driver<CanvasSurface, BrowserHost>>>;

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas, or `None` when it has no 2D context.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.set_fill(color);
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Color,
        outer: Color,
    ) {
        let (cx, cy) = (center.x as f64, center.y as f64);
        let Ok(gradient) = self.ctx.create_radial_gradient(
            cx,
            cy,
            inner_radius as f64,
            cx,
            cy,
            outer_radius as f64,
        ) else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &inner.to_css());
        let _ = gradient.add_color_stop(1.0, &outer.to_css());
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        let (w, h) = self.size();
        self.ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(&color.to_css());
    }

    fn clear_glow(&mut self) {
        self.ctx.set_shadow_blur(0.0);
    }
}

/// Frame scheduling and resize listening on the browser window.
pub struct BrowserHost {
    window: Window,
    frame: FrameCallback,
    resize: Option<Closure<dyn FnMut()>>,
}

impl FrameHost for BrowserHost {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let frame = self.frame.borrow();
        let callback = frame.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }

    fn release(&mut self) {
        if let Some(resize) = self.resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
        }
        self.frame.borrow_mut().take();
    }
}

/// Handle to a warp field animating a page canvas.
#[wasm_bindgen]
pub struct WarpCanvas {
    driver: Option<SharedDriver>,
}

#[wasm_bindgen]
impl WarpCanvas {
    /// Start animating the canvas with id `canvas_id`, sized to the window.
    ///
    /// A missing canvas or 2D context gives a handle that never draws, as
    /// does a rejected config.
    pub fn mount(canvas_id: &str) -> WarpCanvas {
        console_error_panic_hook::set_once();
        // a second mount finds the logger already installed
        console_log::init_with_level(log::Level::Info).ok();

        let Some(window) = web_sys::window() else {
            log::warn!("no browser window; warp field disabled");
            return WarpCanvas { driver: None };
        };
        let surface = find_canvas(&window, canvas_id).and_then(CanvasSurface::from_canvas);
        if surface.is_none() {
            log::warn!("canvas #{} has no 2D context; warp field disabled", canvas_id);
        }

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let host = BrowserHost {
            window: window.clone(),
            frame: frame.clone(),
            resize: None,
        };
        let has_surface = surface.is_some();
        let driver = match Driver::mount(surface, host, FieldConfig::default()) {
            Ok(driver) => driver,
            Err(e) => {
                log::warn!("{}; warp field disabled", e);
                return WarpCanvas { driver: None };
            }
        };
        let driver: SharedDriver = Rc::new(RefCell::new(driver));

        if has_surface {
            *frame.borrow_mut() = Some(frame_callback(Rc::downgrade(&driver)));
            let resize = resize_callback(Rc::downgrade(&driver), window.clone());
            let added = window
                .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
            if added.is_ok() {
                driver.borrow_mut().host_mut().resize = Some(resize);
            }

            let (width, height) = window_size(&window);
            let mut d = driver.borrow_mut();
            d.resize(width, height);
            d.start();
        }

        WarpCanvas {
            driver: Some(driver),
        }
    }

    /// Stop animating and detach from the window. Safe to call repeatedly.
    pub fn stop(&self) {
        if let Some(driver) = &self.driver {
            if let Ok(mut d) = driver.try_borrow_mut() {
                d.stop();
            }
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.driver
            .as_ref()
            .and_then(|d| d.try_borrow().ok().map(|d| d.is_running()))
            .unwrap_or(false)
    }
}

fn frame_callback(driver: Weak<RefCell<Driver<CanvasSurface, BrowserHost>>>) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let Some(driver) = driver.upgrade() else {
            return;
        };
        if let Ok(mut d) = driver.try_borrow_mut() {
            d.on_frame();
        }
    }) as Box<dyn FnMut()>)
}

fn resize_callback(
    driver: Weak<RefCell<Driver<CanvasSurface, BrowserHost>>>,
    window: Window,
) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let Some(driver) = driver.upgrade() else {
            return;
        };
        if let Ok(mut d) = driver.try_borrow_mut() {
            let (width, height) = window_size(&window);
            d.resize(width, height);
        }
    }) as Box<dyn FnMut()>)
}

fn find_canvas(window: &Window, id: &str) -> Option<HtmlCanvasElement> {
    window
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

fn window_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}
