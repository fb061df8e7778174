//! Browser side of the beam: viewport reads, listeners, the frame loop and a
//! canvas surface drawn through plotters.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, Window};
use yew::NodeRef;

use crate::beam::geometry::Viewport;
use crate::beam::host::{BeamError, BeamFrame, BeamHost, Handler, RenderSurface};
use crate::config::{BEAM_COLOR, BEAM_OPACITY};

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

pub fn viewport_of(window: &Window) -> Viewport {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    Viewport::new(width, height, scroll_y)
}

/// Current viewport, or an empty one when there is no window.
pub fn current_viewport() -> Viewport {
    web_sys::window()
        .map(|window| viewport_of(&window))
        .unwrap_or(Viewport::new(0.0, 0.0, 0.0))
}

/// A window event listener, removed on drop.
pub struct EventSubscription {
    window: Window,
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

impl EventSubscription {
    pub fn new(window: Window, event: &'static str, handler: Handler) -> Result<Self, BeamError> {
        let callback = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| BeamError::Listener(js_error(e)))?;
        Ok(Self { window, event, callback })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!("failed to remove {} listener: {}", self.event, js_error(err));
        }
    }
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop that reschedules itself until dropped.
pub struct FrameLoop {
    window: Window,
    frame_id: Rc<Cell<Option<i32>>>,
    slot: FrameSlot,
}

impl FrameLoop {
    pub fn start(window: Window, handler: Handler) -> Result<Self, BeamError> {
        let frame_id = Rc::new(Cell::new(None));
        let slot: FrameSlot = Rc::new(RefCell::new(None));

        let tick = {
            let window = window.clone();
            let frame_id = frame_id.clone();
            let slot: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&slot);
            Closure::wrap(Box::new(move || {
                handler();
                let Some(slot) = slot.upgrade() else {
                    return;
                };
                let slot = slot.borrow();
                if let Some(tick) = slot.as_ref() {
                    frame_id.set(window.request_animation_frame(tick.as_ref().unchecked_ref()).ok());
                }
            }) as Box<dyn FnMut()>)
        };

        let id = window
            .request_animation_frame(tick.as_ref().unchecked_ref())
            .map_err(|e| BeamError::Listener(js_error(e)))?;
        frame_id.set(Some(id));
        *slot.borrow_mut() = Some(tick);

        Ok(Self { window, frame_id, slot })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.slot.borrow_mut().take();
    }
}

// Only ever dropped.
#[allow(dead_code)]
pub enum WebSubscription {
    Event(EventSubscription),
    Frames(FrameLoop),
}

/// Canvas appended to the beam's mount region; removed again on drop.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn create(window: &Window, mount: &Element, width: f64, height: f64) -> Result<Self, BeamError> {
        let document = window.document().ok_or(BeamError::NoDocument)?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| BeamError::SurfaceUnavailable(js_error(e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BeamError::SurfaceUnavailable("not a canvas element".into()))?;
        let context = canvas
            .get_context("2d")
            .map_err(|e| BeamError::SurfaceUnavailable(js_error(e)))?
            .ok_or_else(|| BeamError::SurfaceUnavailable("2d context refused".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BeamError::SurfaceUnavailable("unexpected context type".into()))?;

        if let Err(err) = canvas.set_attribute(
            "style",
            "position: absolute; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none;",
        ) {
            warn!("beam canvas left unstyled: {}", js_error(err));
        }
        let mut surface = Self { canvas, context };
        surface.resize(width, height);
        mount
            .append_child(&surface.canvas)
            .map_err(|e| BeamError::SurfaceUnavailable(js_error(e)))?;
        Ok(surface)
    }
}

impl RenderSurface for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn draw(&mut self, frame: &BeamFrame) -> Result<(), BeamError> {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        if frame.segments.is_empty() {
            return Ok(());
        }

        let backend = CanvasBackend::with_canvas_object(self.canvas.clone())
            .ok_or_else(|| BeamError::Draw("canvas backend unavailable".into()))?;
        let root = backend.into_drawing_area();
        let (r, g, b) = BEAM_COLOR;
        let style = RGBColor(r, g, b).mix(BEAM_OPACITY).stroke_width(1);
        for &((x0, y0), (x1, y1)) in &frame.segments {
            root.draw(&PathElement::new(
                vec![(x0 as i32, y0 as i32), (x1 as i32, y1 as i32)],
                style,
            ))
            .map_err(|e| BeamError::Draw(format!("{:?}", e)))?;
        }
        root.present().map_err(|e| BeamError::Draw(format!("{:?}", e)))
    }
}

impl Drop for CanvasSurface {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}

/// Document-relative top of `element`. A viewport-fixed element is pinned to
/// the top of the document, so its offset does not move with scrolling.
fn document_top(window: &Window, element: &Element) -> f64 {
    let top = element.get_bounding_client_rect().top();
    let fixed = window
        .get_computed_style(element)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("position").ok())
        .map_or(false, |position| position == "fixed");
    if fixed {
        top
    } else {
        top + window.scroll_y().unwrap_or(0.0)
    }
}

/// `BeamHost` backed by the browser window and the beam's mount element.
pub struct WebHost {
    window: Window,
    mount: NodeRef,
}

impl WebHost {
    pub fn new(mount: NodeRef) -> Result<Self, BeamError> {
        let window = web_sys::window().ok_or(BeamError::NoWindow)?;
        Ok(Self { window, mount })
    }

    fn mount_element(&self) -> Result<Element, BeamError> {
        self.mount.cast::<Element>().ok_or(BeamError::NotMounted)
    }
}

impl BeamHost for WebHost {
    type Surface = CanvasSurface;
    type Subscription = WebSubscription;

    fn viewport(&self) -> Viewport {
        viewport_of(&self.window)
    }

    fn mount_top(&self) -> Result<f64, BeamError> {
        Ok(document_top(&self.window, &self.mount_element()?))
    }

    fn surface_size(&self) -> (f64, f64) {
        match self.mount_element() {
            Ok(element) => (element.client_width() as f64, element.client_height() as f64),
            Err(_) => {
                let viewport = self.viewport();
                (viewport.width, viewport.height)
            }
        }
    }

    fn create_surface(&self, width: f64, height: f64) -> Result<CanvasSurface, BeamError> {
        let surface = CanvasSurface::create(&self.window, &self.mount_element()?, width, height)?;
        debug!("beam canvas attached at {}x{}", width, height);
        Ok(surface)
    }

    fn on_scroll(&self, handler: Handler) -> Result<WebSubscription, BeamError> {
        EventSubscription::new(self.window.clone(), "scroll", handler).map(WebSubscription::Event)
    }

    fn on_resize(&self, handler: Handler) -> Result<WebSubscription, BeamError> {
        EventSubscription::new(self.window.clone(), "resize", handler).map(WebSubscription::Event)
    }

    fn frame_loop(&self, handler: Handler) -> Result<WebSubscription, BeamError> {
        FrameLoop::start(self.window.clone(), handler).map(WebSubscription::Frames)
    }
}
