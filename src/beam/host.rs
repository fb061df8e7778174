use std::rc::Rc;

use thiserror::Error;

use super::geometry::Viewport;

#[derive(Debug, Error, PartialEq)]
pub enum BeamError {
    #[error("no browser window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("beam mount region is not attached")]
    NotMounted,
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("could not subscribe: {0}")]
    Listener(String),
    #[error("path needs at least two points and a positive scroll window")]
    InvalidDescriptor,
    #[error("drawing failed: {0}")]
    Draw(String),
}

pub type Handler = Rc<dyn Fn()>;

/// Segments already projected into surface pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeamFrame {
    pub segments: Vec<((f64, f64), (f64, f64))>,
}

/// A drawable surface. Dropping it releases its graphics resources and
/// detaches it from the page.
pub trait RenderSurface {
    fn resize(&mut self, width: f64, height: f64);
    fn draw(&mut self, frame: &BeamFrame) -> Result<(), BeamError>;
}

/// Everything the beam needs from its environment.
///
/// Subscriptions are released by dropping them.
pub trait BeamHost {
    type Surface: RenderSurface;
    type Subscription;

    fn viewport(&self) -> Viewport;
    /// Document-relative top of the beam's mount region. Stays the same
    /// wherever the page happens to be scrolled.
    fn mount_top(&self) -> Result<f64, BeamError>;
    /// Pixel size the surface should cover.
    fn surface_size(&self) -> (f64, f64);
    fn create_surface(&self, width: f64, height: f64) -> Result<Self::Surface, BeamError>;
    fn on_scroll(&self, handler: Handler) -> Result<Self::Subscription, BeamError>;
    fn on_resize(&self, handler: Handler) -> Result<Self::Subscription, BeamError>;
    /// Calls `handler` once per display refresh until the subscription drops.
    fn frame_loop(&self, handler: Handler) -> Result<Self::Subscription, BeamError>;
}
