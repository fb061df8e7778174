//! Scroll-driven beam animation and its lifecycle.
//!
//! A renderer is `Uninitialized` until it receives a valid path, `Bound` while
//! it owns a surface plus its scroll, resize and frame subscriptions, and
//! `TornDown` once those are released. Binding a new path always tears the
//! old binding down first and rebuilds from scratch.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::DMat4;
use log::{debug, info, warn};

use super::camera::PerspectiveCamera;
use super::curve::CatmullRomCurve;
use super::geometry::Vec3;
use super::host::{BeamError, BeamFrame, BeamHost, Handler, RenderSurface};
use super::path::PathDescriptor;
use super::progress::ScrollBinding;
use super::tube::TubeMesh;
use crate::config::{
    CAMERA_DISTANCE, CAMERA_FAR, CAMERA_LOOK_AHEAD, CAMERA_NEAR, FOV_DEGREES, RADIAL_SEGMENTS,
    ROTATION_PER_FRAME, TUBE_RADIUS, TUBULAR_SEGMENTS,
};

/// Curve, tube and camera for one path, plus the current reveal.
#[derive(Debug, Clone)]
pub struct BeamAnimation {
    curve: CatmullRomCurve,
    tube: TubeMesh,
    camera: PerspectiveCamera,
    binding: ScrollBinding,
    progress: f64,
    rotation: f64,
}

impl BeamAnimation {
    pub fn new(descriptor: &PathDescriptor, binding: ScrollBinding, width: f64, height: f64) -> Option<Self> {
        let curve = CatmullRomCurve::new(descriptor.points.clone())?;
        let tube = TubeMesh::new(&curve, TUBULAR_SEGMENTS, TUBE_RADIUS, RADIAL_SEGMENTS);
        let mut camera = PerspectiveCamera::new(FOV_DEGREES, 1.0, CAMERA_NEAR, CAMERA_FAR);
        camera.set_aspect(width, height);

        let mut animation = Self {
            curve,
            tube,
            camera,
            binding,
            progress: 0.0,
            rotation: 0.0,
        };
        animation.apply(0.0);
        Some(animation)
    }

    #[cfg(test)]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn binding(&self) -> &ScrollBinding {
        &self.binding
    }

    #[cfg(test)]
    pub fn tube(&self) -> &TubeMesh {
        &self.tube
    }

    #[cfg(test)]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[cfg(test)]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Moves the reveal to match `scroll_y`. Returns whether anything changed.
    pub fn update(&mut self, scroll_y: f64) -> bool {
        let progress = self.binding.progress(scroll_y);
        if progress == self.progress {
            return false;
        }
        self.apply(progress);
        true
    }

    fn apply(&mut self, progress: f64) {
        self.progress = progress;
        self.tube.set_reveal(progress);

        let point = self.curve.point(progress);
        let tangent = self.curve.tangent(progress);
        self.camera.set_position(point + Vec3::Z * CAMERA_DISTANCE);
        self.camera.look_at(point + tangent * CAMERA_LOOK_AHEAD);
    }

    /// Ambient spin, independent of scrolling.
    pub fn advance_frame(&mut self) {
        self.rotation = (self.rotation + ROTATION_PER_FRAME) % std::f64::consts::TAU;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.set_aspect(width, height);
    }

    /// Projects the visible part of the tube onto a `width` × `height` surface.
    pub fn frame(&self, width: f64, height: f64) -> BeamFrame {
        let spin = DMat4::from_rotation_z(self.rotation);
        let project = |p: Vec3| self.camera.project(spin.transform_point3(p), width, height);
        let segments = self
            .tube
            .visible_edges()
            .filter_map(|(a, b)| Some((project(a)?, project(b)?)))
            .collect();
        BeamFrame { segments }
    }
}

/// Resources held while bound. Subscriptions are declared first so they are
/// released before the surface.
struct BoundBeam<H: BeamHost> {
    subscriptions: Vec<H::Subscription>,
    surface: H::Surface,
    animation: BeamAnimation,
    descriptor: PathDescriptor,
}

enum BeamState<H: BeamHost> {
    Uninitialized,
    Bound(BoundBeam<H>),
    TornDown,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamPhase {
    Uninitialized,
    Bound,
    TornDown,
}

pub struct BeamRenderer<H: BeamHost> {
    host: H,
    state: BeamState<H>,
}

impl<H: BeamHost + 'static> BeamRenderer<H> {
    pub fn shared(host: H) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            host,
            state: BeamState::Uninitialized,
        }))
    }

    #[cfg(test)]
    pub fn phase(&self) -> BeamPhase {
        match self.state {
            BeamState::Uninitialized => BeamPhase::Uninitialized,
            BeamState::Bound(_) => BeamPhase::Bound,
            BeamState::TornDown => BeamPhase::TornDown,
        }
    }

    #[cfg(test)]
    pub fn descriptor(&self) -> Option<&PathDescriptor> {
        match &self.state {
            BeamState::Bound(bound) => Some(&bound.descriptor),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn animation(&self) -> Option<&BeamAnimation> {
        match &self.state {
            BeamState::Bound(bound) => Some(&bound.animation),
            _ => None,
        }
    }

    /// Binds `descriptor`, replacing any existing binding.
    ///
    /// An invalid descriptor is refused and leaves the current state as it
    /// is. Any other failure leaves the renderer torn down with nothing held.
    pub fn bind(this: &Rc<RefCell<Self>>, descriptor: PathDescriptor) -> Result<(), BeamError> {
        if !descriptor.is_valid() {
            return Err(BeamError::InvalidDescriptor);
        }

        let mut renderer = this.borrow_mut();
        renderer.teardown();

        let weak = Rc::downgrade(this);
        let bound = renderer.build(&weak, descriptor)?;
        info!(
            "beam bound: {} points, scroll {:.0}px..{:.0}px",
            bound.descriptor.points.len(),
            bound.animation.binding().start_px(),
            bound.animation.binding().end_px()
        );
        renderer.state = BeamState::Bound(bound);
        renderer.render();
        Ok(())
    }

    fn build(&self, weak: &Weak<RefCell<Self>>, descriptor: PathDescriptor) -> Result<BoundBeam<H>, BeamError> {
        let binding = ScrollBinding::new(self.host.mount_top()?, descriptor.scroll_window_px)
            .ok_or(BeamError::InvalidDescriptor)?;
        let (width, height) = self.host.surface_size();
        let mut animation =
            BeamAnimation::new(&descriptor, binding, width, height).ok_or(BeamError::InvalidDescriptor)?;
        animation.update(self.host.viewport().scroll_y);

        let surface = self.host.create_surface(width, height)?;
        let subscriptions = vec![
            self.host.on_scroll(Self::handler(weak, Self::handle_scroll))?,
            self.host.on_resize(Self::handler(weak, Self::handle_resize))?,
            self.host.frame_loop(Self::handler(weak, Self::handle_frame))?,
        ];

        Ok(BoundBeam {
            subscriptions,
            surface,
            animation,
            descriptor,
        })
    }

    fn handler(weak: &Weak<RefCell<Self>>, action: fn(&mut Self)) -> Handler {
        let weak = weak.clone();
        Rc::new(move || {
            let Some(renderer) = weak.upgrade() else {
                return;
            };
            // A handler firing while the renderer is mid-update has nothing new to show.
            if let Ok(mut renderer) = renderer.try_borrow_mut() {
                action(&mut renderer);
            };
        })
    }

    /// Releases the surface and every subscription. Safe in any state.
    pub fn teardown(&mut self) {
        if let BeamState::Bound(bound) = std::mem::replace(&mut self.state, BeamState::TornDown) {
            debug!("beam torn down after {} points", bound.descriptor.points.len());
            drop(bound);
        }
    }

    fn handle_scroll(&mut self) {
        let scroll_y = self.host.viewport().scroll_y;
        let changed = match &mut self.state {
            BeamState::Bound(bound) => bound.animation.update(scroll_y),
            _ => false,
        };
        if changed {
            self.render();
        }
    }

    fn handle_resize(&mut self) {
        let (width, height) = self.host.surface_size();
        if let BeamState::Bound(bound) = &mut self.state {
            bound.surface.resize(width, height);
            bound.animation.resize(width, height);
        }
        self.render();
    }

    fn handle_frame(&mut self) {
        if let BeamState::Bound(bound) = &mut self.state {
            bound.animation.advance_frame();
        }
        self.render();
    }

    fn render(&mut self) {
        let (width, height) = self.host.surface_size();
        if let BeamState::Bound(bound) = &mut self.state {
            let frame = bound.animation.frame(width, height);
            if let Err(err) = bound.surface.draw(&frame) {
                warn!("beam frame dropped: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::beam::geometry::Viewport;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Scroll,
        Resize,
        Frame,
    }

    #[derive(Default)]
    struct MockEnv {
        viewport: Cell<Option<Viewport>>,
        mount_top: Cell<f64>,
        fail_surface: Cell<bool>,
        fail_frame_loop: Cell<bool>,
        surfaces: Cell<usize>,
        draws: Cell<usize>,
        next_id: Cell<usize>,
        handlers: RefCell<Vec<(usize, Kind, Handler)>>,
    }

    impl MockEnv {
        fn new() -> Rc<Self> {
            let env = Rc::new(Self::default());
            env.viewport.set(Some(Viewport::new(1200.0, 800.0, 0.0)));
            env
        }

        fn scroll_to(&self, scroll_y: f64) {
            let viewport = self.viewport.get().unwrap_or(Viewport::new(0.0, 0.0, 0.0));
            self.viewport.set(Some(Viewport { scroll_y, ..viewport }));
            self.fire(Kind::Scroll);
        }

        fn fire(&self, kind: Kind) {
            let handlers: Vec<Handler> = self
                .handlers
                .borrow()
                .iter()
                .filter(|(_, k, _)| *k == kind)
                .map(|(_, _, h)| h.clone())
                .collect();
            for handler in handlers {
                handler();
            }
        }

        fn subscriptions(&self) -> usize {
            self.handlers.borrow().len()
        }

    }

    fn subscribe(env: &Rc<MockEnv>, kind: Kind, handler: Handler) -> MockSubscription {
        let id = env.next_id.get();
        env.next_id.set(id + 1);
        env.handlers.borrow_mut().push((id, kind, handler));
        MockSubscription { env: env.clone(), id }
    }

    struct MockSubscription {
        env: Rc<MockEnv>,
        id: usize,
    }

    impl Drop for MockSubscription {
        fn drop(&mut self) {
            self.env.handlers.borrow_mut().retain(|(id, _, _)| *id != self.id);
        }
    }

    struct MockSurface {
        env: Rc<MockEnv>,
    }

    impl RenderSurface for MockSurface {
        fn resize(&mut self, _width: f64, _height: f64) {}

        fn draw(&mut self, _frame: &BeamFrame) -> Result<(), BeamError> {
            self.env.draws.set(self.env.draws.get() + 1);
            Ok(())
        }
    }

    impl Drop for MockSurface {
        fn drop(&mut self) {
            self.env.surfaces.set(self.env.surfaces.get() - 1);
        }
    }

    struct MockHost {
        env: Rc<MockEnv>,
    }

    impl BeamHost for MockHost {
        type Surface = MockSurface;
        type Subscription = MockSubscription;

        fn viewport(&self) -> Viewport {
            self.env.viewport.get().unwrap_or(Viewport::new(0.0, 0.0, 0.0))
        }

        fn mount_top(&self) -> Result<f64, BeamError> {
            Ok(self.env.mount_top.get())
        }

        fn surface_size(&self) -> (f64, f64) {
            let viewport = self.viewport();
            (viewport.width, viewport.height)
        }

        fn create_surface(&self, _width: f64, _height: f64) -> Result<MockSurface, BeamError> {
            if self.env.fail_surface.get() {
                return Err(BeamError::SurfaceUnavailable("no canvas".into()));
            }
            self.env.surfaces.set(self.env.surfaces.get() + 1);
            Ok(MockSurface { env: self.env.clone() })
        }

        fn on_scroll(&self, handler: Handler) -> Result<MockSubscription, BeamError> {
            Ok(subscribe(&self.env, Kind::Scroll, handler))
        }

        fn on_resize(&self, handler: Handler) -> Result<MockSubscription, BeamError> {
            Ok(subscribe(&self.env, Kind::Resize, handler))
        }

        fn frame_loop(&self, handler: Handler) -> Result<MockSubscription, BeamError> {
            if self.env.fail_frame_loop.get() {
                return Err(BeamError::Listener("requestAnimationFrame".into()));
            }
            Ok(subscribe(&self.env, Kind::Frame, handler))
        }
    }

    fn descriptor(window: f64) -> PathDescriptor {
        PathDescriptor {
            points: vec![
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(-1.0, -1.5, 0.0),
                Vec3::new(1.0, -4.0, 0.0),
                Vec3::new(0.0, -11.0, 0.0),
            ],
            scroll_window_px: window,
        }
    }

    fn setup() -> (Rc<MockEnv>, Rc<RefCell<BeamRenderer<MockHost>>>) {
        let env = MockEnv::new();
        let renderer = BeamRenderer::shared(MockHost { env: env.clone() });
        (env, renderer)
    }

    #[test]
    fn invalid_descriptors_never_bind() {
        let (env, renderer) = setup();
        let degenerate = [
            PathDescriptor { points: vec![Vec3::ZERO], scroll_window_px: 100.0 },
            descriptor(0.0),
            descriptor(-10.0),
        ];
        for path in degenerate {
            assert_eq!(BeamRenderer::bind(&renderer, path), Err(BeamError::InvalidDescriptor));
        }
        assert_eq!(renderer.borrow().phase(), BeamPhase::Uninitialized);
        assert_eq!(env.subscriptions(), 0);
        assert_eq!(env.surfaces.get(), 0);
    }

    #[test]
    fn binding_starts_hidden_and_subscribes() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(2400.0)).unwrap();

        let r = renderer.borrow();
        assert_eq!(r.phase(), BeamPhase::Bound);
        assert_eq!(env.subscriptions(), 3);
        assert_eq!(env.surfaces.get(), 1);
        let animation = r.animation().unwrap();
        assert_eq!(animation.progress(), 0.0);
        assert_eq!(animation.tube().draw_range(), 0);
        assert!(env.draws.get() >= 1);
    }

    #[test]
    fn scrolling_scrubs_the_reveal() {
        let (env, renderer) = setup();
        env.mount_top.set(200.0);
        BeamRenderer::bind(&renderer, descriptor(2400.0)).unwrap();

        env.scroll_to(100.0);
        assert_eq!(renderer.borrow().animation().unwrap().progress(), 0.0);

        env.scroll_to(1400.0);
        {
            let r = renderer.borrow();
            let animation = r.animation().unwrap();
            assert_abs_diff_eq!(animation.progress(), 0.5);
            assert_eq!(animation.tube().draw_range(), TUBULAR_SEGMENTS / 2);
        }

        let draws = env.draws.get();
        env.scroll_to(1400.0);
        assert_eq!(env.draws.get(), draws, "same offset should not redraw");

        env.scroll_to(5000.0);
        let r = renderer.borrow();
        let animation = r.animation().unwrap();
        assert_eq!(animation.progress(), 1.0);
        assert_eq!(animation.tube().draw_range(), TUBULAR_SEGMENTS);
    }

    #[test]
    fn binding_mid_page_matches_binding_at_the_top() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(2400.0)).unwrap();
        env.scroll_to(1300.0);
        let from_top = renderer.borrow().animation().unwrap().progress();

        let (env, renderer) = setup();
        env.scroll_to(1300.0);
        BeamRenderer::bind(&renderer, descriptor(2400.0)).unwrap();
        let mid_page = renderer.borrow().animation().unwrap().progress();

        assert!(mid_page > 0.0);
        assert_abs_diff_eq!(mid_page, from_top);
        // a resize-driven rebind keeps the reveal where it was
        BeamRenderer::bind(&renderer, descriptor(2400.0)).unwrap();
        assert_abs_diff_eq!(renderer.borrow().animation().unwrap().progress(), from_top);
    }

    #[test]
    fn camera_rides_the_curve() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        env.scroll_to(1000.0);

        let r = renderer.borrow();
        let camera = r.animation().unwrap().camera();
        assert_abs_diff_eq!(camera.position().x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(camera.position().y, -11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(camera.position().z, CAMERA_DISTANCE, epsilon = 1e-9);
        assert!(camera.forward().z < 0.0);
    }

    #[test]
    fn frame_loop_spins_the_beam() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        env.fire(Kind::Frame);
        env.fire(Kind::Frame);
        let rotation = renderer.borrow().animation().unwrap().rotation();
        assert_abs_diff_eq!(rotation, 2.0 * ROTATION_PER_FRAME, epsilon = 1e-12);
    }

    #[test]
    fn spin_turns_the_projected_tube() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        env.scroll_to(500.0);
        let still = renderer.borrow().animation().unwrap().frame(1200.0, 800.0);
        for _ in 0..60 {
            env.fire(Kind::Frame);
        }
        let spun = renderer.borrow().animation().unwrap().frame(1200.0, 800.0);
        assert!(!still.segments.is_empty());
        assert_ne!(still, spun);
    }

    #[test]
    fn resize_updates_aspect() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        env.viewport.set(Some(Viewport::new(800.0, 800.0, 0.0)));
        env.fire(Kind::Resize);
        let aspect = renderer.borrow().animation().unwrap().camera().aspect;
        assert_abs_diff_eq!(aspect, 1.0);
    }

    #[test]
    fn rebinding_replaces_everything() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        env.scroll_to(500.0);

        BeamRenderer::bind(&renderer, descriptor(3000.0)).unwrap();
        assert_eq!(env.subscriptions(), 3);
        assert_eq!(env.surfaces.get(), 1);
        let r = renderer.borrow();
        assert_eq!(r.descriptor().unwrap().scroll_window_px, 3000.0);
        assert_abs_diff_eq!(r.animation().unwrap().progress(), 500.0 / 3000.0);
    }

    #[test]
    fn invalid_descriptor_keeps_current_binding() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        assert!(BeamRenderer::bind(&renderer, descriptor(0.0)).is_err());
        assert_eq!(renderer.borrow().phase(), BeamPhase::Bound);
        assert_eq!(env.subscriptions(), 3);
    }

    #[test]
    fn teardown_releases_everything() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        renderer.borrow_mut().teardown();

        assert_eq!(renderer.borrow().phase(), BeamPhase::TornDown);
        assert_eq!(env.subscriptions(), 0);
        assert_eq!(env.surfaces.get(), 0);

        // twice is fine
        renderer.borrow_mut().teardown();
        assert_eq!(renderer.borrow().phase(), BeamPhase::TornDown);
    }

    #[test]
    fn dropping_the_renderer_releases_everything() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        drop(renderer);
        assert_eq!(env.subscriptions(), 0);
        assert_eq!(env.surfaces.get(), 0);
    }

    #[test]
    fn surface_failure_aborts_cleanly() {
        let (env, renderer) = setup();
        env.fail_surface.set(true);
        assert!(matches!(
            BeamRenderer::bind(&renderer, descriptor(1000.0)),
            Err(BeamError::SurfaceUnavailable(_))
        ));
        assert_eq!(renderer.borrow().phase(), BeamPhase::TornDown);
        assert_eq!(env.subscriptions(), 0);
        assert_eq!(env.surfaces.get(), 0);
    }

    #[test]
    fn partial_subscription_failure_releases_what_was_acquired() {
        let (env, renderer) = setup();
        env.fail_frame_loop.set(true);
        assert!(BeamRenderer::bind(&renderer, descriptor(1000.0)).is_err());
        assert_eq!(env.subscriptions(), 0);
        assert_eq!(env.surfaces.get(), 0);
    }

    #[test]
    fn projected_frame_grows_with_progress() {
        let (env, renderer) = setup();
        BeamRenderer::bind(&renderer, descriptor(1000.0)).unwrap();
        assert!(renderer.borrow().animation().unwrap().frame(1200.0, 800.0).segments.is_empty());
        env.scroll_to(500.0);
        assert!(!renderer.borrow().animation().unwrap().frame(1200.0, 800.0).segments.is_empty());
    }
}
