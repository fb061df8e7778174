//! Turns the anchors reported by the two sections into a beam path.
//!
//! `PathJoin` holds one slot per section. Either slot may be filled first and
//! refilled any number of times; a path is only computed once both hold a
//! ready set, always from the latest data, and replaces the previous path
//! wholesale. Failed computations leave the published path alone.

use log::{debug, info};
use thiserror::Error;

use super::anchor::{Anchor, AnchorSet, SectionId};
use super::geometry::{Rect, Vec3, Viewport};

#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("waiting for both sections to report their anchors")]
    NotReady,
    #[error("viewport has no area")]
    EmptyViewport,
    #[error("{0:?} boundary has no laid-out geometry")]
    BoundaryUnresolved(SectionId),
    #[error("scroll window of {0}px is not positive")]
    NonPositiveWindow(f64),
}

/// Ordered scene points plus the scroll distance the beam is spread over.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDescriptor {
    pub points: Vec<Vec3>,
    pub scroll_window_px: f64,
}

impl PathDescriptor {
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2 && self.scroll_window_px > 0.0 && self.scroll_window_px.is_finite()
    }
}

/// Anchors in beam order: services boundary, services cards, benefit cards,
/// benefits boundary.
fn beam_order<'a>(services: &'a AnchorSet, benefits: &'a AnchorSet) -> impl Iterator<Item = &'a Anchor> {
    services
        .boundary
        .iter()
        .chain(services.waypoints.iter())
        .chain(benefits.waypoints.iter())
        .chain(benefits.boundary.iter())
}

fn laid_out(anchor: &Anchor) -> Option<Rect> {
    anchor.bounding_box().filter(Rect::has_area)
}

fn boundary_box(set: &AnchorSet) -> Result<Rect, PathError> {
    let boundary = set.boundary.as_ref().ok_or(PathError::NotReady)?;
    laid_out(boundary).ok_or(PathError::BoundaryUnresolved(boundary.section))
}

/// Reads every anchor's live box and maps it into scene space.
///
/// Both boundaries must be laid out. Waypoints without a box, or with a
/// zero-sized one, are skipped. The window runs from the scroll offset that
/// centres the services boundary to the one that centres the benefits
/// boundary.
pub fn compute_path(
    services: &AnchorSet,
    benefits: &AnchorSet,
    viewport: &Viewport,
) -> Result<PathDescriptor, PathError> {
    if !services.is_ready() || !benefits.is_ready() {
        return Err(PathError::NotReady);
    }
    if viewport.is_empty() {
        return Err(PathError::EmptyViewport);
    }

    let first = boundary_box(services)?;
    let last = boundary_box(benefits)?;

    let mut points = Vec::new();
    for anchor in beam_order(services, benefits) {
        let Some(rect) = laid_out(anchor) else {
            debug!("skipping {:?} {:?} anchor without geometry", anchor.section, anchor.role);
            continue;
        };
        points.push(viewport.to_scene(rect.center_x(), rect.center_y()));
    }

    let scroll_window_px = viewport.centering_offset(&last) - viewport.centering_offset(&first);
    if !(scroll_window_px > 0.0) {
        return Err(PathError::NonPositiveWindow(scroll_window_px));
    }

    Ok(PathDescriptor { points, scroll_window_px })
}

/// Two-slot join between the services and benefits sections.
#[derive(Debug, Default)]
pub struct PathJoin {
    services: Option<AnchorSet>,
    benefits: Option<AnchorSet>,
    published: Option<PathDescriptor>,
}

impl PathJoin {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn published(&self) -> Option<&PathDescriptor> {
        self.published.as_ref()
    }

    /// Stores the services set; returns a new path if one was published.
    pub fn set_services(&mut self, set: AnchorSet, viewport: &Viewport) -> Option<PathDescriptor> {
        self.services = Some(set);
        self.try_compute(viewport)
    }

    /// Stores the benefits set; returns a new path if one was published.
    pub fn set_benefits(&mut self, set: AnchorSet, viewport: &Viewport) -> Option<PathDescriptor> {
        self.benefits = Some(set);
        self.try_compute(viewport)
    }

    /// Recomputes from the latest slots. Returns the descriptor only when it
    /// differs from what was already published.
    pub fn try_compute(&mut self, viewport: &Viewport) -> Option<PathDescriptor> {
        let (Some(services), Some(benefits)) = (&self.services, &self.benefits) else {
            debug!("beam path deferred: {}", PathError::NotReady);
            return None;
        };

        match compute_path(services, benefits, viewport) {
            Ok(descriptor) if self.published.as_ref() == Some(&descriptor) => None,
            Ok(descriptor) => {
                info!(
                    "beam path published: {} points over {:.0}px",
                    descriptor.points.len(),
                    descriptor.scroll_window_px
                );
                self.published = Some(descriptor.clone());
                Some(descriptor)
            }
            Err(err) => {
                debug!("beam path not recomputed: {}", err);
                None
            }
        }
    }
}
