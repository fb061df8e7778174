use std::fmt;
use std::rc::Rc;

use log::warn;
use web_sys::Element;
use yew::NodeRef;

use super::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRole {
    BoundaryStart,
    Waypoint,
    BoundaryEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Services,
    Benefits,
}

/// Anything whose on-screen box can be asked for at the moment of use.
///
/// Implementations must query live geometry every time; layout moves between
/// mount and computation.
pub trait HasBoundingBox {
    /// `None` once the backing element is gone.
    fn bounding_box(&self) -> Option<Rect>;
}

impl HasBoundingBox for NodeRef {
    fn bounding_box(&self) -> Option<Rect> {
        let element = self.cast::<Element>()?;
        let rect = element.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }
}

/// A point the beam passes through, backed by a live element owned by its section.
#[derive(Clone)]
pub struct Anchor {
    pub role: AnchorRole,
    pub section: SectionId,
    handle: Rc<dyn HasBoundingBox>,
}

impl Anchor {
    pub fn new(role: AnchorRole, section: SectionId, handle: Rc<dyn HasBoundingBox>) -> Self {
        Self { role, section, handle }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        self.handle.bounding_box()
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anchor")
            .field("role", &self.role)
            .field("section", &self.section)
            .finish_non_exhaustive()
    }
}

/// What a section hands over once its anchors are laid out.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    pub boundary: Option<Anchor>,
    /// Visual order, top to bottom.
    pub waypoints: Vec<Anchor>,
}

impl AnchorSet {
    pub fn new(boundary: Option<Anchor>, waypoints: Vec<Anchor>) -> Self {
        Self { boundary, waypoints }
    }

    /// Short waypoint lists are fine; a missing boundary is not.
    pub fn is_ready(&self) -> bool {
        self.boundary.is_some()
    }

    /// Builds a set from the section's node refs. Slots whose element never
    /// mounted are left out rather than kept as placeholders.
    pub fn from_node_refs(
        section: SectionId,
        boundary_role: AnchorRole,
        boundary: &NodeRef,
        waypoints: &[NodeRef],
    ) -> Self {
        let boundary = boundary
            .get()
            .map(|_| Anchor::new(boundary_role, section, Rc::new(boundary.clone())));
        if boundary.is_none() {
            warn!("{:?} boundary anchor is not mounted", section);
        }

        let waypoints = waypoints
            .iter()
            .enumerate()
            .filter_map(|(slot, node)| match node.get() {
                Some(_) => Some(Anchor::new(AnchorRole::Waypoint, section, Rc::new(node.clone()))),
                None => {
                    warn!("{:?} waypoint {} is not mounted, skipping it", section, slot);
                    None
                }
            })
            .collect();

        Self { boundary, waypoints }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Element stand-in whose box can be moved or removed between queries.
    #[derive(Debug)]
    pub struct FakeElement {
        rect: Cell<Option<Rect>>,
    }

    impl FakeElement {
        pub fn at(rect: Rect) -> Rc<Self> {
            Rc::new(Self { rect: Cell::new(Some(rect)) })
        }

        pub fn move_to(&self, rect: Rect) {
            self.rect.set(Some(rect));
        }

        pub fn unmount(&self) {
            self.rect.set(None);
        }
    }

    impl HasBoundingBox for FakeElement {
        fn bounding_box(&self) -> Option<Rect> {
            self.rect.get()
        }
    }

    pub fn anchor(role: AnchorRole, section: SectionId, element: &Rc<FakeElement>) -> Anchor {
        Anchor::new(role, section, element.clone())
    }

    /// A 20×20 marker centred on `(cx, cy)`.
    pub fn marker(cx: f64, cy: f64) -> Rc<FakeElement> {
        FakeElement::at(Rect::new(cx - 10.0, cy - 10.0, 20.0, 20.0))
    }
}
