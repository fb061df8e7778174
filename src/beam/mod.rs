//! Scroll-coordinate to 3D path pipeline behind the electric beam.

pub mod anchor;
pub mod camera;
pub mod curve;
pub mod geometry;
pub mod host;
pub mod path;
pub mod progress;
pub mod renderer;
pub mod tube;

pub use anchor::{AnchorRole, AnchorSet, SectionId};
pub use path::{PathDescriptor, PathJoin};
pub use renderer::BeamRenderer;
