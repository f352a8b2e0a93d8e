//! Scene description and tessellation
//!
//! The sim never talks to a GPU. Each frame it emits a list of
//! `RenderPrimitive`s, and `tessellate` lowers that list to a flat triangle
//! buffer any backend can upload.

pub mod frame;
pub mod primitives;
pub mod vertex;

pub use frame::{build_frame, build_scene, build_title, overlay_alpha, Viewport};
pub use primitives::{tessellate, RenderPrimitive};
pub use vertex::{colors, Vertex};
