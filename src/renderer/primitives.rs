//! Render primitives and their tessellation
//!
//! The sim describes a frame as a list of tagged primitives; one dispatch
//! lowers them all to a triangle list. Text carries no geometry here and
//! passes through for whatever draws glyphs.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Everything the game ever asks to draw
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPrimitive {
    /// Filled quad, corners in winding order
    Quad { corners: [Vec2; 4], color: [f32; 4] },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// A debris streak with a head and a tail
    ParticleSegment {
        head: Vec2,
        tail: Vec2,
        width: f32,
        color: [f32; 4],
    },
    /// HUD text, anchored top-left
    Text {
        pos: Vec2,
        size: f32,
        color: [f32; 4],
        text: String,
    },
}

/// Triangle segments for circle tessellation
const CIRCLE_SEGMENTS: u32 = 32;

/// Lower a primitive list to triangles, in order. `Text` contributes no
/// triangles.
pub fn tessellate(primitives: &[RenderPrimitive], out: &mut Vec<Vertex>) {
    for prim in primitives {
        match prim {
            RenderPrimitive::Quad { corners, color } => quad(corners, *color, out),
            RenderPrimitive::Circle {
                center,
                radius,
                color,
            } => circle(*center, *radius, *color, CIRCLE_SEGMENTS, out),
            RenderPrimitive::ParticleSegment {
                head,
                tail,
                width,
                color,
            } => particle_segment(*head, *tail, *width, *color, out),
            RenderPrimitive::Text { .. } => {}
        }
    }
}

/// Two triangles per quad
fn quad(corners: &[Vec2; 4], color: [f32; 4], out: &mut Vec<Vertex>) {
    out.push(Vertex::new(corners[0].x, corners[0].y, color));
    out.push(Vertex::new(corners[1].x, corners[1].y, color));
    out.push(Vertex::new(corners[2].x, corners[2].y, color));

    out.push(Vertex::new(corners[0].x, corners[0].y, color));
    out.push(Vertex::new(corners[2].x, corners[2].y, color));
    out.push(Vertex::new(corners[3].x, corners[3].y, color));
}

/// Triangle fan from the center
fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32, out: &mut Vec<Vertex>) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// A thin quad along the head-to-tail axis
fn particle_segment(head: Vec2, tail: Vec2, width: f32, color: [f32; 4], out: &mut Vec<Vertex>) {
    let dir = (tail - head).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    let corners = [head + perp, head - perp, tail - perp, tail + perp];
    quad(&corners, color, out);
}
