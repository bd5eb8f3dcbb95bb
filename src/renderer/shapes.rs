//! Shape generation for 2D primitives

use super::vertex::{Palette, Vertex};
use crate::sim::{Rect, Snapshot};

/// Thickness of the drawn ground line in pixels
const GROUND_THICKNESS: f32 = 2.0;

/// Two triangles covering `rect` (world pixels)
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Triangle list for one frame: ground, obstacles in spawn order, then the player on top
pub fn scene_vertices(snapshot: &Snapshot<'_>, palette: &Palette) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((snapshot.obstacles.len() + 2) * 6);

    let ground = Rect::new(0.0, snapshot.ground_y, snapshot.viewport.x, GROUND_THICKNESS);
    vertices.extend_from_slice(&quad(&ground, palette.ground));

    for obstacle in snapshot.obstacles {
        vertices.extend_from_slice(&quad(&obstacle.rect, palette.obstacle(obstacle.kind)));
    }

    vertices.extend_from_slice(&quad(snapshot.player, palette.player));
    vertices
}
