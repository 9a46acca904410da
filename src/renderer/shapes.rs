//! Shape generation for 2D primitives

use glam::Vec2;

use super::Rect;
use super::vertex::Vertex;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(r: Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (r.x, r.y);
    let (x1, y1) = (r.x + r.w, r.y + r.h);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Square-ish quad centered on `center`, rotated by `angle` radians
pub fn rotated_quad(center: Vec2, half_extents: Vec2, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corner = |x: f32, y: f32| {
        let p = center + rot.rotate(Vec2::new(x * half_extents.x, y * half_extents.y));
        Vertex::new(p.x, p.y, color)
    };
    let (a, b, c, d) = (
        corner(-1.0, -1.0),
        corner(1.0, -1.0),
        corner(1.0, 1.0),
        corner(-1.0, 1.0),
    );
    vec![a, b, d, d, b, c]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let verts = rect(
            Rect {
                x: 10.0,
                y: 20.0,
                w: 5.0,
                h: 4.0,
            },
            [1.0; 4],
        );
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].position, [10.0, 20.0]);
        assert_eq!(verts[5].position, [15.0, 24.0]);
    }

    #[test]
    fn test_unrotated_quad_matches_rect() {
        let verts = rotated_quad(Vec2::new(5.0, 5.0), Vec2::splat(2.0), 0.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].position, [3.0, 3.0]);
        assert_eq!(verts[5].position, [7.0, 7.0]);
    }

    #[test]
    fn test_quarter_turn() {
        let verts = rotated_quad(Vec2::ZERO, Vec2::new(2.0, 1.0), std::f32::consts::FRAC_PI_2, [1.0; 4]);
        // (-2, -1) rotated 90° is (1, -2)
        assert!((verts[0].position[0] - 1.0).abs() < 1e-5);
        assert!((verts[0].position[1] + 2.0).abs() < 1e-5);
    }
}
