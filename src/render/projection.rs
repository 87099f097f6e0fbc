use crate::dynamics::state::State;
use crate::error::{Error, Result};

/// Pixels per phase-space unit.
pub const SCALE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Viewport and pixel coordinates
// ---------------------------------------------------------------------------

/// Drawable area supplied by the renderer at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn contains(&self, p: Pixel) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as i64) < self.width as i64 && (p.y as i64) < self.height as i64
    }
}

/// Integer screen position, origin top-left, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

// ---------------------------------------------------------------------------
// Orthographic x-y projection
// ---------------------------------------------------------------------------

/// Map a state onto the viewport by dropping z:
///   px = width/2 + x * SCALE
///   py = height/2 + y * SCALE
///
/// The half-extent uses integer division and the sum is truncated toward
/// zero. Out-of-range values saturate at the `i32` limits; NaN maps to 0.
pub fn project(state: &State, viewport: Viewport) -> Pixel {
    let cx = (viewport.width / 2) as f64;
    let cy = (viewport.height / 2) as f64;
    Pixel {
        x: (cx + state.x() * SCALE) as i32,
        y: (cy + state.y() * SCALE) as i32,
    }
}

/// Project a sequence of states, preserving order.
pub fn project_all<'a, I>(states: I, viewport: Viewport) -> impl Iterator<Item = Pixel> + 'a
where
    I: IntoIterator<Item = &'a State>,
    I::IntoIter: 'a,
{
    states.into_iter().map(move |s| project(s, viewport))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport { width: 800, height: 600 }
    }

    #[test]
    fn origin_maps_to_centre() {
        assert_eq!(project(&State::new(0.0, 0.0, 0.0), vp()), Pixel { x: 400, y: 300 });
    }

    #[test]
    fn z_is_discarded() {
        for z in [-100.0, 0.0, 27.0, 1e9] {
            assert_eq!(project(&State::new(5.0, -3.0, z), vp()), Pixel { x: 450, y: 270 });
        }
    }

    #[test]
    fn odd_extent_uses_integer_half() {
        let odd = Viewport { width: 801, height: 601 };
        assert_eq!(project(&State::new(0.0, 0.0, 0.0), odd), Pixel { x: 400, y: 300 });
    }

    #[test]
    fn fractional_offsets_truncate_toward_zero() {
        // 400 + 0.27 * 10 = 402.7 -> 402; 300 - 30.15 * 10 = -1.5 -> -1
        let p = project(&State::new(0.27, -30.15, 0.0), vp());
        assert_eq!(p, Pixel { x: 402, y: -1 });
    }

    #[test]
    fn non_finite_coordinates_do_not_panic() {
        let p = project(&State::new(f64::NAN, f64::INFINITY, 0.0), vp());
        assert_eq!(p, Pixel { x: 0, y: i32::MAX });
    }

    #[test]
    fn contains_checks_bounds() {
        let v = vp();
        assert!(v.contains(Pixel { x: 0, y: 0 }));
        assert!(v.contains(Pixel { x: 799, y: 599 }));
        assert!(!v.contains(Pixel { x: 800, y: 10 }));
        assert!(!v.contains(Pixel { x: -1, y: 10 }));
    }

    #[test]
    fn empty_viewport_rejected() {
        assert_eq!(Viewport::new(0, 600), Err(Error::EmptyViewport { width: 0, height: 600 }));
        assert_eq!(Viewport::new(800, 600), Ok(vp()));
        // A collapsed window reports a zero-sized canvas.
        assert_eq!(Viewport::new(0, 0), Err(Error::EmptyViewport { width: 0, height: 0 }));
        assert!(Viewport::new(1, 1).is_ok());
    }

    #[test]
    fn project_all_preserves_order() {
        let states = [State::new(0.0, 0.0, 1.0), State::new(5.0, -3.0, 2.0)];
        let pixels: Vec<Pixel> = project_all(&states, vp()).collect();
        assert_eq!(pixels, vec![Pixel { x: 400, y: 300 }, Pixel { x: 450, y: 270 }]);
    }
}
