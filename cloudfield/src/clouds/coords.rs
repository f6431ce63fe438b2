// src/clouds/coords.rs

/// One candidate cloud position in the generation scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
}

impl GridCell {
    /// Grid coordinate scaled into `[0, 1)`.
    pub fn normalized(&self, side: usize) -> (f64, f64) {
        let side = side as f64;
        (self.x as f64 / side, self.y as f64 / side)
    }

    /// Horizontal position relative to the field root. The grid is stretched
    /// over a square of side `range * 8` centred on the root; grid `y` maps to
    /// local `z`.
    pub fn to_local_xz(&self, side: usize, range: i32) -> (f32, f32) {
        let extent = range as f32 * 8.0;
        let half = range as f32 * 4.0;
        (
            (self.x as f32 / side as f32) * extent - half,
            (self.y as f32 / side as f32) * extent - half,
        )
    }
}

/// Every cell of a `side x side` grid, x outer, y inner.
pub fn cells(side: usize) -> impl Iterator<Item = GridCell> {
    (0..side).flat_map(move |x| (0..side).map(move |y| GridCell { x, y }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cells_are_x_major() {
        let order: Vec<_> = cells(2).map(|c| (c.x, c.y)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_empty_side_has_no_cells() {
        assert_eq!(cells(0).count(), 0);
    }

    #[test]
    fn test_local_xz_spans_centred_square() {
        // range 1 -> square of side 8, side 4 -> cells every 2 units
        let (x0, z0) = GridCell { x: 0, y: 0 }.to_local_xz(4, 1);
        assert_relative_eq!(x0, -4.0);
        assert_relative_eq!(z0, -4.0);

        let (x3, z1) = GridCell { x: 3, y: 1 }.to_local_xz(4, 1);
        assert_relative_eq!(x3, 2.0);
        assert_relative_eq!(z1, -2.0);
    }

    #[test]
    fn test_normalized_stays_below_one() {
        let (u, v) = GridCell { x: 191, y: 0 }.normalized(192);
        assert!(u < 1.0);
        assert_eq!(v, 0.0);
    }
}
