/// Axis-aligned bounding box in lon/lat degrees.
///
/// Used for view framing: the map collaborator receives one of these and
/// fits the viewport to it. `min`/`max` are `[lon, lat]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    pub fn from_point(p: [f64; 2]) -> Self {
        Aabb2 { min: p, max: p }
    }

    /// Grow the box to include `p`.
    pub fn extend_point(&mut self, p: [f64; 2]) {
        self.min[0] = self.min[0].min(p[0]);
        self.min[1] = self.min[1].min(p[1]);
        self.max[0] = self.max[0].max(p[0]);
        self.max[1] = self.max[1].max(p[1]);
    }

    /// Grow the box to include all of `other`.
    pub fn union_in_place(&mut self, other: &Aabb2) {
        self.extend_point(other.min);
        self.extend_point(other.max);
    }

    pub fn union(&self, other: &Aabb2) -> Self {
        let mut out = *self;
        out.union_in_place(other);
        out
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }
}

/// Fold an iterator of points into a single box.
///
/// Returns `None` for an empty iterator; a single point yields a degenerate
/// (zero-area) box, which the framing collaborator accepts.
pub fn bounds_of_points(points: impl IntoIterator<Item = [f64; 2]>) -> Option<Aabb2> {
    let mut out: Option<Aabb2> = None;
    for p in points {
        match &mut out {
            Some(b) => b.extend_point(p),
            None => out = Some(Aabb2::from_point(p)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Aabb2, bounds_of_points};

    #[test]
    fn extend_and_union() {
        let mut b = Aabb2::from_point([1.0, 2.0]);
        b.extend_point([-1.0, 5.0]);
        assert_eq!(b.min, [-1.0, 2.0]);
        assert_eq!(b.max, [1.0, 5.0]);

        let other = Aabb2::new([0.0, -3.0], [4.0, 0.0]);
        let u = b.union(&other);
        assert_eq!(u.min, [-1.0, -3.0]);
        assert_eq!(u.max, [4.0, 5.0]);
    }

    #[test]
    fn bounds_of_points_handles_empty_and_single() {
        assert!(bounds_of_points(Vec::<[f64; 2]>::new()).is_none());

        let b = bounds_of_points([[3.0, 7.0]]).expect("single point bounds");
        assert_eq!(b.min, b.max);
        assert_eq!(b.center(), [3.0, 7.0]);
    }
}
