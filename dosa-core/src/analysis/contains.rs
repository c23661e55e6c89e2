use crate::{edge::Edge, r2::R2, rect::Rect};

pub trait Contains<O> {
    fn contains(&self, o: &O) -> bool;
}

/// Half-open containment: inclusive on `corner_a` (left, top), exclusive on `corner_b` (right,
/// bottom), so two regions sharing a side never both claim a point on it.
impl Contains<R2<f64>> for Rect {
    fn contains(&self, p: &R2<f64>) -> bool {
        let R2 { x: x0, y: y0 } = self.corner_a;
        let R2 { x: x1, y: y1 } = self.corner_b;
        p.x >= x0 && p.x < x1 && p.y <= y0 && p.y > y1
    }
}

/// Both endpoints inside; the "within" predicate.
impl Contains<Edge> for Rect {
    fn contains(&self, e: &Edge) -> bool {
        contains_edge(self, &e.origin, &e.destination)
    }
}

pub fn contains_edge(rect: &Rect, origin: &R2<f64>, destination: &R2<f64>) -> bool {
    rect.contains(origin) && rect.contains(destination)
}
