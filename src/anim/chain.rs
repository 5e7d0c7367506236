use super::segment::{Progress, SegmentState};
use super::surface::{Point, Stroke, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    #[default]
    Forward,
    Backward,
}

impl Traversal {
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Result of looking for a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    Moved(usize),
    /// No neighbour in that direction; carries the index we started from.
    Boundary(usize),
}

impl Hop {
    pub fn index(self) -> usize {
        match self {
            Self::Moved(i) | Self::Boundary(i) => i,
        }
    }
}

/// Fixed row of segments. Built once, never resized.
#[derive(Debug, Clone)]
pub struct Chain {
    segments: Vec<SegmentState>,
}

impl Chain {
    pub fn new(len: usize) -> Self {
        Self {
            segments: vec![SegmentState::default(); len.max(1)],
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[SegmentState] {
        &self.segments
    }

    pub fn next(&self, index: usize) -> Option<usize> {
        (index + 1 < self.len()).then_some(index + 1)
    }

    pub fn prev(&self, index: usize) -> Option<usize> {
        index.checked_sub(1)
    }

    pub fn hop(&self, index: usize, traversal: Traversal) -> Hop {
        let neighbour = match traversal {
            Traversal::Forward => self.next(index),
            Traversal::Backward => self.prev(index),
        };
        neighbour.map_or(Hop::Boundary(index), Hop::Moved)
    }

    pub fn update(&mut self, index: usize, step: f64) -> Progress {
        self.segments
            .get_mut(index)
            .map_or(Progress::Idle, |s| s.update(step))
    }

    pub fn start_updating(&mut self, index: usize) -> bool {
        self.segments
            .get_mut(index)
            .is_some_and(SegmentState::start_updating)
    }

    /// Draws one segment. Even segments lie flat and odd ones stand upright, stepping up and
    /// to the right; rotation direction alternates with parity.
    pub fn draw_segment<S: Surface>(
        &self,
        index: usize,
        surface: &mut S,
        stroke: &Stroke,
    ) -> Result<(), S::Error> {
        let Some(state) = self.segments.get(index) else {
            return Ok(());
        };
        if surface.is_empty() {
            return Ok(());
        }

        let (w, h) = (surface.width(), surface.height());
        let gap = w / self.len() as f64;
        let parity = (index % 2) as f64;
        let lead = ((index + 1) % 2) as f64;
        let column = ((index + 1) / 2) as f64;
        let factor = 1.0 - 2.0 * parity;

        surface.save()?;
        surface.translate(
            w / 4.0 + column * gap + lead * gap,
            0.8 * h - gap * column - gap / 10.0,
        );
        surface.rotate((90.0 * factor * state.scale()).to_radians());
        surface.line(
            Point::default(),
            Point::new(-gap * lead, gap * parity),
            stroke,
        )?;
        surface.restore()
    }

    /// Draws `from` and every segment after it.
    pub fn draw_from<S: Surface>(
        &self,
        from: usize,
        surface: &mut S,
        stroke: &Stroke,
    ) -> Result<(), S::Error> {
        for index in from..self.len() {
            self.draw_segment(index, surface, stroke)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::surface::LineCap;
    use crate::anim::surface::recording::{Op, RecordingSurface};
    use palette::Srgb;

    fn stroke() -> Stroke {
        Stroke {
            color: Srgb::new(0.0, 0.0, 1.0),
            width: 4.0,
            cap: LineCap::Round,
        }
    }

    #[test]
    fn test_hop_at_boundaries() {
        let chain = Chain::new(5);
        assert_eq!(chain.hop(0, Traversal::Backward), Hop::Boundary(0));
        assert_eq!(chain.hop(4, Traversal::Forward), Hop::Boundary(4));
        assert_eq!(chain.hop(0, Traversal::Forward), Hop::Moved(1));
        assert_eq!(chain.hop(4, Traversal::Backward), Hop::Moved(3));
    }

    #[test]
    fn test_all_segments_reachable() {
        let chain = Chain::new(5);

        let forward: Vec<usize> = std::iter::successors(Some(0), |&i| chain.next(i)).collect();
        assert_eq!(forward, vec![0, 1, 2, 3, 4]);

        let backward: Vec<usize> = std::iter::successors(Some(4), |&i| chain.prev(i)).collect();
        assert_eq!(backward, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_zero_length_chain_keeps_one_segment() {
        let chain = Chain::new(0);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.hop(0, Traversal::Forward), Hop::Boundary(0));
    }

    #[test]
    fn test_draw_from_draws_tail_only() {
        let chain = Chain::new(5);
        let mut surface = RecordingSurface::new(500.0, 1000.0);
        chain.draw_from(2, &mut surface, &stroke()).unwrap();
        assert_eq!(surface.lines(), 3);
        assert_eq!(
            surface.count(|op| *op == Op::Save),
            surface.count(|op| *op == Op::Restore)
        );
    }

    #[test]
    fn test_segment_geometry() {
        let chain = Chain::new(5);
        let mut surface = RecordingSurface::new(500.0, 1000.0);
        chain.draw_segment(1, &mut surface, &stroke()).unwrap();

        // gap = 100, column = 1, lead = 0
        assert_eq!(
            surface.ops,
            vec![
                Op::Save,
                Op::Translate(225.0, 690.0),
                Op::Rotate(0.0),
                Op::Line(Point::new(0.0, 0.0), Point::new(0.0, 100.0), stroke()),
                Op::Restore,
            ]
        );
    }

    #[test]
    fn test_rotation_sign_alternates() {
        let mut chain = Chain::new(2);
        for index in 0..2 {
            chain.start_updating(index);
            while !chain.update(index, 0.1).is_completed() {}
        }

        let mut surface = RecordingSurface::new(200.0, 200.0);
        chain.draw_from(0, &mut surface, &stroke()).unwrap();
        let angles = surface.rotations();
        assert!((angles[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((angles[1] + std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_surface_draws_nothing() {
        let chain = Chain::new(5);
        let mut surface = RecordingSurface::new(0.0, 300.0);
        chain.draw_from(0, &mut surface, &stroke()).unwrap();
        assert!(surface.ops.is_empty());
    }
}
