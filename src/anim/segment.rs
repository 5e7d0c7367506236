/// Outcome of a single tick on a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Idle,
    Animating,
    /// The rotation reached its next resting point. Carries the committed scale.
    Completed(f64),
}

impl Progress {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Rotation state of one segment. `scale` is 0 at rest and 1 after a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentState {
    scale: f64,
    dir: f64,
    prev_scale: f64,
}

impl SegmentState {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn dir(&self) -> f64 {
        self.dir
    }

    pub fn prev_scale(&self) -> f64 {
        self.prev_scale
    }

    pub fn is_animating(&self) -> bool {
        self.dir != 0.0
    }

    /// Advances by `step * dir`. Once the scale has moved more than one unit from the last
    /// committed value it snaps to `prev_scale + dir` and the segment goes idle.
    pub fn update(&mut self, step: f64) -> Progress {
        if !self.is_animating() {
            return Progress::Idle;
        }

        self.scale += step * self.dir;
        if (self.scale - self.prev_scale).abs() > 1.0 {
            self.scale = self.prev_scale + self.dir;
            self.dir = 0.0;
            self.prev_scale = self.scale;
            return Progress::Completed(self.prev_scale);
        }
        Progress::Animating
    }

    /// Starts rotating away from the committed scale: forward from 0, backward from 1.
    /// Returns `false` if the segment is already moving.
    pub fn start_updating(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        self.dir = 1.0 - 2.0 * self.prev_scale;
        true
    }
}
