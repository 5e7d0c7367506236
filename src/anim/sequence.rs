use super::chain::{Chain, Hop, Traversal};
use super::segment::Progress;
use super::surface::{Stroke, Surface};

/// Walks the chain one segment at a time, bouncing between the two ends.
#[derive(Debug, Clone)]
pub struct Sequence {
    chain: Chain,
    current: usize,
    traversal: Traversal,
}

impl Sequence {
    pub fn new(len: usize) -> Self {
        Self {
            chain: Chain::new(len),
            current: 0,
            traversal: Traversal::Forward,
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Ticks the active segment. When it completes, control passes to its neighbour. At an
    /// end of the chain the traversal flips instead and the active segment stays put until
    /// the next completion.
    pub fn update(&mut self, step: f64) -> Progress {
        let progress = self.chain.update(self.current, step);
        if let Progress::Completed(scale) = progress {
            match self.chain.hop(self.current, self.traversal) {
                Hop::Moved(next) => self.current = next,
                Hop::Boundary(_) => self.traversal = self.traversal.flipped(),
            }
            log::debug!(
                "segment settled at {scale}, active {} heading {}",
                self.current,
                self.traversal.sign()
            );
        }
        progress
    }

    pub fn start_updating(&mut self) -> bool {
        self.chain.start_updating(self.current)
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, stroke: &Stroke) -> Result<(), S::Error> {
        self.chain.draw_from(self.current, surface, stroke)
    }
}
