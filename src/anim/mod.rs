pub mod chain;
pub mod driver;
pub mod renderer;
pub mod segment;
pub mod sequence;
pub mod surface;

pub use chain::{Chain, Hop, Traversal};
pub use driver::{FrameDriver, Redraw};
pub use renderer::{Renderer, Style};
pub use segment::{Progress, SegmentState};
pub use sequence::Sequence;
pub use surface::{LineCap, Point, Stroke, Surface};

pub const DEFAULT_NODES: usize = 5;
pub const DEFAULT_STEP: f64 = 0.1;
pub const DEFAULT_INTERVAL_MS: u64 = 50;
pub const DEFAULT_STROKE_DIVISOR: f64 = 60.0;
pub const DEFAULT_BACKGROUND: &str = "#212121";
pub const DEFAULT_STROKE: &str = "#303F9F";
