use palette::Srgb;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Srgb<f64>,
    pub width: f64,
    pub cap: LineCap,
}

/// The drawing operations a frame needs. Transform calls (`translate`, `rotate`) compose with
/// the current transform and are scoped by `save`/`restore`.
pub trait Surface {
    type Error;

    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn clear(&mut self, color: Srgb<f64>) -> Result<(), Self::Error>;
    fn save(&mut self) -> Result<(), Self::Error>;
    fn restore(&mut self) -> Result<(), Self::Error>;
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotation in radians, clockwise in screen space.
    fn rotate(&mut self, angle: f64);
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), Self::Error>;

    fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}
