use super::driver::{FrameDriver, Redraw};
use super::sequence::Sequence;
use super::surface::{LineCap, Stroke, Surface};
use crate::config::{AnimationConfig, Config, DriverMode, StyleConfig};
use palette::Srgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub background: Srgb<f64>,
    pub stroke: Srgb<f64>,
    pub stroke_divisor: f64,
}

impl Style {
    pub fn stroke_for<S: Surface>(&self, surface: &S) -> Stroke {
        Stroke {
            color: self.stroke,
            width: surface.width().min(surface.height()) / self.stroke_divisor,
            cap: LineCap::Round,
        }
    }
}

impl From<&StyleConfig> for Style {
    fn from(cfg: &StyleConfig) -> Self {
        Self {
            background: cfg.background.into_f64(),
            stroke: cfg.stroke.into_f64(),
            stroke_divisor: cfg.stroke_divisor,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::from(&StyleConfig::default())
    }
}

/// Ties the sequence to the frame driver and paints each frame.
#[derive(Debug, Clone)]
pub struct Renderer {
    sequence: Sequence,
    driver: FrameDriver,
    style: Style,
    step: f64,
    mode: DriverMode,
}

impl Renderer {
    pub fn new(config: &Config) -> Self {
        let animation = &config.animation;
        Self {
            sequence: Sequence::new(animation.nodes),
            driver: FrameDriver::new(animation.interval()),
            style: Style::from(&config.style),
            step: animation.step,
            mode: animation.mode,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    /// Applies a reloaded config. Animation state survives unless the segment count changed.
    pub fn reconfigure(&mut self, config: &Config) {
        let AnimationConfig {
            nodes,
            step,
            mode,
            ..
        } = config.animation;

        if nodes.max(1) != self.sequence.chain().len() {
            log::info!("segment count changed to {nodes}, resetting animation");
            self.sequence = Sequence::new(nodes);
            self.driver.stop();
        }
        self.driver.set_interval(config.animation.interval());
        self.style = Style::from(&config.style);
        self.step = step;
        self.mode = mode;
    }

    pub fn handle_tap<R: Redraw + ?Sized>(&mut self, host: &R) {
        if self.sequence.start_updating() {
            self.driver.start(host);
        }
    }

    /// Draws the frame and ticks. The tick runs even if drawing fails, so an active driver
    /// always has its next frame scheduled.
    pub fn render<S, R>(&mut self, surface: &mut S, host: &R) -> Result<(), S::Error>
    where
        S: Surface,
        R: Redraw + ?Sized,
    {
        if surface.is_empty() {
            return Ok(());
        }

        let drawn = self.draw_frame(surface);
        self.tick(host);
        drawn
    }

    fn draw_frame<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.style.background)?;
        let stroke = self.style.stroke_for(surface);
        self.sequence.draw(surface, &stroke)
    }

    fn tick<R: Redraw + ?Sized>(&mut self, host: &R) {
        let Self {
            sequence,
            driver,
            step,
            mode,
            ..
        } = self;
        driver.animate(host, |d| {
            if sequence.update(*step).is_completed() {
                match mode {
                    DriverMode::Step => {
                        d.stop();
                    }
                    DriverMode::Continuous => {
                        sequence.start_updating();
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::driver::recording::RecordingHost;
    use crate::anim::surface::Point;
    use crate::anim::surface::recording::RecordingSurface;

    /// Accepts the clear, then refuses every save.
    struct BrokenSurface;

    impl Surface for BrokenSurface {
        type Error = &'static str;

        fn width(&self) -> f64 {
            480.0
        }

        fn height(&self) -> f64 {
            800.0
        }

        fn clear(&mut self, _: Srgb<f64>) -> Result<(), Self::Error> {
            Ok(())
        }

        fn save(&mut self) -> Result<(), Self::Error> {
            Err("save failed")
        }

        fn restore(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn translate(&mut self, _: f64, _: f64) {}

        fn rotate(&mut self, _: f64) {}

        fn line(&mut self, _: Point, _: Point, _: &Stroke) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn renderer(mode: DriverMode) -> Renderer {
        let mut config = Config::default();
        config.animation.mode = mode;
        Renderer::new(&config)
    }

    fn frame(renderer: &mut Renderer, host: &RecordingHost) -> RecordingSurface {
        let mut surface = RecordingSurface::new(480.0, 800.0);
        renderer.render(&mut surface, host).unwrap();
        surface
    }

    #[test]
    fn test_frame_clears_once_and_draws_from_active() {
        let host = RecordingHost::default();
        let mut r = renderer(DriverMode::Step);

        let surface = frame(&mut r, &host);
        assert_eq!(surface.clears(), 1);
        assert_eq!(surface.lines(), 5);
        assert_eq!(host.scheduled_count(), 0);
    }

    #[test]
    fn test_stroke_scales_with_surface() {
        let style = Style::default();
        let stroke = style.stroke_for(&RecordingSurface::new(480.0, 800.0));
        assert_eq!(stroke.width, 8.0);
        assert_eq!(stroke.cap, LineCap::Round);
    }

    #[test]
    fn test_tap_starts_driver_once() {
        let host = RecordingHost::default();
        let mut r = renderer(DriverMode::Step);

        r.handle_tap(&host);
        r.handle_tap(&host);
        assert!(r.driver().is_active());
        assert_eq!(host.requested.get(), 1);
    }

    #[test]
    fn test_step_mode_stops_after_one_segment() {
        let host = RecordingHost::default();
        let mut r = renderer(DriverMode::Step);
        r.handle_tap(&host);

        let mut frames = 0;
        while r.driver().is_active() {
            frame(&mut r, &host);
            frames += 1;
            assert!(frames <= 20, "driver never stopped");
        }

        assert!(frames >= 10);
        assert_eq!(r.sequence().current(), 1);
        assert_eq!(host.scheduled_count(), frames);

        // settled frame: segment 0 no longer drawn
        let surface = frame(&mut r, &host);
        assert_eq!(surface.lines(), 4);
        assert_eq!(host.scheduled_count(), frames);
    }

    #[test]
    fn test_continuous_mode_keeps_bouncing() {
        let host = RecordingHost::default();
        let mut r = renderer(DriverMode::Continuous);
        r.handle_tap(&host);

        // five completions take at most 55 ticks, a sixth needs at least 60
        for _ in 0..58 {
            frame(&mut r, &host);
        }

        assert!(r.driver().is_active());
        assert_eq!(r.sequence().current(), 4);
        assert!(r.sequence().chain().segments()[4].is_animating());
    }

    #[test]
    fn test_draw_error_still_schedules_next_frame() {
        let host = RecordingHost::default();
        let mut r = renderer(DriverMode::Step);
        r.handle_tap(&host);

        assert_eq!(r.render(&mut BrokenSurface, &host), Err("save failed"));
        assert_eq!(host.scheduled_count(), 1);
        assert!(r.sequence().chain().segments()[0].scale() > 0.0);

        // the animation keeps advancing through failed frames and settles
        let mut frames = 1;
        while r.driver().is_active() {
            let _ = r.render(&mut BrokenSurface, &host);
            frames += 1;
            assert!(frames <= 20, "driver never stopped");
        }
        assert_eq!(host.scheduled_count(), frames);
        assert_eq!(r.sequence().current(), 1);
    }

    #[test]
    fn test_empty_surface_skips_frame() {
        let host = RecordingHost::default();
        let mut r = renderer(DriverMode::Step);
        r.handle_tap(&host);

        let mut surface = RecordingSurface::new(0.0, 0.0);
        r.render(&mut surface, &host).unwrap();
        assert!(surface.ops.is_empty());
        assert_eq!(host.scheduled_count(), 0);
    }

    #[test]
    fn test_reconfigure_keeps_state_when_length_unchanged() {
        let host = RecordingHost::default();
        let mut r = renderer(DriverMode::Step);
        r.handle_tap(&host);
        frame(&mut r, &host);

        let mut config = Config::default();
        config.animation.interval_ms = 20;
        r.reconfigure(&config);
        assert!(r.driver().is_active());
        assert_eq!(r.driver().interval().as_millis(), 20);

        config.animation.nodes = 3;
        r.reconfigure(&config);
        assert!(!r.driver().is_active());
        assert_eq!(r.sequence().chain().len(), 3);
    }
}
