use std::time::Duration;

/// How the host gets asked to draw again.
pub trait Redraw {
    fn request_redraw(&self);
    /// Must not block. If the wait is cancelled the redraw is simply skipped.
    fn schedule_redraw(&self, delay: Duration);
}

/// Flag-gated tick loop. Every `animate` call performs one tick and asks for the next
/// frame after `interval`.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    active: bool,
    interval: Duration,
}

impl FrameDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            active: false,
            interval,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn start<R: Redraw + ?Sized>(&mut self, host: &R) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        log::debug!("frame driver started");
        host.request_redraw();
        true
    }

    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        log::debug!("frame driver stopped");
        true
    }

    /// The redraw is scheduled even when `tick` stops the driver, so the settled frame
    /// still gets painted. That frame's `animate` is then a no-op.
    pub fn animate<R, F>(&mut self, host: &R, tick: F)
    where
        R: Redraw + ?Sized,
        F: FnOnce(&mut Self),
    {
        if !self.active {
            return;
        }
        tick(self);
        host.schedule_redraw(self.interval);
    }
}
