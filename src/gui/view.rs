use crate::anim::{LineCap, Point, Redraw, Stroke, Surface};
use cairo::Context;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgb;
use std::time::Duration;

/// Cairo context of a drawing area, sized to the area's allocation.
pub struct CairoSurface<'a> {
    cr: &'a Context,
    width: f64,
    height: f64,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context, width: i32, height: i32) -> Self {
        Self {
            cr,
            width: width as f64,
            height: height as f64,
        }
    }

    fn set_source(&self, color: Srgb<f64>) {
        let (r, g, b) = color.into_components();
        self.cr.set_source_rgb(r, g, b);
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self, color: Srgb<f64>) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.cr.paint()
    }

    fn save(&mut self) -> Result<(), cairo::Error> {
        self.cr.save()
    }

    fn restore(&mut self) -> Result<(), cairo::Error> {
        self.cr.restore()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.cr.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f64) {
        self.cr.rotate(angle);
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), cairo::Error> {
        self.set_source(stroke.color);
        self.cr.set_line_width(stroke.width);
        self.cr.set_line_cap(match stroke.cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        });
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke()
    }
}

/// Redraws go through `queue_draw`; delayed ones through a glib timeout that holds only a
/// weak reference, so a closed window just drops the pending frame.
pub struct AreaRedraw {
    area: glib::WeakRef<gtk::DrawingArea>,
}

impl AreaRedraw {
    pub fn new(area: &gtk::DrawingArea) -> Self {
        Self {
            area: area.downgrade(),
        }
    }
}

impl Redraw for AreaRedraw {
    fn request_redraw(&self) {
        if let Some(area) = self.area.upgrade() {
            area.queue_draw();
        }
    }

    fn schedule_redraw(&self, delay: Duration) {
        let area = self.area.clone();
        glib::timeout_add_local_once(delay, move || match area.upgrade() {
            Some(area) => area.queue_draw(),
            None => log::debug!("drawing area gone, skipping frame"),
        });
    }
}
