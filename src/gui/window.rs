use crate::config::WindowConfig;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn apply_window_config(window: &gtk::ApplicationWindow, config: &WindowConfig) {
    window.set_title(Some(&config.title));
    window.set_default_size(config.width.max(1), config.height.max(1));
    if config.fullscreen {
        window.fullscreen();
    } else {
        window.unfullscreen();
    }
}
