use crate::config::StyleConfig;
use gdk4 as gdk;
use gtk4 as gtk;

pub fn install_css_provider() -> gtk::CssProvider {
    let provider = gtk::CssProvider::new();

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
    provider
}

/// Paints the window in the configured background so nothing flashes before the first frame.
pub fn load_css(provider: &gtk::CssProvider, style: &StyleConfig) {
    let css_data = format!(
        "
.linerotate-window, .linerotate-canvas {{
    background: none;
    background-color: {};
}}
",
        style.background
    );
    provider.load_from_data(&css_data);
}
