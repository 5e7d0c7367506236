use crate::anim::Renderer;
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::theme;
use crate::gui::view::{AreaRedraw, CairoSurface};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub renderer: Rc<RefCell<Renderer>>,
    pub config_path: Option<PathBuf>,
    pub windowed: bool,
    pub css: gtk::CssProvider,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Tap,
    Close,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

pub struct AppInit {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub windowed: bool,
    pub events: async_channel::Receiver<AppEvent>,
}

impl AppModel {
    fn apply_window(&self, config: &Config) {
        let mut window_config = config.window.clone();
        window_config.fullscreen &= !self.windowed;
        window::apply_window_config(&self.root, &window_config);
        theme::load_css(&self.css, &config.style);
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            add_css_class: "linerotate-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::space || key == gtk::gdk::Key::Return {
                        sender.input(AppMsg::Tap);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "linerotate-canvas",

                add_controller = gtk::GestureClick {
                    set_button: 1, // primary only
                    connect_pressed[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Tap);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            windowed,
            events,
        } = init;

        let model = AppModel {
            renderer: Rc::new(RefCell::new(Renderer::new(&config))),
            config_path,
            windowed,
            css: theme::install_css_provider(),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.apply_window(&config);

        let renderer = model.renderer.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let mut surface = CairoSurface::new(cr, width, height);
                let host = AreaRedraw::new(drawing_area);
                if let Err(e) = renderer.borrow_mut().render(&mut surface, &host) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Tap => {
                let host = AreaRedraw::new(&self.drawing_area);
                self.renderer.borrow_mut().handle_tap(&host);
            }
            AppMsg::Close => self.root.close(),
            AppMsg::ConfigReload => {
                let Some(path) = self.config_path.as_deref() else {
                    return;
                };
                match config::load_config(path) {
                    Ok(new_config) => {
                        self.renderer.borrow_mut().reconfigure(&new_config);
                        self.apply_window(&new_config);
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
            }
        }
    }
}
