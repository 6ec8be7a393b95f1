use crate::config::{self, DesktopLayer};
use crate::events::AppEvent;
use crate::gui::clock::{self, Animator, Point, RenderState, TickHandle, YearWindow};
use crate::gui::theme;
use crate::gui::window;
use crate::sys::navigate::{self, Navigator};
use goalbook::Goal;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<RenderState>>,
    pub navigator: Navigator,
    pub goals_path: PathBuf,
    pub tick: Option<TickHandle>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerMove(Point),
    PointerLeave,
    Click(Point),
    GoalsLoaded(Vec<Goal>),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::GoalsLoaded(goals) => AppMsg::GoalsLoaded(goals),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn apply_affordance(&self, affordance: clock::Affordance) {
        self.drawing_area
            .set_cursor_from_name(affordance.cursor_name());
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        RenderState,
        Navigator,
        DesktopLayer,
        async_channel::Receiver<AppEvent>,
        PathBuf,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Ring Clock"),
            set_default_size: (900, 900),
            add_css_class: "ringclock-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "ringclock-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::PointerLeave);
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
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
        let (state, navigator, layer, rx, goals_path) = init;

        theme::load_css();
        window::init_layer_shell(&root, layer);

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            navigator,
            goals_path,
            tick: None,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.tick = Some(clock::driver::run(
            state,
            &widgets.drawing_area,
            Animator::default(),
        ));

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerMove(point) => {
                let action = self.state.borrow_mut().pointer_moved(point);
                if action.should_redraw {
                    self.apply_affordance(action.affordance);
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::PointerLeave => {
                let action = self.state.borrow_mut().pointer_left();
                if action.should_redraw {
                    self.apply_affordance(action.affordance);
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Click(point) => {
                let (action, target) = self.state.borrow_mut().clicked(point);
                if action.should_redraw {
                    self.apply_affordance(action.affordance);
                    self.drawing_area.queue_draw();
                }
                if let Some(target) = target
                    && let Err(e) = self.navigator.open(&target)
                {
                    log::error!("Failed to open '{}': {}", target, e);
                }
            }
            AppMsg::GoalsLoaded(goals) => {
                self.state.borrow_mut().set_goals(goals);
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.navigator = Navigator::new(new_config.open_command);
                    let mut state = self.state.borrow_mut();
                    state.board = navigate::locate_board(&new_config.board_path, &self.goals_path);
                    state.set_year_window(YearWindow::new(new_config.first_year));
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        if let Some(tick) = self.tick.as_mut() {
            tick.cancel();
        }
    }
}
