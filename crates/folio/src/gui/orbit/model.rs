use super::timer::PendingTimeout;
use super::{LOGO_SIZE, ORBIT_HEIGHT};
use crate::gui::sections;
use crate::gui::theme::ThemeColors;
use crate::gui::window;
use folio_core::content::Experience;
use folio_core::layout::{ITEM_DIAMETER, Point, RadialLayout, Size};
use folio_core::selection::{NavKey, SelectOutcome, Selector};
use folio_core::theme::SharedThemeStore;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

/// What the drawing area needs; shared with its draw func.
#[derive(Debug, Clone)]
pub struct OrbitScene {
    pub layout: RadialLayout,
    pub selected: usize,
}

impl OrbitScene {
    pub fn center(&self) -> Point {
        let container = self.layout.geometry().container();
        Point::new(container.width / 2.0, container.height / 2.0)
    }

    pub fn hub_count_label(&self) -> String {
        match self.layout.item_count() {
            1 => "1 Role".to_owned(),
            n => format!("{} Roles", n),
        }
    }
}

pub struct OrbitModel {
    experience: Vec<Experience>,
    selector: Selector,
    scene: Rc<RefCell<OrbitScene>>,
    pending: PendingTimeout,
}

pub struct OrbitInit {
    pub experience: Vec<Experience>,
    pub delay: Duration,
    pub reduced_motion: bool,
    pub theme: SharedThemeStore,
}

#[derive(Debug)]
pub enum OrbitMsg {
    Select(usize),
    Key { index: usize, key: NavKey },
    Resized { container: Size, viewport: f64 },
    TransitionElapsed,
    ReducedMotion(bool),
    Reload { experience: Vec<Experience>, delay: Duration },
    Redraw,
}

pub struct OrbitWidgets {
    area: gtk::DrawingArea,
    fixed: gtk::Fixed,
    buttons: Vec<gtk::Button>,
    details: gtk::Box,
    shown: Option<usize>,
}

fn nav_key(key: gdk::Key) -> Option<NavKey> {
    if key == gdk::Key::Left || key == gdk::Key::Up {
        Some(NavKey::Previous)
    } else if key == gdk::Key::Right || key == gdk::Key::Down {
        Some(NavKey::Next)
    } else if key == gdk::Key::Return || key == gdk::Key::KP_Enter || key == gdk::Key::space {
        Some(NavKey::Activate)
    } else {
        None
    }
}

fn initials(company: &str) -> String {
    company
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect()
}

fn item_button(index: usize, exp: &Experience, sender: &ComponentSender<OrbitModel>) -> gtk::Button {
    let button = gtk::Button::new();
    button.add_css_class("orbit-item");
    button.set_size_request(ITEM_DIAMETER as i32, ITEM_DIAMETER as i32);
    button.set_tooltip_text(Some(&exp.company));
    button.update_property(&[gtk::accessible::Property::Label(&format!(
        "Select {} experience",
        exp.company
    ))]);

    match exp
        .logo
        .as_deref()
        .and_then(|p| sections::image_from_file(Path::new(p), LOGO_SIZE))
    {
        Some(logo) => button.set_child(Some(&logo)),
        None => button.set_label(&initials(&exp.company)),
    }

    let s = sender.clone();
    button.connect_clicked(move |_| s.input(OrbitMsg::Select(index)));

    let keys = gtk::EventControllerKey::new();
    let s = sender.clone();
    keys.connect_key_pressed(move |_, key, _, _| match nav_key(key) {
        Some(key) => {
            s.input(OrbitMsg::Key { index, key });
            glib::Propagation::Stop
        }
        None => glib::Propagation::Proceed,
    });
    button.add_controller(keys);
    button
}

fn fill_details(details: &gtk::Box, exp: &Experience) {
    sections::clear(details);

    let position = gtk::Label::new(Some(&exp.position));
    position.add_css_class("title-2");
    position.set_xalign(0.0);
    details.append(&position);

    let meta = gtk::Box::new(gtk::Orientation::Horizontal, 16);
    meta.append(&sections::strong(&exp.company));
    meta.append(&sections::text(&format!("{}  \u{b7}  {}", exp.duration, exp.location)));
    details.append(&meta);

    details.append(&sections::text(&exp.description));

    if !exp.achievements.is_empty() {
        details.append(&sections::strong("Key Achievements"));
        details.append(&sections::bullets(&exp.achievements));
    }
    if !exp.skills.is_empty() {
        details.append(&sections::strong("Technologies Used"));
        details.append(&sections::chips(&exp.skills));
    }
}

impl OrbitModel {
    fn begin(&mut self, outcome: SelectOutcome, sender: &ComponentSender<Self>) {
        match outcome.transition() {
            Some(t) if t.delay.is_zero() => {
                self.selector.complete();
            }
            Some(t) => {
                let s = sender.clone();
                self.pending
                    .schedule(t.delay, move || s.input(OrbitMsg::TransitionElapsed));
            }
            None => log::debug!("Selection request dropped: {:?}", outcome),
        }
    }

    fn rebuild_items(&self, widgets: &mut OrbitWidgets, sender: &ComponentSender<Self>) {
        for button in widgets.buttons.drain(..) {
            widgets.fixed.remove(&button);
        }
        widgets.buttons = self
            .experience
            .iter()
            .enumerate()
            .map(|(i, exp)| {
                let button = item_button(i, exp, sender);
                widgets.fixed.put(&button, 0.0, 0.0);
                button
            })
            .collect();
        widgets.shown = None;
    }

    fn sync(&self, widgets: &mut OrbitWidgets) {
        let selected = self.selector.selected_index();
        {
            let mut scene = self.scene.borrow_mut();
            scene.selected = selected;
            let container = scene.layout.geometry().container();
            for (button, item) in widgets.buttons.iter().zip(scene.layout.items()) {
                let p = item.top_left(container, ITEM_DIAMETER);
                widgets.fixed.move_(button, p.x, p.y);
            }
        }

        for (i, button) in widgets.buttons.iter().enumerate() {
            let active = i == selected;
            if active {
                button.add_css_class("selected");
            } else {
                button.remove_css_class("selected");
            }
            button.update_state(&[gtk::accessible::State::Pressed(if active {
                gtk::AccessibleTristate::True
            } else {
                gtk::AccessibleTristate::False
            })]);
        }

        if self.selector.is_transitioning() {
            widgets.details.add_css_class("transitioning");
        } else {
            widgets.details.remove_css_class("transitioning");
        }
        if self.selector.reduced_motion() {
            widgets.details.add_css_class("reduced-motion");
        } else {
            widgets.details.remove_css_class("reduced-motion");
        }

        if widgets.shown != Some(selected)
            && let Some(exp) = self.experience.get(selected)
        {
            fill_details(&widgets.details, exp);
            widgets.shown = Some(selected);
        }

        widgets.area.queue_draw();
    }
}

impl Component for OrbitModel {
    type CommandOutput = ();
    type Init = OrbitInit;
    type Input = OrbitMsg;
    type Output = ();
    type Root = gtk::Box;
    type Widgets = OrbitWidgets;

    fn init_root() -> Self::Root {
        sections::section_box(Some("Work Experience"))
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let OrbitInit {
            experience,
            delay,
            reduced_motion,
            theme,
        } = init;

        let mut selector = Selector::new(experience.len(), delay);
        selector.set_reduced_motion(reduced_motion);

        let scene = Rc::new(RefCell::new(OrbitScene {
            layout: RadialLayout::new(experience.len(), ITEM_DIAMETER),
            selected: 0,
        }));

        let columns = gtk::Box::new(gtk::Orientation::Horizontal, 48);

        let overlay = gtk::Overlay::new();
        overlay.set_hexpand(true);
        let area = gtk::DrawingArea::new();
        area.set_size_request(-1, ORBIT_HEIGHT);
        area.set_hexpand(true);
        overlay.set_child(Some(&area));

        let fixed = gtk::Fixed::new();
        overlay.add_overlay(&fixed);

        let details = gtk::Box::new(gtk::Orientation::Vertical, 16);
        details.add_css_class("card");
        details.add_css_class("details");
        details.set_hexpand(true);
        details.set_valign(gtk::Align::Center);
        details.update_property(&[gtk::accessible::Property::Label("Experience details")]);

        columns.append(&overlay);
        columns.append(&details);
        root.append(&columns);
        root.set_visible(!experience.is_empty());

        let scene_draw = scene.clone();
        area.set_draw_func(move |area, cr, _, _| {
            let colors = ThemeColors::resolve(&area.style_context(), theme.borrow().current());
            if let Err(e) = super::draw(cr, &scene_draw.borrow(), &colors) {
                log::error!("Drawing error: {}", e);
            }
        });

        let s = sender.clone();
        area.connect_resize(move |area, w, h| {
            let container = Size::new(w as f64, h as f64);
            let viewport = window::viewport_width(area).unwrap_or(container.width);
            s.input(OrbitMsg::Resized {
                container,
                viewport,
            });
        });

        let model = OrbitModel {
            experience,
            selector,
            scene,
            pending: PendingTimeout::new(),
        };

        let mut widgets = OrbitWidgets {
            area,
            fixed,
            buttons: Vec::new(),
            details,
            shown: None,
        };
        model.rebuild_items(&mut widgets, &sender);
        model.sync(&mut widgets);

        ComponentParts { model, widgets }
    }

    fn update_with_view(
        &mut self,
        widgets: &mut Self::Widgets,
        msg: Self::Input,
        sender: ComponentSender<Self>,
        root: &Self::Root,
    ) {
        match msg {
            OrbitMsg::Select(index) => {
                self.selector.focus(index);
                let outcome = self.selector.select(index);
                self.begin(outcome, &sender);
            }
            OrbitMsg::Key { index, key } => {
                self.selector.focus(index);
                if let Some(nav) = self.selector.navigate(key) {
                    if let Some(button) = widgets.buttons.get(nav.focus) {
                        button.grab_focus();
                    }
                    self.begin(nav.select, &sender);
                }
            }
            OrbitMsg::Resized {
                container,
                viewport,
            } => {
                self.scene.borrow_mut().layout.recompute(container, viewport);
            }
            OrbitMsg::TransitionElapsed => {
                self.selector.complete();
            }
            OrbitMsg::ReducedMotion(reduced) => {
                log::info!("Reduced motion {}", if reduced { "on" } else { "off" });
                self.selector.set_reduced_motion(reduced);
            }
            OrbitMsg::Reload { experience, delay } => {
                self.pending.cancel();
                self.selector.reset(experience.len(), delay);
                self.scene.borrow_mut().layout.set_item_count(experience.len());
                self.experience = experience;
                root.set_visible(!self.experience.is_empty());
                self.rebuild_items(widgets, &sender);
            }
            OrbitMsg::Redraw => {}
        }
        self.sync(widgets);
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.pending.cancel();
    }
}
