use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::orbit::{OrbitInit, OrbitModel, OrbitMsg};
use crate::gui::sections::certifications::{CertificationsModel, CertificationsMsg};
use crate::gui::sections::contact::{ContactInit, ContactModel, ContactMsg};
use crate::gui::sections::projects::{ProjectsModel, ProjectsMsg};
use crate::gui::sections::{self, Section};
use crate::gui::theme;
use crate::gui::window::{self, GtkColorScheme, WindowThemeTarget};
use crate::sys::relay::RelayRequest;
use folio_core::content::Content;
use folio_core::storage::PreferenceStore;
use folio_core::submit::SubmitOutcome;
use folio_core::theme::{SharedThemeStore, ThemeState, ThemeStore};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use strum::IntoEnumIterator;

pub struct AppModel {
    pub config: Config,
    pub content_override: Option<PathBuf>,
    pub content: Content,
    pub theme: SharedThemeStore,
    pub theme_button: gtk::Button,
    pub orbit: Controller<OrbitModel>,
    pub projects: Controller<ProjectsModel>,
    pub certifications: Controller<CertificationsModel>,
    pub contact: Controller<ContactModel>,
    pub slots: HashMap<Section, gtk::Box>,
    pub footer: gtk::Box,
    pub scrolled: gtk::ScrolledWindow,
    pub page: gtk::Box,
}

pub struct AppInit {
    pub config: Config,
    pub content_override: Option<PathBuf>,
    pub content: Content,
    pub storage: Box<dyn PreferenceStore>,
    pub relay: async_channel::Sender<RelayRequest>,
    pub events: async_channel::Receiver<AppEvent>,
}

#[derive(Debug)]
pub enum AppMsg {
    ToggleTheme,
    ScrollTo(Section),
    DownloadResume,
    ReducedMotion(bool),
    ConfigReload,
    SubmissionFinished(SubmitOutcome),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::SubmissionFinished(outcome) => AppMsg::SubmissionFinished(outcome),
        }
    }
}

fn window_title(content: &Content) -> String {
    format!("{} \u{b7} {}", content.hero.name, content.hero.title)
}

fn header_bar(theme_button: &gtk::Button, sender: &ComponentSender<AppModel>) -> gtk::HeaderBar {
    let nav = gtk::Box::new(gtk::Orientation::Horizontal, 4);
    for section in Section::iter().filter(|s| s.in_nav()) {
        let button = gtk::Button::with_label(&section.to_string());
        button.add_css_class("flat");
        let s = sender.clone();
        button.connect_clicked(move |_| s.input(AppMsg::ScrollTo(section)));
        nav.append(&button);
    }

    let s = sender.clone();
    theme_button.connect_clicked(move |_| s.input(AppMsg::ToggleTheme));

    let header = gtk::HeaderBar::new();
    header.set_title_widget(Some(&nav));
    header.pack_end(theme_button);
    header
}

/// The button offers the theme it switches to.
fn sync_theme_button(button: &gtk::Button, theme: ThemeState) {
    let (icon, tooltip) = match theme {
        ThemeState::Light => ("weather-clear-night-symbolic", "Switch to dark mode"),
        ThemeState::Dark => ("weather-clear-symbolic", "Switch to light mode"),
    };
    button.set_icon_name(icon);
    button.set_tooltip_text(Some(tooltip));
}

impl AppModel {
    /// Refills the sections that are plain widgets. The components keep
    /// their own roots and are told to reload separately.
    fn rebuild_page(&self, sender: &ComponentSender<Self>) {
        let content = &self.content;
        for (section, slot) in &self.slots {
            sections::clear(slot);
            let built = match section {
                Section::Hero => {
                    sections::build_hero(&content.hero, self.config.resume.is_some(), sender)
                }
                Section::About => sections::build_about(&content.about),
                Section::Skills => sections::build_skills(&content.skills),
                _ => continue,
            };
            slot.append(&built);
        }
        sections::clear(&self.footer);
        self.footer
            .append(&sections::build_footer(&content.hero.name, sender));
    }

    fn anchor(&self, section: Section) -> gtk::Widget {
        match section {
            Section::Experience => self.orbit.widget().clone().upcast(),
            Section::Projects => self.projects.widget().clone().upcast(),
            Section::Certifications => self.certifications.widget().clone().upcast(),
            Section::Contact => self.contact.widget().clone().upcast(),
            other => match self.slots.get(&other) {
                Some(slot) => slot.clone().upcast(),
                None => self.page.clone().upcast(),
            },
        }
    }

    fn reload(&mut self, sender: &ComponentSender<Self>) {
        let new_config = match config::load_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };
        self.config = new_config;

        match self.config.load_content(self.content_override.as_deref()) {
            Ok(content) => self.content = content,
            Err(e) => log::error!("Keeping previous content, reload failed: {}", e),
        }

        self.rebuild_page(sender);
        self.orbit.emit(OrbitMsg::Reload {
            experience: self.content.experience.clone(),
            delay: self.config.transition_delay(),
        });
        self.projects
            .emit(ProjectsMsg::Reload(self.content.projects.clone()));
        self.certifications
            .emit(CertificationsMsg::Reload(self.content.certifications.clone()));
        self.contact.emit(ContactMsg::Reload {
            contact: self.content.contact.clone(),
            endpoint: self.config.contact.endpoint.clone(),
        });
        log::info!("Configuration reloaded");
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
            #[watch]
            set_title: Some(&window_title(&model.content)),
            set_default_size: (1200, 900),

            set_titlebar: Some(&header),

            #[name = "scrolled"]
            gtk::ScrolledWindow {
                set_hscrollbar_policy: gtk::PolicyType::Never,
                set_vexpand: true,

                #[name = "page"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 24,
                    add_css_class: "page",
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
            content_override,
            content,
            storage,
            relay,
            events,
        } = init;

        theme::load_css();

        let theme = ThemeStore::new(
            storage,
            &GtkColorScheme::new(),
            Box::new(WindowThemeTarget::new(&root)),
        )
        .shared();
        let theme_button = gtk::Button::new();
        sync_theme_button(&theme_button, theme.borrow().current());
        let header = header_bar(&theme_button, &sender);

        let orbit = OrbitModel::builder()
            .launch(OrbitInit {
                experience: content.experience.clone(),
                delay: config.transition_delay(),
                reduced_motion: window::prefers_reduced_motion(),
                theme: theme.clone(),
            })
            .detach();
        let projects = ProjectsModel::builder()
            .launch(content.projects.clone())
            .detach();
        let certifications = CertificationsModel::builder()
            .launch(content.certifications.clone())
            .detach();
        let contact = ContactModel::builder()
            .launch(ContactInit {
                contact: content.contact.clone(),
                endpoint: config.contact.endpoint.clone(),
                relay,
            })
            .detach();

        let slots: HashMap<Section, gtk::Box> = [Section::Hero, Section::About, Section::Skills]
            .into_iter()
            .map(|s| (s, gtk::Box::new(gtk::Orientation::Vertical, 0)))
            .collect();

        let model = AppModel {
            config,
            content_override,
            content,
            theme,
            theme_button,
            orbit,
            projects,
            certifications,
            contact,
            slots,
            footer: gtk::Box::new(gtk::Orientation::Vertical, 0),
            scrolled: gtk::ScrolledWindow::default(),
            page: gtk::Box::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.scrolled = widgets.scrolled.clone();
        model.page = widgets.page.clone();

        for section in Section::iter() {
            widgets.page.append(&model.anchor(section));
        }
        widgets.page.append(&model.footer);
        model.rebuild_page(&sender);

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        let sender_clone = sender.clone();
        window::connect_reduced_motion(move |reduced| {
            sender_clone.input(AppMsg::ReducedMotion(reduced));
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::ToggleTheme => {
                let next = self.theme.borrow_mut().toggle();
                sync_theme_button(&self.theme_button, next);
                self.orbit.emit(OrbitMsg::Redraw);
            }
            AppMsg::ScrollTo(section) => {
                let page: gtk::Widget = self.page.clone().upcast();
                window::scroll_to(&self.scrolled, &page, &self.anchor(section));
            }
            AppMsg::DownloadResume => match &self.config.resume {
                Some(path) => window::open_uri(&path.to_string_lossy()),
                None => log::warn!("No resume configured"),
            },
            AppMsg::ReducedMotion(reduced) => {
                self.orbit.emit(OrbitMsg::ReducedMotion(reduced));
            }
            AppMsg::ConfigReload => self.reload(&sender),
            AppMsg::SubmissionFinished(outcome) => {
                self.contact.emit(ContactMsg::Finished(outcome));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_map_to_messages() {
        assert!(matches!(
            AppMsg::from(AppEvent::ConfigReload),
            AppMsg::ConfigReload
        ));
        assert!(matches!(
            AppMsg::from(AppEvent::SubmissionFinished(SubmitOutcome::Network)),
            AppMsg::SubmissionFinished(SubmitOutcome::Network)
        ));
    }

    #[test]
    fn test_window_title() {
        let content = Content::sample().unwrap();
        assert_eq!(
            window_title(&content),
            format!("{} \u{b7} {}", content.hero.name, content.hero.title)
        );
    }
}
