use super::{image_from_file, section_box, strong, text};
use crate::gui::window;
use folio_core::catalog::{self, CertificationViewer, SortOrder, ViewerKey, ViewerTab};
use folio_core::content::{Certification, EntryId};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::Path;

const ISSUER_LOGO_SIZE: i32 = 48;

pub struct CertificationsModel {
    certifications: Vec<Certification>,
    order: SortOrder,
    viewer: CertificationViewer,
}

#[derive(Debug)]
pub enum CertificationsMsg {
    ToggleSort,
    Open(EntryId),
    Key(ViewerKey),
    SelectTab(ViewerTab),
    Verify,
    Close,
    Reload(Vec<Certification>),
}

pub struct CertificationsWidgets {
    sort: gtk::Button,
    list: gtk::FlowBox,
    dialog: gtk::Window,
    tabs: gtk::Stack,
    certificate: gtk::Box,
    details: gtk::Box,
    verify: gtk::Button,
}

fn viewer_key(key: gdk::Key) -> Option<ViewerKey> {
    if key == gdk::Key::Escape {
        Some(ViewerKey::Escape)
    } else if key == gdk::Key::Left {
        Some(ViewerKey::Left)
    } else if key == gdk::Key::Right {
        Some(ViewerKey::Right)
    } else {
        None
    }
}

fn tab_name(tab: ViewerTab) -> &'static str {
    match tab {
        ViewerTab::Certificate => "certificate",
        ViewerTab::Details => "details",
    }
}

fn card(cert: &Certification, sender: &ComponentSender<CertificationsModel>) -> gtk::Button {
    let content = gtk::Box::new(gtk::Orientation::Vertical, 6);

    if let Some(logo) = cert
        .issuer_logo
        .as_deref()
        .and_then(|p| image_from_file(Path::new(p), ISSUER_LOGO_SIZE))
    {
        content.append(&logo);
    }
    content.append(&strong(&cert.title));
    content.append(&text(&cert.issuer));
    content.append(&text(&catalog::format_date(&cert.date)));

    let button = gtk::Button::new();
    button.add_css_class("card");
    button.add_css_class("flat");
    button.set_child(Some(&content));
    button.set_tooltip_text(Some(&format!("View {}", cert.title)));

    let id = cert.id.clone();
    let s = sender.clone();
    button.connect_clicked(move |_| s.input(CertificationsMsg::Open(id.clone())));
    button
}

fn detail_row(container: &gtk::Box, label: &str, value: &str) {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let key = strong(label);
    key.set_size_request(140, -1);
    row.append(&key);
    row.append(&text(value));
    container.append(&row);
}

impl CertificationsModel {
    fn opened(&self) -> Option<&Certification> {
        let id = self.viewer.open_id()?;
        self.certifications.iter().find(|c| &c.id == id)
    }

    fn fill_list(&self, widgets: &CertificationsWidgets, sender: &ComponentSender<Self>) {
        while let Some(child) = widgets.list.first_child() {
            widgets.list.remove(&child);
        }
        for cert in catalog::sorted_certifications(&self.certifications, self.order) {
            widgets.list.insert(&card(cert, sender), -1);
        }
    }

    fn fill_viewer(&self, widgets: &CertificationsWidgets) {
        super::clear(&widgets.certificate);
        super::clear(&widgets.details);

        let Some(cert) = self.opened() else {
            return;
        };
        widgets.dialog.set_title(Some(&cert.title));

        let c = &widgets.certificate;
        if let Some(logo) = cert
            .issuer_logo
            .as_deref()
            .and_then(|p| image_from_file(Path::new(p), ISSUER_LOGO_SIZE * 2))
        {
            c.append(&logo);
        }
        let title = strong(&cert.title);
        title.add_css_class("title-2");
        title.set_xalign(0.5);
        c.append(&title);
        let issued = text(&format!(
            "Issued by {} \u{b7} {}",
            cert.issuer,
            catalog::format_date(&cert.date)
        ));
        issued.set_xalign(0.5);
        c.append(&issued);

        let d = &widgets.details;
        detail_row(d, "Title", &cert.title);
        detail_row(d, "Issuer", &cert.issuer);
        detail_row(d, "Issued", &catalog::format_date(&cert.date));
        if let Some(credential) = &cert.credential_id {
            detail_row(d, "Credential ID", credential);
        }

        widgets.verify.set_visible(cert.verify_url.is_some());
    }

    fn sync(&self, widgets: &CertificationsWidgets) {
        widgets.sort.set_label(&format!("Date {}", self.order.arrow()));
        widgets.sort.set_tooltip_text(Some(&self.order.label()));
        widgets.tabs.set_visible_child_name(tab_name(self.viewer.tab()));

        if self.viewer.is_open() {
            if let Some(window) = widgets.sort.root().and_downcast::<gtk::Window>() {
                widgets.dialog.set_transient_for(Some(&window));
            }
            widgets.dialog.present();
        } else if widgets.dialog.is_visible() {
            widgets.dialog.set_visible(false);
        }
    }
}

impl Component for CertificationsModel {
    type CommandOutput = ();
    type Init = Vec<Certification>;
    type Input = CertificationsMsg;
    type Output = ();
    type Root = gtk::Box;
    type Widgets = CertificationsWidgets;

    fn init_root() -> Self::Root {
        section_box(Some("Certifications"))
    }

    fn init(
        certifications: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = CertificationsModel {
            certifications,
            order: SortOrder::default(),
            viewer: CertificationViewer::default(),
        };

        let toolbar = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        toolbar.set_halign(gtk::Align::End);
        let sort = gtk::Button::new();
        let s = sender.clone();
        sort.connect_clicked(move |_| s.input(CertificationsMsg::ToggleSort));
        toolbar.append(&sort);

        let list = gtk::FlowBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        list.set_homogeneous(true);
        list.set_max_children_per_line(3);
        list.set_row_spacing(16);
        list.set_column_spacing(16);

        root.append(&toolbar);
        root.append(&list);
        root.set_visible(!model.certifications.is_empty());

        let dialog = gtk::Window::new();
        dialog.set_modal(true);
        dialog.set_hide_on_close(true);
        dialog.set_default_size(560, 420);

        let body = gtk::Box::new(gtk::Orientation::Vertical, 12);
        body.set_margin_top(16);
        body.set_margin_bottom(16);
        body.set_margin_start(16);
        body.set_margin_end(16);

        let tabs = gtk::Stack::new();
        tabs.set_vexpand(true);
        let certificate = gtk::Box::new(gtk::Orientation::Vertical, 12);
        certificate.set_valign(gtk::Align::Center);
        let details = gtk::Box::new(gtk::Orientation::Vertical, 8);
        tabs.add_titled(&certificate, Some(tab_name(ViewerTab::Certificate)), "Certificate");
        tabs.add_titled(&details, Some(tab_name(ViewerTab::Details)), "Details");

        let switcher = gtk::StackSwitcher::new();
        switcher.set_stack(Some(&tabs));
        switcher.set_halign(gtk::Align::Center);
        let s = sender.clone();
        tabs.connect_visible_child_name_notify(move |stack| {
            let tab = match stack.visible_child_name().as_deref() {
                Some("details") => ViewerTab::Details,
                _ => ViewerTab::Certificate,
            };
            s.input(CertificationsMsg::SelectTab(tab));
        });

        let actions = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        actions.set_halign(gtk::Align::End);
        let verify = gtk::Button::with_label("Verify Credential");
        verify.add_css_class("suggested-action");
        let s = sender.clone();
        verify.connect_clicked(move |_| s.input(CertificationsMsg::Verify));
        let close = gtk::Button::with_label("Close");
        let s = sender.clone();
        close.connect_clicked(move |_| s.input(CertificationsMsg::Close));
        actions.append(&verify);
        actions.append(&close);

        body.append(&switcher);
        body.append(&tabs);
        body.append(&actions);
        dialog.set_child(Some(&body));

        let keys = gtk::EventControllerKey::new();
        let s = sender.clone();
        keys.connect_key_pressed(move |_, key, _, _| match viewer_key(key) {
            Some(key) => {
                s.input(CertificationsMsg::Key(key));
                glib::Propagation::Stop
            }
            None => glib::Propagation::Proceed,
        });
        dialog.add_controller(keys);

        let s = sender.clone();
        dialog.connect_close_request(move |_| {
            s.input(CertificationsMsg::Close);
            glib::Propagation::Proceed
        });

        let widgets = CertificationsWidgets {
            sort,
            list,
            dialog,
            tabs,
            certificate,
            details,
            verify,
        };
        model.fill_list(&widgets, &sender);
        model.sync(&widgets);

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
            CertificationsMsg::ToggleSort => {
                self.order = self.order.toggled();
                self.fill_list(widgets, &sender);
            }
            CertificationsMsg::Open(id) => {
                self.viewer.open(id);
                self.fill_viewer(widgets);
            }
            CertificationsMsg::Key(key) => {
                self.viewer.handle_key(key);
            }
            CertificationsMsg::SelectTab(tab) => {
                if self.viewer.tab() == tab {
                    return;
                }
                self.viewer.select_tab(tab);
            }
            CertificationsMsg::Verify => {
                if let Some(url) = self.opened().and_then(|c| c.verify_url.as_deref()) {
                    window::open_uri(url);
                }
            }
            CertificationsMsg::Close => {
                if !self.viewer.is_open() {
                    return;
                }
                self.viewer.close();
            }
            CertificationsMsg::Reload(certifications) => {
                self.certifications = certifications;
                self.viewer.close();
                root.set_visible(!self.certifications.is_empty());
                self.fill_list(widgets, &sender);
            }
        }
        self.sync(widgets);
    }

    fn shutdown(&mut self, widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        widgets.dialog.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_keys() {
        assert_eq!(viewer_key(gdk::Key::Escape), Some(ViewerKey::Escape));
        assert_eq!(viewer_key(gdk::Key::Left), Some(ViewerKey::Left));
        assert_eq!(viewer_key(gdk::Key::Right), Some(ViewerKey::Right));
        assert_eq!(viewer_key(gdk::Key::a), None);
    }

    #[test]
    fn test_tab_names_are_distinct() {
        assert_ne!(
            tab_name(ViewerTab::Certificate),
            tab_name(ViewerTab::Details)
        );
    }
}
