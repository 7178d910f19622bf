use super::{section_box, strong, text};
use crate::gui::window;
use crate::sys::relay::RelayRequest;
use async_channel::Sender;
use folio_core::content::Contact;
use folio_core::form::{ContactForm, Field, SubmitAttempt, SubmitStatus};
use folio_core::submit::SubmitOutcome;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use strum::IntoEnumIterator;

pub struct ContactModel {
    contact: Contact,
    endpoint: String,
    relay: Sender<RelayRequest>,
    form: ContactForm,
}

pub struct ContactInit {
    pub contact: Contact,
    pub endpoint: String,
    pub relay: Sender<RelayRequest>,
}

#[derive(Debug)]
pub enum ContactMsg {
    Input(Field, String),
    Blur(Field),
    Submit,
    EmailClient,
    Open(String),
    Finished(SubmitOutcome),
    Reload { contact: Contact, endpoint: String },
}

pub struct ContactWidgets {
    info: gtk::Box,
    name: gtk::Entry,
    email: gtk::Entry,
    message: gtk::TextView,
    errors: Vec<(Field, gtk::Label)>,
    status: gtk::Label,
    submit: gtk::Button,
}

fn watch_focus(widget: &impl IsA<gtk::Widget>, field: Field, sender: &ComponentSender<ContactModel>) {
    let focus = gtk::EventControllerFocus::new();
    let s = sender.clone();
    focus.connect_leave(move |_| s.input(ContactMsg::Blur(field)));
    widget.add_controller(focus);
}

fn entry(field: Field, placeholder: &str, sender: &ComponentSender<ContactModel>) -> gtk::Entry {
    let entry = gtk::Entry::new();
    entry.set_placeholder_text(Some(placeholder));
    let s = sender.clone();
    entry.connect_changed(move |e| s.input(ContactMsg::Input(field, e.text().to_string())));
    watch_focus(&entry, field, sender);
    entry
}

fn labelled(form: &gtk::Box, title: &str, input: &impl IsA<gtk::Widget>) -> gtk::Label {
    let label = gtk::Label::new(Some(title));
    label.set_xalign(0.0);
    label.set_mnemonic_widget(Some(input));
    form.append(&label);
    form.append(input);

    let error = gtk::Label::new(None);
    error.add_css_class("field-error");
    error.set_xalign(0.0);
    error.set_visible(false);
    form.append(&error);
    error
}

fn buffer_text(buffer: &gtk::TextBuffer) -> String {
    buffer
        .text(&buffer.start_iter(), &buffer.end_iter(), false)
        .to_string()
}

impl ContactModel {
    fn fill_info(&self, widgets: &ContactWidgets, sender: &ComponentSender<Self>) {
        let info = &widgets.info;
        super::clear(info);

        info.append(&strong("Get In Touch"));
        info.append(&text(&self.contact.description));

        for (icon, value) in [
            ("mail-unread-symbolic", &self.contact.email),
            ("call-start-symbolic", &self.contact.phone),
            ("mark-location-symbolic", &self.contact.location),
        ] {
            if value.is_empty() {
                continue;
            }
            let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            row.append(&gtk::Image::from_icon_name(icon));
            row.append(&text(value));
            info.append(&row);
        }

        let social = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        for link in self.contact.social_links() {
            let button = gtk::Button::with_label(&link.platform);
            button.add_css_class("flat");
            button.set_tooltip_text(Some(&link.url));
            let url = link.url.clone();
            let s = sender.clone();
            button.connect_clicked(move |_| s.input(ContactMsg::Open(url.clone())));
            social.append(&button);
        }
        if social.first_child().is_some() {
            info.append(&social);
        }
    }

    fn begin_submit(&mut self) {
        let SubmitAttempt::Ready(payload) = self.form.begin_submit() else {
            return;
        };
        let request = RelayRequest {
            endpoint: self.endpoint.clone(),
            payload,
        };
        if let Err(e) = self.relay.try_send(request) {
            log::error!("Contact relay unavailable: {}", e);
            self.form.finish_submit(&SubmitOutcome::Network);
        }
    }

    /// The widgets own the text while the user types; they are only
    /// written back after a delivered message clears the form.
    fn clear_inputs(widgets: &ContactWidgets) {
        widgets.name.set_text("");
        widgets.email.set_text("");
        widgets.message.buffer().set_text("");
    }

    fn sync(&self, widgets: &ContactWidgets) {
        for (field, label) in &widgets.errors {
            let error = self.form.errors().get(*field);
            label.set_label(error.unwrap_or_default());
            label.set_visible(error.is_some());
        }

        let status = &widgets.status;
        status.set_label(self.form.announcement());
        status.set_visible(self.form.is_submitting() || self.form.status() != SubmitStatus::Idle);
        for s in [SubmitStatus::Success, SubmitStatus::Error] {
            let class = format!("status-{}", s);
            if self.form.status() == s {
                status.add_css_class(&class);
            } else {
                status.remove_css_class(&class);
            }
        }

        widgets.submit.set_sensitive(!self.form.is_submitting());
        widgets.submit.set_label(if self.form.is_submitting() {
            "Sending..."
        } else {
            "Send Message"
        });
    }
}

impl Component for ContactModel {
    type CommandOutput = ();
    type Init = ContactInit;
    type Input = ContactMsg;
    type Output = ();
    type Root = gtk::Box;
    type Widgets = ContactWidgets;

    fn init_root() -> Self::Root {
        section_box(Some("Contact"))
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = ContactModel {
            contact: init.contact,
            endpoint: init.endpoint,
            relay: init.relay,
            form: ContactForm::new(),
        };

        let columns = gtk::Box::new(gtk::Orientation::Horizontal, 32);
        columns.set_homogeneous(true);

        let info = gtk::Box::new(gtk::Orientation::Vertical, 12);

        let form = gtk::Box::new(gtk::Orientation::Vertical, 6);
        form.add_css_class("card");

        let name = entry(Field::Name, "Your name", &sender);
        let email = entry(Field::Email, "you@example.com", &sender);
        email.set_input_purpose(gtk::InputPurpose::Email);

        let message = gtk::TextView::new();
        message.set_wrap_mode(gtk::WrapMode::WordChar);
        message.set_size_request(-1, 120);
        let s = sender.clone();
        message
            .buffer()
            .connect_changed(move |b| s.input(ContactMsg::Input(Field::Message, buffer_text(b))));
        watch_focus(&message, Field::Message, &sender);

        let mut errors = Vec::new();
        for field in Field::iter() {
            let error = match field {
                Field::Name => labelled(&form, "Name", &name),
                Field::Email => labelled(&form, "Email", &email),
                Field::Message => labelled(&form, "Message", &message),
            };
            errors.push((field, error));
        }

        let status = gtk::Label::builder()
            .accessible_role(gtk::AccessibleRole::Status)
            .wrap(true)
            .xalign(0.0)
            .build();
        form.append(&status);

        let actions = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        let submit = gtk::Button::with_label("Send Message");
        submit.add_css_class("suggested-action");
        let s = sender.clone();
        submit.connect_clicked(move |_| s.input(ContactMsg::Submit));
        let email_client = gtk::Button::with_label("Email Client");
        let s = sender.clone();
        email_client.connect_clicked(move |_| s.input(ContactMsg::EmailClient));
        actions.append(&submit);
        actions.append(&email_client);
        form.append(&actions);

        columns.append(&info);
        columns.append(&form);
        root.append(&columns);

        let widgets = ContactWidgets {
            info,
            name,
            email,
            message,
            errors,
            status,
            submit,
        };
        model.fill_info(&widgets, &sender);
        model.sync(&widgets);

        ComponentParts { model, widgets }
    }

    fn update_with_view(
        &mut self,
        widgets: &mut Self::Widgets,
        msg: Self::Input,
        sender: ComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match msg {
            ContactMsg::Input(field, value) => self.form.input(field, value),
            ContactMsg::Blur(field) => self.form.blur(field),
            ContactMsg::Submit => self.begin_submit(),
            ContactMsg::EmailClient => {
                window::open_uri(&self.form.mailto(&self.contact.email));
                return;
            }
            ContactMsg::Open(url) => {
                window::open_uri(&url);
                return;
            }
            ContactMsg::Finished(outcome) => {
                if !self.form.is_submitting() {
                    log::warn!("Ignoring submission result with nothing in flight");
                    return;
                }
                if self.form.finish_submit(&outcome) {
                    Self::clear_inputs(widgets);
                }
            }
            ContactMsg::Reload { contact, endpoint } => {
                self.contact = contact;
                self.endpoint = endpoint;
                self.fill_info(widgets, &sender);
            }
        }
        self.sync(widgets);
    }
}
