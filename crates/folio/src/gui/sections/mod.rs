use crate::gui::app::{AppModel, AppMsg};
use chrono::Datelike;
use folio_core::content::{About, Hero, Skill};
use gdk_pixbuf::{Pixbuf, PixbufLoader};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::ComponentSender;
use std::path::Path;
use strum::{Display as StrumDisplay, EnumIter};

pub mod certifications;
pub mod contact;
pub mod projects;

pub const SKILL_ICON_SIZE: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum Section {
    #[strum(serialize = "Home")]
    Hero,
    About,
    Skills,
    Experience,
    Projects,
    Certifications,
    Contact,
}

impl Section {
    pub fn in_nav(self) -> bool {
        self != Self::Projects
    }
}

pub fn clear(container: &gtk::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}

pub fn section_box(title: Option<&str>) -> gtk::Box {
    let section = gtk::Box::new(gtk::Orientation::Vertical, 16);
    section.add_css_class("section");
    if let Some(title) = title {
        section.append(&heading(title));
    }
    section
}

pub fn heading(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class("section-title");
    label.set_halign(gtk::Align::Center);
    label
}

pub fn text(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.set_wrap(true);
    label.set_xalign(0.0);
    label.set_selectable(true);
    label
}

pub fn strong(text: &str) -> gtk::Label {
    let label = self::text(text);
    label.add_css_class("heading");
    label
}

pub fn chips<'a>(items: impl IntoIterator<Item = &'a String>) -> gtk::FlowBox {
    let flow = gtk::FlowBox::new();
    flow.set_selection_mode(gtk::SelectionMode::None);
    flow.set_max_children_per_line(12);
    for item in items {
        let chip = gtk::Label::new(Some(item));
        chip.add_css_class("chip");
        flow.insert(&chip, -1);
    }
    flow
}

pub fn bullets(items: &[String]) -> gtk::Box {
    let list = gtk::Box::new(gtk::Orientation::Vertical, 6);
    for item in items {
        list.append(&text(&format!("\u{2022} {}", item)));
    }
    list
}

fn texture_image(pixbuf: &Pixbuf, size: i32) -> gtk::Image {
    let texture = gdk::Texture::for_pixbuf(pixbuf);
    let image = gtk::Image::from_paintable(Some(&texture));
    image.set_pixel_size(size);
    image
}

pub fn image_from_file(path: &Path, size: i32) -> Option<gtk::Image> {
    Pixbuf::from_file_at_scale(path, size, size, true)
        .map_err(|e| log::debug!("No image at {}: {}", path.display(), e))
        .ok()
        .map(|p| texture_image(&p, size))
}

/// Rasterises inline SVG markup. Fails quietly when no SVG loader is installed.
pub fn image_from_svg(markup: &str, size: i32) -> Option<gtk::Image> {
    if markup.trim().is_empty() {
        return None;
    }
    let load = || -> Result<Option<Pixbuf>, glib::Error> {
        let loader = PixbufLoader::with_type("svg")?;
        loader.set_size(size, size);
        loader.write(markup.as_bytes())?;
        loader.close()?;
        Ok(loader.pixbuf())
    };
    match load() {
        Ok(pixbuf) => pixbuf.map(|p| texture_image(&p, size)),
        Err(e) => {
            log::debug!("Could not render skill icon: {}", e);
            None
        }
    }
}

pub fn build_hero(hero: &Hero, has_resume: bool, sender: &ComponentSender<AppModel>) -> gtk::Box {
    let section = section_box(None);
    section.set_margin_top(48);

    let column = gtk::Box::new(gtk::Orientation::Vertical, 16);
    column.set_hexpand(true);

    let name = gtk::Label::new(Some(&hero.name));
    name.add_css_class("hero-name");
    name.set_xalign(0.0);
    let title = gtk::Label::new(Some(&hero.title));
    title.add_css_class("hero-title");
    title.set_xalign(0.0);

    column.append(&name);
    column.append(&title);
    column.append(&text(&hero.value_prop));

    let actions = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let cv = gtk::Button::with_label("Download CV");
    cv.add_css_class("suggested-action");
    cv.set_sensitive(has_resume);
    let s = sender.clone();
    cv.connect_clicked(move |_| s.input(AppMsg::DownloadResume));

    let contact = gtk::Button::with_label("Contact Me");
    let s = sender.clone();
    contact.connect_clicked(move |_| s.input(AppMsg::ScrollTo(Section::Contact)));

    actions.append(&cv);
    actions.append(&contact);
    column.append(&actions);

    let profile = hero
        .profile_image
        .as_deref()
        .and_then(|p| image_from_file(Path::new(p), 192));

    match profile {
        Some(image) => {
            let row = gtk::Box::new(gtk::Orientation::Horizontal, 32);
            row.append(&column);
            row.append(&image);
            section.append(&row);
        }
        None => section.append(&column),
    }
    section
}

pub fn build_about(about: &About) -> gtk::Box {
    let section = section_box(Some("About Me"));
    let columns = gtk::Box::new(gtk::Orientation::Horizontal, 32);
    columns.set_homogeneous(true);

    let bio = gtk::Box::new(gtk::Orientation::Vertical, 12);
    for para in about.paragraphs() {
        bio.append(&text(&para));
    }

    let highlights = gtk::Box::new(gtk::Orientation::Vertical, 8);
    highlights.add_css_class("card");
    highlights.append(&strong("Highlights"));
    for highlight in &about.highlights {
        let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        row.append(&gtk::Image::from_icon_name("emblem-ok-symbolic"));
        row.append(&text(highlight));
        highlights.append(&row);
    }

    columns.append(&bio);
    columns.append(&highlights);
    section.append(&columns);
    section
}

fn skill_card(skill: &Skill) -> gtk::Box {
    let card = gtk::Box::new(gtk::Orientation::Vertical, 8);
    card.add_css_class("card");
    card.set_size_request(160, -1);

    if let Some(icon) = image_from_svg(&skill.icon, SKILL_ICON_SIZE) {
        card.append(&icon);
    }

    let name = gtk::Label::new(Some(&skill.name));
    name.add_css_class("heading");
    card.append(&name);

    let tier = skill.tier();
    let badge = gtk::Label::new(Some(if skill.proficiency.is_empty() {
        "Unrated"
    } else {
        skill.proficiency.as_str()
    }));
    badge.add_css_class("chip");
    badge.add_css_class(tier.css_class());
    badge.set_halign(gtk::Align::Center);
    card.append(&badge);
    card
}

pub fn build_skills(skills: &[Skill]) -> gtk::Box {
    let section = section_box(Some("Skills & Expertise"));
    let grid = gtk::FlowBox::new();
    grid.set_selection_mode(gtk::SelectionMode::None);
    grid.set_homogeneous(true);
    grid.set_max_children_per_line(6);
    grid.set_row_spacing(16);
    grid.set_column_spacing(16);
    for skill in skills {
        grid.insert(&skill_card(skill), -1);
    }
    section.append(&grid);
    section
}

pub fn build_footer(name: &str, sender: &ComponentSender<AppModel>) -> gtk::Box {
    let footer = gtk::Box::new(gtk::Orientation::Horizontal, 16);
    footer.add_css_class("section");

    let year = chrono::Local::now().year();
    let copyright = gtk::Label::new(Some(&format!(
        "\u{a9} {} {}. All rights reserved.",
        year, name
    )));
    copyright.set_hexpand(true);
    copyright.set_xalign(0.0);
    footer.append(&copyright);

    for (label, target) in [("Back to Top", Section::Hero), ("Contact", Section::Contact)] {
        let link = gtk::Button::with_label(label);
        link.add_css_class("flat");
        let s = sender.clone();
        link.connect_clicked(move |_| s.input(AppMsg::ScrollTo(target)));
        footer.append(&link);
    }
    footer
}
