use super::{chips, image_from_file, section_box, strong, text};
use crate::gui::window;
use folio_core::catalog::{self, ProjectFilter};
use folio_core::content::Project;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::Path;

const COVER_SIZE: i32 = 240;

pub struct ProjectsModel {
    projects: Vec<Project>,
    filter: ProjectFilter,
}

#[derive(Debug)]
pub enum ProjectsMsg {
    Filter(ProjectFilter),
    Open(String),
    Reload(Vec<Project>),
}

pub struct ProjectsWidgets {
    filters: gtk::Box,
    list: gtk::FlowBox,
}

fn link(label: &str, url: &str, sender: &ComponentSender<ProjectsModel>) -> gtk::Button {
    let button = gtk::Button::with_label(label);
    button.add_css_class("flat");
    let url = url.to_owned();
    let s = sender.clone();
    button.connect_clicked(move |_| s.input(ProjectsMsg::Open(url.clone())));
    button
}

fn card(project: &Project, sender: &ComponentSender<ProjectsModel>) -> gtk::Box {
    let card = gtk::Box::new(gtk::Orientation::Vertical, 8);
    card.add_css_class("card");

    if let Some(cover) = project
        .cover_image
        .as_deref()
        .and_then(|p| image_from_file(Path::new(p), COVER_SIZE))
    {
        card.append(&cover);
    }

    card.append(&strong(&project.title));
    if !project.role.is_empty() {
        card.append(&text(&project.role));
    }
    if let Some(impact) = &project.impact {
        card.append(&text(impact));
    }
    if !project.stack.is_empty() {
        card.append(&chips(&project.stack));
    }

    let links = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    if let Some(url) = &project.live_url {
        links.append(&link("Live Demo", url, sender));
    }
    if let Some(url) = &project.code_url {
        links.append(&link("Source Code", url, sender));
    }
    if links.first_child().is_some() {
        card.append(&links);
    }
    card
}

impl ProjectsModel {
    fn fill(&self, widgets: &ProjectsWidgets, sender: &ComponentSender<Self>) {
        super::clear(&widgets.filters);
        let mut options = vec![ProjectFilter::All];
        options.extend(
            catalog::all_tags(&self.projects)
                .into_iter()
                .map(|t| ProjectFilter::Tag(t.to_owned())),
        );
        for option in options {
            let label = match &option {
                ProjectFilter::All => "All".to_owned(),
                ProjectFilter::Tag(tag) => tag.clone(),
            };
            let button = gtk::ToggleButton::with_label(&label);
            button.set_active(option == self.filter);
            let s = sender.clone();
            button.connect_clicked(move |_| s.input(ProjectsMsg::Filter(option.clone())));
            widgets.filters.append(&button);
        }

        while let Some(child) = widgets.list.first_child() {
            widgets.list.remove(&child);
        }
        for project in self.filter.apply(&self.projects) {
            widgets.list.insert(&card(project, sender), -1);
        }
    }
}

impl Component for ProjectsModel {
    type CommandOutput = ();
    type Init = Vec<Project>;
    type Input = ProjectsMsg;
    type Output = ();
    type Root = gtk::Box;
    type Widgets = ProjectsWidgets;

    fn init_root() -> Self::Root {
        section_box(Some("Projects"))
    }

    fn init(
        projects: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = ProjectsModel {
            projects,
            filter: ProjectFilter::All,
        };

        let filters = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        filters.add_css_class("linked");
        filters.set_halign(gtk::Align::Center);

        let list = gtk::FlowBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        list.set_homogeneous(true);
        list.set_max_children_per_line(3);
        list.set_row_spacing(16);
        list.set_column_spacing(16);

        root.append(&filters);
        root.append(&list);
        root.set_visible(!model.projects.is_empty());

        let widgets = ProjectsWidgets { filters, list };
        model.fill(&widgets, &sender);

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
            ProjectsMsg::Filter(filter) => self.filter = filter,
            ProjectsMsg::Open(url) => {
                window::open_uri(&url);
                return;
            }
            ProjectsMsg::Reload(projects) => {
                self.projects = projects;
                self.filter = ProjectFilter::All;
                root.set_visible(!self.projects.is_empty());
            }
        }
        self.fill(widgets, &sender);
    }
}
