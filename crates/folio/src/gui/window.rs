use folio_core::theme::{ColorSchemeSignal, ThemeState, ThemeTarget};
use gtk::graphene;
use gtk::prelude::*;
use gtk4 as gtk;
use strum::IntoEnumIterator;

/// Desktop color scheme, read from the GTK theme name (`Adwaita-dark`,
/// `Adwaita:dark`). `GTK_THEME` takes precedence like it does for GTK.
pub struct GtkColorScheme {
    settings: Option<gtk::Settings>,
}

impl GtkColorScheme {
    pub fn new() -> Self {
        Self {
            settings: gtk::Settings::default(),
        }
    }

    fn theme_name(&self) -> Option<String> {
        std::env::var("GTK_THEME")
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.settings
                    .as_ref()
                    .and_then(|s| s.gtk_theme_name())
                    .map(|n| n.to_string())
            })
    }
}

impl Default for GtkColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeSignal for GtkColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        let name = self.theme_name()?.to_ascii_lowercase();
        Some(name.ends_with("-dark") || name.ends_with(":dark"))
    }
}

/// Keeps exactly one of the `light` / `dark` classes on the window.
pub struct WindowThemeTarget {
    window: gtk::ApplicationWindow,
}

impl WindowThemeTarget {
    pub fn new(window: &gtk::ApplicationWindow) -> Self {
        Self {
            window: window.clone(),
        }
    }
}

impl ThemeTarget for WindowThemeTarget {
    fn apply(&mut self, theme: ThemeState) {
        let class = theme.as_ref();
        if !self.window.has_css_class(class) {
            for stale in ThemeState::iter().filter(|t| *t != theme) {
                self.window.remove_css_class(stale.as_ref());
            }
            self.window.add_css_class(class);
        }

        if let Some(settings) = gtk::Settings::default()
            && settings.is_gtk_application_prefer_dark_theme() != theme.is_dark()
        {
            settings.set_gtk_application_prefer_dark_theme(theme.is_dark());
        }
    }
}

pub fn prefers_reduced_motion() -> bool {
    gtk::Settings::default()
        .map(|s| !s.is_gtk_enable_animations())
        .unwrap_or(false)
}

pub fn connect_reduced_motion<F: Fn(bool) + 'static>(f: F) {
    if let Some(settings) = gtk::Settings::default() {
        settings.connect_gtk_enable_animations_notify(move |s| f(!s.is_gtk_enable_animations()));
    }
}

pub fn viewport_width(widget: &impl IsA<gtk::Widget>) -> Option<f64> {
    widget
        .root()
        .map(|r| r.width() as f64)
        .filter(|w| *w > 0.0)
}

pub fn scroll_to(scrolled: &gtk::ScrolledWindow, page: &gtk::Widget, target: &gtk::Widget) {
    if let Some(point) = target.compute_point(page, &graphene::Point::zero()) {
        scrolled.vadjustment().set_value(point.y() as f64);
    }
}

pub fn open_uri(uri: &str) {
    if let Err(e) = std::process::Command::new("xdg-open").arg(uri).spawn() {
        log::error!("Failed to open '{}': {}", uri, e);
    }
}
