use folio_core::theme::ThemeState;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors used by the cairo-drawn parts of the page.
pub struct ThemeColors {
    pub accent: Srgba<f64>,
    pub ring: Srgba<f64>,
    pub hub_start: Srgba<f64>,
    pub hub_end: Srgba<f64>,
    pub hub_text: Srgba<f64>,
}

impl ThemeColors {
    pub fn resolve(context: &gtk::StyleContext, theme: ThemeState) -> Self {
        let (ring, accent) = match theme {
            ThemeState::Light => (
                Srgba::new(0.82, 0.84, 0.86, 1.0),
                Srgba::new(0.15, 0.39, 0.92, 1.0),
            ),
            ThemeState::Dark => (
                Srgba::new(0.29, 0.33, 0.39, 1.0),
                Srgba::new(0.38, 0.65, 0.98, 1.0),
            ),
        };

        Self {
            accent: Self::lookup_color(context, "theme_selected_bg_color", accent),
            ring,
            hub_start: Srgba::new(0.15, 0.39, 0.92, 1.0),
            hub_end: Srgba::new(0.58, 0.2, 0.92, 1.0),
            hub_text: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

const CSS: &str = "
window.light { background-color: #f9fafb; color: #111827; }
window.dark { background-color: #111827; color: #f3f4f6; }

.section { padding: 48px 24px; }
.section-title { font-size: 26px; font-weight: bold; margin-bottom: 16px; }
.hero-name { font-size: 40px; font-weight: bold; }
.hero-title { font-size: 20px; color: #2563eb; }
window.dark .hero-title { color: #60a5fa; }

.card { border-radius: 16px; padding: 16px; }
window.light .card { background-color: #ffffff; border: 1px solid #e5e7eb; }
window.dark .card { background-color: #1f2937; border: 1px solid #374151; }

.chip { border-radius: 999px; padding: 2px 10px; font-size: 12px; }
window.light .chip { background-color: #dbeafe; color: #1e40af; }
window.dark .chip { background-color: rgba(30, 58, 138, 0.3); color: #93c5fd; }

.proficiency-expert { color: #166534; background-color: #dcfce7; }
.proficiency-advanced { color: #1e40af; background-color: #dbeafe; }
.proficiency-intermediate { color: #854d0e; background-color: #fef9c3; }
.proficiency-other { color: #1f2937; background-color: #f3f4f6; }

.orbit-item { min-width: 64px; min-height: 64px; border-radius: 16px; padding: 0; }
.orbit-item.selected { border: 2px solid #2563eb; transform: scale(1.1); }
.orbit-item image { -gtk-icon-size: 40px; }

.details { transition: opacity 150ms ease-in-out; opacity: 1; }
.details.transitioning { opacity: 0; }
.details.reduced-motion { transition: none; }

.field-error { color: #dc2626; font-size: 12px; }
.status-success { color: #16a34a; }
.status-error { color: #dc2626; }
";

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
