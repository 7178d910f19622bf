use crate::content::{Certification, EntryId, Project};
use chrono::NaiveDate;
use std::cmp::Ordering;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "\u{2191}",
            Self::Descending => "\u{2193}",
        }
    }

    pub fn label(self) -> String {
        format!("Sort by date {}", self)
    }
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .ok()
}

/// `Apr 2023`, or the raw text when it is not a recognised date.
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| raw.to_owned())
}

/// Undated entries go last in either order.
pub fn sorted_certifications(certs: &[Certification], order: SortOrder) -> Vec<&Certification> {
    let mut sorted: Vec<&Certification> = certs.iter().collect();
    sorted.sort_by(|a, b| match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => x.cmp(&y),
            SortOrder::Descending => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum ViewerTab {
    #[default]
    Certificate,
    Details,
}

impl ViewerTab {
    pub fn other(self) -> Self {
        match self {
            Self::Certificate => Self::Details,
            Self::Details => Self::Certificate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    Escape,
    Left,
    Right,
}

/// Detail viewer for one certification at a time.
#[derive(Debug, Clone, Default)]
pub struct CertificationViewer {
    open: Option<EntryId>,
    tab: ViewerTab,
}

impl CertificationViewer {
    pub fn open(&mut self, id: EntryId) {
        self.open = Some(id);
        self.tab = ViewerTab::Certificate;
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_id(&self) -> Option<&EntryId> {
        self.open.as_ref()
    }

    pub fn tab(&self) -> ViewerTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: ViewerTab) {
        self.tab = tab;
    }

    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: ViewerKey) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            ViewerKey::Escape => self.close(),
            ViewerKey::Left | ViewerKey::Right => self.tab = self.tab.other(),
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Tag(String),
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => project.tags.iter().any(|t| t == tag),
        }
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Unique tags in first-appearance order.
pub fn all_tags(projects: &[Project]) -> Vec<&str> {
    let mut tags: Vec<&str> = Vec::new();
    for tag in projects.iter().flat_map(|p| p.tags.iter()) {
        if !tags.contains(&tag.as_str()) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert(id: &str, date: &str) -> Certification {
        serde_json::from_value(serde_json::json!({
            "id": id, "issuer": "Issuer", "title": format!("Cert {}", id), "date": date
        }))
        .unwrap()
    }

    fn project(id: u32, tags: &[&str]) -> Project {
        serde_json::from_value(serde_json::json!({ "id": id, "title": "p", "tags": tags })).unwrap()
    }

    fn ids(certs: &[&Certification]) -> Vec<String> {
        certs.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn test_dates() {
        assert_eq!(parse_date("2023-04-12"), NaiveDate::from_ymd_opt(2023, 4, 12));
        assert_eq!(parse_date("2021-09"), NaiveDate::from_ymd_opt(2021, 9, 1));
        assert_eq!(parse_date("soon"), None);
        assert_eq!(format_date("2023-04-12"), "Apr 2023");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_sort_orders() {
        let certs = vec![
            cert("a", "2021-09"),
            cert("b", "pending"),
            cert("c", "2023-04-12"),
            cert("d", "2019-01-30"),
        ];
        assert_eq!(ids(&sorted_certifications(&certs, SortOrder::default())), ["c", "a", "d", "b"]);
        assert_eq!(ids(&sorted_certifications(&certs, SortOrder::Ascending)), ["d", "a", "c", "b"]);
        assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
        assert_eq!(SortOrder::Descending.label(), "Sort by date descending");
    }

    #[test]
    fn test_viewer_keys() {
        let mut viewer = CertificationViewer::default();
        assert!(!viewer.handle_key(ViewerKey::Right));

        viewer.open(EntryId::new("1"));
        assert_eq!(viewer.tab(), ViewerTab::Certificate);
        assert!(viewer.handle_key(ViewerKey::Right));
        assert_eq!(viewer.tab(), ViewerTab::Details);
        assert!(viewer.handle_key(ViewerKey::Left));
        assert_eq!(viewer.tab(), ViewerTab::Certificate);

        viewer.select_tab(ViewerTab::Details);
        viewer.open(EntryId::new("2"));
        assert_eq!(viewer.tab(), ViewerTab::Certificate);

        assert!(viewer.handle_key(ViewerKey::Escape));
        assert!(!viewer.is_open());
    }

    #[test]
    fn test_project_filter() {
        let projects = vec![
            project(1, &["rust", "cli"]),
            project(2, &["web"]),
            project(3, &["cli", "web"]),
        ];
        assert_eq!(all_tags(&projects), vec!["rust", "cli", "web"]);
        assert_eq!(ProjectFilter::All.apply(&projects).len(), 3);

        let cli: Vec<_> = ProjectFilter::Tag("cli".into())
            .apply(&projects)
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(cli, vec!["1", "3"]);
        assert!(ProjectFilter::Tag("none".into()).apply(&projects).is_empty());
    }
}
