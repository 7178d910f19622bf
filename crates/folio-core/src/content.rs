use derive_more::{AsRef, Deref, Display, From, Into};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::Display as StrumDisplay;
use thiserror::Error;

const SAMPLE_CONTENT: &str = include_str!("sample_content.json");

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read content: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed content document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Record identity. Documents use either strings or numbers.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(from = "RawId")]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for EntryId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub name: String,
    pub title: String,
    pub value_prop: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub bio_paras: Option<Vec<String>>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl About {
    /// `bioParas` when given, otherwise `bio` split on blank lines.
    pub fn paragraphs(&self) -> Vec<String> {
        if let Some(paras) = &self.bio_paras {
            return paras.clone();
        }
        self.bio
            .as_deref()
            .map(|bio| {
                bio.split("\n\n")
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Proficiency {
    Expert,
    Advanced,
    Intermediate,
    Other,
}

impl Proficiency {
    pub fn parse_level(level: &str) -> Self {
        match level.to_ascii_lowercase().as_str() {
            "expert" => Self::Expert,
            "advanced" => Self::Advanced,
            "intermediate" => Self::Intermediate,
            _ => Self::Other,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Expert => "proficiency-expert",
            Self::Advanced => "proficiency-advanced",
            Self::Intermediate => "proficiency-intermediate",
            Self::Other => "proficiency-other",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Skill {
    pub name: String,
    /// Raw SVG markup.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub proficiency: String,
}

impl Skill {
    pub fn tier(&self) -> Proficiency {
        Proficiency::parse_level(&self.proficiency)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Experience {
    pub id: EntryId,
    pub company: String,
    pub position: String,
    pub duration: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, alias = "logoUrl")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: EntryId,
    pub issuer: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub verify_url: Option<String>,
    #[serde(default)]
    pub issuer_logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SocialEntry {
    Link(SocialLink),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Contact {
    pub description: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub social: Vec<SocialEntry>,
}

impl Contact {
    /// Well-formed social links; bare strings and other shapes are skipped.
    pub fn social_links(&self) -> impl Iterator<Item = &SocialLink> {
        self.social.iter().filter_map(|s| match s {
            SocialEntry::Link(link) => Some(link),
            SocialEntry::Other(_) => None,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntryId,
    pub title: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub code_url: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Content {
    pub hero: Hero,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    pub contact: Contact,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Content {
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn sample() -> Result<Self, ContentError> {
        Self::from_json(SAMPLE_CONTENT)
    }
}
