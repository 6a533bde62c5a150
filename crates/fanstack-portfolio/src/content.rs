#![forbid(unsafe_code)]

//! Portfolio content model.
//!
//! Content is split into five sections, each stored as one JSON value under
//! its [`Section::key`]. Field names are camelCase on the wire.
//!
//! The built-in defaults are neutral sample content; a deployment replaces
//! them by saving its own sections.

use std::collections::BTreeSet;
use std::fmt;

use fanstack_widgets::{CardStackConfig, CardStackItem};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Storage key of a content section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    About,
    Projects,
    Certifications,
    Contact,
    Resume,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::About,
        Section::Projects,
        Section::Certifications,
        Section::Contact,
        Section::Resume,
    ];

    /// Key used in the section store.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Contact => "contact",
            Section::Resume => "resume",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A typed section body.
pub trait SectionContent: Serialize + DeserializeOwned + Default {
    const SECTION: Section;
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared records
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusArea {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image_src: String,
    pub tag: String,
}

impl From<&Certification> for CardStackItem {
    fn from(cert: &Certification) -> Self {
        CardStackItem::new(cert.id, cert.title.clone())
            .description(cert.description.clone())
            .image_src(cert.image_src.clone())
            .tag(cert.tag.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub title: String,
    pub institution: String,
    pub status: String,
    /// Empty when there is nothing to highlight.
    #[serde(default)]
    pub highlight: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub location: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEducation {
    pub degree: String,
    pub institution: String,
    pub period: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub category: String,
    /// Comma-separated skill names.
    pub items: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProject {
    pub name: String,
    pub description: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutData {
    pub bio: Vec<String>,
    pub focus_areas: Vec<FocusArea>,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsData {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationsData {
    pub certifications: Vec<Certification>,
    pub education: Vec<Education>,
}

impl CertificationsData {
    /// Cards for the certifications stack, in order.
    ///
    /// Card ids must be unique, so a certification repeating an earlier id
    /// is skipped.
    #[must_use]
    pub fn card_items(&self) -> Vec<CardStackItem> {
        let mut seen = BTreeSet::new();
        self.certifications
            .iter()
            .filter(|cert| {
                let fresh = seen.insert(cert.id);
                if !fresh {
                    tracing::warn!(id = cert.id, title = %cert.title, "duplicate certification id skipped");
                }
                fresh
            })
            .map(CardStackItem::from)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub contact_info: ContactInfo,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub name: String,
    pub title: String,
    pub email: String,
    pub location: String,
    pub github: String,
    pub summary: String,
    pub education: Vec<ResumeEducation>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<ResumeProject>,
    pub achievements: Vec<String>,
}

impl SectionContent for AboutData {
    const SECTION: Section = Section::About;
}

impl SectionContent for ProjectsData {
    const SECTION: Section = Section::Projects;
}

impl SectionContent for CertificationsData {
    const SECTION: Section = Section::Certifications;
}

impl SectionContent for ContactData {
    const SECTION: Section = Section::Contact;
}

impl SectionContent for ResumeData {
    const SECTION: Section = Section::Resume;
}

/// All portfolio content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub about: AboutData,
    pub projects: ProjectsData,
    pub certifications: CertificationsData,
    pub contact: ContactData,
    pub resume: ResumeData,
}

/// Card stack settings used for the certifications section.
#[must_use]
pub fn certifications_stack_config() -> CardStackConfig {
    let mut config = CardStackConfig::default()
        .initial_index(0)
        .auto_advance(true, std::time::Duration::from_millis(3000))
        .pause_on_hover(true)
        .show_dots(true)
        .card_size(480.0, 300.0);
    config.overlap = 0.45;
    config.spread_deg = 40.0;
    config
}

// ─────────────────────────────────────────────────────────────────────────────
// Sample content
// ─────────────────────────────────────────────────────────────────────────────

fn link(label: &str, href: &str) -> SocialLink {
    SocialLink {
        label: label.to_owned(),
        href: href.to_owned(),
    }
}

fn sample_links() -> Vec<SocialLink> {
    vec![
        link("GitHub", "https://github.com/example"),
        link("LinkedIn", "#"),
        link("Email", "mailto:hello@example.com"),
    ]
}

impl Default for AboutData {
    fn default() -> Self {
        Self {
            bio: vec![
                "Engineering student who learns by building and shipping small, working products.".into(),
                "Looking for internships working on infrastructure and developer tooling.".into(),
            ],
            focus_areas: vec![
                FocusArea {
                    title: "Cloud Infrastructure".into(),
                    description: "Scalable architecture and deployment.".into(),
                },
                FocusArea {
                    title: "Rapid Prototyping".into(),
                    description: "Short build cycles from idea to demo.".into(),
                },
                FocusArea {
                    title: "Core Engineering".into(),
                    description: "Solid fundamentals under fast iteration.".into(),
                },
            ],
            social_links: sample_links(),
        }
    }
}

impl Default for ProjectsData {
    fn default() -> Self {
        Self {
            projects: vec![
                Project {
                    title: "Quest Log".into(),
                    description: "Habit tracker that turns daily tasks into quests with XP and levels.".into(),
                    href: "https://example.com/quest-log".into(),
                },
                Project {
                    title: "Campus Events".into(),
                    description: "Event registration and live updates for student organizers.".into(),
                    href: "https://example.com/campus-events".into(),
                },
            ],
        }
    }
}

impl Default for CertificationsData {
    fn default() -> Self {
        Self {
            certifications: vec![
                Certification {
                    id: 1,
                    title: "2nd Place, Campus Hackathon".into(),
                    description: "Three-day team build sprint".into(),
                    image_src: "/images/hackathon.png".into(),
                    tag: "Achievement".into(),
                },
                Certification {
                    id: 2,
                    title: "Data Visualization Dashboards".into(),
                    description: "Online course certificate".into(),
                    image_src: "/images/dataviz.png".into(),
                    tag: "Certification".into(),
                },
                Certification {
                    id: 3,
                    title: "Build Your Own Chatbot".into(),
                    description: "Online course certificate".into(),
                    image_src: "/images/chatbot.png".into(),
                    tag: "Certification".into(),
                },
            ],
            education: vec![
                Education {
                    title: "B.Tech, Cloud Computing & AI".into(),
                    institution: "Example University".into(),
                    status: "In progress".into(),
                    highlight: String::new(),
                },
                Education {
                    title: "Higher Secondary".into(),
                    institution: "Example School".into(),
                    status: "Completed".into(),
                    highlight: "Object-oriented programming in Java".into(),
                },
            ],
        }
    }
}

impl Default for ContactData {
    fn default() -> Self {
        Self {
            contact_info: ContactInfo {
                location: "Earth".into(),
                email: "hello@example.com".into(),
            },
            social_links: sample_links(),
        }
    }
}

impl Default for ResumeData {
    fn default() -> Self {
        Self {
            name: "Alex Example".into(),
            title: "Cloud Computing & AI Student | Full-Stack Developer".into(),
            email: "hello@example.com".into(),
            location: "Earth".into(),
            github: "github.com/example".into(),
            summary: "Product-focused engineering student who turns ideas into working software.".into(),
            education: vec![ResumeEducation {
                degree: "B.Tech, Cloud Computing & Artificial Intelligence".into(),
                institution: "Example University".into(),
                period: "2025 - Present".into(),
                detail: "Cloud infrastructure and AI systems".into(),
            }],
            skills: vec![
                SkillCategory {
                    category: "Languages".into(),
                    items: "Rust, Java, JavaScript".into(),
                },
                SkillCategory {
                    category: "Tools".into(),
                    items: "Git, VS Code".into(),
                },
            ],
            projects: vec![
                ResumeProject {
                    name: "Quest Log".into(),
                    description: "Gamified habit tracker.".into(),
                },
                ResumeProject {
                    name: "Campus Events".into(),
                    description: "Event management platform.".into(),
                },
            ],
            achievements: vec![
                "2nd Place, Campus Hackathon".into(),
                "Certificate, Build Your Own Chatbot".into(),
            ],
        }
    }
}
