#![forbid(unsafe_code)]

//! Portfolio content backed by a [`SectionStore`].
//!
//! Reads never fail: a section that is missing, undecodable, or unreadable
//! falls back to its default content. Only writes report errors.

use serde_json::Value;

use fanstack_runtime::SectionStore;

use crate::content::{
    AboutData, CertificationsData, ContactData, PortfolioData, ProjectsData, ResumeData, Section,
    SectionContent,
};
use crate::error::PortfolioResult;

/// Typed access to the portfolio sections in a store.
#[derive(Debug)]
pub struct Portfolio<S> {
    store: S,
}

impl<S: SectionStore> Portfolio<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All content, with each stored section replacing its default.
    #[must_use]
    pub fn load(&self) -> PortfolioData {
        let mut stored = match self.store.get_all() {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(store = self.store.name(), %error, "failed to read sections, using defaults");
                return PortfolioData::default();
            }
        };
        let data = PortfolioData {
            about: decode_or_default(stored.remove(Section::About.key())),
            projects: decode_or_default(stored.remove(Section::Projects.key())),
            certifications: decode_or_default(stored.remove(Section::Certifications.key())),
            contact: decode_or_default(stored.remove(Section::Contact.key())),
            resume: decode_or_default(stored.remove(Section::Resume.key())),
        };
        tracing::debug!(store = self.store.name(), "portfolio loaded");
        data
    }

    /// One section, falling back to its default.
    #[must_use]
    pub fn section<T: SectionContent>(&self) -> T {
        match self.store.get(T::SECTION.key()) {
            Ok(value) => decode_or_default(value),
            Err(error) => {
                tracing::warn!(section = T::SECTION.key(), %error, "failed to read section, using default");
                T::default()
            }
        }
    }

    /// Persist one section and return the merged content.
    pub fn update_section<T: SectionContent>(&self, content: &T) -> PortfolioResult<PortfolioData> {
        let value = serde_json::to_value(content)?;
        self.store.save(T::SECTION.key(), &value)?;
        tracing::debug!(section = T::SECTION.key(), "section updated");
        Ok(self.load())
    }

    /// Replace every section at once.
    pub fn save_all(&self, data: &PortfolioData) -> PortfolioResult<()> {
        self.save_value(Section::About, serde_json::to_value(&data.about)?)?;
        self.save_value(Section::Projects, serde_json::to_value(&data.projects)?)?;
        self.save_value(Section::Certifications, serde_json::to_value(&data.certifications)?)?;
        self.save_value(Section::Contact, serde_json::to_value(&data.contact)?)?;
        self.save_value(Section::Resume, serde_json::to_value(&data.resume)?)?;
        Ok(())
    }

    /// Drop stored content so every section reads as its default.
    pub fn reset(&self) -> PortfolioResult<()> {
        self.store.clear()?;
        tracing::debug!(store = self.store.name(), "portfolio reset");
        Ok(())
    }

    pub fn about(&self) -> AboutData {
        self.section()
    }

    pub fn projects(&self) -> ProjectsData {
        self.section()
    }

    pub fn certifications(&self) -> CertificationsData {
        self.section()
    }

    pub fn contact(&self) -> ContactData {
        self.section()
    }

    pub fn resume(&self) -> ResumeData {
        self.section()
    }

    fn save_value(&self, section: Section, value: Value) -> PortfolioResult<()> {
        self.store.save(section.key(), &value)?;
        Ok(())
    }
}

fn decode_or_default<T: SectionContent>(value: Option<Value>) -> T {
    let Some(value) = value else {
        return T::default();
    };
    match serde_json::from_value(value) {
        Ok(content) => content,
        Err(error) => {
            tracing::warn!(section = T::SECTION.key(), %error, "stored section is invalid, using default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Project, SocialLink};
    use fanstack_runtime::{MemoryStore, StoreError, StoreResult};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn portfolio() -> Portfolio<MemoryStore> {
        Portfolio::new(MemoryStore::new())
    }

    #[test]
    fn empty_store_loads_defaults() {
        assert_eq!(portfolio().load(), PortfolioData::default());
    }

    #[test]
    fn stored_section_replaces_default_wholesale() {
        let p = portfolio();
        let projects = ProjectsData {
            projects: vec![Project {
                title: "Only".into(),
                description: "One project".into(),
                href: "#".into(),
            }],
        };
        let data = p.update_section(&projects).unwrap();
        assert_eq!(data.projects, projects);
        assert_eq!(data.about, AboutData::default());
        assert_eq!(p.projects(), projects);
    }

    #[test]
    fn invalid_section_falls_back() {
        let p = portfolio();
        p.store().save("contact", &json!({"contactInfo": 42})).unwrap();
        assert_eq!(p.contact(), ContactData::default());
        assert_eq!(p.load().contact, ContactData::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let p = portfolio();
        p.store().save("skills", &json!(["rust"])).unwrap();
        assert_eq!(p.load(), PortfolioData::default());
    }

    #[test]
    fn reset_restores_defaults() {
        let p = portfolio();
        let mut about = AboutData::default();
        about.social_links.push(SocialLink {
            label: "Blog".into(),
            href: "https://blog.example".into(),
        });
        p.update_section(&about).unwrap();
        assert_eq!(p.about(), about);

        p.reset().unwrap();
        assert_eq!(p.about(), AboutData::default());
    }

    #[test]
    fn save_all_writes_every_section() {
        let p = portfolio();
        p.save_all(&PortfolioData::default()).unwrap();
        let keys: Vec<String> = p.store().get_all().unwrap().into_keys().collect();
        assert_eq!(keys, vec!["about", "certifications", "contact", "projects", "resume"]);
    }

    struct BrokenStore;

    impl SectionStore for BrokenStore {
        fn name(&self) -> &str {
            "BrokenStore"
        }

        fn get_all(&self) -> StoreResult<BTreeMap<String, Value>> {
            Err(StoreError::Corruption("unreadable".into()))
        }

        fn save(&self, _section: &str, _value: &Value) -> StoreResult<()> {
            Err(StoreError::Unavailable("read-only".into()))
        }

        fn remove(&self, _section: &str) -> StoreResult<bool> {
            Ok(false)
        }

        fn clear(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn unreadable_store_degrades_and_writes_fail() {
        let p = Portfolio::new(BrokenStore);
        assert_eq!(p.load(), PortfolioData::default());
        assert_eq!(p.resume(), ResumeData::default());
        assert!(p.update_section(&ResumeData::default()).is_err());
    }
}
