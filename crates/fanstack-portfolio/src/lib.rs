#![forbid(unsafe_code)]

//! Portfolio surroundings for the card stack.
//!
//! Section content with sample defaults, a store-backed repository that
//! merges stored sections over those defaults, the admin sign-in gate, a
//! printable resume, and the demo binary's command line.

pub mod auth;
pub mod cli;
pub mod content;
pub mod error;
pub mod repository;
pub mod resume;

pub use auth::{AdminCredentials, AdminGate, AdminSection, AuthError};
pub use content::{
    AboutData, CertificationsData, ContactData, PortfolioData, ProjectsData, ResumeData, Section,
    SectionContent, certifications_stack_config,
};
pub use error::{PortfolioError, PortfolioResult};
pub use repository::Portfolio;
pub use resume::{PrintableResume, render_resume};
