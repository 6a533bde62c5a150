#![forbid(unsafe_code)]

//! Plain-text printable resume.

use std::fmt;

use crate::content::ResumeData;

/// Render the resume as plain text suitable for printing.
#[must_use]
pub fn render_resume(resume: &ResumeData) -> String {
    PrintableResume(resume).to_string()
}

/// [`Display`](fmt::Display) adapter for a resume.
#[derive(Debug, Clone, Copy)]
pub struct PrintableResume<'a>(pub &'a ResumeData);

impl fmt::Display for PrintableResume<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;

        writeln!(f, "{}", r.name)?;
        writeln!(f, "{}", "=".repeat(r.name.chars().count()))?;
        writeln!(f, "{}", r.title)?;
        let contact: Vec<&str> = [r.email.as_str(), r.location.as_str(), r.github.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        writeln!(f, "{}", contact.join(" | "))?;

        heading(f, "Summary")?;
        writeln!(f, "{}", r.summary)?;

        heading(f, "Education")?;
        for edu in &r.education {
            writeln!(f, "{} ({})", edu.degree, edu.period)?;
            writeln!(f, "  {}", edu.institution)?;
            if !edu.detail.is_empty() {
                writeln!(f, "  {}", edu.detail)?;
            }
        }

        heading(f, "Skills")?;
        for skill in &r.skills {
            writeln!(f, "{}: {}", skill.category, skill.items)?;
        }

        heading(f, "Projects")?;
        for project in &r.projects {
            writeln!(f, "{}", project.name)?;
            writeln!(f, "  {}", project.description)?;
        }

        heading(f, "Achievements & Certifications")?;
        for achievement in &r.achievements {
            writeln!(f, "- {achievement}")?;
        }
        Ok(())
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let title = title.to_uppercase();
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_heading_and_entry_is_printed() {
        let resume = ResumeData::default();
        let text = render_resume(&resume);

        for heading in ["SUMMARY", "EDUCATION", "SKILLS", "PROJECTS", "ACHIEVEMENTS & CERTIFICATIONS"] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.starts_with(&format!("{}\n", resume.name)));
        for edu in &resume.education {
            assert!(text.contains(&edu.degree));
            assert!(text.contains(&edu.institution));
        }
        for skill in &resume.skills {
            assert!(text.contains(&format!("{}: {}", skill.category, skill.items)));
        }
        for project in &resume.projects {
            assert!(text.contains(&project.name));
        }
        for achievement in &resume.achievements {
            assert!(text.contains(&format!("- {achievement}")));
        }
    }

    #[test]
    fn headings_are_underlined() {
        let text = render_resume(&ResumeData::default());
        let lines: Vec<&str> = text.lines().collect();
        let idx = lines.iter().position(|l| *l == "SKILLS").unwrap();
        assert_eq!(lines[idx + 1], "------");
    }

    #[test]
    fn empty_contact_fields_are_skipped() {
        let resume = ResumeData {
            github: String::new(),
            ..ResumeData::default()
        };
        let text = render_resume(&resume);
        let contact = text.lines().nth(3).unwrap();
        assert_eq!(contact, format!("{} | {}", resume.email, resume.location));
    }
}
