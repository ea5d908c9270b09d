//! Profile view.
//!
//! The profile document's frontmatter holds the CV: name, title, an about
//! text, a `contact` mapping and one sequence of mappings per CV section.
//! Everything here is read leniently. A field that is missing or has the
//! wrong shape is simply absent from the view.

use std::fmt;

use crate::value::{Mapping, Value};

/// Contact fields in display order, with their labels.
const CONTACTS: [(&str, &str); 7] = [
    ("email", "Email"),
    ("website", "Website"),
    ("github", "GitHub"),
    ("scholar", "Google Scholar"),
    ("twitter", "Twitter"),
    ("linkedin", "LinkedIn"),
    ("bluesky", "Bluesky"),
];

const SECONDARY_LINKS: [&str; 4] = ["code", "website", "video", "slides"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    /// Field name in the `contact` mapping.
    pub kind: String,
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperLink {
    pub kind: String,
    pub label: String,
    pub url: String,
    /// Supplementary material rather than the paper itself.
    pub secondary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    pub year: Option<String>,
    pub title: String,
    pub authors: Option<String>,
    pub venue: Option<String>,
    /// Links in the order they were written.
    pub links: Vec<PaperLink>,
}

impl Paper {
    /// Where the title links to: the PDF, when there is one.
    pub fn title_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.kind == "pdf")
            .map(|link| link.url.as_str())
    }
}

fn link_label(kind: &str) -> String {
    match kind {
        "pdf" => "PDF",
        "arxiv" => "arXiv",
        "code" => "Code",
        "website" => "Website",
        "video" => "Video",
        "slides" => "Slides",
        other => other,
    }
    .to_string()
}

/// CV sections in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Education,
    Experience,
    Papers,
    Awards,
    Teaching,
    Service,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Education,
        Section::Experience,
        Section::Papers,
        Section::Awards,
        Section::Teaching,
        Section::Service,
    ];

    /// Frontmatter key holding the section's entries.
    pub fn key(self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Papers => "papers",
            Section::Awards => "awards",
            Section::Teaching => "teaching",
            Section::Service => "service",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            Section::Education => "Education",
            Section::Experience => "Experience",
            Section::Papers => "Publications",
            Section::Awards => "Awards",
            Section::Teaching => "Teaching",
            Section::Service => "Service",
        };
        f.write_str(title)
    }
}

/// One entry of a CV section, laid out as heading, year, a subheading line
/// and optional detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub heading: String,
    pub year: Option<String>,
    pub subheading: Option<String>,
    pub details: Vec<String>,
}

/// Read-only view over the profile's frontmatter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    metadata: Mapping,
}

fn text(item: &Mapping, key: &str) -> Option<String> {
    item.get(key).and_then(Value::truthy_text)
}

/// `first, second`, or just `first` when `second` is empty.
fn joined(item: &Mapping, first: &str, second: &str) -> Option<String> {
    match (text(item, first), text(item, second)) {
        (Some(a), Some(b)) => Some(format!("{}, {}", a, b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

impl Profile {
    pub fn from_metadata(metadata: Mapping) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &Mapping {
        &self.metadata
    }

    pub fn name(&self) -> Option<String> {
        text(&self.metadata, "name")
    }

    pub fn title(&self) -> Option<String> {
        text(&self.metadata, "title")
    }

    pub fn about(&self) -> Option<String> {
        text(&self.metadata, "about")
    }

    /// Contact links that are set, in fixed order. Email becomes a `mailto:`.
    pub fn contact_links(&self) -> Vec<ContactLink> {
        let Some(contact) = self.metadata.get("contact").and_then(Value::as_mapping) else {
            return Vec::new();
        };
        CONTACTS
            .iter()
            .filter_map(|&(kind, label)| {
                let value = text(contact, kind)?;
                let url = if kind == "email" {
                    format!("mailto:{}", value)
                } else {
                    value
                };
                Some(ContactLink {
                    kind: kind.to_string(),
                    label,
                    url,
                })
            })
            .collect()
    }

    /// Mapping entries of a section's sequence.
    fn items(&self, section: Section) -> impl Iterator<Item = &Mapping> {
        self.metadata
            .get(section.key())
            .and_then(Value::as_sequence)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_mapping)
    }

    pub fn papers(&self) -> Vec<Paper> {
        self.items(Section::Papers)
            .map(|paper| {
                let links = paper
                    .get("links")
                    .and_then(Value::as_mapping)
                    .map(|links| {
                        links
                            .iter()
                            .filter_map(|(kind, url)| {
                                Some(PaperLink {
                                    kind: kind.to_string(),
                                    label: link_label(kind),
                                    url: url.to_text()?,
                                    secondary: SECONDARY_LINKS.contains(&kind),
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                Paper {
                    year: text(paper, "year"),
                    title: text(paper, "title").unwrap_or_default(),
                    authors: text(paper, "authors"),
                    venue: text(paper, "venue"),
                    links,
                }
            })
            .collect()
    }

    /// Entries of a section in display layout.
    pub fn section(&self, section: Section) -> Vec<SectionEntry> {
        if section == Section::Papers {
            return self
                .papers()
                .into_iter()
                .map(|paper| SectionEntry {
                    heading: paper.title,
                    year: paper.year,
                    subheading: paper.authors,
                    details: paper.venue.into_iter().collect(),
                })
                .collect();
        }

        self.items(section)
            .map(|item| {
                let heading_key = match section {
                    Section::Education => "degree",
                    Section::Experience => "position",
                    Section::Awards => "title",
                    Section::Teaching => "course",
                    Section::Service | Section::Papers => "role",
                };
                let subheading = match section {
                    Section::Education | Section::Experience => {
                        joined(item, "institution", "location")
                    }
                    Section::Teaching => joined(item, "role", "institution"),
                    Section::Awards | Section::Service | Section::Papers => {
                        text(item, "organization")
                    }
                };
                let details = match section {
                    Section::Education => [
                        text(item, "thesis").map(|t| format!("Thesis: {}", t)),
                        text(item, "advisor").map(|a| format!("Advisor: {}", a)),
                    ]
                    .into_iter()
                    .flatten()
                    .collect(),
                    _ => text(item, "description").into_iter().collect(),
                };
                SectionEntry {
                    heading: text(item, heading_key).unwrap_or_default(),
                    year: text(item, "year"),
                    subheading,
                    details,
                }
            })
            .collect()
    }

    /// Sections that have at least one entry, in page order.
    pub fn visible_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|&section| self.items(section).next().is_some())
            .collect()
    }
}
