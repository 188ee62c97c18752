mod manager;
pub mod memory;
mod provider;

pub use manager::TreeManager;
pub use provider::{DepartmentProvider, TreeError, TreeLevel};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root aggregate of the content tree. All mutations to nested
/// entities are persisted by rewriting the whole department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub years: Vec<Year>,
}

impl Department {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            years: Vec::new(),
        }
    }

    pub fn year_mut(&mut self, year_id: Uuid) -> Option<&mut Year> {
        self.years.iter_mut().find(|y| y.id == year_id)
    }

    pub fn year(&self, year_id: Uuid) -> Option<&Year> {
        self.years.iter().find(|y| y.id == year_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Year {
    pub id: Uuid,
    pub year: u32,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Year {
    pub fn new(year: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            year,
            subjects: Vec::new(),
        }
    }

    pub fn subject_mut(&mut self, subject_id: Uuid) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == subject_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Subject {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            resources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub id: Uuid,
    pub description: String,
    pub link: String,
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(description: String, link: String, kind: ResourceKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            link,
            kind,
        }
    }
}

/// The four kinds of resource a subject can hold. Anything
/// unrecognized is treated as a plain link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pdf,
    Video,
    Image,
    #[default]
    Link,
}

impl ResourceKind {
    /// Parse a kind from a form value, falling back to `Link`.
    pub fn parse_or_link(value: &str) -> Self {
        match value {
            "pdf" => Self::Pdf,
            "video" => Self::Video,
            "image" => Self::Image,
            _ => Self::Link,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Image => "image",
            Self::Link => "link",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
