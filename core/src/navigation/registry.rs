//! Ordered set of navigable page sections.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("At least one section is required")]
    Empty,
    #[error("Duplicate section id: {0}")]
    DuplicateId(String),
    #[error("Section {0:?} has an empty id or anchor")]
    Blank(String),
}

/// A named, anchorable content block on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
    /// Selector of the element the section scrolls to, e.g. `#about`.
    pub anchor: String,
}

impl Section {
    pub fn new(id: &str, label: &str, anchor: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            anchor: anchor.to_string(),
        }
    }
}

/// Immutable, ordered section list. Order decides scroll-spy tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new(sections: Vec<Section>) -> Result<Self, RegistryError> {
        if sections.is_empty() {
            return Err(RegistryError::Empty);
        }
        for (i, section) in sections.iter().enumerate() {
            if section.id.trim().is_empty() || section.anchor.trim().is_empty() {
                return Err(RegistryError::Blank(section.label.clone()));
            }
            if sections[..i].iter().any(|s| s.id == section.id) {
                return Err(RegistryError::DuplicateId(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// The portfolio's navigation items, in nav-bar order.
    pub fn portfolio() -> Self {
        Self {
            sections: vec![
                Section::new("about", "About", "#about"),
                Section::new("projects", "Projects", "#projects"),
                Section::new("skills", "Skills", "#skills"),
                Section::new("contact", "Contact", "#contact"),
            ],
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&Section> {
        self.position(id).map(|i| &self.sections[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::portfolio()
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_order() {
        let registry = SectionRegistry::portfolio();
        let ids: Vec<_> = registry.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["about", "projects", "skills", "contact"]);
        assert_eq!(registry.position("skills"), Some(2));
        assert!(registry.find("hero").is_none());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SectionRegistry::new(vec![]), Err(RegistryError::Empty));
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = SectionRegistry::new(vec![
            Section::new("about", "About", "#about"),
            Section::new("about", "About again", "#about-2"),
        ]);
        assert_eq!(result, Err(RegistryError::DuplicateId("about".into())));
    }

    #[test]
    fn test_rejects_blank_anchor() {
        let result = SectionRegistry::new(vec![Section::new("about", "About", " ")]);
        assert!(matches!(result, Err(RegistryError::Blank(_))));
    }
}
