use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::FieldError;

/// The page the form lives on: elements addressed by id and grouped by CSS
/// class.
pub trait Document {
    fn value(&self, id: &str) -> Option<String>;

    /// Fails with [`FieldError::MissingElement`] if `id` is not on the page.
    fn set_value(&mut self, id: &str, value: &str) -> Result<(), FieldError>;

    fn ids_with_class(&self, class: &str) -> Vec<String>;

    fn contains(&self, id: &str) -> bool {
        self.value(id).is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Element {
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub classes: BTreeSet<String>,
}

/// In-memory [`Document`], also the JSON shape read by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryDocument {
    #[serde(default)]
    elements: BTreeMap<String, Element>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>, classes: &[&str]) {
        self.elements.insert(
            id.into(),
            Element {
                value: value.into(),
                classes: classes.iter().map(|class| class.to_string()).collect(),
            },
        );
    }

    pub fn with_element(
        mut self,
        id: impl Into<String>,
        value: impl Into<String>,
        classes: &[&str],
    ) -> Self {
        self.insert(id, value, classes);
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Document for MemoryDocument {
    fn value(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|element| element.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), FieldError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| FieldError::MissingElement(id.to_string()))?;
        element.value = value.to_string();
        Ok(())
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|(_, element)| element.classes.contains(class))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_by_class_and_rejects_unknown_ids() {
        let mut doc = MemoryDocument::new()
            .with_element("id_valor", "100", &["money-input"])
            .with_element("id_iva", "19", &["percentage-input"]);

        assert_eq!(doc.ids_with_class("money-input"), vec!["id_valor".to_string()]);
        assert!(doc.contains("id_iva"));
        assert!(matches!(
            doc.set_value("id_missing", "1"),
            Err(FieldError::MissingElement(id)) if id == "id_missing"
        ));
    }

    #[test]
    fn deserializes_from_json() {
        let doc: MemoryDocument = serde_json::from_str(
            r#"{"elements": {"id_valor": {"value": "2500000.00", "classes": ["money-input"]}}}"#,
        )
        .unwrap();
        assert_eq!(doc.value("id_valor").as_deref(), Some("2500000.00"));
    }
}
