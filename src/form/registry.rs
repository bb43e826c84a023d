use std::collections::BTreeMap;

use crate::{
    errors::FieldError,
    fields::{FieldKind, LiveField, MoneyField, PercentageField},
};

use super::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachedField {
    Money(MoneyField),
    Percentage(PercentageField),
}

impl AttachedField {
    fn attach(kind: FieldKind, initial: &str) -> Self {
        match kind {
            FieldKind::Money => AttachedField::Money(MoneyField::attach(initial)),
            FieldKind::Percentage => AttachedField::Percentage(PercentageField::attach(initial)),
        }
    }

    pub fn live(&self) -> &dyn LiveField {
        match self {
            AttachedField::Money(field) => field,
            AttachedField::Percentage(field) => field,
        }
    }

    pub fn live_mut(&mut self) -> &mut dyn LiveField {
        match self {
            AttachedField::Money(field) => field,
            AttachedField::Percentage(field) => field,
        }
    }
}

/// Live fields attached to a document, keyed by element id. Attaching is
/// idempotent, so repeated initialization passes never stack handlers or
/// reformat a value twice.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: BTreeMap<String, AttachedField>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a live field to `id` unless one is already attached. Returns
    /// whether a new field was attached.
    pub fn ensure_attached(
        &mut self,
        doc: &mut dyn Document,
        id: &str,
        kind: FieldKind,
    ) -> Result<bool, FieldError> {
        if self.fields.contains_key(id) {
            return Ok(false);
        }
        let initial = doc
            .value(id)
            .ok_or_else(|| FieldError::MissingElement(id.to_string()))?;
        let field = AttachedField::attach(kind, &initial);
        if field.live().value() != initial {
            doc.set_value(id, field.live().value())?;
        }
        tracing::debug!(id, ?kind, "attached live field");
        self.fields.insert(id.to_string(), field);
        Ok(true)
    }

    /// Drops any existing field on `id` and attaches a fresh one from the
    /// document's current value.
    pub fn reattach(
        &mut self,
        doc: &mut dyn Document,
        id: &str,
        kind: FieldKind,
    ) -> Result<(), FieldError> {
        self.fields.remove(id);
        self.ensure_attached(doc, id, kind).map(|_| ())
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    pub fn field(&self, id: &str) -> Option<&AttachedField> {
        self.fields.get(id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn focus(&mut self, doc: &mut dyn Document, id: &str) -> Result<(), FieldError> {
        self.dispatch(doc, id, |field| field.live_mut().on_focus())
    }

    pub fn blur(&mut self, doc: &mut dyn Document, id: &str) -> Result<(), FieldError> {
        self.dispatch(doc, id, |field| field.live_mut().on_blur())
    }

    /// Types `text` into the field and returns how many characters were
    /// admitted.
    pub fn type_text(
        &mut self,
        doc: &mut dyn Document,
        id: &str,
        text: &str,
    ) -> Result<usize, FieldError> {
        let mut admitted = 0;
        self.dispatch(doc, id, |field| {
            admitted = field.live_mut().type_text(text);
        })?;
        Ok(admitted)
    }

    pub fn backspace(&mut self, doc: &mut dyn Document, id: &str) -> Result<(), FieldError> {
        self.dispatch(doc, id, |field| field.live_mut().backspace())
    }

    fn dispatch(
        &mut self,
        doc: &mut dyn Document,
        id: &str,
        event: impl FnOnce(&mut AttachedField),
    ) -> Result<(), FieldError> {
        let field = self
            .fields
            .get_mut(id)
            .ok_or_else(|| FieldError::NotAttached(id.to_string()))?;
        let current = doc
            .value(id)
            .ok_or_else(|| FieldError::MissingElement(id.to_string()))?;
        // the page may have rewritten the value since the last event
        if field.live().value() != current {
            field.live_mut().state_mut().replace(current);
        }
        event(field);
        doc.set_value(id, field.live().value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::MemoryDocument;

    #[test]
    fn ensure_attached_is_idempotent() {
        let mut doc = MemoryDocument::new().with_element("id_valor", "2500000.00", &[]);
        let mut registry = FieldRegistry::new();

        assert!(registry
            .ensure_attached(&mut doc, "id_valor", FieldKind::Money)
            .unwrap());
        assert_eq!(doc.value("id_valor").as_deref(), Some("2.500.000"));

        assert!(!registry
            .ensure_attached(&mut doc, "id_valor", FieldKind::Money)
            .unwrap());
        assert_eq!(registry.len(), 1);
        assert_eq!(doc.value("id_valor").as_deref(), Some("2.500.000"));
    }

    #[test]
    fn events_write_back_to_document() {
        let mut doc = MemoryDocument::new().with_element("id_valor", "", &[]);
        let mut registry = FieldRegistry::new();
        registry
            .ensure_attached(&mut doc, "id_valor", FieldKind::Money)
            .unwrap();

        registry.focus(&mut doc, "id_valor").unwrap();
        assert_eq!(registry.type_text(&mut doc, "id_valor", "2500000").unwrap(), 7);
        registry.blur(&mut doc, "id_valor").unwrap();
        assert_eq!(doc.value("id_valor").as_deref(), Some("2.500.000"));

        registry.focus(&mut doc, "id_valor").unwrap();
        assert_eq!(doc.value("id_valor").as_deref(), Some("2500000"));
    }

    #[test]
    fn external_rewrites_are_picked_up() {
        let mut doc = MemoryDocument::new().with_element("id_iva", "19", &[]);
        let mut registry = FieldRegistry::new();
        registry
            .ensure_attached(&mut doc, "id_iva", FieldKind::Percentage)
            .unwrap();
        doc.set_value("id_iva", "5,5%").unwrap();
        registry.focus(&mut doc, "id_iva").unwrap();
        assert_eq!(doc.value("id_iva").as_deref(), Some("5.5"));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut doc = MemoryDocument::new();
        let mut registry = FieldRegistry::new();
        assert!(matches!(
            registry.ensure_attached(&mut doc, "id_nope", FieldKind::Money),
            Err(FieldError::MissingElement(_))
        ));
        assert!(matches!(
            registry.blur(&mut doc, "id_nope"),
            Err(FieldError::NotAttached(_))
        ));
    }

    #[test]
    fn reattach_reformats_from_current_value() {
        let mut doc = MemoryDocument::new().with_element("id_iva", "19", &[]);
        let mut registry = FieldRegistry::new();
        registry
            .ensure_attached(&mut doc, "id_iva", FieldKind::Percentage)
            .unwrap();
        doc.set_value("id_iva", "7,5").unwrap();
        registry
            .reattach(&mut doc, "id_iva", FieldKind::Percentage)
            .unwrap();
        assert_eq!(doc.value("id_iva").as_deref(), Some("7.5%"));
        assert!(registry.is_attached("id_iva"));
    }
}
