use crate::{
    config::FormatterConfig,
    format::{extract_percentage_digits, GROUPING_SEPARATOR},
};

use super::Document;

/// Strips display decoration from money and percentage inputs right before
/// the form is posted, so the server receives plain numbers. Returns how many
/// values changed.
pub fn clean_for_submit(doc: &mut dyn Document, config: &FormatterConfig) -> usize {
    let mut changed = 0;
    changed += rewrite_class(doc, &config.money_class, |value| {
        value.replace(GROUPING_SEPARATOR, "")
    });
    changed += rewrite_class(doc, &config.percentage_class, extract_percentage_digits);
    tracing::debug!(changed, "cleaned form values for submit");
    changed
}

fn rewrite_class(doc: &mut dyn Document, class: &str, clean: impl Fn(&str) -> String) -> usize {
    let mut changed = 0;
    for id in doc.ids_with_class(class) {
        let Some(current) = doc.value(&id) else {
            continue;
        };
        if current.is_empty() {
            continue;
        }
        let cleaned = clean(&current);
        if cleaned == current {
            continue;
        }
        match doc.set_value(&id, &cleaned) {
            Ok(()) => changed += 1,
            Err(err) => tracing::warn!(%id, %err, "could not clean value"),
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::MemoryDocument;

    #[test]
    fn submit_receives_plain_numbers() {
        let mut doc = MemoryDocument::new()
            .with_element("id_valor", "2.500.000", &["money-input"])
            .with_element("id_iva", "12.5%", &["percentage-input"])
            .with_element("id_descuento", "", &["percentage-input"])
            .with_element("id_nota", "1.000", &[]);

        let changed = clean_for_submit(&mut doc, &FormatterConfig::default());

        assert_eq!(changed, 2);
        assert_eq!(doc.value("id_valor").as_deref(), Some("2500000"));
        assert_eq!(doc.value("id_iva").as_deref(), Some("12.5"));
        assert_eq!(doc.value("id_descuento").as_deref(), Some(""));
        assert_eq!(doc.value("id_nota").as_deref(), Some("1.000"));
    }
}
