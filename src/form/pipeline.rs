use serde::{Deserialize, Serialize};

use crate::{config::FormatterConfig, fields::FieldKind, format::DisplayMode};

use super::{Document, FieldRegistry};

/// Whether the page creates a record or edits one loaded from the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PageMode {
    #[default]
    Create,
    Edit,
}

/// Counters from one [`InitPipeline::run`].
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct InitReport {
    pub normalized: usize,
    pub attached: usize,
    pub display_formatted: usize,
    pub skipped: usize,
}

/// Formats a page in one ordered pass:
///
/// 1. in [`PageMode::Edit`], rewrite server-rendered money and percentage
///    inputs into display form;
/// 2. attach live money fields;
/// 3. attach live percentage fields;
/// 4. format read-only money and percentage elements.
///
/// Every step leaves already formatted values alone, so running the pipeline
/// again is a no-op.
#[derive(Debug, Clone)]
pub struct InitPipeline<'a> {
    config: &'a FormatterConfig,
}

impl<'a> InitPipeline<'a> {
    pub fn new(config: &'a FormatterConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, doc: &mut dyn Document, registry: &mut FieldRegistry) -> InitReport {
        let mut report = InitReport::default();

        if self.config.page_mode == PageMode::Edit {
            self.normalize_class(doc, &self.config.money_class, DisplayMode::Money, &mut report);
            self.normalize_class(
                doc,
                &self.config.percentage_class,
                DisplayMode::Percentage,
                &mut report,
            );
        }

        self.attach_class(doc, registry, &self.config.money_class, FieldKind::Money, &mut report);
        self.attach_class(
            doc,
            registry,
            &self.config.percentage_class,
            FieldKind::Percentage,
            &mut report,
        );

        let mut display = InitReport::default();
        self.normalize_class(
            doc,
            &self.config.money_display_class,
            DisplayMode::Money,
            &mut display,
        );
        self.normalize_class(
            doc,
            &self.config.percentage_display_class,
            DisplayMode::PercentageBare,
            &mut display,
        );
        report.display_formatted = display.normalized;
        report.skipped += display.skipped;

        tracing::info!(
            mode = ?self.config.page_mode,
            normalized = report.normalized,
            attached = report.attached,
            display_formatted = report.display_formatted,
            skipped = report.skipped,
            "form initialized"
        );
        report
    }

    fn normalize_class(
        &self,
        doc: &mut dyn Document,
        class: &str,
        mode: DisplayMode,
        report: &mut InitReport,
    ) {
        for id in doc.ids_with_class(class) {
            let Some(current) = doc.value(&id) else {
                continue;
            };
            let Some(rendered) = mode.normalize(&current) else {
                continue;
            };
            match doc.set_value(&id, &rendered) {
                Ok(()) => report.normalized += 1,
                Err(err) => {
                    tracing::warn!(%id, %err, "could not format element");
                    report.skipped += 1;
                }
            }
        }
    }

    fn attach_class(
        &self,
        doc: &mut dyn Document,
        registry: &mut FieldRegistry,
        class: &str,
        kind: FieldKind,
        report: &mut InitReport,
    ) {
        for id in doc.ids_with_class(class) {
            match registry.ensure_attached(doc, &id, kind) {
                Ok(true) => report.attached += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(%id, %err, "skipping live field");
                    report.skipped += 1;
                }
            }
        }
    }
}
