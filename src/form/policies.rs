use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{dates::MonthOverflow, errors::FieldError};

use super::{
    dates::{DateTriad, DateTriadIds},
    Document,
};

/// Policy sub-forms attached to a contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PolicyKind {
    /// Civil liability (RCE).
    Rce,
    Compliance,
    Lease,
    AllRisk,
    Other,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Rce,
        PolicyKind::Compliance,
        PolicyKind::Lease,
        PolicyKind::AllRisk,
        PolicyKind::Other,
    ];

    fn id_suffix(self) -> &'static str {
        match self {
            PolicyKind::Rce => "rce",
            PolicyKind::Compliance => "cumplimiento",
            PolicyKind::Lease => "arrendamiento",
            PolicyKind::AllRisk => "todo_riesgo",
            PolicyKind::Other => "otra_1",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Rce => "RCE",
            PolicyKind::Compliance => "Compliance",
            PolicyKind::Lease => "Lease policy",
            PolicyKind::AllRisk => "All risk",
            PolicyKind::Other => "Other policy",
        }
    }

    /// Element ids the policy sub-form renders, e.g. `id_meses_vigencia_rce`.
    pub fn triad_ids(self) -> DateTriadIds {
        let suffix = self.id_suffix();
        DateTriadIds::new(
            format!("id_fecha_inicio_vigencia_{suffix}"),
            format!("id_meses_vigencia_{suffix}"),
            format!("id_fecha_fin_vigencia_{suffix}"),
        )
    }
}

/// Copies the contract start date into every policy sub-form on the page and
/// recomputes each policy's end date from its own duration.
#[derive(Debug, Clone)]
pub struct PolicyReplicator {
    contract_start: String,
    policies: BTreeMap<PolicyKind, DateTriad>,
}

impl PolicyReplicator {
    /// Binds the contract start field and every policy sub-form present on the
    /// page. Incomplete sub-forms are logged and left out.
    pub fn bind(
        doc: &dyn Document,
        contract_start: impl Into<String>,
        overflow: MonthOverflow,
    ) -> Result<Self, FieldError> {
        let contract_start = contract_start.into();
        if !doc.contains(&contract_start) {
            return Err(FieldError::MissingElement(contract_start));
        }

        let mut policies = BTreeMap::new();
        for kind in PolicyKind::ALL {
            match DateTriad::bind(doc, kind.triad_ids(), overflow) {
                Ok(triad) => {
                    policies.insert(kind, triad);
                }
                Err(err) => {
                    tracing::warn!(policy = kind.label(), %err, "policy dates not wired");
                }
            }
        }

        Ok(Self {
            contract_start,
            policies,
        })
    }

    /// Binds like [`PolicyReplicator::bind`], then replicates a contract start
    /// that is already filled in.
    pub fn wire(
        doc: &mut dyn Document,
        contract_start: impl Into<String>,
        overflow: MonthOverflow,
    ) -> Result<Self, FieldError> {
        let replicator = Self::bind(&*doc, contract_start, overflow)?;
        let written = replicator.on_contract_start_changed(doc)?;
        if written > 0 {
            tracing::debug!(written, "initial policy end dates computed");
        }
        Ok(replicator)
    }

    pub fn policies(&self) -> impl Iterator<Item = PolicyKind> + '_ {
        self.policies.keys().copied()
    }

    /// Contract start changed: refresh every bound policy. Returns how many end
    /// dates were written.
    pub fn on_contract_start_changed(&self, doc: &mut dyn Document) -> Result<usize, FieldError> {
        let mut written = 0;
        for triad in self.policies.values() {
            if self.sync(doc, triad)? {
                written += 1;
            }
        }
        Ok(written)
    }

    /// A policy's duration changed. Returns whether its end date was written;
    /// unbound policies are ignored.
    pub fn on_policy_months_input(
        &self,
        doc: &mut dyn Document,
        kind: PolicyKind,
    ) -> Result<bool, FieldError> {
        match self.policies.get(&kind) {
            Some(triad) => self.sync(doc, triad),
            None => Ok(false),
        }
    }

    fn sync(&self, doc: &mut dyn Document, triad: &DateTriad) -> Result<bool, FieldError> {
        let start = doc.value(&self.contract_start).unwrap_or_default();
        let months = doc.value(&triad.ids().months).unwrap_or_default();
        if start.trim().is_empty() || months.trim().is_empty() {
            return Ok(false);
        }
        doc.set_value(&triad.ids().start, &start)?;
        Ok(triad.recompute_end(doc)?.is_some())
    }
}
