use super::case::{Case, EVALUATED_FLAG};
use super::variable::NameMap;
use crate::error::{LogError, LogResult};
use crate::schema::CaseSchema;
use crate::table::{LogTable, RejectedRow};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

/// Which case-log rows become cases.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum InclusionPolicy {
    /// Only rows flagged as evaluated.
    #[default]
    Strict,
    /// Evaluated rows plus the final row even when it is unevaluated.
    Lenient,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CaseContainer {
    cases: Vec<Case>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<RejectedRow>,
}

impl CaseContainer {
    /// Builds the cases of the included rows. A row that fails to decode is
    /// skipped and listed in `rejected()`; a repeated case id is an error.
    pub fn from_table(
        table: &LogTable,
        names: &NameMap,
        policy: InclusionPolicy,
    ) -> LogResult<Self> {
        let schema = CaseSchema::resolve(table)?;
        let last = table.len().saturating_sub(1);

        let mut container = Self {
            rejected: table.rejected().to_vec(),
            ..Self::default()
        };
        for (i, (number, row)) in table.numbered_rows().enumerate() {
            let evaluated = row[schema.evaluated] == EVALUATED_FLAG;
            let trailing_unevaluated =
                !evaluated && i == last && policy == InclusionPolicy::Lenient;
            if !evaluated && !trailing_unevaluated {
                continue;
            }

            let case = match Case::from_row(row, number, &schema, names) {
                Ok(case) => case,
                Err(e) => {
                    warn!("Skipping case-log row {}: {}", number, e.root());
                    container.rejected.push(RejectedRow::new(number, &e));
                    continue;
                }
            };
            if trailing_unevaluated {
                let msg = format!("Appended an unevaluated latest case ({}).", case.id);
                warn!("{}", msg);
                container.warnings.push(msg);
            }
            container.insert(case)?;
        }
        container.rejected.sort_by_key(|r| r.row);

        debug!(
            "Collected {} cases from {} case-log rows ({} policy)",
            container.len(),
            table.len(),
            policy
        );
        Ok(container)
    }

    fn insert(&mut self, case: Case) -> LogResult<()> {
        if self.get(&case.id).is_some() {
            return Err(LogError::DuplicateCase(case.id));
        }
        self.cases.push(case);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Case-log rows left out because they could not be read.
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    /// Highest objective value; ties go to the earlier case.
    pub fn best(&self) -> Option<&Case> {
        self.cases.iter().fold(None, |best: Option<&Case>, c| match best {
            Some(b) if b.objective_function_value >= c.objective_function_value => Some(b),
            _ => Some(c),
        })
    }
}
