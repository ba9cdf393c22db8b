use super::variable::{NameMap, Variable};
use super::well::{extract_well_names, Well};
use crate::error::{LogError, LogResult};
use crate::schema::{parse_number, CaseSchema};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Accepted case-log timestamp layouts, tried in order.
pub const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S"];

/// Literal the case log writes for evaluated cases.
pub const EVALUATED_FLAG: &str = "true";

pub fn parse_timestamp(raw: &str) -> LogResult<NaiveDateTime> {
    let s = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| LogError::InvalidTimestamp(raw.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    pub timestamp: NaiveDateTime,
    pub id: String,
    pub evaluated: bool,
    pub objective_function_value: f64,
    pub variables: Vec<Variable>,
    pub wells: Vec<Well>,
}

impl Case {
    /// Builds a case from one case-log row. `row_index` is the 1-based data
    /// row and is attached to every failure.
    pub fn from_row(
        row: &[String],
        row_index: usize,
        schema: &CaseSchema,
        names: &NameMap,
    ) -> LogResult<Self> {
        Self::assemble(row, row_index, schema, names).map_err(|e| e.at_row(row_index))
    }

    fn assemble(
        row: &[String],
        row_index: usize,
        schema: &CaseSchema,
        names: &NameMap,
    ) -> LogResult<Self> {
        if row.len() < schema.variables_start {
            return Err(LogError::MalformedRow {
                row: row_index,
                reason: format!(
                    "expected at least {} fields, found {}",
                    schema.variables_start,
                    row.len()
                ),
            });
        }

        let trailing = &row[schema.variables_start..];
        if trailing.len() % 2 != 0 {
            return Err(LogError::MalformedRow {
                row: row_index,
                reason: format!(
                    "odd number of variable fields ({}); cannot pair identifiers with values",
                    trailing.len()
                ),
            });
        }

        let timestamp = parse_timestamp(&row[schema.timestamp])?;
        let objective_function_value = parse_number(&row[schema.objective], "ObjFunVal")?;

        let variables = trailing
            .chunks_exact(2)
            .map(|pair| Variable::decode(&pair[0], &pair[1], names))
            .collect::<LogResult<Vec<_>>>()?;

        let wells = extract_well_names(&variables)
            .iter()
            .map(|name| Well::from_variables(&variables, name))
            .collect();

        Ok(Self {
            timestamp,
            id: row[schema.case_id].clone(),
            evaluated: row[schema.evaluated] == EVALUATED_FLAG,
            objective_function_value,
            variables,
            wells,
        })
    }

    pub fn well(&self, name: &str) -> Option<&Well> {
        self.wells.iter().find(|w| w.name == name)
    }

    pub fn well_names(&self) -> Vec<&str> {
        self.wells.iter().map(|w| w.name.as_str()).collect()
    }

    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id() == id)
    }

    /// The variables as `(identifier, value)` fields, in the layout the case
    /// log uses. Values use the shortest form that parses back exactly.
    pub fn variable_pairs(&self) -> Vec<(String, String)> {
        self.variables
            .iter()
            .map(|v| (v.id().to_string(), v.value().to_string()))
            .collect()
    }
}
