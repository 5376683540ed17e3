//! Partial-update SET clause construction
//!
//! Turns the fields of a PATCH body into a parameterized SET fragment and a
//! matching ordered value list. Field names arrive in the API's camelCase
//! vocabulary and are translated to column names through a static per-entity
//! descriptor table; a field absent from the table keeps its own name.

use super::error::QueryError;
use super::value::SqlValue;

/// Company PATCH fields and the columns they target
pub const COMPANY_UPDATE_COLUMNS: &[(&str, &str)] = &[
    ("name", "name"),
    ("description", "description"),
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

/// Job PATCH fields and the columns they target.
/// `companyHandle` is deliberately missing: it is immutable after creation.
pub const JOB_UPDATE_COLUMNS: &[(&str, &str)] =
    &[("title", "title"), ("salary", "salary"), ("equity", "equity")];

/// One column assignment in a SET clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub column: String,
    pub placeholder: usize,
}

/// A parameterized SET fragment plus its ordered value list
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    pub assignments: Vec<Assignment>,
    pub values: Vec<SqlValue>,
    next_index: usize,
}

impl PartialUpdate {
    /// Build from ordered `(field, value)` pairs, numbering placeholders
    /// from `start_index`. Output order matches input order exactly.
    pub fn build(
        fields: Vec<(&str, SqlValue)>,
        columns: &[(&str, &str)],
        start_index: usize,
    ) -> Result<Self, QueryError> {
        if fields.is_empty() {
            return Err(QueryError::NoFields);
        }

        let mut assignments = Vec::with_capacity(fields.len());
        let mut values = Vec::with_capacity(fields.len());
        let mut next_index = start_index;

        for (field, value) in fields {
            let column = columns
                .iter()
                .find(|(domain, _)| *domain == field)
                .map(|(_, column)| *column)
                .unwrap_or(field);

            assignments.push(Assignment {
                column: column.to_string(),
                placeholder: next_index,
            });
            values.push(value);
            next_index += 1;
        }

        Ok(Self {
            assignments,
            values,
            next_index,
        })
    }

    /// The `col = $n, ...` fragment for an UPDATE statement
    pub fn set_sql(&self) -> String {
        self.assignments
            .iter()
            .map(|a| format!("{} = ${}", a.column, a.placeholder))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The first placeholder index after the assignments, for key columns
    pub fn next_index(&self) -> usize {
        self.next_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::value::SqlType;

    #[test]
    fn translates_fields_in_input_order() {
        let columns: &[(&str, &str)] = &[
            ("firstName", "first_name"),
            ("lastName", "last_name"),
            ("isAdmin", "is_admin"),
        ];
        let update = PartialUpdate::build(
            vec![
                ("firstName", SqlValue::Text("test".to_string())),
                ("lastName", SqlValue::Text("test".to_string())),
                ("isAdmin", SqlValue::Bool(false)),
            ],
            columns,
            1,
        )
        .unwrap();

        assert_eq!(
            update.assignments,
            vec![
                Assignment {
                    column: "first_name".to_string(),
                    placeholder: 1,
                },
                Assignment {
                    column: "last_name".to_string(),
                    placeholder: 2,
                },
                Assignment {
                    column: "is_admin".to_string(),
                    placeholder: 3,
                },
            ]
        );
        assert_eq!(
            update.values,
            vec![
                SqlValue::Text("test".to_string()),
                SqlValue::Text("test".to_string()),
                SqlValue::Bool(false),
            ]
        );
        assert_eq!(
            update.set_sql(),
            "first_name = $1, last_name = $2, is_admin = $3"
        );
        assert_eq!(update.next_index(), 4);
    }

    #[test]
    fn empty_mapping_rejected() {
        let err = PartialUpdate::build(vec![], COMPANY_UPDATE_COLUMNS, 1).unwrap_err();
        assert_eq!(err, QueryError::NoFields);
    }

    #[test]
    fn unmapped_field_keeps_its_name() {
        let update = PartialUpdate::build(
            vec![("description", SqlValue::Text("hi".to_string()))],
            &[("numEmployees", "num_employees")],
            1,
        )
        .unwrap();
        assert_eq!(update.set_sql(), "description = $1");
    }

    #[test]
    fn explicit_null_preserved_as_value() {
        let update = PartialUpdate::build(
            vec![
                ("logoUrl", SqlValue::Null(SqlType::Text)),
                ("name", SqlValue::Text("Acme".to_string())),
            ],
            COMPANY_UPDATE_COLUMNS,
            1,
        )
        .unwrap();
        assert_eq!(update.set_sql(), "logo_url = $1, name = $2");
        assert_eq!(
            update.values,
            vec![
                SqlValue::Null(SqlType::Text),
                SqlValue::Text("Acme".to_string()),
            ]
        );
    }

    #[test]
    fn placeholder_numbering_continues_from_start_index() {
        let update = PartialUpdate::build(
            vec![("salary", SqlValue::Int(120_000))],
            JOB_UPDATE_COLUMNS,
            5,
        )
        .unwrap();
        assert_eq!(update.set_sql(), "salary = $5");
        assert_eq!(update.next_index(), 6);
    }

    #[test]
    fn values_round_trip_unmodified() {
        let values = vec![
            ("name", SqlValue::Text("A & B".to_string())),
            ("numEmployees", SqlValue::Int(0)),
            ("logoUrl", SqlValue::Null(SqlType::Text)),
        ];
        let update = PartialUpdate::build(values.clone(), COMPANY_UPDATE_COLUMNS, 1).unwrap();
        let expected: Vec<SqlValue> = values.into_iter().map(|(_, v)| v).collect();
        assert_eq!(update.values, expected);
    }

    #[test]
    fn job_columns_do_not_admit_company_handle() {
        assert!(
            JOB_UPDATE_COLUMNS
                .iter()
                .all(|(domain, _)| *domain != "companyHandle")
        );
    }
}
