//! Collection filter parsing and WHERE clause construction
//!
//! Each collection accepts a fixed whitelist of optional query-string
//! filters. Parsing validates the keys, coerces numeric bounds, and checks
//! range consistency; clause construction emits one predicate per supplied
//! filter, joined with AND. Predicates are independent fragments guarded by
//! "include if present" so the set of filters composes without enumerating
//! combinations.

use std::collections::BTreeMap;

use super::error::QueryError;
use super::value::SqlValue;

/// Query-string keys accepted when listing companies
pub const COMPANY_FILTER_KEYS: &[&str] = &["companyName", "minEmployees", "maxEmployees"];

/// Query-string keys accepted when listing jobs
pub const JOB_FILTER_KEYS: &[&str] = &["title", "minSalary", "hasEquity"];

/// A WHERE fragment plus its positional parameters.
///
/// `sql` is empty when no filters were supplied, otherwise it starts with
/// `" WHERE "` so callers can append it to a base SELECT unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Accumulates predicates with continuous placeholder numbering
struct Predicates {
    conditions: Vec<String>,
    params: Vec<SqlValue>,
    next_index: usize,
}

impl Predicates {
    fn new(start_index: usize) -> Self {
        Self {
            conditions: Vec::new(),
            params: Vec::new(),
            next_index: start_index,
        }
    }

    /// Add `column op $n` and claim the next placeholder for `value`
    fn compare(&mut self, column: &str, op: &str, value: SqlValue) {
        self.conditions
            .push(format!("{} {} ${}", column, op, self.next_index));
        self.params.push(value);
        self.next_index += 1;
    }

    /// Add a parameter-free condition
    fn fixed(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    fn finish(self) -> WhereClause {
        let sql = if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        };
        WhereClause {
            sql,
            params: self.params,
        }
    }
}

/// Escape SQL LIKE metacharacters (%, _, \) in user input before it is
/// embedded in a pattern parameter.
fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn substring_pattern(s: &str) -> String {
    format!("%{}%", escape_like_pattern(s))
}

/// Reject any key outside the collection's whitelist, naming the offender.
/// Keys are checked in lexicographic order so the reported key is stable.
fn check_whitelist(raw: &BTreeMap<String, String>, allowed: &[&str]) -> Result<(), QueryError> {
    for key in raw.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(QueryError::InvalidFilter(key.clone()));
        }
    }
    Ok(())
}

/// Coerce an optional numeric bound, failing on non-numeric input
fn parse_bound(raw: &BTreeMap<String, String>, key: &str) -> Result<Option<i64>, QueryError> {
    match raw.get(key) {
        None => Ok(None),
        Some(value) => {
            value
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| QueryError::InvalidFilterValue {
                    filter: key.to_string(),
                    value: value.clone(),
                })
        }
    }
}

/// Validated filters for the company collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFilters {
    /// Case-insensitive substring match on the display name
    pub name: Option<String>,
    /// Inclusive lower bound on employee count
    pub min_employees: Option<i64>,
    /// Inclusive upper bound on employee count
    pub max_employees: Option<i64>,
}

impl CompanyFilters {
    /// Parse and validate raw query-string parameters
    pub fn from_query(raw: &BTreeMap<String, String>) -> Result<Self, QueryError> {
        check_whitelist(raw, COMPANY_FILTER_KEYS)?;

        let min_employees = parse_bound(raw, "minEmployees")?;
        let max_employees = parse_bound(raw, "maxEmployees")?;

        if let (Some(min), Some(max)) = (min_employees, max_employees)
            && min > max
        {
            return Err(QueryError::InvalidRange {
                min_filter: "minEmployees",
                min,
                max_filter: "maxEmployees",
                max,
            });
        }

        Ok(Self {
            name: raw.get("companyName").cloned(),
            min_employees,
            max_employees,
        })
    }

    /// Build the WHERE fragment, numbering placeholders from `start_index`
    pub fn where_clause(&self, start_index: usize) -> WhereClause {
        let mut predicates = Predicates::new(start_index);

        if let Some(ref name) = self.name {
            predicates.compare("name", "ILIKE", SqlValue::Text(substring_pattern(name)));
        }
        if let Some(min) = self.min_employees {
            predicates.compare("num_employees", ">=", SqlValue::Int(min));
        }
        if let Some(max) = self.max_employees {
            predicates.compare("num_employees", "<=", SqlValue::Int(max));
        }

        predicates.finish()
    }
}

/// Validated filters for the job collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    /// Inclusive lower bound on salary
    pub min_salary: Option<i64>,
    /// When true, restrict to jobs with a non-zero equity stake
    pub has_equity: bool,
}

impl JobFilters {
    /// Parse and validate raw query-string parameters
    pub fn from_query(raw: &BTreeMap<String, String>) -> Result<Self, QueryError> {
        check_whitelist(raw, JOB_FILTER_KEYS)?;

        let min_salary = parse_bound(raw, "minSalary")?;

        // hasEquity=false is the same as leaving the filter off
        let has_equity = match raw.get("hasEquity").map(|v| v.trim()) {
            None => false,
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            Some(v) => {
                return Err(QueryError::InvalidFilterValue {
                    filter: "hasEquity".to_string(),
                    value: v.to_string(),
                });
            }
        };

        Ok(Self {
            title: raw.get("title").cloned(),
            min_salary,
            has_equity,
        })
    }

    /// Build the WHERE fragment, numbering placeholders from `start_index`
    pub fn where_clause(&self, start_index: usize) -> WhereClause {
        let mut predicates = Predicates::new(start_index);

        if let Some(ref title) = self.title {
            predicates.compare("title", "ILIKE", SqlValue::Text(substring_pattern(title)));
        }
        if let Some(min) = self.min_salary {
            predicates.compare("salary", ">=", SqlValue::Int(min));
        }
        if self.has_equity {
            // NULL equity is excluded by SQL three-valued logic
            predicates.fixed("equity <> 0");
        }

        predicates.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn company_no_filters_is_unfiltered() {
        let filters = CompanyFilters::from_query(&BTreeMap::new()).unwrap();
        let clause = filters.where_clause(1);
        assert_eq!(clause.sql, "");
        assert!(clause.params.is_empty());
    }

    #[test]
    fn company_all_filters_conjoined_in_order() {
        let filters = CompanyFilters::from_query(&query(&[
            ("companyName", "net"),
            ("minEmployees", "10"),
            ("maxEmployees", "500"),
        ]))
        .unwrap();
        let clause = filters.where_clause(1);
        assert_eq!(
            clause.sql,
            " WHERE name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(
            clause.params,
            vec![
                SqlValue::Text("%net%".to_string()),
                SqlValue::Int(10),
                SqlValue::Int(500),
            ]
        );
    }

    #[test]
    fn company_single_filter_only_emits_that_predicate() {
        let filters = CompanyFilters::from_query(&query(&[("minEmployees", "3")])).unwrap();
        let clause = filters.where_clause(1);
        assert_eq!(clause.sql, " WHERE num_employees >= $1");
        assert_eq!(clause.params, vec![SqlValue::Int(3)]);
    }

    #[test]
    fn company_unknown_key_rejected_by_name() {
        let err = CompanyFilters::from_query(&query(&[("badKey", "x")])).unwrap_err();
        assert_eq!(err, QueryError::InvalidFilter("badKey".to_string()));
    }

    #[test]
    fn company_job_keys_are_not_company_keys() {
        let err = CompanyFilters::from_query(&query(&[("minSalary", "100")])).unwrap_err();
        assert_eq!(err, QueryError::InvalidFilter("minSalary".to_string()));
    }

    #[test]
    fn company_inverted_range_rejected() {
        let err = CompanyFilters::from_query(&query(&[
            ("minEmployees", "50"),
            ("maxEmployees", "10"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidRange {
                min_filter: "minEmployees",
                min: 50,
                max_filter: "maxEmployees",
                max: 10,
            }
        );
    }

    #[test]
    fn company_equal_bounds_allowed() {
        let filters = CompanyFilters::from_query(&query(&[
            ("minEmployees", "10"),
            ("maxEmployees", "10"),
        ]))
        .unwrap();
        assert_eq!(filters.min_employees, Some(10));
        assert_eq!(filters.max_employees, Some(10));
    }

    #[test]
    fn company_non_numeric_bound_rejected() {
        let err = CompanyFilters::from_query(&query(&[("minEmployees", "lots")])).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidFilterValue {
                filter: "minEmployees".to_string(),
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn company_numeric_string_coerced() {
        let filters = CompanyFilters::from_query(&query(&[("maxEmployees", " 42 ")])).unwrap();
        assert_eq!(filters.max_employees, Some(42));
    }

    #[test]
    fn company_like_metacharacters_escaped() {
        let filters = CompanyFilters::from_query(&query(&[("companyName", "100%_net")])).unwrap();
        let clause = filters.where_clause(1);
        assert_eq!(
            clause.params,
            vec![SqlValue::Text("%100\\%\\_net%".to_string())]
        );
    }

    #[test]
    fn job_no_filters_is_unfiltered() {
        let filters = JobFilters::from_query(&BTreeMap::new()).unwrap();
        let clause = filters.where_clause(1);
        assert_eq!(clause.sql, "");
        assert!(clause.params.is_empty());
    }

    #[test]
    fn job_all_filters_conjoined_in_order() {
        let filters = JobFilters::from_query(&query(&[
            ("title", "engineer"),
            ("minSalary", "90000"),
            ("hasEquity", "true"),
        ]))
        .unwrap();
        let clause = filters.where_clause(1);
        assert_eq!(
            clause.sql,
            " WHERE title ILIKE $1 AND salary >= $2 AND equity <> 0"
        );
        assert_eq!(
            clause.params,
            vec![
                SqlValue::Text("%engineer%".to_string()),
                SqlValue::Int(90000),
            ]
        );
    }

    #[test]
    fn job_has_equity_false_applies_no_constraint() {
        let filters = JobFilters::from_query(&query(&[("hasEquity", "false")])).unwrap();
        let clause = filters.where_clause(1);
        assert_eq!(clause.sql, "");
    }

    #[test]
    fn job_has_equity_non_boolean_rejected() {
        let err = JobFilters::from_query(&query(&[("hasEquity", "maybe")])).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidFilterValue {
                filter: "hasEquity".to_string(),
                value: "maybe".to_string(),
            }
        );
    }

    #[test]
    fn job_unknown_key_rejected() {
        let err = JobFilters::from_query(&query(&[("salary", "100")])).unwrap_err();
        assert_eq!(err, QueryError::InvalidFilter("salary".to_string()));
    }

    #[test]
    fn placeholder_numbering_continues_from_start_index() {
        let filters = JobFilters::from_query(&query(&[("minSalary", "50000")])).unwrap();
        let clause = filters.where_clause(3);
        assert_eq!(clause.sql, " WHERE salary >= $3");
    }

    #[test]
    fn identical_input_produces_identical_output() {
        let raw = query(&[("title", "dev"), ("hasEquity", "true")]);
        let first = JobFilters::from_query(&raw).unwrap().where_clause(1);
        let second = JobFilters::from_query(&raw).unwrap().where_clause(1);
        assert_eq!(first, second);
    }

    #[test]
    fn escape_like_pattern_cases() {
        assert_eq!(escape_like_pattern("hello"), "hello");
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("foo_bar"), "foo\\_bar");
        assert_eq!(escape_like_pattern("path\\file"), "path\\\\file");
        assert_eq!(escape_like_pattern(""), "");
    }
}
