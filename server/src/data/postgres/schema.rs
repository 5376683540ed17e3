//! PostgreSQL schema definitions

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
///
/// Jobs carry no surrogate id: the natural key (title, company_handle) is
/// the primary key, so a company cannot hold two jobs with the same title.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at BIGINT NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS companies (
    handle TEXT PRIMARY KEY CHECK(length(handle) >= 1 AND length(handle) <= 64),
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 100),
    description TEXT NOT NULL DEFAULT '',
    num_employees BIGINT NOT NULL DEFAULT 0 CHECK(num_employees >= 0),
    logo_url TEXT,
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_companies_name ON companies(name);

CREATE TABLE IF NOT EXISTS jobs (
    title TEXT NOT NULL CHECK(length(title) >= 1 AND length(title) <= 200),
    salary BIGINT CHECK(salary IS NULL OR salary >= 0),
    equity NUMERIC CHECK(equity IS NULL OR (equity >= 0 AND equity <= 1)),
    company_handle TEXT NOT NULL REFERENCES companies(handle) ON DELETE CASCADE,
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL,
    PRIMARY KEY (title, company_handle)
);

CREATE INDEX IF NOT EXISTS idx_jobs_company ON jobs(company_handle);
CREATE INDEX IF NOT EXISTS idx_jobs_title ON jobs(title);
"#;
