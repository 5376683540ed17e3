// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "JobDesk";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "jobdesk";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "jobdesk.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "JOBDESK_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "JOBDESK_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "JOBDESK_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "JOBDESK_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "JOBDESK_LOG";

/// Environment variable for the PostgreSQL connection URL
pub const ENV_POSTGRES_URL: &str = "JOBDESK_POSTGRES_URL";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 3001;

/// Maximum accepted request body size in bytes
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// PostgreSQL Defaults
// =============================================================================

/// Connection pool max connections
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Connection pool min connections to keep warm
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;

/// Connection acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Idle connection timeout in seconds
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Max connection lifetime in seconds
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Statement timeout in seconds (0 = disabled)
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;
