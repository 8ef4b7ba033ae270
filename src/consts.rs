pub mod cli_consts {
    //! Console Configuration Constants
    //!
    //! This module contains the configuration constants for the console,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the channel carrying loader events to the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // API CONFIGURATION
    // =============================================================================

    /// API base URL used when neither the config file nor the environment sets one.
    pub const DEFAULT_API_URL: &str = "http://localhost:8000";

    /// HTTP client configuration
    pub mod http {
        use std::time::Duration;

        /// Connection establishment timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    /// Throttling configuration for the costs endpoint
    pub mod rate_limiting {
        use std::time::Duration;

        /// Delay used when a throttled response carries no usable retry-after value
        pub const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

        /// Upper bound applied to server-provided retry delays (10 minutes)
        pub const MAX_RETRY_AFTER_SECS: u64 = 60 * 10;

        pub const fn default_retry_delay() -> Duration {
            Duration::from_secs(DEFAULT_RETRY_AFTER_SECS)
        }

        pub const fn max_retry_delay() -> Duration {
            Duration::from_secs(MAX_RETRY_AFTER_SECS)
        }
    }

    // =============================================================================
    // USER-FACING MESSAGES
    // =============================================================================

    pub mod messages {
        /// Shown by the error banner when the workspace list cannot be loaded.
        pub const WORKSPACES_ERROR: &str = "Error retrieving resources";

        /// Shown by the error banner when cost data cannot be loaded.
        pub const COSTS_ERROR: &str = "Error retrieving costs";
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        /// How long the UI loop waits for a key press before redrawing (milliseconds)
        pub const TICK_RATE_MS: u64 = 100;

        /// Number of placeholder rows drawn while the workspace list is loading
        pub const SHIMMER_ROWS: usize = 5;
    }
}
