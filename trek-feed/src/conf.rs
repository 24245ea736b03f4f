use envconfig::Envconfig;

/// Fetch policy knobs for the resolver. Library callers can construct this
/// directly; services pick it up from the environment.
#[derive(Envconfig, Clone, Debug)]
pub struct ResolverConfig {
    #[envconfig(from = "FEED_FETCH_TIMEOUT_MS", default = "5000")]
    pub fetch_timeout_ms: u64,
    /// Total attempts per fetch, counting the first one. Only transient
    /// upstream failures consume extra attempts.
    #[envconfig(from = "FEED_FETCH_ATTEMPTS", default = "2")]
    pub fetch_attempts: u32,
    #[envconfig(from = "FEED_RETRY_BACKOFF_MS", default = "50")]
    pub retry_backoff_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 5000,
            fetch_attempts: 2,
            retry_backoff_ms: 50,
        }
    }
}
