use std::time::Duration;

pub const DEFAULT_REPLIES_PAGE_SIZE: usize = 5;
pub const DEFAULT_TRANSIENT_TTL_MS: u64 = 3000;

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ThreadConfig {
    /// How many replies get revealed on expansion, and on each "show more"
    pub replies_page_size: usize,

    /// How long a confirmed transient comment stays displayed before being dropped
    pub transient_ttl_ms: u64,
}

impl Default for ThreadConfig {
    fn default() -> ThreadConfig {
        ThreadConfig {
            replies_page_size: DEFAULT_REPLIES_PAGE_SIZE,
            transient_ttl_ms: DEFAULT_TRANSIENT_TTL_MS,
        }
    }
}

impl ThreadConfig {
    pub fn page_size(&self) -> usize {
        self.replies_page_size.max(1)
    }

    pub fn transient_ttl(&self) -> Duration {
        Duration::from_millis(self.transient_ttl_ms)
    }
}
