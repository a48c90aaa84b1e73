//! Per-test-case locator settings.

use std::time::Duration;

use smartlocate_config::{LocatorConfig, PollingConfig};
use smartlocate_protocols::TagFilter;

/// Review polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    /// Give up after this long. `None` waits for the reviewer indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: None,
        }
    }
}

impl From<&PollingConfig> for PollOptions {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: config.interval(),
            timeout: config.timeout(),
        }
    }
}

/// Settings shared by every lookup of one test case.
#[derive(Debug, Clone)]
pub struct LocatorSession {
    pub test_case: String,
    pub interactive: bool,
    /// Tags tried before the built-in defaults.
    pub priority_tags: Vec<TagFilter>,
    pub poll: PollOptions,
}

impl LocatorSession {
    pub fn new(test_case: impl Into<String>) -> Self {
        Self {
            test_case: test_case.into(),
            interactive: false,
            priority_tags: Vec::new(),
            poll: PollOptions::default(),
        }
    }

    pub fn from_config(locator: &LocatorConfig, polling: &PollingConfig) -> Self {
        Self {
            test_case: locator.test_case.clone(),
            interactive: locator.interactive,
            priority_tags: locator
                .priority_tags
                .iter()
                .map(|t| TagFilter::from(t.as_str()))
                .collect(),
            poll: PollOptions::from(polling),
        }
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_priority_tags(mut self, tags: Vec<TagFilter>) -> Self {
        self.priority_tags = tags;
        self
    }

    pub fn with_poll_options(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }

    /// Priority tags followed by the defaults, without duplicates.
    pub fn tag_filters(&self) -> Vec<TagFilter> {
        TagFilter::with_defaults(&self.priority_tags)
    }
}
