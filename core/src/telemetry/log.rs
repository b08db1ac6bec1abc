use log::{debug, info, warn};

/// Channel-tagged front end over the `log` facade.
#[derive(Debug, Clone)]
pub struct LogManager {
    channel: String,
}

impl LogManager {
    pub fn new() -> Self {
        Self::for_channel("default")
    }

    pub fn for_channel(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.channel, message);
    }

    pub fn debug(&self, message: &str) {
        debug!("[{}] {}", self.channel, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.channel, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
