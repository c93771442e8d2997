use tracing::debug;

/// Receiver for switch changes (group, value, target object).
pub trait AudioSink {
    fn set_switch(&mut self, group: &str, value: &str, target: &str);
}

/// Sink that only logs, for headless runs.
#[derive(Debug, Default)]
pub struct TracingAudioSink {
    /// Number of switch calls received
    pub calls: usize,
}

impl AudioSink for TracingAudioSink {
    fn set_switch(&mut self, group: &str, value: &str, target: &str) {
        self.calls += 1;
        debug!(group, value, target, "audio switch");
    }
}
