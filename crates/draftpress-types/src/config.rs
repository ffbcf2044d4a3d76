// Adapter-level timeout configuration.

use serde::{Deserialize, Serialize};

/// Timeouts applied to every adapter's HTTP client.
///
/// These are the only time bounds inside the core: the orchestrator itself
/// imposes no round deadline, and in-flight vendor calls are never cancelled.
/// A caller that needs a tighter budget enforces it outside the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterTimeout {
    /// Connection timeout in seconds (default: 10.0).
    pub connect: f64,
    /// Request timeout in seconds (default: 120.0).
    pub request: f64,
}

impl Default for AdapterTimeout {
    fn default() -> Self {
        Self {
            connect: 10.0,
            request: 120.0,
        }
    }
}
