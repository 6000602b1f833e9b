use crate::wire::HealthRes;
use triage_core::GuidanceMode;

/// Simple health service that can be used by the REST API and the CLI
///
/// Reports liveness together with the guidance mode chosen at startup, so operators can tell
/// whether the process is serving canned or model-assisted guidance.
#[derive(Clone, Debug)]
pub struct HealthService {
    mode: GuidanceMode,
}

impl HealthService {
    /// Creates a new instance of HealthService for the given guidance mode.
    pub fn new(mode: GuidanceMode) -> Self {
        Self { mode }
    }

    /// Check health.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health(&self) -> HealthRes {
        HealthRes {
            ok: true,
            message: "Triage service is alive".into(),
            guidance_mode: self.mode.as_str().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_guidance_mode() {
        let res = HealthService::new(GuidanceMode::Fallback).check_health();
        assert!(res.ok);
        assert_eq!(res.guidance_mode, "fallback");

        let res = HealthService::new(GuidanceMode::Model).check_health();
        assert_eq!(res.guidance_mode, "model");
    }
}
