use crate::types::HealthRes;
use symptom_core::DiagnosisService;

/// Health reporting shared by every API front end.
///
/// A degraded service is still alive (it answers requests with advisories), so health is
/// reported with `ok: false` and the load failure rather than as an error.
pub struct HealthService;

impl HealthService {
    /// Report the health of `service`.
    pub fn check_health(service: &DiagnosisService) -> HealthRes {
        match service.degraded_reason() {
            None => HealthRes {
                ok: true,
                message: format!(
                    "Symptom checker is alive ({} symptoms)",
                    service.vocabulary().len()
                ),
            },
            Some(reason) => HealthRes {
                ok: false,
                message: format!("Symptom checker is degraded: {}", reason),
            },
        }
    }
}
