use crate::dto::HealthRes;

/// Health check shared by every front-end of the service.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Returns a `HealthRes` indicating the service is up.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Entrevistas API is alive".into(),
        }
    }
}
