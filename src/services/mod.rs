pub mod activity_service;
pub mod activity_service_impl;
pub use activity_service::{ACTIVITY_LIST_LIMIT, ActivityError, ActivityService};
pub use activity_service_impl::SeaOrmActivityService;

pub mod advisor_service;
pub mod advisor_service_impl;
pub use advisor_service::{
    AdvisorDraft, AdvisorError, AdvisorService, DEFAULT_REVOCATION_REASON,
};
pub use advisor_service_impl::SeaOrmAdvisorService;
