pub mod error;
pub mod tenant;

pub use error::{ApiError, ApiResult};
pub use tenant::{resolve_tenant, TenantContext, TENANT_HEADER};

use crate::events::EventBus;
use crate::services::{
    AvailabilityService, BookingService, ResourceService, SuggestionService, WaitlistService,
};

#[derive(Clone)]
pub struct AppState {
    pub availability_service: AvailabilityService,
    pub booking_service: BookingService,
    pub suggestion_service: SuggestionService,
    pub waitlist_service: WaitlistService,
    pub resource_service: ResourceService,
    pub event_bus: EventBus,
}
