use crate::domain::entities::{AlternativeDateSuggestion, QueryWindow};
use crate::domain::ports::resource_repository::ResourceRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::services::AvailabilityService;
use chrono::Duration;
use std::sync::Arc;

/// Offers nearby alternative date ranges when the requested range is
/// unavailable. Candidates keep the requested duration and are ranked by
/// calendar distance from the requested start, then by price.
#[derive(Clone)]
pub struct SuggestionService {
    availability_service: AvailabilityService,
    resources: Arc<dyn ResourceRepository>,
    scan_days: i64,
}

impl SuggestionService {
    pub fn new(
        availability_service: AvailabilityService,
        resources: Arc<dyn ResourceRepository>,
        scan_days: i64,
    ) -> Self {
        Self {
            availability_service,
            resources,
            scan_days,
        }
    }

    pub async fn suggest_alternatives(
        &self,
        tenant_id: &str,
        service_id: &str,
        requested_start: &str,
        requested_end: &str,
        number_of_pets: i64,
        max_results: usize,
    ) -> ApiResult<Vec<AlternativeDateSuggestion>> {
        if tenant_id.trim().is_empty() {
            return Err(ApiError::Unauthorized);
        }
        if service_id.trim().is_empty() {
            return Err(ApiError::BadRequest("serviceId is required".to_string()));
        }
        if max_results == 0 {
            return Err(ApiError::BadRequest(
                "maxResults must be greater than zero".to_string(),
            ));
        }
        if number_of_pets < 1 {
            return Err(ApiError::BadRequest(
                "numberOfPets must be at least 1".to_string(),
            ));
        }

        let requested =
            QueryWindow::resolve(None, Some(requested_start), Some(requested_end))?;

        let offering = self
            .resources
            .get_service_offering(tenant_id, service_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Service {} not found", service_id)))?;

        let pool = self
            .resources
            .list_resources_for_type(tenant_id, offering.resource_type, number_of_pets)
            .await?;
        if pool.is_empty() {
            return Ok(Vec::new());
        }
        let pool_ids: Vec<String> = pool.iter().map(|r| r.id.clone()).collect();

        let requested_price = offering.quote(&requested, number_of_pets);
        let duration = requested.end - requested.start;

        // Shifted copies of the requested range within ±scan_days, earlier
        // dates first within the same distance.
        let mut candidates = Vec::new();
        for distance in 1..=self.scan_days {
            for offset in [-distance, distance] {
                let start = requested.start + Duration::days(offset);
                let window = QueryWindow {
                    start,
                    end: start + duration,
                };
                candidates.push((distance, window));
            }
        }

        let mut qualifying = Vec::new();
        for (distance, window) in candidates {
            let batch = self
                .availability_service
                .check_availability_batch(tenant_id, &pool_ids, &window)
                .await?;
            let available_count = batch
                .resources
                .iter()
                .filter(|r| r.is_available)
                .count() as i64;
            if available_count == 0 {
                continue;
            }

            let price = offering.quote(&window, number_of_pets);
            let savings = (requested_price > price).then(|| requested_price - price);
            qualifying.push((distance, window, available_count, price, savings));
        }

        // Rank: calendar distance ascending, then price ascending.
        qualifying.sort_by(|a, b| a.0.cmp(&b.0).then(a.3.cmp(&b.3)));
        qualifying.truncate(max_results);

        let suggestions = qualifying
            .into_iter()
            .enumerate()
            .map(
                |(index, (distance, window, available_count, price, savings))| {
                    AlternativeDateSuggestion {
                        start_date: window.start_str(),
                        end_date: window.end_str(),
                        available_count,
                        price,
                        savings,
                        reason: if index == 0 {
                            "closest available date".to_string()
                        } else {
                            format!("{} day(s) from requested start", distance)
                        },
                        best_match: index == 0,
                    }
                },
            )
            .collect();

        Ok(suggestions)
    }
}
