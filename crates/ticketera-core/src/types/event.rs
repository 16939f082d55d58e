//! Public event catalogue contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for event listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Field to sort event listings by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Price,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Price => "price",
            SortField::Title => "title",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filters for `GET /events`.
///
/// Only filters that are set are sent; pagination and sorting always are,
/// with defaults applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilters {
    pub city: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
}

impl EventFilters {
    /// Query string pairs in the order the API documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("city", city.to_string()));
        }
        if let Some(from) = self.date_from.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("date_from", from.to_string()));
        }
        if let Some(to) = self.date_to.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("date_to", to.to_string()));
        }
        if let Some(min) = self.price_min {
            pairs.push(("price_min", min.to_string()));
        }
        if let Some(max) = self.price_max {
            pairs.push(("price_max", max.to_string()));
        }

        pairs.push(("page", self.page.filter(|p| *p > 0).unwrap_or(1).to_string()));
        pairs.push((
            "limit",
            self.limit
                .filter(|l| *l > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .to_string(),
        ));
        pairs.push(("sort", self.sort.unwrap_or_default().as_str().to_string()));
        pairs.push(("order", self.order.unwrap_or_default().as_str().to_string()));

        pairs
    }
}

/// Permission flags computed by the server for a public event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventActions {
    pub can_purchase: bool,
    pub can_reserve: bool,
    pub is_available: bool,
    pub show_countdown: bool,
}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

/// Venue summary shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSummary {
    pub name: String,
    pub city: String,
}

/// An entry in the public event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub venue: VenueSummary,
    pub min_price: f64,
    pub max_price: f64,
    pub available_tickets: u64,
    #[serde(default)]
    pub actions: EventActions,
}

/// Response from `GET /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsList {
    pub data: Vec<EventListItem>,
    pub pagination: Pagination,
}

/// Geographic coordinates of a venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Full venue information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// A priced seating zone of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub capacity: u64,
    pub available: u64,
    #[serde(default)]
    pub sort_order: i32,
}

/// Refund terms of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundPolicy {
    pub allow_refunds: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refundable_until_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_percentage: Option<f64>,
}

/// The organizer of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Response from `GET /events/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<u8>,
    pub venue: Venue,
    #[serde(default)]
    pub zones: Vec<Zone>,
    pub refund_policy: RefundPolicy,
    pub producer: Producer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions: Option<String>,
    #[serde(default)]
    pub allow_transfers: bool,
    #[serde(default)]
    pub actions: EventActions,
}

impl EventDetail {
    /// Zones ordered for display.
    pub fn sorted_zones(&self) -> Vec<&Zone> {
        let mut zones: Vec<&Zone> = self.zones.iter().collect();
        zones.sort_by_key(|z| z.sort_order);
        zones
    }

    /// Look up a zone by id.
    pub fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }
}

/// Response from `GET /events/:id/availability`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: u64,
    pub reserved: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_filters_only_send_paging_and_sorting() {
        let pairs = EventFilters::default().query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "1".to_string()),
                ("limit", "20".to_string()),
                ("sort", "date".to_string()),
                ("order", "asc".to_string()),
            ]
        );
    }

    #[test]
    fn set_filters_are_sent_with_snake_case_keys() {
        let filters = EventFilters {
            city: Some("Santiago".into()),
            date_from: Some("2025-02-01".into()),
            price_max: Some(50000.0),
            page: Some(3),
            sort: Some(SortField::Price),
            order: Some(SortOrder::Desc),
            ..Default::default()
        };

        let pairs = filters.query_pairs();
        assert!(pairs.contains(&("city", "Santiago".to_string())));
        assert!(pairs.contains(&("date_from", "2025-02-01".to_string())));
        assert!(pairs.contains(&("price_max", "50000".to_string())));
        assert!(pairs.contains(&("page", "3".to_string())));
        assert!(pairs.contains(&("sort", "price".to_string())));
        assert!(pairs.contains(&("order", "desc".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "price_min" || *k == "date_to"));
    }

    #[test]
    fn empty_city_is_not_sent() {
        let filters = EventFilters {
            city: Some(String::new()),
            ..Default::default()
        };
        assert!(!filters.query_pairs().iter().any(|(k, _)| *k == "city"));
    }

    #[test]
    fn event_detail_parses_and_sorts_zones() {
        let detail: EventDetail = serde_json::from_value(json!({
            "id": "ev1",
            "title": "Festival",
            "description": "Música",
            "startDateTime": "2025-03-01T21:00:00Z",
            "endDateTime": "2025-03-02T02:00:00Z",
            "venue": {
                "id": "v1",
                "name": "Movistar Arena",
                "address": "Av. Beaucheff 1204",
                "city": "Santiago",
                "country": "CL"
            },
            "zones": [
                {"id": "z2", "name": "Cancha", "price": 35000, "capacity": 500, "available": 10, "sortOrder": 2},
                {"id": "z1", "name": "VIP", "price": 90000, "capacity": 100, "available": 0, "sortOrder": 1}
            ],
            "refundPolicy": {"allowRefunds": true, "refundableUntilHours": 48},
            "producer": {"name": "Prod SpA", "email": "hola@prod.cl"},
            "allowTransfers": true,
            "actions": {"canPurchase": true, "canReserve": true, "isAvailable": true, "showCountdown": false}
        }))
        .unwrap();

        let names: Vec<&str> = detail.sorted_zones().iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["VIP", "Cancha"]);
        assert_eq!(detail.zone("z2").unwrap().available, 10);
        assert!(detail.actions.can_purchase);
    }
}
