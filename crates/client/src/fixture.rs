//! Local informer directory served in debug mode.

use chrono::{DateTime, TimeZone, Utc};
use informers_core::InformerRecord;

fn created_at() -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, 9, 30, 19, 7, 37).single()
}

fn record(informer_id: &str, domain: &str, active: bool) -> InformerRecord {
    InformerRecord { informer_id: informer_id.into(), domain: domain.into(), active, created_at: created_at() }
}

/// Fixed directory: two active sites, one inactive, one subdomain.
pub fn informers() -> Vec<InformerRecord> {
    vec![
        record("11111111-1111-1111-aa3a-5bb2d44d4fd1", "https://www.wordpress.org", true),
        record("22222222-2222-2222-bbf0-ee43197fdd39", "https://localhost", true),
        record("33333333-3333-3333-acf3-2b1c6d6f3b35", "http://example.com", false),
        record("44444444-4444-4444-acf3-2b1c6d6f3b35", "https://subdomain.example.com", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let list = informers();
        assert_eq!(list.len(), 4);
        assert_eq!(list.iter().filter(|i| i.active).count(), 3);
        assert!(list.iter().all(|i| i.created_at.map(|t| t.to_rfc3339()) == Some("2025-09-30T19:07:37+00:00".into())));
        assert_eq!(list[3].domain, "https://subdomain.example.com");
    }
}
