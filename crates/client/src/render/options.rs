//! Selection options and domain badges for editor surfaces.

use informers_core::text::{host_from_url, mask_api_key};
use informers_core::{InformerRecord, find_informer};
use serde::{Deserialize, Serialize};

/// First entry of every informer selector.
pub const DEFAULT_OPTION_LABEL: &str = "Default widget (from settings)";

/// Whether an informer's registered domain matches this site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    Ok,
    Mismatch,
}

impl DomainStatus {
    fn compare(domain: &str, site_host: &str) -> Self {
        if host_from_url(domain) == site_host.to_lowercase() { Self::Ok } else { Self::Mismatch }
    }

    /// Badge text in preview boxes.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Ok => "Domain OK",
            Self::Mismatch => "Domain mismatch",
        }
    }

    /// Suffix in selector labels.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Mismatch => "Domain mismatch",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Ok => "#46b450",
            Self::Mismatch => "#dc3232",
        }
    }
}

/// Badge for `id`, or None when the informer or its domain is unknown.
pub fn domain_status(informers: &[InformerRecord], id: &str, site_host: &str) -> Option<DomainStatus> {
    let informer = find_informer(informers, id)?;
    if host_from_url(&informer.domain).is_empty() {
        return None;
    }
    Some(DomainStatus::compare(&informer.domain, site_host))
}

/// One entry of an informer selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Selector entries: the default choice, then one per informer with an ID.
///
/// Labels read `{domain} — {masked id} [OK|Domain mismatch]`.
pub fn informer_options(informers: &[InformerRecord], site_host: &str) -> Vec<SelectOption> {
    let mut options = vec![SelectOption { value: String::new(), label: DEFAULT_OPTION_LABEL.to_string() }];

    for informer in informers.iter().filter(|i| !i.informer_id.is_empty()) {
        let domain = if informer.domain.is_empty() { "No domain" } else { informer.domain.as_str() };
        let status = DomainStatus::compare(domain, site_host);
        options.push(SelectOption {
            value: informer.informer_id.clone(),
            label: format!("{domain} — {} [{}]", mask_api_key(&informer.informer_id), status.tag()),
        });
    }

    options
}
