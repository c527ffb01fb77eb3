//! Informer rendering for every embedding surface.
//!
//! All surfaces share one rule: resolve the effective informer ID (explicit
//! value, then the stored default), then emit a container through the
//! request's [`Emitter`]. An unresolved ID renders an inert HTML comment.
//!
//! State that lives for one page render (memoized default ID, queued IDs,
//! printed and enqueued flags) is held by a [`RenderContext`] created per
//! request. Nothing is shared between requests.

pub mod emitter;
pub mod escape;
pub mod loader;
pub mod markup;
pub mod options;
pub mod page;
pub mod preview;
pub mod resolver;
pub mod surfaces;

pub use emitter::Emitter;
pub use loader::LoaderSettings;
pub use options::{DomainStatus, SelectOption, domain_status, informer_options};
pub use page::{PageOutput, PageRequest};
pub use resolver::{DefaultIdSource, IdResolver, resolve_id};
pub use surfaces::{BlockAttributes, BuilderWidgetSettings, WidgetArgs, WidgetInstance};

use informers_core::Features;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::service::InformerService;

/// Where the page is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Visitor-facing page.
    #[default]
    Public,
    /// Admin screen, including the classic editor.
    Admin,
    /// The page builder's own editing canvas.
    BuilderEditor,
}

/// Request-scoped rendering state and collaborators.
#[derive(Debug)]
pub struct RenderContext {
    resolver: IdResolver,
    emitter: Emitter,
    service: InformerService,
    site_host: String,
    features: Features,
}

impl RenderContext {
    /// Context reading the default ID from the service's store.
    pub fn new(
        service: InformerService, page: PageKind, loader: LoaderSettings, site_host: impl Into<String>,
        features: Features,
    ) -> Self {
        let resolver = IdResolver::new(Arc::new(service.store().clone()));
        Self::with_resolver(service, resolver, page, loader, site_host, features)
    }

    pub fn with_resolver(
        service: InformerService, resolver: IdResolver, page: PageKind, loader: LoaderSettings,
        site_host: impl Into<String>, features: Features,
    ) -> Self {
        Self {
            resolver,
            emitter: Emitter::new(page, loader),
            service,
            site_host: site_host.into().to_lowercase(),
            features,
        }
    }

    pub fn page(&self) -> PageKind {
        self.emitter.page()
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut Emitter {
        &mut self.emitter
    }

    pub fn resolver_mut(&mut self) -> &mut IdResolver {
        &mut self.resolver
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn site_host(&self) -> &str {
        &self.site_host
    }

    /// Head markup: the data layer script, at most once.
    pub fn head(&mut self) -> String {
        self.emitter.emit_data_layer_script()
    }

    /// Footer markup: the loader, if any surface enqueued it.
    pub fn footer(&self) -> String {
        self.emitter.loader_markup()
    }

    pub fn resource_hints(&self) -> Vec<String> {
        self.emitter.resource_hints()
    }

    /// Badge for `id` using the cached directory.
    async fn domain_status(&self, id: &str) -> Option<DomainStatus> {
        if id.is_empty() {
            return None;
        }
        let informers = self.service.get_informers().await;
        domain_status(&informers, id, &self.site_host)
    }
}
