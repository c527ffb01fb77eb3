//! Whole-page rendering.

use serde::{Deserialize, Serialize};

use super::surfaces::{BlockAttributes, BuilderWidgetSettings, WidgetArgs, WidgetInstance};
use super::{PageKind, RenderContext};

/// A classic widget placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPlacement {
    #[serde(default)]
    pub instance: WidgetInstance,
    #[serde(default)]
    pub args: WidgetArgs,
}

/// Everything on one page that can embed informers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: PageKind,
    /// Post content with shortcodes and placeholders.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub blocks: Vec<BlockAttributes>,
    #[serde(default)]
    pub widgets: Vec<WidgetPlacement>,
    #[serde(default)]
    pub builder_widgets: Vec<BuilderWidgetSettings>,
    /// Arguments of template helper calls; `None` asks for the default.
    #[serde(default)]
    pub template_tags: Vec<Option<String>>,
}

/// Rendered fragments, in the same order as the request.
///
/// Surfaces that are unavailable on this page render as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOutput {
    pub head: String,
    pub content: String,
    pub blocks: Vec<Option<String>>,
    pub widgets: Vec<Option<String>>,
    pub builder_widgets: Vec<Option<String>>,
    pub template_tags: Vec<String>,
    pub footer: String,
    pub resource_hints: Vec<String>,
}

impl RenderContext {
    /// Render every surface of `request`, then the head and footer.
    ///
    /// Bodies are rendered first so the head sees every queued ID. On public
    /// pages the loader is enqueued whenever a container was emitted.
    pub async fn render_page(&mut self, request: &PageRequest) -> PageOutput {
        let content = self.render_content(&request.content).await;

        let mut blocks = Vec::with_capacity(request.blocks.len());
        for attrs in &request.blocks {
            blocks.push(self.block(attrs).await);
        }

        let mut widgets = Vec::with_capacity(request.widgets.len());
        for placement in &request.widgets {
            widgets.push(self.widget(&placement.instance, &placement.args).await);
        }

        let mut builder_widgets = Vec::with_capacity(request.builder_widgets.len());
        for settings in &request.builder_widgets {
            builder_widgets.push(self.builder_widget(settings).await);
        }

        let mut template_tags = Vec::with_capacity(request.template_tags.len());
        for id in &request.template_tags {
            template_tags.push(self.template_tag(id.as_deref()).await);
        }

        if self.page() == PageKind::Public && !self.emitter.queued().is_empty() {
            self.emitter.enqueue_loader();
        }

        tracing::debug!("rendered page: {} informers queued", self.emitter.queued().len());

        PageOutput {
            head: self.head(),
            content,
            blocks,
            widgets,
            builder_widgets,
            template_tags,
            footer: self.footer(),
            resource_hints: self.resource_hints(),
        }
    }
}
