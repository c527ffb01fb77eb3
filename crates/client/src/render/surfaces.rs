//! Entry points for each embedding surface.

use serde::{Deserialize, Serialize};

use super::markup::{ShortcodeMatch, ShortcodeTag, find_placeholders, find_shortcodes};
use super::preview::{empty_preview, preview_box};
use super::{PageKind, RenderContext};

pub const SHORTCODE_NO_ID: &str = "<!-- Meteoprog informer: ID not set -->";
pub const PLACEHOLDER_NO_ID: &str = "<!-- Meteoprog informer: default ID not set -->";
pub const BLOCK_NO_ID: &str = "<!-- Meteoprog Weather Widget: default ID not set -->";
pub const WIDGET_NO_ID: &str = "<!-- Meteoprog informer: no ID set -->";
pub const TEMPLATE_TAG_NO_ID: &str = "<!-- no informer ID -->";

/// Attribute bag of the informer block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAttributes {
    #[serde(default)]
    pub id: String,
}

/// Saved settings of a classic widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetInstance {
    #[serde(default)]
    pub id: Option<String>,
}

/// Theme-provided wrapper markup around a classic widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetArgs {
    #[serde(default)]
    pub before_widget: String,
    #[serde(default)]
    pub after_widget: String,
}

/// Settings of a page-builder informer widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderWidgetSettings {
    #[serde(default)]
    pub informer_id: String,
}

impl RenderContext {
    /// `[meteoprog_informer id="..."]`
    pub async fn shortcode(&mut self, id: &str) -> String {
        let id = self.resolver.resolve(id).await;
        if id.is_empty() {
            return SHORTCODE_NO_ID.to_string();
        }
        self.emitter.build_container(&id)
    }

    /// `{meteoprog_informer}` (None) or `{meteoprog_informer_<id>}`.
    pub async fn placeholder(&mut self, id: Option<&str>) -> String {
        let id = self.resolver.resolve(id.unwrap_or_default()).await;
        if id.is_empty() {
            return PLACEHOLDER_NO_ID.to_string();
        }
        self.emitter.build_container(&id)
    }

    /// Replace every well-formed placeholder in `content`.
    pub async fn replace_placeholders(&mut self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut last = 0;
        for found in find_placeholders(content) {
            out.push_str(&content[last..found.range.start]);
            out.push_str(&self.placeholder(found.id.as_deref()).await);
            last = found.range.end;
        }
        out.push_str(&content[last..]);
        out
    }

    /// Expand the informer shortcodes in `content`.
    ///
    /// `[su_meteoprog_informer]` stays literal when that integration is off.
    pub async fn do_shortcodes(&mut self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut last = 0;
        for found in find_shortcodes(content) {
            out.push_str(&content[last..found.range.start]);
            let raw = &content[found.range.clone()];
            out.push_str(&self.expand_shortcode(&found, raw).await);
            last = found.range.end;
        }
        out.push_str(&content[last..]);
        out
    }

    async fn expand_shortcode(&mut self, found: &ShortcodeMatch, raw: &str) -> String {
        if let Some(literal) = &found.escaped {
            return literal.clone();
        }
        match found.tag {
            ShortcodeTag::Informer => self.shortcode(found.id()).await,
            ShortcodeTag::ShortcodesUltimate if self.features.shortcodes_ultimate => {
                self.su_shortcode(found.id()).await
            }
            ShortcodeTag::ShortcodesUltimate => raw.to_string(),
        }
    }

    /// Post content filter: placeholders first, then shortcodes.
    pub async fn render_content(&mut self, content: &str) -> String {
        let content = self.replace_placeholders(content).await;
        self.do_shortcodes(&content).await
    }

    /// Informer block render callback.
    ///
    /// None when blocks are unavailable: the block editor is off or this is
    /// the page builder's canvas.
    pub async fn block(&mut self, attrs: &BlockAttributes) -> Option<String> {
        if !self.features.block_editor || self.page() == PageKind::BuilderEditor {
            return None;
        }
        let id = self.resolver.resolve(&attrs.id).await;
        if id.is_empty() {
            return Some(BLOCK_NO_ID.to_string());
        }
        self.emitter.enqueue_loader();
        Some(self.emitter.build_container(&id))
    }

    /// Classic widget, wrapped in the theme's before/after markup.
    ///
    /// None inside the page builder's canvas, where the widget is not registered.
    pub async fn widget(&mut self, instance: &WidgetInstance, args: &WidgetArgs) -> Option<String> {
        if self.page() == PageKind::BuilderEditor {
            return None;
        }
        let id = self.resolver.resolve(instance.id.as_deref().unwrap_or_default()).await;
        let body = if id.is_empty() { WIDGET_NO_ID.to_string() } else { self.emitter.build_container(&id) };
        Some(format!("{}{}{}", args.before_widget, body, args.after_widget))
    }

    /// Page-builder widget.
    ///
    /// In the builder canvas this is a static preview with a domain badge and
    /// never queues anything. None when the page builder is unavailable.
    pub async fn builder_widget(&mut self, settings: &BuilderWidgetSettings) -> Option<String> {
        if !self.features.page_builder {
            return None;
        }
        let id = self.resolver.resolve(&settings.informer_id).await;
        let editing = self.page() == PageKind::BuilderEditor;

        if id.is_empty() {
            return Some(if editing { empty_preview() } else { String::new() });
        }

        if editing {
            let status = self.domain_status(&id).await;
            return Some(preview_box(&id, status));
        }

        self.emitter.enqueue_loader();
        Some(self.emitter.build_container(&id))
    }

    /// `[su_meteoprog_informer id="..."]`
    ///
    /// Admin screens get a static preview; public pages get the informer.
    pub async fn su_shortcode(&mut self, id: &str) -> String {
        let id = self.resolver.resolve(id).await;

        if self.page() == PageKind::Admin {
            let status = self.domain_status(&id).await;
            return preview_box(&id, status);
        }

        if id.is_empty() {
            return SHORTCODE_NO_ID.to_string();
        }
        self.emitter.enqueue_loader();
        self.emitter.build_container(&id)
    }

    /// Theme template helper `meteoprog_informer($id)`.
    pub async fn template_tag(&mut self, id: Option<&str>) -> String {
        let id = self.resolver.resolve(id.unwrap_or_default()).await;
        if id.is_empty() {
            return TEMPLATE_TAG_NO_ID.to_string();
        }
        self.emitter.build_container(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::context;
    use super::*;
    use informers_core::Features;
    use scraper::{Html, Selector};

    const FIXTURE_OK: &str = "33333333-3333-3333-acf3-2b1c6d6f3b35";

    fn container_ids(html: &str) -> Vec<String> {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("div[id^=meteoprogData_]").unwrap();
        doc.select(&sel).filter_map(|e| e.value().id().map(str::to_string)).collect()
    }

    #[tokio::test]
    async fn test_shortcode_no_id() {
        let mut ctx = context(PageKind::Public, "").await;
        assert_eq!(ctx.shortcode("").await, SHORTCODE_NO_ID);
        assert!(ctx.emitter().queued().is_empty());
    }

    #[tokio::test]
    async fn test_shortcode_with_id() {
        let mut ctx = context(PageKind::Public, "").await;
        let html = ctx.shortcode("123").await;
        assert_eq!(container_ids(&html), ["meteoprogData_123"]);
    }

    #[tokio::test]
    async fn test_shortcode_falls_back_to_default() {
        let mut ctx = context(PageKind::Public, "def-1").await;
        assert_eq!(container_ids(&ctx.shortcode("").await), ["meteoprogData_def-1"]);
    }

    #[tokio::test]
    async fn test_padded_shortcode_id_keeps_explicit_value() {
        let mut ctx = context(PageKind::Public, "def-1").await;
        let html = ctx.shortcode(" x ").await;
        assert_eq!(container_ids(&html), ["meteoprogData_x"]);
        assert_eq!(ctx.emitter().queued(), ["x"]);
    }

    #[tokio::test]
    async fn test_placeholders() {
        let mut ctx = context(PageKind::Public, "def-1").await;
        let html = ctx.replace_placeholders("<p>{meteoprog_informer_aaa}</p><p>{meteoprog_informer}</p>").await;
        assert_eq!(container_ids(&html), ["meteoprogData_aaa", "meteoprogData_def-1"]);
        assert_eq!(ctx.emitter().queued(), ["aaa", "def-1"]);
    }

    #[tokio::test]
    async fn test_placeholder_without_default() {
        let mut ctx = context(PageKind::Public, "").await;
        assert_eq!(ctx.replace_placeholders("x{meteoprog_informer}y").await, format!("x{PLACEHOLDER_NO_ID}y"));
    }

    #[tokio::test]
    async fn test_malformed_placeholder_left_literal() {
        let mut ctx = context(PageKind::Public, "def-1").await;
        let text = "before {meteoprog_informer_} after";
        assert_eq!(ctx.replace_placeholders(text).await, text);
        assert!(ctx.emitter().queued().is_empty());
    }

    #[tokio::test]
    async fn test_render_content_mixed() {
        let mut ctx = context(PageKind::Public, "").await;
        let html = ctx
            .render_content("[meteoprog_informer id=\"aaa\"] {meteoprog_informer_bbb} [meteoprog_informer id=\"aaa\"]")
            .await;
        assert_eq!(container_ids(&html).len(), 3);
        assert_eq!(ctx.emitter().queued(), ["bbb", "aaa"]);

        let head = ctx.head();
        assert_eq!(head.matches("push(").count(), 2);
    }

    #[tokio::test]
    async fn test_escaped_shortcode_kept() {
        let mut ctx = context(PageKind::Public, "def-1").await;
        assert_eq!(ctx.do_shortcodes("[[meteoprog_informer]]").await, "[meteoprog_informer]");
        assert!(ctx.emitter().queued().is_empty());
    }

    #[tokio::test]
    async fn test_su_shortcode_disabled_left_literal() {
        let mut ctx = context(PageKind::Public, "").await;
        ctx.features = Features { shortcodes_ultimate: false, ..Features::default() };
        let text = "[su_meteoprog_informer id=\"x\"]";
        assert_eq!(ctx.do_shortcodes(text).await, text);
    }

    #[tokio::test]
    async fn test_su_shortcode_public_enqueues_loader() {
        let mut ctx = context(PageKind::Public, "").await;
        let html = ctx.do_shortcodes("[su_meteoprog_informer id=\"x\"]").await;
        assert_eq!(container_ids(&html), ["meteoprogData_x"]);
        assert!(ctx.emitter().loader_enqueued());
    }

    #[tokio::test]
    async fn test_su_shortcode_public_no_id() {
        let mut ctx = context(PageKind::Public, "").await;
        assert_eq!(ctx.su_shortcode("").await, SHORTCODE_NO_ID);
    }

    #[tokio::test]
    async fn test_su_shortcode_admin_preview() {
        let mut ctx = context(PageKind::Admin, "").await;
        let html = ctx.su_shortcode(FIXTURE_OK).await;
        assert!(html.contains("Domain OK"));
        assert!(html.contains(FIXTURE_OK));
        assert!(container_ids(&html).is_empty());
        assert!(ctx.emitter().queued().is_empty());
        assert!(!ctx.emitter().loader_enqueued());
    }

    #[tokio::test]
    async fn test_block_renders_and_enqueues() {
        let mut ctx = context(PageKind::Public, "").await;
        let html = ctx.block(&BlockAttributes { id: "blk".into() }).await.unwrap();
        assert_eq!(container_ids(&html), ["meteoprogData_blk"]);
        assert!(ctx.emitter().loader_enqueued());
    }

    #[tokio::test]
    async fn test_block_no_id() {
        let mut ctx = context(PageKind::Public, "").await;
        assert_eq!(ctx.block(&BlockAttributes::default()).await.as_deref(), Some(BLOCK_NO_ID));
        assert!(!ctx.emitter().loader_enqueued());
    }

    #[tokio::test]
    async fn test_block_unavailable() {
        let mut ctx = context(PageKind::BuilderEditor, "").await;
        assert!(ctx.block(&BlockAttributes { id: "blk".into() }).await.is_none());

        let mut ctx = context(PageKind::Public, "").await;
        ctx.features = Features { block_editor: false, ..Features::default() };
        assert!(ctx.block(&BlockAttributes { id: "blk".into() }).await.is_none());
    }

    #[tokio::test]
    async fn test_widget_wrapped() {
        let mut ctx = context(PageKind::Public, "").await;
        let args = WidgetArgs { before_widget: "<section>".into(), after_widget: "</section>".into() };

        let empty = ctx.widget(&WidgetInstance::default(), &args).await.unwrap();
        assert_eq!(empty, format!("<section>{WIDGET_NO_ID}</section>"));

        let html = ctx.widget(&WidgetInstance { id: Some("w1".into()) }, &args).await.unwrap();
        assert!(html.starts_with("<section>"));
        assert!(html.ends_with("</section>"));
        assert_eq!(container_ids(&html), ["meteoprogData_w1"]);
    }

    #[tokio::test]
    async fn test_widget_not_registered_in_builder_canvas() {
        let mut ctx = context(PageKind::BuilderEditor, "").await;
        assert!(ctx.widget(&WidgetInstance { id: Some("w1".into()) }, &WidgetArgs::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_builder_widget_public() {
        let mut ctx = context(PageKind::Public, "").await;
        let html = ctx.builder_widget(&BuilderWidgetSettings { informer_id: "el".into() }).await.unwrap();
        assert_eq!(container_ids(&html), ["meteoprogData_el"]);
        assert!(ctx.emitter().loader_enqueued());

        let none = ctx.builder_widget(&BuilderWidgetSettings::default()).await;
        assert_eq!(none.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_builder_widget_editor_preview() {
        let mut ctx = context(PageKind::BuilderEditor, "").await;
        let html = ctx.builder_widget(&BuilderWidgetSettings { informer_id: FIXTURE_OK.into() }).await.unwrap();
        assert!(html.contains("Domain OK"));
        assert!(container_ids(&html).is_empty());
        assert!(ctx.emitter().queued().is_empty());

        let empty = ctx.builder_widget(&BuilderWidgetSettings::default()).await.unwrap();
        assert!(empty.contains("No informer selected — default preview"));
    }

    #[tokio::test]
    async fn test_builder_widget_disabled() {
        let mut ctx = context(PageKind::Public, "").await;
        ctx.features = Features { page_builder: false, ..Features::default() };
        assert!(ctx.builder_widget(&BuilderWidgetSettings { informer_id: "el".into() }).await.is_none());
    }

    #[tokio::test]
    async fn test_template_tag() {
        let mut ctx = context(PageKind::Public, "").await;
        assert_eq!(ctx.template_tag(None).await, TEMPLATE_TAG_NO_ID);
        assert_eq!(container_ids(&ctx.template_tag(Some("t1")).await), ["meteoprogData_t1"]);
    }

    #[tokio::test]
    async fn test_default_change_visible_after_invalidate() {
        let mut ctx = context(PageKind::Public, "first").await;
        assert_eq!(container_ids(&ctx.shortcode("").await), ["meteoprogData_first"]);

        ctx.service.store().set_default_informer_id("second").await.unwrap();
        assert_eq!(container_ids(&ctx.shortcode("").await), ["meteoprogData_first"]);

        ctx.resolver_mut().invalidate();
        assert_eq!(container_ids(&ctx.shortcode("").await), ["meteoprogData_second"]);
    }
}
