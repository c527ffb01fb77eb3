//! Container markup and the page-level data layer.
//!
//! Each emitted container queues its ID once, in first-seen order. The queue
//! is flushed into a single `meteoprogDataLayer` script at head time; later
//! flushes in the same request emit nothing.

use super::PageKind;
use super::escape::escape_js;
use super::loader::LoaderSettings;

/// Request-scoped emission state.
#[derive(Debug, Clone)]
pub struct Emitter {
    page: PageKind,
    loader: LoaderSettings,
    queued: Vec<String>,
    printed: bool,
    loader_enqueued: bool,
}

impl Emitter {
    pub fn new(page: PageKind, loader: LoaderSettings) -> Self {
        Self { page, loader, queued: Vec::new(), printed: false, loader_enqueued: false }
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    /// Container for `id`, queued for the data layer.
    ///
    /// An empty ID produces no markup and queues nothing.
    pub fn build_container(&mut self, id: &str) -> String {
        let id = id.trim();
        if id.is_empty() {
            return String::new();
        }

        let id_js = escape_js(id);
        let html = format!("\n<!-- meteoprog.com informer -->\n<div id=\"meteoprogData_{id_js}\"></div>\n");

        if !self.queued.contains(&id_js) {
            self.queued.push(id_js);
        }

        html
    }

    /// Escaped IDs in first-seen order.
    pub fn queued(&self) -> &[String] {
        &self.queued
    }

    pub fn is_printed(&self) -> bool {
        self.printed
    }

    /// The consolidated data layer script, once per request.
    ///
    /// Returns an empty string when nothing is queued or the script was
    /// already emitted. A flush with an empty queue does not mark the script
    /// printed: containers built after it still reach the next flush. Only a
    /// flush that emitted output suppresses later ones.
    pub fn emit_data_layer_script(&mut self) -> String {
        if self.printed || self.queued.is_empty() {
            return String::new();
        }

        let mut script = String::from("<script>window.meteoprogDataLayer=window.meteoprogDataLayer||[];");
        for id in &self.queued {
            script.push_str("window.meteoprogDataLayer.push({id:\"");
            script.push_str(id);
            script.push_str("\"});");
        }
        script.push_str("</script>\n");

        self.printed = true;
        script
    }

    /// Register the loader asset. Idempotent; a no-op in the builder canvas.
    ///
    /// Returns true when this call enqueued it.
    pub fn enqueue_loader(&mut self) -> bool {
        if self.page == PageKind::BuilderEditor || self.loader_enqueued {
            return false;
        }
        self.loader_enqueued = true;
        true
    }

    pub fn loader_enqueued(&self) -> bool {
        self.loader_enqueued
    }

    pub fn loader(&self) -> &LoaderSettings {
        &self.loader
    }

    /// Loader markup for the page footer, if the loader was enqueued.
    pub fn loader_markup(&self) -> String {
        if self.loader_enqueued { self.loader.markup() } else { String::new() }
    }

    /// Preconnect origins for the page head.
    ///
    /// Only the loader origin, and only on public pages with at least one
    /// queued informer.
    pub fn resource_hints(&self) -> Vec<String> {
        if self.page != PageKind::Public || self.queued.is_empty() {
            return Vec::new();
        }
        self.loader.origin().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public() -> Emitter {
        Emitter::new(PageKind::Public, LoaderSettings::default())
    }

    #[test]
    fn test_container_markup() {
        let mut emitter = public();
        assert_eq!(emitter.build_container("123"), "\n<!-- meteoprog.com informer -->\n<div id=\"meteoprogData_123\"></div>\n");
        assert_eq!(emitter.queued(), ["123"]);
    }

    #[test]
    fn test_empty_id_emits_nothing() {
        let mut emitter = public();
        assert_eq!(emitter.build_container(""), "");
        assert!(emitter.queued().is_empty());
        assert_eq!(emitter.emit_data_layer_script(), "");
    }

    #[test]
    fn test_container_trims_id() {
        let mut emitter = public();
        assert!(emitter.build_container(" 123 ").contains("id=\"meteoprogData_123\""));
        emitter.build_container("123");
        assert_eq!(emitter.queued(), ["123"]);

        assert_eq!(emitter.build_container("   "), "");
        assert_eq!(emitter.queued(), ["123"]);
    }

    #[test]
    fn test_dedup_and_single_push() {
        let mut emitter = public();
        emitter.build_container("aaa");
        emitter.build_container("aaa");
        assert_eq!(emitter.queued(), ["aaa"]);

        let script = emitter.emit_data_layer_script();
        assert_eq!(script.matches("<script>").count(), 1);
        assert_eq!(script.matches("push({id:\"aaa\"})").count(), 1);
    }

    #[test]
    fn test_data_layer_order_and_format() {
        let mut emitter = public();
        emitter.build_container("bbb");
        emitter.build_container("aaa");
        emitter.build_container("bbb");

        assert_eq!(
            emitter.emit_data_layer_script(),
            "<script>window.meteoprogDataLayer=window.meteoprogDataLayer||[];\
             window.meteoprogDataLayer.push({id:\"bbb\"});\
             window.meteoprogDataLayer.push({id:\"aaa\"});</script>\n"
        );
    }

    #[test]
    fn test_data_layer_printed_once() {
        let mut emitter = public();
        emitter.build_container("aaa");
        assert!(!emitter.emit_data_layer_script().is_empty());
        assert!(emitter.is_printed());

        emitter.build_container("bbb");
        assert_eq!(emitter.emit_data_layer_script(), "");
        assert_eq!(emitter.queued(), ["aaa", "bbb"]);
    }

    #[test]
    fn test_empty_flush_not_printed() {
        let mut emitter = public();
        assert_eq!(emitter.emit_data_layer_script(), "");
        assert!(!emitter.is_printed());

        emitter.build_container("aaa");
        assert!(emitter.emit_data_layer_script().contains("aaa"));
        assert!(emitter.is_printed());
        assert_eq!(emitter.emit_data_layer_script(), "");
    }

    #[test]
    fn test_enqueue_loader_idempotent() {
        let mut emitter = public();
        assert!(emitter.enqueue_loader());
        assert!(!emitter.enqueue_loader());
        assert!(emitter.loader_enqueued());
        assert_eq!(emitter.loader_markup().matches("MeteoprogLoaderConfig = ").count(), 1);
    }

    #[test]
    fn test_enqueue_loader_skipped_in_builder_canvas() {
        let mut emitter = Emitter::new(PageKind::BuilderEditor, LoaderSettings::default());
        assert!(!emitter.enqueue_loader());
        assert!(!emitter.loader_enqueued());
        assert_eq!(emitter.loader_markup(), "");
    }

    #[test]
    fn test_resource_hints() {
        let mut emitter = public();
        assert!(emitter.resource_hints().is_empty());

        emitter.build_container("abc123");
        assert_eq!(emitter.resource_hints(), ["https://cdn.meteoprog.net"]);

        let mut admin = Emitter::new(PageKind::Admin, LoaderSettings::default());
        admin.build_container("abc123");
        assert!(admin.resource_hints().is_empty());
    }
}
