//! Static preview boxes shown in editor canvases instead of live informers.

use super::escape::escape_html;
use super::options::DomainStatus;

pub const NO_SELECTION_TEXT: &str = "No informer selected — default preview";
const FRONTEND_ONLY_TEXT: &str = "Preview is visible only on frontend";
const TITLE: &str = "Meteoprog Weather Informer";
const CLOUD_ICON: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\" width=\"20\" height=\"20\" \
     fill=\"#007acc\"><path d=\"M6 19a4 4 0 0 1 0-8 5.5 5.5 0 0 1 10.74-1.62A4.5 4.5 0 1 1 18 19H6z\"/></svg>";

/// Placeholder box for a builder widget with no informer at all.
pub fn empty_preview() -> String {
    format!(
        "<div class=\"meteoprog-block-editor\">\
         <div class=\"meteoprog-preview-box\" style=\"min-height:250px;display:flex;flex-direction:column;\
         align-items:center;justify-content:center;text-align:center;border:1px solid #ccd0d4;\
         border-radius:4px;background:#f9f9f9;padding:12px;\">\
         <div style=\"margin-bottom:6px;\">{NO_SELECTION_TEXT}</div>\
         <div style=\"font-size:12px;color:#666;\">{FRONTEND_ONLY_TEXT}</div>\
         </div></div>"
    )
}

/// Preview card with the informer ID and an optional domain badge.
///
/// An empty `id` shows the default-preview notice and never a badge.
pub fn preview_box(id: &str, status: Option<DomainStatus>) -> String {
    let mut html = String::from(
        "<div class=\"meteoprog-block-editor\">\
         <div style=\"border:1px solid #dcdcde;border-radius:6px;background:#fff;\
         box-shadow:0 1px 2px rgba(0,0,0,0.05);padding:16px;text-align:center;\">\
         <div style=\"display:flex;align-items:center;justify-content:center;gap:8px;margin-bottom:10px;\">",
    );
    html.push_str(CLOUD_ICON);
    html.push_str(&format!("<strong>{TITLE}</strong></div>"));

    if id.is_empty() {
        html.push_str(&format!("<div style=\"margin-bottom:6px;font-weight:bold;\">{NO_SELECTION_TEXT}</div>"));
    } else {
        html.push_str(&format!(
            "<div class=\"meteoprog-preview-id\" style=\"font-family:monospace;font-size:13px;color:#555;\
             margin-bottom:6px;\">{}</div>",
            escape_html(id)
        ));
    }

    html.push_str(&format!("<div style=\"font-size:12px;color:#666;margin-bottom:10px;\">{FRONTEND_ONLY_TEXT}</div>"));

    if let Some(status) = status.filter(|_| !id.is_empty()) {
        html.push_str(&format!(
            "<span class=\"meteoprog-domain-badge\" style=\"display:inline-block;padding:4px 8px;border-radius:3px;\
             font-size:12px;font-weight:600;background:{};color:#fff;\">{}</span>",
            status.color(),
            status.badge()
        ));
    }

    html.push_str("</div></div>");
    html
}
