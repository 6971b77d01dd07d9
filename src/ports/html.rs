// src/ports/html.rs
use crate::domain::Pad;
use crate::infrastructure::config::EditorConfig;
use html_escape::encode_text;
use serde_json::json;
use tracing::instrument;

pub const PAD_SCRIPT: &str = include_str!("../../assets/pad.js");
pub const NOTES_SCRIPT: &str = include_str!("../../assets/notes.js");

const QRCODE_CDN: &str = "https://cdnjs.cloudflare.com/ajax/libs/qrcodejs/1.0.0/qrcode.min.js";

#[derive(Debug, Clone)]
pub struct HtmlPresenter {
    editor: EditorConfig,
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self::with_editor_config(EditorConfig::default())
    }

    pub fn with_editor_config(editor: EditorConfig) -> Self {
        Self { editor }
    }

    /// Inline `<script>` assigning `window.EDGEPAD`.
    ///
    /// `</` is escaped so stored ids cannot close the script element.
    fn client_config(&self, pad_id: Option<&str>) -> String {
        let cfg = json!({
            "padId": pad_id,
            "saveDebounceMs": self.editor.save_debounce_ms,
            "maxImageWidth": self.editor.max_image_width,
            "jpegQuality": self.editor.jpeg_quality,
            "maxImageBytes": self.editor.max_image_bytes,
        });
        let literal = cfg.to_string().replace("</", "<\\/");
        format!("<script>window.EDGEPAD = {literal};</script>")
    }

    /// Editor page with the stored markup inlined as-is.
    #[instrument(level = "debug", skip(self, pad), fields(pad_id = %pad.id))]
    pub fn render_pad(&self, pad: &Pad) -> String {
        let id = encode_text(&pad.id);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>EdgePad - {id}</title>
  <script src="{qrcode}"></script>
  <style>
    :root {{
      --bg-color: #1e1e1e;
      --header-bg: #252526;
      --text-primary: #cccccc;
      --text-muted: #888888;
      --accent-blue: #007acc;
      --warning-bg: #333300;
      --warning-text: #ffcc00;
      --success-green: #4caf50;
      --danger-red: #f44336;
    }}
    body {{
      margin: 0;
      font-family: "Segoe UI", sans-serif;
      background: var(--bg-color);
      color: var(--text-primary);
      height: 100vh;
      display: flex;
      flex-direction: column;
      overflow: hidden;
    }}
    header {{
      background: var(--header-bg);
      padding: 15px 20px;
      display: flex;
      justify-content: space-between;
      align-items: flex-start;
      border-bottom: 1px solid #333;
    }}
    .header-left {{
      flex: 1;
      display: flex;
      flex-direction: column;
      gap: 8px;
      margin-right: 20px;
    }}
    .title-row {{ font-size: 1.1rem; font-weight: bold; color: #fff; }}
    .badge {{
      background: var(--accent-blue);
      color: white;
      font-size: 0.75rem;
      padding: 2px 6px;
      border-radius: 3px;
      margin-left: 8px;
      font-weight: normal;
    }}
    .url-row {{ font-size: 0.9rem; color: var(--text-muted); }}
    .url-row .pad-id {{ color: #fff; }}
    .link-btn {{ color: var(--accent-blue); cursor: pointer; margin-left: 5px; }}
    .link-btn:hover {{ text-decoration: underline; }}
    .warning-box {{
      background: var(--warning-bg);
      color: var(--warning-text);
      font-size: 0.85rem;
      padding: 8px 12px;
      border-radius: 4px;
      border: 1px solid #555500;
    }}
    .status-row {{
      font-size: 0.85rem;
      color: var(--text-muted);
      display: flex;
      align-items: center;
      margin-top: 5px;
    }}
    .status-dot {{
      width: 8px;
      height: 8px;
      border-radius: 50%;
      background: var(--text-muted);
      margin-right: 8px;
    }}
    .status-dot.ready {{ background: var(--success-green); box-shadow: 0 0 5px var(--success-green); }}
    .status-dot.saving {{ background: var(--warning-text); box-shadow: 0 0 5px var(--warning-text); }}
    .status-dot.error {{ background: var(--danger-red); box-shadow: 0 0 5px var(--danger-red); }}
    .header-right {{ background: #fff; padding: 5px; border-radius: 4px; }}
    #editor-container {{ flex: 1; position: relative; overflow-y: auto; }}
    #editor {{
      width: 100%;
      min-height: 100%;
      background: var(--bg-color);
      color: var(--text-primary);
      padding: 20px;
      box-sizing: border-box;
      outline: none;
      line-height: 1.6;
      font-size: 16px;
      white-space: pre-wrap;
      word-wrap: break-word;
      font-family: Consolas, "Courier New", monospace;
    }}
    #editor img {{ max-width: 100%; border: 1px solid #444; margin: 10px 0; display: block; }}
    #editor:empty:before {{
      content: attr(data-placeholder);
      color: #555;
      pointer-events: none;
      display: block;
    }}
    #loading-overlay {{
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.7);
      display: none;
      justify-content: center;
      align-items: center;
      z-index: 99;
      color: white;
    }}
  </style>
</head>
<body>
  <header>
    <div class="header-left">
      <div class="title-row">EdgePad <span class="badge">shared pad</span></div>
      <div class="url-row">
        Pad: <span class="pad-id">{id}</span>
        <span id="copy-link" class="link-btn">[copy link]</span>
      </div>
      <div class="warning-box">
        <strong>Public link:</strong> anyone with this URL can read and edit. Do not paste secrets.
      </div>
      <div id="status-bar" class="status-row">
        <div id="status-dot" class="status-dot ready"></div>
        <span id="status-text">Ready</span>
      </div>
    </div>
    <div class="header-right"><div id="qrcode"></div></div>
  </header>

  <div id="editor-container">
    <div id="editor" contenteditable="true" spellcheck="false"
         data-placeholder="Start typing or paste an image. Changes save automatically.">{content}</div>
  </div>

  <div id="loading-overlay"><div>Processing...</div></div>

  {config}
  <script src="/assets/pad.js"></script>
</body>
</html>"#,
            id = id,
            qrcode = QRCODE_CDN,
            content = pad.content,
            config = self.client_config(Some(&pad.id)),
        )
    }

    /// Shell of the multi-note app; `notes.js` fills it in.
    #[instrument(level = "debug", skip(self))]
    pub fn render_notes_app(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>EdgePad Notes</title>
  <style>
    :root {{
      --bg: #1e1e1e;
      --panel: #252526;
      --border: #333;
      --text-primary: #cccccc;
      --text-secondary: #888888;
      --accent: #007acc;
      --danger: #f44336;
      --success: #4caf50;
    }}
    body {{
      margin: 0;
      height: 100vh;
      display: flex;
      font-family: "Segoe UI", sans-serif;
      background: var(--bg);
      color: var(--text-primary);
    }}
    aside {{
      width: 280px;
      background: var(--panel);
      border-right: 1px solid var(--border);
      display: flex;
      flex-direction: column;
    }}
    aside header {{ padding: 1rem; display: flex; justify-content: space-between; align-items: center; }}
    button {{
      background: var(--accent);
      color: #fff;
      border: none;
      border-radius: 4px;
      padding: 6px 12px;
      cursor: pointer;
    }}
    button.danger {{ background: var(--danger); }}
    #notesList {{ flex: 1; overflow-y: auto; }}
    .empty-list {{ padding: 1rem; text-align: center; color: var(--text-secondary); }}
    .note-item {{ padding: 0.75rem 1rem; border-bottom: 1px solid var(--border); cursor: pointer; }}
    .note-item.active {{ background: #37373d; }}
    .note-item-title {{ font-weight: bold; color: #fff; }}
    .note-item-preview, .note-item-date {{ font-size: 0.8rem; color: var(--text-secondary); }}
    main {{ flex: 1; display: flex; flex-direction: column; }}
    #emptyState {{ flex: 1; display: flex; justify-content: center; align-items: center; color: var(--text-secondary); }}
    #editorContainer {{ flex: 1; display: none; flex-direction: column; padding: 1rem; gap: 0.75rem; }}
    .toolbar {{ display: flex; gap: 0.5rem; }}
    #noteTitle, #noteContent {{
      background: var(--panel);
      color: var(--text-primary);
      border: 1px solid var(--border);
      border-radius: 4px;
      padding: 0.5rem;
      font: inherit;
    }}
    #noteContent {{ flex: 1; resize: none; font-family: Consolas, monospace; }}
    #imagesContainer {{ display: flex; flex-wrap: wrap; gap: 0.5rem; }}
    .image-item {{ position: relative; }}
    .image-item img {{ max-height: 120px; border: 1px solid #444; }}
    .image-item-btn {{ position: absolute; top: 4px; right: 4px; padding: 2px 6px; background: var(--danger); }}
    #loadingOverlay {{
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.6);
      display: none;
      justify-content: center;
      align-items: center;
      color: #fff;
      z-index: 99;
    }}
    .toast {{
      position: fixed;
      bottom: 1rem;
      right: 1rem;
      padding: 0.75rem 1rem;
      border-radius: 4px;
      color: #fff;
      opacity: 0;
      transition: opacity 0.3s;
    }}
    .toast.show {{ opacity: 1; }}
    .toast.success {{ background: var(--success); }}
    .toast.error {{ background: var(--danger); }}
  </style>
</head>
<body>
  <aside>
    <header>
      <strong>EdgePad Notes</strong>
      <button id="newNoteBtn">+ New</button>
    </header>
    <div id="notesList"></div>
  </aside>
  <main>
    <div id="emptyState">Select a note or create a new one</div>
    <div id="editorContainer">
      <input id="noteTitle" type="text" placeholder="Title">
      <div class="toolbar">
        <button id="saveBtn">Save</button>
        <button id="imageBtn">Add image</button>
        <button id="deleteBtn" class="danger">Delete</button>
        <input id="imageInput" type="file" accept="image/*" multiple hidden>
      </div>
      <textarea id="noteContent" placeholder="Write something..."></textarea>
      <div id="imagesContainer"></div>
    </div>
  </main>
  <div id="loadingOverlay">Loading...</div>
  <div id="toast" class="toast"></div>

  {config}
  <script src="/assets/notes.js"></script>
</body>
</html>"#,
            config = self.client_config(None),
        )
    }
}

impl Default for HtmlPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pad(id: &str, content: &str) -> Pad {
        Pad {
            id: id.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn given_pad_when_rendering_then_inlines_content_verbatim() {
        let presenter = HtmlPresenter::new();
        let content = r#"<div>hello</div><img src="data:image/jpeg;base64,AAAA">"#;

        let html = presenter.render_pad(&pad("abc", content));

        assert!(html.contains(content));
        assert!(html.contains("<title>EdgePad - abc</title>"));
        assert!(html.contains(r#""padId":"abc""#));
    }

    #[rstest]
    #[case("<b>x</b>", "&lt;b&gt;x&lt;/b&gt;")]
    #[case("a&b", "a&amp;b")]
    fn given_markup_in_id_when_rendering_then_title_is_escaped(
        #[case] id: &str,
        #[case] escaped: &str,
    ) {
        let html = HtmlPresenter::new().render_pad(&pad(id, ""));

        assert!(html.contains(&format!("<title>EdgePad - {escaped}</title>")));
    }

    #[test]
    fn given_script_breaking_id_when_rendering_then_config_cannot_close_script() {
        let html = HtmlPresenter::new().render_pad(&pad("</script><script>alert(1)", ""));

        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r"<\/script>"));
    }

    #[test]
    fn given_custom_editor_config_when_rendering_then_exposes_it_to_client() {
        let presenter = HtmlPresenter::with_editor_config(EditorConfig {
            save_debounce_ms: 250,
            max_image_width: 640,
            jpeg_quality: 0.5,
            max_image_bytes: 1000,
        });

        let html = presenter.render_pad(&pad("abc", ""));

        assert!(html.contains(r#""saveDebounceMs":250"#));
        assert!(html.contains(r#""maxImageWidth":640"#));
        assert!(html.contains(r#""maxImageBytes":1000"#));
    }

    #[test]
    fn given_notes_app_when_rendering_then_contains_elements_used_by_script() {
        let html = HtmlPresenter::new().render_notes_app();

        for id in [
            "newNoteBtn",
            "saveBtn",
            "deleteBtn",
            "imageBtn",
            "imageInput",
            "noteTitle",
            "noteContent",
            "notesList",
            "emptyState",
            "editorContainer",
            "imagesContainer",
            "loadingOverlay",
            "toast",
        ] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
        assert!(html.contains(r#""padId":null"#));
    }

    #[test]
    fn given_notes_script_when_rendering_images_then_escapes_stored_sources() {
        assert!(NOTES_SCRIPT.contains(r#"src="${this.escapeHtml(image)}""#));
        assert!(!NOTES_SCRIPT.contains(r#"src="${image}""#));
        assert!(NOTES_SCRIPT.contains(r#".replace(/"/g, "&quot;")"#));
    }
}
