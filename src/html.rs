//! HTML fragments handed to the host: the standalone CDN page, the iframe
//! interface of the interactive builder, and the attachment embed tag.

use serde::{Deserialize, Serialize};

/// Built assets of the builder single-page application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnAssets {
    pub css_url: String,
    pub js_url: String,
}

impl Default for CdnAssets {
    fn default() -> Self {
        Self {
            css_url: "https://sahithporeddy.github.io/Chatbot-builder/dist/assets/index-DJQuoQVC.css"
                .to_string(),
            js_url: "https://sahithporeddy.github.io/Chatbot-builder/dist/assets/index-DevyOnKg.js"
                .to_string(),
        }
    }
}

/// Placeholder the host replaces with the stored HTML file.
pub fn embed_tag(file_id: &str) -> String {
    format!("{{{{HTML_FILE_ID_{}}}}}", file_id)
}

/// A full document that boots the builder from the CDN into `#root`.
pub fn cdn_page(assets: &CdnAssets) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Chatbot Flow Builder</title>
    <link rel="stylesheet" href="{css_url}">
    <style>
        html, body {{
            width: 100%;
            height: 100vh;
            margin: 0;
            padding: 0;
            overflow: hidden;
        }}

        #root {{
            width: 100%;
            height: 100vh;
        }}
    </style>
</head>
<body>
    <div id="root"></div>
    <script src="{js_url}"></script>
    <script>
        document.addEventListener('DOMContentLoaded', function() {{
            console.log('Chatbot Flow Builder loaded from CDN');
        }});
    </script>
</body>
</html>
"#,
        css_url = escape_attr(&assets.css_url),
        js_url = escape_attr(&assets.js_url),
    )
}

/// The iframe wrapper around a locally served builder.
///
/// Messages from the frame are only accepted from `builder_url`'s origin.
/// A `saveDrawing` message stores its payload on `window.chatbotFlowData`
/// and re-dispatches it as a `chatbotFlowSaved` event for the host.
pub fn builder_interface(builder_url: &str) -> String {
    let url = escape_attr(builder_url);
    // Inside the script the URL is a JS string literal, not an attribute.
    let origin = serde_json::Value::from(builder_url).to_string();
    format!(
        r#"<div style="width: 100%; height: 600px; border: 1px solid #ddd; border-radius: 8px; overflow: hidden;">
    <iframe
        src="{url}"
        width="100%"
        height="100%"
        frameborder="0"
        style="border: none;"
        id="chatbot-builder-iframe"
        allow="fullscreen"
        sandbox="allow-same-origin allow-scripts allow-forms allow-popups allow-modals"
    ></iframe>

    <script>
        window.addEventListener('message', function(event) {{
            if (event.origin !== {origin}) {{
                return;
            }}

            if (event.data.type === 'saveDrawing') {{
                const flowData = event.data.payload;
                window.chatbotFlowData = flowData;
                window.dispatchEvent(new CustomEvent('chatbotFlowSaved', {{
                    detail: flowData
                }}));
            }}

            if (event.data.type === 'ready') {{
                console.log('Chatbot builder is ready');
            }}
        }});

        window.addEventListener('load', function() {{
            const iframe = document.getElementById('chatbot-builder-iframe');
            if (iframe && iframe.contentWindow) {{
                iframe.contentWindow.postMessage({{
                    type: 'loadData',
                    payload: window.existingFlowData || null
                }}, {origin});
            }}
        }});
    </script>
</div>

<div style="margin-top: 16px; padding: 12px; background-color: #f5f5f5; border-radius: 6px; font-size: 14px;">
    <strong>Instructions:</strong>
    <ul style="margin: 8px 0; padding-left: 20px;">
        <li>Use the flow builder above to design your chatbot conversation flow</li>
        <li>Add nodes by dragging from the sidebar or using the context menu</li>
        <li>Connect nodes to create conversation paths</li>
        <li>Click the "Save" button in the builder when you're done</li>
        <li>The flow data will be captured and displayed below</li>
    </ul>
</div>
"#
    )
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
