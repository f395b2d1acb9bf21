// HTML page for a single definition
// Layout: top bar with the navigation synset, then the gloss

use super::{Renderer, ShowContext, ViewError};

/// Built-in page renderer
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render_definition(&self, ctx: &ShowContext<'_>) -> Result<String, ViewError> {
        let synset = ctx.top_bar_synset;
        let definition = ctx.definition;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Definition #{def_id} · {label}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
            max-width: 900px;
            margin: 0 auto;
            padding: 0 20px 20px;
            color: #333;
        }}
        nav.top-bar {{
            background: #667eea;
            color: white;
            padding: 10px 20px;
            margin: 0 -20px 20px;
        }}
        nav.top-bar a {{ color: white; text-decoration: none; font-weight: bold; }}
        .pos {{ opacity: 0.8; margin-left: 8px; }}
        blockquote {{
            border-left: 4px solid #667eea;
            margin: 20px 0;
            padding-left: 20px;
        }}
        footer {{ color: #888; font-size: 0.85em; }}
    </style>
</head>
<body>
<nav class="top-bar" data-synset-id="{synset_id}">
    <a href="/synsets/{synset_id}">{label}</a><span class="pos">({pos})</span>
</nav>
<h1>Definition #{def_id}</h1>
<blockquote class="gloss">{gloss}</blockquote>
<footer>
    Updated {updated_at} ·
    <a href="/synsets/{synset_id}/definitions/{def_id}.xml">XML</a> ·
    <a href="/synsets/{synset_id}/definitions/{def_id}.json">JSON</a>
</footer>
</body>
</html>
"#,
            def_id = definition.id,
            synset_id = synset.id,
            label = escape_html(&synset.label()),
            pos = escape_html(&synset.pos),
            gloss = escape_html(&definition.gloss),
            updated_at = definition.updated_at.format("%Y-%m-%d %H:%M UTC"),
        ))
    }
}

/// Escape text for element content and quoted attributes
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
