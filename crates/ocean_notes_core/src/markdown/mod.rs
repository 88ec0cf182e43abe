//! Restricted markdown-to-HTML renderer for note previews.
//!
//! # Responsibility
//! - Convert a small markdown subset (headings, lists, blockquotes, fenced
//!   code, bold/italic/inline code/links) into sanitized HTML.
//!
//! # Invariants
//! - Inline text is HTML-escaped before any substitution, so user-supplied
//!   text can never introduce raw markup; only the renderer's own
//!   substitutions produce tags.
//! - Fenced code content is never interpreted as markdown.
//! - Substitution order is fixed: code, then bold, then italic, then links.

use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code regex"));
static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"));
static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("valid link regex"));

/// Renders the supported markdown subset to HTML.
///
/// Pure function: single left-to-right pass over lines, tracking fenced-code
/// state, the buffered code lines, and whether a list is open. An
/// unterminated fence still emits its buffered content as a code block at
/// end of input.
pub fn render_markdown(markdown: &str) -> String {
    let normalized = markdown.replace("\r\n", "\n");

    let mut html = String::new();
    let mut in_code = false;
    let mut code_buffer: Vec<&str> = Vec::new();
    let mut in_list = false;

    for line in normalized.split('\n') {
        if line.trim().starts_with("```") {
            if in_code {
                flush_code(&mut html, &mut code_buffer);
                in_code = false;
            } else {
                close_list(&mut html, &mut in_list);
                in_code = true;
                code_buffer.clear();
            }
            continue;
        }

        if in_code {
            code_buffer.push(line);
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            close_list(&mut html, &mut in_list);
            continue;
        }

        // Longest heading prefix wins.
        if let Some(rest) = trimmed.strip_prefix("### ") {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<h3>{}</h3>", render_inline(rest)));
        } else if let Some(rest) = trimmed.strip_prefix("## ") {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<h2>{}</h2>", render_inline(rest)));
        } else if let Some(rest) = trimmed.strip_prefix("# ") {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<h1>{}</h1>", render_inline(rest)));
        } else if let Some(rest) = trimmed.strip_prefix("> ") {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<blockquote>{}</blockquote>", render_inline(rest)));
        } else if let Some(rest) = trimmed.strip_prefix("- ") {
            if !in_list {
                in_list = true;
                html.push_str("<ul>");
            }
            html.push_str(&format!("<li>{}</li>", render_inline(rest)));
        } else {
            close_list(&mut html, &mut in_list);
            html.push_str(&format!("<p>{}</p>", render_inline(trimmed)));
        }
    }

    if in_code {
        flush_code(&mut html, &mut code_buffer);
    }
    close_list(&mut html, &mut in_list);

    html
}

/// Escapes the characters that could open markup in the output.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Applies the inline substitution pass to already-line-classified text.
///
/// Escapes first, then: inline code, bold, italic, links. Double-asterisk is
/// matched before single-asterisk; nested/overlapping emphasis is an
/// accepted subset limitation.
fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let out = INLINE_CODE_RE.replace_all(&escaped, "<code>$1</code>");
    let out = BOLD_RE.replace_all(&out, "<strong>$1</strong>");
    let out = ITALIC_RE.replace_all(&out, "<em>$1</em>");
    let out = LINK_RE.replace_all(
        &out,
        "<a href=\"$2\" target=\"_blank\" rel=\"noreferrer\">$1</a>",
    );
    out.into_owned()
}

fn close_list(html: &mut String, in_list: &mut bool) {
    if *in_list {
        html.push_str("</ul>");
        *in_list = false;
    }
}

fn flush_code(html: &mut String, code_buffer: &mut Vec<&str>) {
    let code = escape_html(&code_buffer.join("\n"));
    html.push_str(&format!("<pre><code>{code}</code></pre>"));
    code_buffer.clear();
}
