//! Server-rendered HTML for the single page.

use std::fmt::Write as _;

use pulldown_cmark::{html, Event, Options, Parser};

use super::answer::FinalAnswer;
use super::flow::Outcome;

pub const PAGE_TITLE: &str = "AI Research & Decision Assistant";
pub const QUERY_LABEL: &str = "Your question about the AI industry";
pub const SUBMIT_LABEL: &str = "Analyze & Recommend";
pub const BUSY_LABEL: &str = "Thinking, searching the web, and analyzing...";
pub const RESULT_HEADING: &str = "Recommendations";
pub const ALL_SET_MESSAGE: &str = "All required environment variables are set.";

/// Everything one render needs.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    /// Text to put back in the textarea.
    pub query: &'a str,
    /// Missing required variables, recomputed per render.
    pub missing: Vec<&'static str>,
    pub outcome: Option<&'a Outcome>,
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String never fails.
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

/// Render Markdown to HTML. Raw HTML in the source is shown as text.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn render_status(missing: &[&'static str]) -> String {
    let mut out = String::from(
        "<details class=\"status\">\n<summary>Environment &amp; status</summary>\n",
    );
    if missing.is_empty() {
        let _ = writeln!(out, "<div class=\"banner success\">{ALL_SET_MESSAGE}</div>");
    } else {
        out.push_str("<div class=\"banner error\">Missing environment variables:\n<ul>\n");
        for name in missing {
            let _ = writeln!(out, "<li><code>{}</code></li>", escape_html(name));
        }
        out.push_str("</ul>\n</div>\n");
        out.push_str(
            "<p>Set these as environment variables locally, or in a <code>.env</code> \
             file next to the binary, then restart the server.</p>\n",
        );
    }
    out.push_str("</details>\n");
    out
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Warning(_) => banner("warning", outcome),
        Outcome::ConfigurationError { .. } | Outcome::AgentError(_) => banner("error", outcome),
        Outcome::Recommendations(answer) => {
            let body = match answer {
                FinalAnswer::Text(text) => markdown_to_html(text),
                FinalAnswer::Unparsed(_) => {
                    format!("<pre class=\"raw\">{}</pre>\n", escape_html(&answer.to_string()))
                }
            };
            format!("<section class=\"result\">\n<h2>{RESULT_HEADING}</h2>\n{body}</section>\n")
        }
    }
}

fn banner(kind: &str, outcome: &Outcome) -> String {
    let message = outcome.message().unwrap_or_default();
    format!("<div class=\"banner {kind}\">{}</div>\n", escape_html(&message))
}

/// Render the whole page.
pub fn render_page(view: &PageView<'_>) -> String {
    let status = render_status(&view.missing);
    let outcome = view.outcome.map(render_outcome).unwrap_or_default();
    let query = escape_html(view.query);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; line-height: 1.5; }}
textarea {{ width: 100%; height: 150px; font: inherit; }}
button {{ background: #ff4b4b; color: #fff; border: 0; border-radius: 0.4rem; padding: 0.5rem 1rem; font: inherit; cursor: pointer; }}
button[disabled] {{ opacity: 0.6; cursor: wait; }}
.banner {{ border-radius: 0.4rem; padding: 0.75rem 1rem; margin: 1rem 0; white-space: pre-wrap; }}
.success {{ background: #e8f5e9; }}
.warning {{ background: #fff8e1; }}
.error {{ background: #ffebee; }}
.raw {{ white-space: pre-wrap; word-break: break-word; }}
</style>
</head>
<body>
<h1>{PAGE_TITLE}</h1>
<p>Ask about <strong>current AI industry news, trends, risks, and opportunities</strong>.</p>
<p>The app will search the web, analyze the information, and give you <strong>actionable recommendations</strong> for startup decisions.</p>
{status}<form method="post" action="/" onsubmit="var b=this.querySelector('button');b.disabled=true;b.textContent='{BUSY_LABEL}';">
<label for="query">{QUERY_LABEL}</label>
<textarea id="query" name="query">{query}</textarea>
<button type="submit">{SUBMIT_LABEL}</button>
</form>
{outcome}</body>
</html>
"#
    )
}
