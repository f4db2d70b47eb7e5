//! HTML rendering of the prompt.

use services::DialogSession;
use shared::ThinkingMode;

const TEMPLATE: &str = include_str!("page.html");

/// Characters shown for each entry of the "Recent" list.
const RECENT_LABEL_CHARS: usize = 40;

/// Render the page for the current session state.
pub fn render(session: &DialogSession, recent_limit: usize) -> String {
    let request = session.request();

    TEMPLATE
        .replace("{{context}}", &escape_html(&request.decision_context))
        .replace("{{options}}", &options_section(request.numbered_options()))
        .replace("{{default}}", &default_section(&request.default_action))
        .replace("{{modes}}", &mode_buttons())
        .replace("{{response}}", &escape_html(session.response()))
        .replace("{{recent}}", &recent_section(session, recent_limit))
        .replace("{{mode}}", session.mode().as_str())
}

fn options_section<'a>(options: impl Iterator<Item = (usize, &'a str)>) -> String {
    let buttons: String = options
        .map(|(n, opt)| {
            let text = escape_html(opt);
            format!(
                r#"<button class="option" data-text="{}" onclick="useText(this.dataset.text)">{}. {}</button>"#,
                text, n, text
            )
        })
        .collect();

    if buttons.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="options"><div class="label">Options to consider</div>{}</div>"#,
            buttons
        )
    }
}

fn default_section(default_action: &str) -> String {
    if default_action.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="default">Default: {}</div>"#,
            escape_html(default_action)
        )
    }
}

fn mode_buttons() -> String {
    ThinkingMode::ALL
        .iter()
        .map(|mode| {
            let (r, g, b) = mode.color();
            format!(
                r#"<button class="mode-btn" data-mode="{}" title="{}" style="color: rgb({}, {}, {})" onclick="setMode('{}')">{}</button>"#,
                mode,
                mode.description(),
                r,
                g,
                b,
                mode,
                mode.display_name()
            )
        })
        .collect()
}

fn recent_section(session: &DialogSession, recent_limit: usize) -> String {
    let recent = session.recent_responses(recent_limit);
    if recent.is_empty() {
        return String::new();
    }

    let items: String = recent
        .iter()
        .map(|record| {
            format!(
                r#"<button class="recent-item" data-text="{}" title="{}" onclick="useText(this.dataset.text)">{}</button>"#,
                escape_html(&record.response),
                record.formatted_time(),
                escape_html(&record.label(RECENT_LABEL_CHARS))
            )
        })
        .collect();

    format!(
        r#"<div class="recent"><div class="label">Recent</div>{}</div>"#,
        items
    )
}

/// Escape text for element content and quoted attributes. Braces are
/// escaped too so user text can never form a template placeholder.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            other => out.push(other),
        }
    }
    out
}
