use super::languages::TargetLanguage;
use super::service::Translation;

const STYLESHEET: &str = r#"
    body {
        background-color: #f8f9fa;
        font-family: 'Segoe UI', sans-serif;
        margin: 0;
    }
    main {
        max-width: 730px;
        margin: 0 auto;
        padding: 2rem 1rem;
    }
    textarea {
        width: 100%;
        height: 140px;
        font-size: 16px;
        box-sizing: border-box;
    }
    select {
        font-size: 16px;
    }
    button {
        background-color: #4CAF50;
        color: white;
        padding: 0.6em 1.5em;
        border: none;
        border-radius: 5px;
        font-size: 16px;
        margin-top: 1rem;
    }
    .success {
        background-color: #dff0d8;
        padding: 10px;
        border-radius: 4px;
    }
    .error {
        background-color: #f8d7da;
        padding: 10px;
        border-radius: 4px;
    }
    .translation {
        font-size: 20px;
        color: #1a1a1a;
        padding: 10px;
        background-color: #eaf4ff;
        border-left: 4px solid #1f77b4;
        border-radius: 4px;
        white-space: pre-wrap;
    }
"#;

/// Swaps the button label while the request is in flight.
const BUSY_SCRIPT: &str = "var b=this.querySelector('button');b.disabled=true;b.textContent='Translating... Please wait...';";

/// State of the form for one render.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub text: String,
    pub selected: TargetLanguage,
    pub outcome: Option<Result<Translation, String>>,
}

impl PageView {
    pub fn new(text: impl Into<String>, selected: TargetLanguage) -> Self {
        Self {
            text: text.into(),
            selected,
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: Result<Translation, String>) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>🌍 AI Translator</title>\n");
    html.push_str(&format!("<style>{STYLESHEET}</style>\n"));
    html.push_str("</head>\n<body>\n<main>\n");

    html.push_str("<h2>🌐 AI Translator</h2>\n");
    html.push_str(
        "<p>Translate your English text into <strong>25+ global languages</strong> using Gemini AI.</p>\n",
    );
    html.push_str("<hr>\n");

    html.push_str(&format!(
        "<form method=\"post\" action=\"/\" onsubmit=\"{BUSY_SCRIPT}\">\n"
    ));
    html.push_str("<h3>📝 Enter Text</h3>\n");
    html.push_str("<label for=\"text\">Enter English text:</label>\n");
    html.push_str(&format!(
        "<textarea id=\"text\" name=\"text\" placeholder=\"Type something like: Hello, how are you?\">{}</textarea>\n",
        escape_html(&view.text)
    ));

    html.push_str("<h3>🌍 Select Language</h3>\n");
    html.push_str("<label for=\"language\">Target language:</label>\n");
    html.push_str("<select id=\"language\" name=\"language\">\n");
    for language in TargetLanguage::all() {
        let selected = if language == view.selected {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{language}\"{selected}>{language}</option>\n"
        ));
    }
    html.push_str("</select>\n");
    html.push_str("<div><button type=\"submit\">🔁 Translate</button></div>\n");
    html.push_str("</form>\n");

    match &view.outcome {
        Some(Ok(translation)) => {
            html.push_str("<h3>✅ Translation</h3>\n");
            html.push_str(&format!(
                "<div class=\"success\">Translated to <strong>{}</strong>:</div>\n",
                translation.language
            ));
            html.push_str(&format!(
                "<div class=\"translation\">{}</div>\n",
                escape_html(&translation.text)
            ));
        }
        Some(Err(message)) => {
            html.push_str(&format!(
                "<div class=\"error\">❌ Error: {}</div>\n",
                escape_html(message)
            ));
        }
        None => {}
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
