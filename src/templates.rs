//! HTML pages served by the crop routes
//!
//! Pages are plain strings; every dynamic value goes through [`escape_html`].

use crate::features::{FIELD_NAMES, NUM_FEATURES};
use crate::utils::escape_html;

/// Shared stylesheet for all pages
const STYLE: &str = r#"
    body { font-family: 'Inter', sans-serif; background: green; min-height: 100vh; color: #333; margin: 0; }
    .container { max-width: 500px; margin: 40px auto 0 auto; background: #fff; border-radius: 20px;
                 box-shadow: 0 10px 30px rgba(0,0,0,0.10); padding: 36px 32px 32px 32px; }
    .header, .result, .error { text-align: center; }
    h1, h2 { color: #667eea; }
    form { display: flex; flex-direction: column; gap: 18px; }
    .input-group { display: flex; align-items: center; gap: 12px; background: #f7fafc;
                   border-radius: 10px; padding: 10px 14px; }
    label { font-weight: 600; color: #667eea; min-width: 140px; }
    input[type="number"] { flex: 1; padding: 10px 12px; border: 1px solid #b2bec3; border-radius: 8px; }
    button, .back-btn { padding: 12px 24px; background: linear-gradient(90deg, #667eea, #764ba2); color: #fff;
                        border: none; border-radius: 10px; font-weight: 700; text-decoration: none; cursor: pointer; }
    .crop { font-size: 1.5rem; color: #185a9d; font-weight: 700; margin-bottom: 12px; }
    .message { color: #c0392b; margin-bottom: 12px; }
    .footer { text-align: center; color: #eee; margin-top: 32px; }
"#;

/// Input label and placeholder per feature, in feature order
const FORM_FIELDS: [(&str, &str); NUM_FEATURES] = [
    ("Nitrogen (N)", "e.g. 90"),
    ("Phosphorus (P)", "e.g. 42"),
    ("Potassium (K)", "e.g. 43"),
    ("Temperature (°C)", "e.g. 22.5"),
    ("Humidity (%)", "e.g. 80"),
    ("pH", "e.g. 6.5"),
    ("Rainfall (mm)", "e.g. 200"),
];

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | AgriTech</title>
    <style>{style}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

/// Form page with one required numeric input per feature
pub fn form_page(predict_path: &str) -> String {
    let inputs: String = FIELD_NAMES
        .iter()
        .zip(FORM_FIELDS.iter())
        .map(|(name, (label, placeholder))| {
            format!(
                r#"        <div class="input-group">
            <label for="{name}">{label}</label>
            <input type="number" step="any" name="{name}" id="{name}" required placeholder="{placeholder}">
        </div>
"#,
                name = name,
                label = escape_html(label),
                placeholder = escape_html(placeholder),
            )
        })
        .collect();

    let body = format!(
        r#"<div class="container">
    <div class="header">
        <h1>Crop Recommendation</h1>
        <p>Get crop suggestions based on soil nutrients, climate, and environment.</p>
    </div>
    <form method="post" action="{action}">
{inputs}        <button type="submit">Get Recommendation</button>
    </form>
</div>
<div class="footer">AgriTech - Crop Recommendation</div>"#,
        action = escape_html(predict_path),
        inputs = inputs,
    );
    page("Crop Recommendation", &body)
}

/// Result page naming the recommended crop
pub fn result_page(crop: &str, home_path: &str) -> String {
    let body = format!(
        r#"<div class="container result">
    <h2>Recommended Crop</h2>
    <div class="crop">{crop}</div>
    <a href="{home}" class="back-btn">Try Again</a>
</div>"#,
        crop = escape_html(crop),
        home = escape_html(home_path),
    );
    page("Crop Recommendation Result", &body)
}

/// Error page carrying a human-readable message
pub fn error_page(message: &str, home_path: &str) -> String {
    let body = format!(
        r#"<div class="container error">
    <h2>Error</h2>
    <div class="message">{message}</div>
    <a href="{home}" class="back-btn">Back</a>
</div>"#,
        message = escape_html(message),
        home = escape_html(home_path),
    );
    page("Error", &body)
}
