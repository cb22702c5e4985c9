//! Renders contact form submissions into message bodies.

use std::fmt::Write as _;

use crate::ContactForm;

/// Escapes the characters that are significant in HTML text and attribute
/// values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Email subject for a submission. Whitespace runs, line breaks included,
/// collapse to a single space so the name cannot inject header lines.
#[must_use]
pub fn contact_subject(form: &ContactForm) -> String {
    let name = form.name.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("Portfolio Contact from {name}")
}

/// HTML document embedding every submission field, escaped.
#[must_use]
pub fn contact_html(form: &ContactForm) -> String {
    let ContactForm { name, email, phone, message } = form;

    let mut rows = field_row("Name", name);
    if let Some(email) = email {
        rows.push_str(&field_row("Email", email));
    }
    if let Some(phone) = phone {
        rows.push_str(&field_row("Phone", phone));
    }

    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2 style="color: #333;">New Contact Form Submission</h2>
    <div style="background: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0;">
{rows}      <p style="margin: 10px 0;"><strong>Message:</strong></p>
      <p style="background: white; padding: 15px; border-radius: 4px; white-space: pre-wrap;">{message}</p>
    </div>
    <p style="color: #666; font-size: 12px;">This email was sent from your contact form.</p>
  </body>
</html>
"#,
        message = escape_html(message),
    )
}

/// Plain-text rendering for channels that do not speak HTML.
#[must_use]
pub fn contact_text(form: &ContactForm) -> String {
    let ContactForm { name, email, phone, message } = form;

    let mut text = format!("New contact form submission\nName: {name}\n");
    if let Some(email) = email {
        let _unused = writeln!(text, "Email: {email}");
    }
    if let Some(phone) = phone {
        let _unused = writeln!(text, "Phone: {phone}");
    }
    let _unused = write!(text, "Message:\n{message}");
    text
}

fn field_row(label: &str, value: &str) -> String {
    format!(
        "      <p style=\"margin: 10px 0;\"><strong>{label}:</strong> {}</p>\n",
        escape_html(value)
    )
}
