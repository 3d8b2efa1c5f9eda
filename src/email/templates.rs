const BUTTON_STYLE: &str = "display: inline-block; padding: 10px 20px; background: #2f6b3a; color: white; text-decoration: none; border-radius: 4px;";

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>{title}</h2>
{body}
</body>
</html>"#
    )
}

pub fn render_welcome(name: &str, base_url: &str) -> String {
    let name = escape(name);
    layout(
        "Welcome to Shotlog",
        &format!(
            r#"    <p>Hi {name},</p>
    <p>Your account is ready. Log your first range session at:</p>
    <p><a href="{base_url}" style="{BUTTON_STYLE}">Open Shotlog</a></p>"#
        ),
    )
}

pub fn render_password_reset(name: &str, reset_url: &str, ttl_minutes: i64) -> String {
    let name = escape(name);
    layout(
        "Password Reset",
        &format!(
            r#"    <p>Hi {name},</p>
    <p>A password reset was requested for your Shotlog account.</p>
    <p><a href="{reset_url}" style="{BUTTON_STYLE}">Reset Password</a></p>
    <p style="color: #666; font-size: 14px;">This link expires in {ttl_minutes} minutes and works once. If you didn't request this, you can ignore it.</p>"#
        ),
    )
}

pub fn render_password_changed(name: &str) -> String {
    let name = escape(name);
    layout(
        "Password Changed",
        &format!(
            r#"    <p>Hi {name},</p>
    <p>The password for your Shotlog account was just changed and all signed-in devices were logged out.</p>
    <p style="color: #666; font-size: 14px;">If this wasn't you, request a new password reset immediately.</p>"#
        ),
    )
}
