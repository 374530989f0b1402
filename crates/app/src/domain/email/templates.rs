//! Minimal HTML bodies for account emails.

use crate::domain::tokens::TokenPurpose;

/// Subject and HTML body for a link email.
#[must_use]
pub fn link_email(purpose: TokenPurpose, link: &str) -> (&'static str, String) {
    let (subject, lead, action) = match purpose {
        TokenPurpose::EmailVerify => (
            "Confirm your ScoutLine email",
            "Confirm this address to finish setting up your coach account.",
            "Confirm email",
        ),
        TokenPurpose::PasswordReset => (
            "Reset your ScoutLine password",
            "Someone asked to reset the password on your account. If it wasn't you, ignore this email.",
            "Choose a new password",
        ),
        TokenPurpose::SetPassword => (
            "Set up your ScoutLine account",
            "An account was created for you. Choose a password to sign in.",
            "Set password",
        ),
    };

    let link = escape(link);
    let html = format!(
        "<!doctype html><html><body><p>{lead}</p><p><a href=\"{link}\">{action}</a></p>\
         <p>If the button doesn't work, paste this link into your browser:<br>{link}</p></body></html>"
    );

    (subject, html)
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
