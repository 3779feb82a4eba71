//! One-shot page messages carried across redirects.
//!
//! Handlers redirect with a short code (`?error=credentials`,
//! `?success=signed_in&name=Ana`) and the target page turns it back into
//! text here, so message wording lives in one place.

use serde::Deserialize;

use crate::models::CurrentUser;

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    /// Name interpolated into greeting and product messages.
    pub name: Option<String>,
}

/// Visual style of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Warning,
    Info,
}

impl FlashKind {
    /// CSS class used by the base template.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash flash-success",
            Self::Error => "flash flash-error",
            Self::Warning => "flash flash-warning",
            Self::Info => "flash flash-info",
        }
    }
}

/// A message rendered above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    fn new(kind: FlashKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl MessageQuery {
    /// Resolve the message codes into a displayable message.
    ///
    /// Unknown codes are ignored. An error code wins over a success code.
    #[must_use]
    pub fn flash(&self) -> Option<Flash> {
        let name = self.name.as_deref().unwrap_or_default();

        if let Some(code) = self.error.as_deref() {
            let flash = match code {
                "missing_fields" => Flash::new(FlashKind::Error, "Fill in all fields"),
                "invalid_email" => Flash::new(FlashKind::Error, "Enter a valid email address"),
                "password_mismatch" => Flash::new(FlashKind::Error, "Passwords do not match"),
                "user_exists" => Flash::new(
                    FlashKind::Error,
                    "An account with this username already exists",
                ),
                "credentials" => Flash::new(FlashKind::Error, "Incorrect username or password"),
                "login_required" => Flash::new(
                    FlashKind::Warning,
                    "You need to sign in to access this page.",
                ),
                "invalid_product" => Flash::new(FlashKind::Error, "Fill in all fields correctly"),
                "unsupported_image" => {
                    Flash::new(FlashKind::Error, "Image must be a JPG or PNG file")
                }
                "image_too_large" => Flash::new(FlashKind::Error, "Image is too large"),
                "session" => Flash::new(FlashKind::Error, "Something went wrong. Please try again."),
                _ => return None,
            };
            return Some(flash);
        }

        let flash = match self.success.as_deref()? {
            "details_saved" => Flash::new(
                FlashKind::Success,
                "Details saved. Now choose your password.",
            ),
            "account_created" => Flash::new(
                FlashKind::Success,
                format!("Account created successfully! Welcome, {name}"),
            ),
            "signed_in" => Flash::new(FlashKind::Success, format!("Signed in. Welcome, {name}")),
            "product_created" => Flash::new(
                FlashKind::Success,
                format!("Product '{name}' created successfully!"),
            ),
            "signed_out" => Flash::new(FlashKind::Info, "You have signed out"),
            _ => return None,
        };
        Some(flash)
    }
}

/// Redirect target carrying a success code and an interpolated name.
#[must_use]
pub fn success_url(path: &str, code: &str, name: &str) -> String {
    format!("{path}?success={code}&name={}", urlencoding::encode(name))
}

/// Layout data shared by every page: who is signed in, which menu entry is
/// highlighted, and the message to show.
#[derive(Debug, Clone)]
pub struct Page {
    pub viewer: Option<CurrentUser>,
    pub active: &'static str,
    pub flash: Option<Flash>,
}

impl Page {
    #[must_use]
    pub fn new(viewer: Option<CurrentUser>, active: &'static str, query: &MessageQuery) -> Self {
        Self {
            viewer,
            active,
            flash: query.flash(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(error: Option<&str>, success: Option<&str>, name: Option<&str>) -> MessageQuery {
        MessageQuery {
            error: error.map(String::from),
            success: success.map(String::from),
            name: name.map(String::from),
        }
    }

    #[test]
    fn test_error_codes() {
        let flash = query(Some("credentials"), None, None).flash().unwrap();
        assert_eq!(flash.kind, FlashKind::Error);
        assert_eq!(flash.text, "Incorrect username or password");

        let flash = query(Some("login_required"), None, None).flash().unwrap();
        assert_eq!(flash.kind, FlashKind::Warning);
        assert_eq!(flash.kind.css_class(), "flash flash-warning");
    }

    #[test]
    fn test_success_codes_interpolate_name() {
        let flash = query(None, Some("signed_in"), Some("Ana")).flash().unwrap();
        assert_eq!(flash.text, "Signed in. Welcome, Ana");

        let flash = query(None, Some("product_created"), Some("E-book, vol. 1"))
            .flash()
            .unwrap();
        assert_eq!(flash.text, "Product 'E-book, vol. 1' created successfully!");
    }

    #[test]
    fn test_error_wins_and_unknown_is_ignored() {
        let flash = query(Some("missing_fields"), Some("signed_in"), None)
            .flash()
            .unwrap();
        assert_eq!(flash.text, "Fill in all fields");

        assert!(query(Some("nope"), None, None).flash().is_none());
        assert!(query(None, None, None).flash().is_none());
    }

    #[test]
    fn test_success_url_encodes_name() {
        assert_eq!(
            success_url("/products/new", "product_created", "Guide & Tips"),
            "/products/new?success=product_created&name=Guide%20%26%20Tips"
        );
    }
}
