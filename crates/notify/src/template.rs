//! Named email template pairs with caching and a built-in fallback.
//!
//! A template name resolves to two files under the template directory,
//! `{name}.html` and `{name}.txt`. A part that cannot be loaded falls back
//! to the built-in default for that part instead of failing the send.
//! Rendering is `{{ key }}` placeholder substitution.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Default directory when `EMAIL_TEMPLATE_DIR` is not set.
const DEFAULT_TEMPLATE_DIR: &str = "templates/email";

/// Built-in HTML body used when a named template's HTML part is missing.
const DEFAULT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>{{ platform_name }}</title></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background: #667eea; color: white; padding: 20px; text-align: center;">
      <h1>{{ platform_name }}</h1>
    </div>
    <div style="padding: 20px; background: #f9f9f9;">
      <p>{{ message }}</p>
    </div>
    <div style="background: #333; color: white; padding: 15px; text-align: center; font-size: 12px;">
      <p>&copy; {{ current_year }} {{ platform_name }}. All rights reserved.</p>
      <p>If you have questions, contact us at {{ support_email }}</p>
    </div>
  </div>
</body>
</html>
"#;

/// Built-in plain-text body used when a named template's text part is missing.
const DEFAULT_TEXT: &str = "{{ platform_name }} Notification\n\n{{ message }}\n\n\
Best regards,\n{{ platform_name }} Team\n";

/// A compiled (HTML, plain-text) template pair.
#[derive(Debug, Clone)]
pub struct EmailTemplate {
    pub html: String,
    pub text: String,
}

/// Template store backed by a directory, with an in-process cache.
pub struct TemplateStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Arc<EmailTemplate>>>,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Build a store rooted at `EMAIL_TEMPLATE_DIR` (default
    /// `templates/email`).
    pub fn from_env() -> Self {
        let dir =
            std::env::var("EMAIL_TEMPLATE_DIR").unwrap_or_else(|_| DEFAULT_TEMPLATE_DIR.into());
        Self::new(dir)
    }

    /// Resolve a template by name: cache hit, else load from disk, else the
    /// built-in default. Never fails.
    pub fn get(&self, name: &str) -> Arc<EmailTemplate> {
        if let Some(cached) = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(name).cloned())
        {
            return cached;
        }

        let template = Arc::new(self.load(name));
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(name.to_string(), Arc::clone(&template));
        }
        template
    }

    /// Load both parts from disk, substituting the built-in default for any
    /// part that cannot be read.
    fn load(&self, name: &str) -> EmailTemplate {
        let html = self.load_part(name, "html").unwrap_or_else(|| {
            tracing::warn!(template = name, "HTML template missing, using default");
            DEFAULT_HTML.to_string()
        });
        let text = self.load_part(name, "txt").unwrap_or_else(|| {
            tracing::warn!(template = name, "Text template missing, using default");
            DEFAULT_TEXT.to_string()
        });
        EmailTemplate { html, text }
    }

    fn load_part(&self, name: &str, ext: &str) -> Option<String> {
        let path = self.dir.join(format!("{name}.{ext}"));
        std::fs::read_to_string(path).ok()
    }
}

/// Render a template by substituting `{{ key }}` (and the unspaced
/// `{{key}}`) placeholders from the context. Unknown placeholders are left
/// in place.
pub fn render(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in context {
        result = result.replace(&format!("{{{{ {key} }}}}"), value);
        result = result.replace(&format!("{{{{{key}}}}}"), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn render_substitutes_spaced_and_unspaced() {
        let ctx = context(&[("name", "Jane")]);
        assert_eq!(render("Hello {{ name }}!", &ctx), "Hello Jane!");
        assert_eq!(render("Hello {{name}}!", &ctx), "Hello Jane!");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let ctx = context(&[("name", "Jane")]);
        assert_eq!(render("{{ name }} / {{ other }}", &ctx), "Jane / {{ other }}");
    }

    #[test]
    fn missing_template_falls_back_to_default() {
        let store = TemplateStore::new("/nonexistent/template/dir");
        let template = store.get("user_invitation");
        assert!(template.html.contains("{{ platform_name }}"));
        assert!(template.text.contains("{{ message }}"));
    }

    #[test]
    fn get_caches_loaded_templates() {
        let store = TemplateStore::new("/nonexistent/template/dir");
        let first = store.get("notification");
        let second = store.get("notification");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn default_renders_cleanly() {
        let ctx = context(&[
            ("platform_name", "Ez2Hire"),
            ("message", "Hello there"),
            ("current_year", "2026"),
            ("support_email", "support@ez2hire.com"),
        ]);
        let html = render(DEFAULT_HTML, &ctx);
        assert!(html.contains("Hello there"));
        assert!(!html.contains("{{"));
    }
}
