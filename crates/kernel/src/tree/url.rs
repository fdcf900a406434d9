//! URL generation and label localization for tree nodes.

use std::collections::HashMap;

/// Builds links to admin actions from route values.
pub trait UrlHelper: Send + Sync {
    /// URL for `controller`/`action`, parameterized by ordered route values.
    fn action(&self, action: &str, controller: &str, route_values: &[(&str, &str)]) -> String;
}

/// Route value keys consumed by the path rather than the query string.
const PATH_KEYS: [&str; 3] = ["area", "controller", "action"];

/// Controller whose segment is left out of admin URLs.
const DEFAULT_CONTROLLER: &str = "admin";

/// Conventional admin routing: `{base}/{area}/{controller}/{action}?{rest}`.
///
/// The controller segment is omitted when it is the default controller.
#[derive(Debug, Clone)]
pub struct AdminUrlHelper {
    base_path: String,
}

impl AdminUrlHelper {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for AdminUrlHelper {
    fn default() -> Self {
        Self::new("/admin")
    }
}

impl UrlHelper for AdminUrlHelper {
    fn action(&self, action: &str, controller: &str, route_values: &[(&str, &str)]) -> String {
        let area = route_values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("area"))
            .map(|(_, v)| *v);

        let mut path = self.base_path.clone();
        if let Some(area) = area {
            path.push('/');
            path.push_str(&urlencoding::encode(area));
        }
        if !controller.eq_ignore_ascii_case(DEFAULT_CONTROLLER) {
            path.push('/');
            path.push_str(&urlencoding::encode(controller));
        }
        path.push('/');
        path.push_str(&urlencoding::encode(action));

        let query: Vec<String> = route_values
            .iter()
            .filter(|(k, _)| !PATH_KEYS.iter().any(|p| k.eq_ignore_ascii_case(p)))
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();

        if query.is_empty() {
            path
        } else {
            format!("{path}?{}", query.join("&"))
        }
    }
}

/// Supplies display strings.
pub trait Localizer: Send + Sync {
    /// Translate `key`; untranslated keys are returned as-is.
    fn get(&self, key: &str) -> String;
}

/// Localizer backed by a fixed translation table.
#[derive(Debug, Clone, Default)]
pub struct StaticLocalizer {
    translations: HashMap<String, String>,
}

impl StaticLocalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.translations.insert(key.into(), value.into());
        self
    }
}

impl Localizer for StaticLocalizer {
    fn get(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_controller_is_omitted() {
        let helper = AdminUrlHelper::default();
        let url = helper.action(
            "items",
            "Admin",
            &[
                ("area", "content-tree"),
                ("controller", "Admin"),
                ("action", "items"),
                ("providerId", "content-types"),
            ],
        );
        assert_eq!(url, "/admin/content-tree/items?providerId=content-types");
    }

    #[test]
    fn other_controllers_appear_in_path() {
        let helper = AdminUrlHelper::new("/manage/");
        let url = helper.action("list", "media", &[("area", "assets")]);
        assert_eq!(url, "/manage/assets/media/list");
    }

    #[test]
    fn query_values_are_encoded_in_order() {
        let helper = AdminUrlHelper::default();
        let url = helper.action(
            "items",
            "admin",
            &[
                ("area", "content-tree"),
                ("providerId", "content-types"),
                ("providerParams[typename]", "Blog Post"),
            ],
        );
        assert_eq!(
            url,
            "/admin/content-tree/items?providerId=content-types&providerParams%5Btypename%5D=Blog%20Post"
        );
    }

    #[test]
    fn localizer_falls_back_to_key() {
        let localizer = StaticLocalizer::new().with("Content Types", "Types de contenu");
        assert_eq!(localizer.get("Content Types"), "Types de contenu");
        assert_eq!(localizer.get("content-types"), "content-types");
    }
}
