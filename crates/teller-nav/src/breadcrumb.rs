//! Breadcrumb trail derivation.
//!
//! The resolver walks the primary-outlet chain of a route snapshot from the
//! root, accumulating the URL and deriving one label per node. Nodes that
//! yield no label drop out of the trail; a degraded snapshot shortens the
//! trail, it never aborts the walk.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::entity::{label_text, EntityKind};
use crate::route::{Outlet, RouteData, RouteNode};
use crate::tab_label::format_tab_label;

/// Labels longer than this are cut for display, with an ellipsis appended.
pub const MAX_LABEL_CHARS: usize = 30;

const HOME_LABEL: &str = "Home";
/// Route parameter whose value is a datatable name and needs tab-label
/// formatting before display.
const DATATABLE_PARAM: &str = "datatableName";

/// A single step of the navigation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    pub url: String,
}

type TabLabelFormat = dyn Fn(&str) -> String + Send + Sync;

/// Derives the breadcrumb trail for a route snapshot.
///
/// Resolution is a pure function of the snapshot: re-running it on an
/// identical tree yields an identical trail, so the caller can simply
/// re-resolve on every navigation or language change.
pub struct BreadcrumbResolver {
    tab_label_format: Box<TabLabelFormat>,
}

impl Default for BreadcrumbResolver {
    fn default() -> Self {
        Self {
            tab_label_format: Box::new(|raw| format_tab_label(raw)),
        }
    }
}

impl BreadcrumbResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the datatable tab-label transform.
    pub fn with_tab_label_format(
        format: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            tab_label_format: Box::new(format),
        }
    }

    /// Walk the snapshot and produce the trail, root to current.
    pub fn resolve(&self, root: &RouteNode) -> Vec<Breadcrumb> {
        let mut trail = Vec::new();
        let mut url = String::new();
        let mut current = root;
        loop {
            let mut next = None;
            for child in &current.children {
                // Named outlets never advance the path or produce a crumb.
                if child.outlet != Outlet::Primary {
                    continue;
                }
                self.append_crumb(child, &mut url, &mut trail);
                next = Some(child);
            }
            match next {
                Some(node) => current = node,
                None => break,
            }
        }
        debug!(crumbs = trail.len(), "breadcrumb trail resolved");
        trail
    }

    fn append_crumb(&self, node: &RouteNode, url: &mut String, trail: &mut Vec<Breadcrumb>) {
        let joined = node.segments.join("/");
        if !joined.is_empty() {
            url.push('/');
            url.push_str(&joined);
        }

        let label = if url.is_empty() {
            Some(HOME_LABEL.to_string())
        } else {
            node.data
                .as_ref()
                .and_then(|data| self.label_from_data(node, data, url))
        };

        let link = node
            .data
            .as_ref()
            .and_then(|data| data.add_breadcrumb_link.clone())
            .unwrap_or_else(|| {
                if url.is_empty() {
                    "/".to_string()
                } else {
                    url.clone()
                }
            });
        let link = normalize_client_url(&link);

        if let Some(label) = label {
            trail.push(Breadcrumb {
                label: truncate_label(&label),
                url: link,
            });
        }
    }

    /// Label precedence: resolved property path, then route parameter, then
    /// the static label. Dynamic labels of known entity routes are replaced
    /// from the entity's resolved payload; the client entity additionally
    /// pins the running URL to its `/general` landing page.
    fn label_from_data(
        &self,
        node: &RouteNode,
        data: &RouteData,
        url: &mut String,
    ) -> Option<String> {
        let base;
        let dynamic;
        if let Some(path) = &data.route_resolve_breadcrumb {
            base = resolve_property_path(&data.resolved, path);
            dynamic = true;
        } else if let Some(param) = &data.route_param_breadcrumb {
            base = node.params.get(param).map(|value| {
                if param == DATATABLE_PARAM {
                    (self.tab_label_format)(value)
                } else {
                    value.clone()
                }
            });
            dynamic = true;
        } else {
            base = data.breadcrumb.clone();
            dynamic = false;
        }

        if !dynamic || base.is_none() {
            return base;
        }

        let Some(kind) = data.breadcrumb.as_deref().and_then(EntityKind::from_marker) else {
            return base;
        };
        let label = kind.label(&data.resolved).filter(|label| !label.is_empty());
        if label.is_some() && kind == EntityKind::Clients {
            url.push_str("/general");
        }
        label
    }
}

/// Walk `path` into the resolved-data bag. A missing intermediate means no
/// label for this node, never an error.
fn resolve_property_path(resolved: &HashMap<String, Value>, path: &[String]) -> Option<String> {
    let (first, rest) = path.split_first()?;
    let mut value = resolved.get(first)?;
    for key in rest {
        value = value.get(key)?;
    }
    label_text(value)
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut truncated: String = label.chars().take(MAX_LABEL_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Client sub-pages reach the same screens through two route shapes; rewrite
/// either to the canonical form ending in a single `/general`.
fn normalize_client_url(url: &str) -> String {
    if url.len() <= 8 || !url.contains("/clients/") {
        return url.to_string();
    }
    let mut rewritten = url.replace("/general/", "/");
    while rewritten.contains("//") {
        rewritten = rewritten.replace("//", "/");
    }
    rewritten.push_str("/general");
    while rewritten.contains("/general/general") {
        rewritten = rewritten.replace("/general/general", "/general");
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncates_long_labels() {
        let long = "A Very Long Product Name That Overflows";
        assert_eq!(long.chars().count(), 39);
        assert_eq!(
            truncate_label(long),
            "A Very Long Product Name That ...".to_string()
        );
        assert_eq!(truncate_label("Short"), "Short");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let label: String = "é".repeat(31);
        let truncated = truncate_label(&label);
        assert_eq!(truncated.chars().count(), MAX_LABEL_CHARS + 3);
    }

    #[test]
    fn client_urls_end_in_one_general_segment() {
        assert_eq!(
            normalize_client_url("/clients/5/general/loans-accounts"),
            "/clients/5/loans-accounts/general"
        );
        assert_eq!(normalize_client_url("/clients/5/general"), "/clients/5/general");
        assert_eq!(normalize_client_url("/clients/5"), "/clients/5/general");
    }

    #[test]
    fn non_client_urls_are_untouched() {
        assert_eq!(normalize_client_url("/groups/5/general"), "/groups/5/general");
        assert_eq!(normalize_client_url("/clients"), "/clients");
    }

    #[test]
    fn property_path_walks_nested_objects() {
        let resolved = HashMap::from([(
            "user".to_string(),
            json!({ "profile": { "username": "jdoe" } }),
        )]);
        let path = vec!["user".into(), "profile".into(), "username".into()];
        assert_eq!(resolve_property_path(&resolved, &path), Some("jdoe".into()));
    }

    #[test]
    fn missing_intermediate_property_yields_no_label() {
        let resolved = HashMap::from([("user".to_string(), json!({}))]);
        let path = vec!["user".into(), "profile".into(), "username".into()];
        assert_eq!(resolve_property_path(&resolved, &path), None);
        assert_eq!(resolve_property_path(&HashMap::new(), &path), None);
    }
}
