//! Activated-route snapshot types.
//!
//! The shell layer assembles one `RouteNode` tree per completed navigation,
//! either through the builder methods or by deserializing the JSON shape
//! its router emits.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Placement of a route node in the layout. Only the primary outlet
/// contributes to the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Outlet {
    Primary,
    Named(String),
}

impl From<String> for Outlet {
    fn from(name: String) -> Self {
        if name == "primary" {
            Outlet::Primary
        } else {
            Outlet::Named(name)
        }
    }
}

impl Default for Outlet {
    fn default() -> Self {
        Outlet::Primary
    }
}

/// Breadcrumb configuration and resolved payloads attached to a route.
///
/// The recognized keys mirror the route configuration; everything else in
/// the data bag is a resolver payload and lands in `resolved`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteData {
    /// Static label, or one of the known entity markers.
    pub breadcrumb: Option<String>,
    /// Name of the route parameter whose value becomes the label.
    pub route_param_breadcrumb: Option<String>,
    /// Property path into `resolved` yielding the label.
    pub route_resolve_breadcrumb: Option<Vec<String>>,
    /// Literal URL override for the generated link.
    pub add_breadcrumb_link: Option<String>,
    /// Resolver-supplied payloads keyed by resolve name.
    #[serde(flatten)]
    pub resolved: HashMap<String, Value>,
}

impl RouteData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breadcrumb(mut self, label: impl Into<String>) -> Self {
        self.breadcrumb = Some(label.into());
        self
    }

    pub fn with_param_breadcrumb(mut self, param: impl Into<String>) -> Self {
        self.route_param_breadcrumb = Some(param.into());
        self
    }

    pub fn with_resolve_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.route_resolve_breadcrumb = Some(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.add_breadcrumb_link = Some(url.into());
        self
    }

    pub fn with_resolved(mut self, key: impl Into<String>, value: Value) -> Self {
        self.resolved.insert(key.into(), value);
        self
    }
}

/// One level of the activated navigation tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteNode {
    /// URL path segments this node contributed (actual values, not route
    /// patterns). Empty for pathless wrapper routes and the root.
    pub segments: Vec<String>,
    pub outlet: Outlet,
    /// Route parameters in scope at this node, by parameter name.
    pub params: HashMap<String, String>,
    pub data: Option<RouteData>,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// The tree root. Contributes no path itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// A node for the given path, split on `/`.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            segments: path
                .as_ref()
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(String::from)
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_outlet(mut self, name: impl Into<String>) -> Self {
        self.outlet = Outlet::from(name.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: RouteData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_child(mut self, child: RouteNode) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_path_into_segments() {
        let node = RouteNode::new("products/loan-products");
        assert_eq!(node.segments, vec!["products", "loan-products"]);
        assert_eq!(RouteNode::new("").segments, Vec::<String>::new());
    }

    #[test]
    fn deserializes_snapshot_json() {
        let node: RouteNode = serde_json::from_value(json!({
            "segments": ["clients", "5"],
            "params": { "clientId": "5" },
            "data": {
                "breadcrumb": "Clients",
                "routeParamBreadcrumb": "clientId",
                "clientViewData": { "displayName": "Jane Doe" }
            },
            "children": [
                { "segments": ["print"], "outlet": "popup" }
            ]
        }))
        .expect("snapshot deserializes");

        assert_eq!(node.outlet, Outlet::Primary);
        let data = node.data.expect("data present");
        assert_eq!(data.breadcrumb.as_deref(), Some("Clients"));
        assert_eq!(data.route_param_breadcrumb.as_deref(), Some("clientId"));
        assert_eq!(
            data.resolved["clientViewData"]["displayName"],
            json!("Jane Doe")
        );
        assert_eq!(node.children[0].outlet, Outlet::Named("popup".into()));
    }
}
