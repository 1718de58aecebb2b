use serde_json::json;
use teller_nav::{Breadcrumb, BreadcrumbResolver, RouteData, RouteNode};

fn crumb(label: &str, url: &str) -> Breadcrumb {
    Breadcrumb {
        label: label.to_string(),
        url: url.to_string(),
    }
}

/// `/ -> clients -> 5` with a resolved client payload.
fn client_snapshot(display_name: &str) -> RouteNode {
    RouteNode::root().with_child(
        RouteNode::new("").with_child(
            RouteNode::new("clients")
                .with_data(RouteData::new().with_breadcrumb("Clients"))
                .with_child(
                    RouteNode::new("5")
                        .with_param("clientId", "5")
                        .with_data(
                            RouteData::new()
                                .with_breadcrumb("Clients")
                                .with_param_breadcrumb("clientId")
                                .with_resolved(
                                    "clientViewData",
                                    json!({ "displayName": display_name }),
                                ),
                        ),
                ),
        ),
    )
}

#[test]
fn client_chain_resolves_home_list_and_display_name() {
    let trail = BreadcrumbResolver::new().resolve(&client_snapshot("Jane Doe"));
    assert_eq!(
        trail,
        vec![
            crumb("Home", "/"),
            crumb("Clients", "/clients"),
            crumb("Jane Doe", "/clients/5/general"),
        ]
    );
}

#[test]
fn resolving_twice_yields_identical_trails() {
    let snapshot = client_snapshot("Jane Doe");
    let resolver = BreadcrumbResolver::new();
    assert_eq!(resolver.resolve(&snapshot), resolver.resolve(&snapshot));
}

#[test]
fn long_labels_are_truncated_with_ellipsis() {
    let name = "Extremely Long Client Name Overflowing";
    assert_eq!(name.chars().count(), 38);
    let trail = BreadcrumbResolver::new().resolve(&client_snapshot(name));
    assert_eq!(trail[2].label, "Extremely Long Client Name Ove...");
}

#[test]
fn missing_param_skips_node_without_aborting() {
    let snapshot = RouteNode::root().with_child(
        RouteNode::new("").with_child(
            RouteNode::new("system")
                .with_data(RouteData::new().with_breadcrumb("System"))
                .with_child(
                    // Param not present in the snapshot: no crumb here.
                    RouteNode::new("datatables")
                        .with_data(RouteData::new().with_param_breadcrumb("datatableName"))
                        .with_child(
                            RouteNode::new("create")
                                .with_data(RouteData::new().with_breadcrumb("Create")),
                        ),
                ),
        ),
    );

    let trail = BreadcrumbResolver::new().resolve(&snapshot);
    assert_eq!(
        trail,
        vec![
            crumb("Home", "/"),
            crumb("System", "/system"),
            crumb("Create", "/system/datatables/create"),
        ]
    );
}

#[test]
fn datatable_param_goes_through_tab_label_format() {
    let snapshot = RouteNode::root().with_child(
        RouteNode::new("").with_child(
            RouteNode::new("loan_collateral_details")
                .with_param("datatableName", "loan_collateral_details")
                .with_data(RouteData::new().with_param_breadcrumb("datatableName")),
        ),
    );

    let trail = BreadcrumbResolver::new().resolve(&snapshot);
    assert_eq!(trail[1].label, "Loan Collateral Details");
}

#[test]
fn named_outlets_never_contribute() {
    let snapshot = RouteNode::root().with_child(
        RouteNode::new("").with_child(
            RouteNode::new("nav")
                .with_outlet("sidebar")
                .with_data(RouteData::new().with_breadcrumb("Hidden")),
        ),
    );

    let trail = BreadcrumbResolver::new().resolve(&snapshot);
    assert_eq!(trail, vec![crumb("Home", "/")]);
}

#[test]
fn link_override_wins_and_is_still_normalized() {
    let snapshot = RouteNode::root().with_child(
        RouteNode::new("").with_child(
            RouteNode::new("audits").with_data(
                RouteData::new()
                    .with_breadcrumb("Audits")
                    .with_link("/clients/5/general/loans-accounts"),
            ),
        ),
    );

    let trail = BreadcrumbResolver::new().resolve(&snapshot);
    assert_eq!(trail[1], crumb("Audits", "/clients/5/loans-accounts/general"));
}

#[test]
fn resolve_path_label_honors_entity_override() {
    let snapshot = RouteNode::root().with_child(
        RouteNode::new("").with_child(
            RouteNode::new("loans-accounts/88").with_data(
                RouteData::new()
                    .with_breadcrumb("Loans")
                    .with_resolve_path(["loanDetailsData", "loanProductName"])
                    .with_resolved(
                        "loanDetailsData",
                        json!({ "loanProductName": "Agri Loan", "accountNo": "000000123" }),
                    ),
            ),
        ),
    );

    let trail = BreadcrumbResolver::new().resolve(&snapshot);
    assert_eq!(trail[1].label, "Agri Loan (000000123)");
}

#[test]
fn entity_route_without_payload_drops_out() {
    let snapshot = RouteNode::root().with_child(
        RouteNode::new("").with_child(
            RouteNode::new("savings-accounts/7")
                .with_param("savingsId", "7")
                .with_data(
                    RouteData::new()
                        .with_breadcrumb("Savings")
                        .with_param_breadcrumb("savingsId"),
                ),
        ),
    );

    let trail = BreadcrumbResolver::new().resolve(&snapshot);
    assert_eq!(trail, vec![crumb("Home", "/")]);
}

#[test]
fn custom_tab_label_format_is_used() {
    let resolver = BreadcrumbResolver::with_tab_label_format(|raw| raw.to_uppercase());
    let snapshot = RouteNode::root().with_child(
        RouteNode::new("").with_child(
            RouteNode::new("extra_info")
                .with_param("datatableName", "extra_info")
                .with_data(RouteData::new().with_param_breadcrumb("datatableName")),
        ),
    );

    assert_eq!(resolver.resolve(&snapshot)[1].label, "EXTRA_INFO");
}
