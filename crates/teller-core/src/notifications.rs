//! Notification link resolution and tray windowing.
//!
//! Self-contained entities route directly; account notifications need the
//! owning client or group, which the caller fetches out-of-band before
//! completing the path with [`account_route`].

use serde::{Deserialize, Serialize};

/// Tray capacity shared by the read and unread lists.
pub const TRAY_LIMIT: usize = 9;

/// One user notification as served by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notification {
    pub id: i64,
    pub object_type: String,
    pub object_id: i64,
    pub action: Option<String>,
    pub content: Option<String>,
    pub is_read: bool,
    pub created_at: Option<String>,
}

/// Account types whose routes need the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Loan,
    Savings,
    FixedDeposit,
    RecurringDeposit,
    Share,
}

/// Owner of an account, fetched out-of-band by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Client(i64),
    Group(i64),
}

/// Where a notification should take the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    /// Fully-determined route.
    Route(String),
    /// The route needs the account's owner; complete it with
    /// [`account_route`].
    NeedsOwner { kind: AccountKind, account_id: i64 },
    /// Object type with no known route.
    Unknown,
}

/// Resolve a notification to its navigation target. The route map is
/// closed; unknown object types come back as [`NotificationTarget::Unknown`]
/// rather than a broken link.
pub fn target_for(notification: &Notification) -> NotificationTarget {
    let id = notification.object_id;
    match notification.object_type.as_str() {
        "client" => NotificationTarget::Route(format!("/clients/{id}")),
        "group" => NotificationTarget::Route(format!("/groups/{id}")),
        "center" => NotificationTarget::Route(format!("/centers/{id}")),
        "shareProduct" => NotificationTarget::Route(format!("/products/share-products/{id}")),
        "loanProduct" => NotificationTarget::Route(format!("/products/loan-products/{id}")),
        "loan" => NotificationTarget::NeedsOwner {
            kind: AccountKind::Loan,
            account_id: id,
        },
        "savingsAccount" => NotificationTarget::NeedsOwner {
            kind: AccountKind::Savings,
            account_id: id,
        },
        "fixedDeposit" => NotificationTarget::NeedsOwner {
            kind: AccountKind::FixedDeposit,
            account_id: id,
        },
        "recurringDepositAccount" => NotificationTarget::NeedsOwner {
            kind: AccountKind::RecurringDeposit,
            account_id: id,
        },
        "shareAccount" => NotificationTarget::NeedsOwner {
            kind: AccountKind::Share,
            account_id: id,
        },
        _ => NotificationTarget::Unknown,
    }
}

/// Route for an account once its owner is known.
pub fn account_route(kind: AccountKind, owner: Owner, account_id: i64) -> String {
    let (entity, entity_id) = match owner {
        Owner::Client(id) => ("clients", id),
        Owner::Group(id) => ("groups", id),
    };
    let segment = match kind {
        AccountKind::Loan => "loans-accounts",
        AccountKind::Savings => "savings-accounts",
        AccountKind::FixedDeposit => "fixed-deposits-accounts",
        AccountKind::RecurringDeposit => "recurring-deposits-accounts",
        AccountKind::Share => "shares-accounts",
    };
    format!("/{entity}/{entity_id}/{segment}/{account_id}")
}

/// How many read notifications still fit under the tray limit next to the
/// unread ones.
pub fn displayed_read_count(unread_count: usize) -> usize {
    TRAY_LIMIT.saturating_sub(unread_count)
}

/// The slice of read notifications the tray shows.
pub fn displayed_read(unread_count: usize, read: &[Notification]) -> &[Notification] {
    let count = displayed_read_count(unread_count).min(read.len());
    &read[..count]
}
