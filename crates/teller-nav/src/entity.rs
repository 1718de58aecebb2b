//! Closed table of entity routes whose breadcrumb label comes from resolved
//! data rather than the raw route label.

use std::collections::HashMap;

use serde_json::Value;

/// Entity markers recognized in route data. One extractor per marker; the
/// table is closed, not extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Clients,
    Groups,
    Centers,
    Loans,
    Savings,
    FixedDeposits,
    LoanProducts,
    Charges,
    SavingProducts,
    ShareProducts,
    FixedDepositProducts,
    RecurringDepositProducts,
    FloatingRates,
    TaxComponents,
    TaxGroups,
}

impl EntityKind {
    pub fn from_marker(marker: &str) -> Option<Self> {
        Some(match marker {
            "Clients" => Self::Clients,
            "Groups" => Self::Groups,
            "Centers" => Self::Centers,
            "Loans" => Self::Loans,
            "Savings" => Self::Savings,
            "Fixed Deposits" => Self::FixedDeposits,
            "Loan Products" => Self::LoanProducts,
            "Charges" => Self::Charges,
            "Saving Products" => Self::SavingProducts,
            "Share Products" => Self::ShareProducts,
            "Fixed Deposit Products" => Self::FixedDepositProducts,
            "Recurring Deposit Products" => Self::RecurringDepositProducts,
            "Floating Rates" => Self::FloatingRates,
            "Tax Components" => Self::TaxComponents,
            "Tax Groups" => Self::TaxGroups,
            _ => return None,
        })
    }

    /// Key of the resolved-data object this marker reads from.
    fn source_key(self) -> &'static str {
        match self {
            Self::Clients => "clientViewData",
            Self::Groups => "groupViewData",
            Self::Centers => "centerViewData",
            Self::Loans => "loanDetailsData",
            Self::Savings => "savingsAccountData",
            Self::FixedDeposits => "fixedDepositsAccountData",
            Self::LoanProducts => "loanProduct",
            Self::Charges => "loansAccountCharge",
            Self::SavingProducts => "savingProduct",
            Self::ShareProducts => "shareProduct",
            Self::FixedDepositProducts => "fixedDepositProduct",
            Self::RecurringDepositProducts => "recurringDepositProduct",
            Self::FloatingRates => "floatingRate",
            Self::TaxComponents => "taxComponent",
            Self::TaxGroups => "taxGroup",
        }
    }

    /// Display label from the resolved payload. `None` when the payload or
    /// the required fields are missing; the node then drops out of the
    /// trail instead of aborting the walk.
    pub fn label(self, resolved: &HashMap<String, Value>) -> Option<String> {
        let source = resolved.get(self.source_key())?;
        match self {
            Self::Clients => field_text(source, "displayName"),
            Self::Groups
            | Self::Centers
            | Self::LoanProducts
            | Self::Charges
            | Self::SavingProducts
            | Self::ShareProducts
            | Self::FixedDepositProducts
            | Self::RecurringDepositProducts
            | Self::FloatingRates
            | Self::TaxComponents
            | Self::TaxGroups => field_text(source, "name"),
            Self::Loans => {
                let product = field_text(source, "loanProductName")?;
                let account = field_text(source, "accountNo")?;
                Some(format!("{product} ({account})"))
            }
            Self::Savings => {
                // Both parts are optional on savings payloads; the account
                // number only shows when present.
                let product = field_text(source, "savingsProductName").unwrap_or_default();
                match field_text(source, "accountNo") {
                    Some(account) => Some(format!("{product} ({account})")),
                    None if product.is_empty() => None,
                    None => Some(product),
                }
            }
            Self::FixedDeposits => {
                let product = field_text(source, "depositProductName")?;
                let account = field_text(source, "accountNo")?;
                Some(format!("{product} ({account})"))
            }
        }
    }
}

/// Label text for a JSON value: non-empty strings pass through, numbers are
/// formatted, anything else yields nothing.
pub(crate) fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn field_text(source: &Value, field: &str) -> Option<String> {
    label_text(source.get(field)?)
}
