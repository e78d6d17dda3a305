//! Lexical extraction of typed identifiers and endpoint declarations.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::str::FromStr;

static FEATURE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bF\d{3}\b").expect("valid regex"));
static SCREEN_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bS\d{3}\b").expect("valid regex"));
static TEST_CASE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bTC-F\d{3}-\d{2}\b").expect("valid regex"));
static ENDPOINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(GET|POST|PUT|PATCH|DELETE)\s+(/\S+)").expect("valid regex")
});
static CONTRACT_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*상태\*\*:\s*`(Draft|Review|Locked)`").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Feature,
    Screen,
    TestCase,
}

impl IdKind {
    fn pattern(self) -> &'static Regex {
        match self {
            IdKind::Feature => &*FEATURE_ID,
            IdKind::Screen => &*SCREEN_ID,
            IdKind::TestCase => &*TEST_CASE_ID,
        }
    }
}

/// Distinct identifiers of `kind` in `text`, in sorted order.
pub fn extract_ids(text: &str, kind: IdKind) -> BTreeSet<String> {
    kind.pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parent feature of a test-case id: `TC-F001-01` -> `F001`.
pub fn parent_feature(test_case_id: &str) -> Option<&str> {
    test_case_id.split('-').nth(1)
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Endpoint {
    pub method: String,
    pub path: String,
}

pub fn extract_endpoints(text: &str) -> BTreeSet<Endpoint> {
    ENDPOINT
        .captures_iter(text)
        .map(|caps| Endpoint {
            method: caps[1].to_string(),
            path: caps[2].to_string(),
        })
        .collect()
}

/// Lifecycle state declared in an API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractState {
    Draft,
    Review,
    Locked,
}

impl FromStr for ContractState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(ContractState::Draft),
            "Review" => Ok(ContractState::Review),
            "Locked" => Ok(ContractState::Locked),
            other => Err(other.to_string()),
        }
    }
}

/// Raw value of the first `**상태**: `<value>`` declaration, if any.
pub fn find_contract_state(text: &str) -> Option<&str> {
    CONTRACT_STATE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
