//! Reviewer identity and region scoping.
//!
//! Identity is passed explicitly — nothing in this crate derives the acting
//! user or tier from ambient state. Region scoping is a pluggable predicate
//! over the school a record belongs to; the provided filters match explicit
//! block and district codes.

use pathya_client::models::School;
use pathya_core::AdminTier;

/// The acting reviewer, supplied by the caller.
#[derive(Debug, Clone)]
pub struct ReviewerContext {
    /// Tier the reviewer acts at.
    pub tier: AdminTier,
    /// Identity recorded on actions that carry one (issue raising).
    pub user: String,
}

impl ReviewerContext {
    pub fn new(tier: AdminTier, user: impl Into<String>) -> Self {
        Self {
            tier,
            user: user.into(),
        }
    }
}

/// Predicate deciding whether a school falls inside the caller's region.
///
/// Object-safe so services can take `&dyn ScopeFilter`.
pub trait ScopeFilter: Send + Sync {
    fn matches(&self, school: &School) -> bool;
}

/// Scope of a block reviewer: schools whose block code matches exactly.
#[derive(Debug, Clone)]
pub struct BlockScope {
    pub block_code: String,
}

impl BlockScope {
    pub fn new(block_code: impl Into<String>) -> Self {
        Self {
            block_code: block_code.into(),
        }
    }
}

impl ScopeFilter for BlockScope {
    fn matches(&self, school: &School) -> bool {
        school.block_code == self.block_code
    }
}

/// Scope of a district reviewer: schools whose district code matches
/// exactly.
#[derive(Debug, Clone)]
pub struct DistrictScope {
    pub district_code: String,
}

impl DistrictScope {
    pub fn new(district_code: impl Into<String>) -> Self {
        Self {
            district_code: district_code.into(),
        }
    }
}

impl ScopeFilter for DistrictScope {
    fn matches(&self, school: &School) -> bool {
        school.district_code == self.district_code
    }
}

/// State-tier scope: every school matches.
#[derive(Debug, Clone, Default)]
pub struct StatewideScope;

impl ScopeFilter for StatewideScope {
    fn matches(&self, _school: &School) -> bool {
        true
    }
}
