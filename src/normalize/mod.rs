//! Normal-form advice
//!
//! An advisor inspects a loaded table and may return a SQL script that
//! rewrites it into a higher normal form (for example splitting out
//! attributes that depend on only part of a composite key). No advisor ships
//! with this crate; the registry starts empty and says so.

use crate::error::Result;
use crate::types::TableDefinition;
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info};

/// Analyzes a table and optionally proposes a corrective SQL script
pub trait NormalFormAdvisor {
    /// Short name used in logs and reports, e.g. "2nf"
    fn name(&self) -> &str;

    /// Return `Some(script)` when the table should be restructured
    fn recommend(&self, table: &TableDefinition, conn: &Connection) -> Result<Option<String>>;
}

/// A script proposed by one advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub advisor: String,
    pub script: String,
}

/// The set of advisors to run after a load
#[derive(Default)]
pub struct AdvisorRegistry {
    advisors: Vec<Box<dyn NormalFormAdvisor>>,
}

impl AdvisorRegistry {
    pub fn new() -> Self {
        AdvisorRegistry::default()
    }

    pub fn register(&mut self, advisor: Box<dyn NormalFormAdvisor>) {
        self.advisors.push(advisor);
    }

    pub fn is_empty(&self) -> bool {
        self.advisors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.advisors.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.advisors.iter().map(|a| a.name()).collect()
    }

    /// Run every registered advisor in registration order
    pub fn run(&self, table: &TableDefinition, conn: &Connection) -> Result<Vec<Recommendation>> {
        if self.is_empty() {
            info!("Normal-form analysis unavailable: no advisors registered");
            return Ok(Vec::new());
        }

        let mut recommendations = Vec::new();
        for advisor in &self.advisors {
            info!("Running {} analysis on {}", advisor.name(), table.name);
            match advisor.recommend(table, conn)? {
                Some(script) => recommendations.push(Recommendation {
                    advisor: advisor.name().to_string(),
                    script,
                }),
                None => debug!("{} has no changes for {}", advisor.name(), table.name),
            }
        }

        Ok(recommendations)
    }
}
