//! Common test utilities and fixtures for integration tests.
//!
//! Every test server runs against a fixed clock so scheduled dates are
//! deterministic.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use latex_drill_core::{EquivalenceTable, FixedClock, QualityPolicy, Sm2};

use latex_drill_api::{router, AppState};

/// Instant every test server treats as "now".
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
}

/// Test context holding the router under test.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Context with the bundled equivalence table and default parameters.
    pub fn new() -> Self {
        let table = EquivalenceTable::bundled().expect("bundled table must load");
        Self::with_table(table)
    }

    /// Context with a specific equivalence table.
    pub fn with_table(table: EquivalenceTable) -> Self {
        let state = AppState::new(
            table,
            Sm2::default(),
            QualityPolicy::default(),
            Arc::new(FixedClock(now())),
        );
        Self { app: router(state) }
    }

    /// Start an in-memory test server.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.app.clone()).expect("Failed to start test server")
    }
}
