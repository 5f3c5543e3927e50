//! Stub inspector shared by the reconciler tests

use crate::inspector::{AclInspector, ConsumerInspector, CredentialInspector};
use crate::types::Attributes;
use anyhow::{Result, anyhow};
use std::cell::RefCell;

/// Answers every query the same way and records what was asked
///
/// Answers left as `None` fail, so a test notices a query it did not expect.
#[derive(Debug, Default)]
pub struct StubInspector {
    pub exists: bool,
    pub id: Option<&'static str>,
    pub current: Option<bool>,
    pub calls: RefCell<Vec<String>>,
}

impl StubInspector {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn live(id: &'static str) -> Self {
        Self {
            exists: true,
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn current(mut self, current: bool) -> Self {
        self.current = Some(current);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn live_id(&self) -> Result<String> {
        self.id
            .map(String::from)
            .ok_or_else(|| anyhow!("identity lookup not stubbed"))
    }
}

impl ConsumerInspector for StubInspector {
    fn exists(&self, username: &str) -> Result<bool> {
        self.record(format!("exists({username})"));
        Ok(self.exists)
    }
}

impl CredentialInspector for StubInspector {
    fn exists(&self, consumer: &str, name: &str) -> Result<bool> {
        self.record(format!("exists({consumer}, {name})"));
        Ok(self.exists)
    }

    fn identity(&self, consumer: &str, name: &str) -> Result<String> {
        self.record(format!("identity({consumer}, {name})"));
        self.live_id()
    }

    fn is_current(&self, consumer: &str, name: &str, _desired: &Attributes) -> Result<bool> {
        self.record(format!("is_current({consumer}, {name})"));
        self.current
            .ok_or_else(|| anyhow!("currency check not stubbed"))
    }
}

impl AclInspector for StubInspector {
    fn exists(&self, consumer: &str, group: &str) -> Result<bool> {
        self.record(format!("exists({consumer}, {group})"));
        Ok(self.exists)
    }

    fn identity(&self, consumer: &str, group: &str) -> Result<String> {
        self.record(format!("identity({consumer}, {group})"));
        self.live_id()
    }
}
