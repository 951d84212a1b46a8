//! Collaborator seams for the batch importer.

use std::time::Duration;

use serde::Deserialize;

use leads_model::LeadRecord;

use crate::error::Result;

/// The destination record store.
///
/// One bulk insert per batch; the store reports how many rows it actually
/// persisted.
pub trait LeadStore: Send + Sync {
    /// Inserts the whole batch at once and returns the inserted row count.
    fn insert_batch(&self, records: &[LeadRecord]) -> Result<usize>;
}

/// A messaging channel instance connected on behalf of one tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInstance {
    /// Instance identifier used in verification calls.
    pub name: String,
}

/// Outcome of checking one phone number against the messaging network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NumberCheck {
    /// The number as echoed by the collaborator (digits only).
    pub number: String,
    /// True if the number is reachable on the network.
    pub exists: bool,
    /// Opaque channel identifier, present when the number exists.
    #[serde(default)]
    pub jid: Option<String>,
}

/// The phone-number verification collaborator.
pub trait VerificationClient: Send + Sync {
    /// Looks up an active, connected channel instance for the tenant.
    ///
    /// `Ok(None)` means no instance is connected. That is a normal
    /// condition, not an error; the batch imports unverified.
    fn connected_instance(&self, scope_id: &str) -> Result<Option<ChannelInstance>>;

    /// Checks a chunk of digit-string numbers in one call.
    fn check_numbers(&self, instance: &ChannelInstance, numbers: &[String]) -> Result<Vec<NumberCheck>>;
}

/// Injected pause between verification chunks.
///
/// The importer issues chunked calls strictly sequentially with a pause
/// before each call after the first. Tests inject a recording
/// implementation instead of sleeping.
pub trait Throttle: Send + Sync {
    fn pause(&self);
}

impl<S: LeadStore + ?Sized> LeadStore for &S {
    fn insert_batch(&self, records: &[LeadRecord]) -> Result<usize> {
        (**self).insert_batch(records)
    }
}

impl<V: VerificationClient + ?Sized> VerificationClient for &V {
    fn connected_instance(&self, scope_id: &str) -> Result<Option<ChannelInstance>> {
        (**self).connected_instance(scope_id)
    }

    fn check_numbers(&self, instance: &ChannelInstance, numbers: &[String]) -> Result<Vec<NumberCheck>> {
        (**self).check_numbers(instance, numbers)
    }
}

impl<T: Throttle + ?Sized> Throttle for &T {
    fn pause(&self) {
        (**self).pause()
    }
}

/// Production throttle: a fixed blocking sleep.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    /// The courtesy delay used between verification chunks.
    pub const DEFAULT: Self = Self(Duration::from_millis(500));
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Throttle for FixedDelay {
    fn pause(&self) {
        std::thread::sleep(self.0);
    }
}

/// No-op throttle for tests and hosts that throttle elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl Throttle for NoPause {
    fn pause(&self) {}
}
