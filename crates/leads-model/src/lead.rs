//! Validated lead and persisted record shapes.

use serde::{Deserialize, Serialize};

use crate::enums::{LeadStatus, PaymentStatus};

/// A lead that passed row validation.
///
/// Constructed once by the validator and immutable thereafter, except for
/// the two verification fields (`remote_jid`, `whatsapp_verified`) which
/// the import orchestrator attaches after external phone verification.
/// A verified lead never reverts to unverified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedLead {
    /// Display name. Non-empty after trimming.
    pub name: String,
    /// Pipeline status.
    pub status: LeadStatus,
    /// Shape-checked contact e-mail.
    pub contact_email: Option<String>,
    /// Digits-only WhatsApp number (10–13 digits when valid).
    pub contact_whatsapp: Option<String>,
    /// Free-text category.
    pub category: Option<String>,
    /// Free-text acquisition source.
    pub source: Option<String>,
    /// Free-text notes.
    pub description: Option<String>,
    /// Non-negative payment amount.
    pub payment_amount: Option<f64>,
    /// Preferred onboarding time, zero-padded `HH:MM`.
    pub integration_start_time: Option<String>,
    /// Messaging-network id confirmed by the verification collaborator.
    pub remote_jid: Option<String>,
    /// True once the phone number was confirmed reachable.
    pub whatsapp_verified: bool,
}

impl ValidatedLead {
    /// Creates a minimal lead with defaults for everything but the name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: LeadStatus::default(),
            contact_email: None,
            contact_whatsapp: None,
            category: None,
            source: None,
            description: None,
            payment_amount: None,
            integration_start_time: None,
            remote_jid: None,
            whatsapp_verified: false,
        }
    }

    /// Marks the lead verified with the channel id the collaborator
    /// returned. The only status transition this pipeline performs.
    pub fn mark_verified(&mut self, jid: impl Into<String>) {
        self.remote_jid = Some(jid.into());
        self.whatsapp_verified = true;
    }

    /// Converts the lead to the store's row shape.
    #[must_use]
    pub fn to_record(&self, organization_id: &str) -> LeadRecord {
        LeadRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            status: self.status,
            contact_email: self.contact_email.clone(),
            contact_whatsapp: self.contact_whatsapp.clone(),
            source: self.source.clone(),
            integration_start_time: self
                .integration_start_time
                .as_ref()
                .map(|time| format!("{time}:00+00")),
            payment_amount: self.payment_amount,
            organization_id: organization_id.to_string(),
            whatsapp_verified: self.whatsapp_verified,
            remote_jid: self.remote_jid.clone(),
            payment_status: PaymentStatus::default(),
        }
    }
}

/// The record store's row shape for a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: LeadStatus,
    pub contact_email: Option<String>,
    pub contact_whatsapp: Option<String>,
    pub source: Option<String>,
    /// Time of day with UTC offset, `HH:MM:SS+00`.
    pub integration_start_time: Option<String>,
    pub payment_amount: Option<f64>,
    pub organization_id: String,
    pub whatsapp_verified: bool,
    pub remote_jid: Option<String>,
    pub payment_status: PaymentStatus,
}
