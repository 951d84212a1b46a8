//! Lead status enumerations.
//!
//! Wire strings are kept verbatim (`novo`, `conversa_iniciada`, …) because
//! they are the record store's enum values; renaming them here would break
//! every persisted row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LeadError;

/// Pipeline status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Newly imported, not yet contacted.
    #[default]
    Novo,
    /// First conversation started.
    ConversaIniciada,
    /// Proposal sent.
    PropostaEnviada,
    /// Payment link sent.
    LinkPagamentoEnviado,
    /// Paid.
    Pago,
    /// Lost.
    Perdido,
}

impl LeadStatus {
    /// The store's wire string for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Novo => "novo",
            Self::ConversaIniciada => "conversa_iniciada",
            Self::PropostaEnviada => "proposta_enviada",
            Self::LinkPagamentoEnviado => "link_pagamento_enviado",
            Self::Pago => "pago",
            Self::Perdido => "perdido",
        }
    }

    /// All statuses, in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Novo,
        Self::ConversaIniciada,
        Self::PropostaEnviada,
        Self::LinkPagamentoEnviado,
        Self::Pago,
        Self::Perdido,
    ];
}

impl FromStr for LeadStatus {
    type Err = LeadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == needle)
            .ok_or_else(|| LeadError::UnknownStatus(raw.to_string()))
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment lifecycle of a lead, owned by the store schema.
///
/// The import pipeline never advances this; it only supplies the default
/// for freshly inserted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No payment artifact exists yet.
    #[default]
    NotCreated,
    /// A payment link or invoice was created.
    Created,
    /// Payment confirmed.
    Paid,
}

impl PaymentStatus {
    /// The store's wire string for this payment status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotCreated => "not_created",
            Self::Created => "created",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
