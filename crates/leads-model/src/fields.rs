//! Canonical field schema for lead records.
//!
//! Source spreadsheets arrive with arbitrary column headers; every column
//! that carries lead data ultimately resolves to one of the canonical
//! fields defined here. The alias catalogue attached to each field is the
//! single source of truth for header resolution: both the heuristic header
//! mapper and the validator's direct-extraction mode consume it.

use serde::{Deserialize, Serialize};

/// The closed set of target attributes a lead record conforms to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// Lead display name. Required.
    Name,
    /// Contact e-mail address.
    Email,
    /// Contact WhatsApp phone number.
    Whatsapp,
    /// Pipeline status of the lead.
    Status,
    /// Free-text business category.
    Category,
    /// Free-text acquisition source.
    Source,
    /// Free-text notes.
    Description,
    /// Agreed payment amount.
    PaymentAmount,
    /// Preferred onboarding time of day (`HH:MM`).
    IntegrationStartTime,
}

impl CanonicalField {
    /// All canonical fields, in schema order.
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Email,
        Self::Whatsapp,
        Self::Status,
        Self::Category,
        Self::Source,
        Self::Description,
        Self::PaymentAmount,
        Self::IntegrationStartTime,
    ];

    /// The canonical snake_case name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
            Self::Status => "status",
            Self::Category => "category",
            Self::Source => "source",
            Self::Description => "description",
            Self::PaymentAmount => "payment_amount",
            Self::IntegrationStartTime => "integration_start_time",
        }
    }

    /// Known header spellings for this field, lower-cased.
    ///
    /// Ordering matters: the canonical name comes first, followed by the
    /// primary localized spelling, then looser aliases. The header mapper
    /// scans headers against these lists in order and takes the first
    /// match, which is what makes a canonical-name header win over an
    /// alias header when both are present.
    #[must_use]
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &[
                "name",
                "nome",
                "razao social",
                "razão social",
                "razao",
                "razão",
                "fantasia",
                "nome fantasia",
                "cliente",
            ],
            Self::Email => &["email", "e-mail", "e mail", "mail", "correio"],
            Self::Whatsapp => &[
                "whatsapp",
                "whats",
                "telefone",
                "phone",
                "celular",
                "mobile",
                "fone",
            ],
            Self::Status => &[
                "status",
                "situacao",
                "situação",
                "etapa",
                "estagio",
                "estágio",
                "fase",
            ],
            Self::Category => &["category", "categoria", "tipo", "segmento"],
            Self::Source => &["source", "origem", "fonte", "canal"],
            Self::Description => &[
                "description",
                "descricao",
                "descrição",
                "observacao",
                "observação",
                "obs",
                "notas",
                "notes",
            ],
            Self::PaymentAmount => &[
                "payment_amount",
                "valor",
                "valor pagamento",
                "valor do pagamento",
                "preco",
                "preço",
                "mensalidade",
                "amount",
            ],
            Self::IntegrationStartTime => &[
                "integration_start_time",
                "horario",
                "horário",
                "horario inicio",
                "horário início",
                "hora",
                "inicio",
                "início",
            ],
        }
    }

    /// Resolves a field name to a canonical field.
    ///
    /// Accepts the canonical snake_case names as well as any catalogued
    /// alias spelling, because upstream collaborators (notably the AI
    /// mapping service) may echo either form back.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        for field in Self::ALL {
            if field.as_str() == needle {
                return Some(field);
            }
        }
        for field in Self::ALL {
            if field.aliases().contains(&needle.as_str()) {
                return Some(field);
            }
        }
        None
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
