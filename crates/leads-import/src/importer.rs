//! Batch import orchestration.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use leads_model::{ImportResult, LeadRecord, ValidatedLead, ValidationError};

use crate::traits::{ChannelInstance, LeadStore, NumberCheck, Throttle, VerificationClient};

/// Numbers verified per external call.
pub const VERIFICATION_CHUNK_SIZE: usize = 10;

/// Orchestrates one batch: chunked phone verification, channel-id merge,
/// and a single bulk insert, with partial-success semantics throughout.
///
/// Verification-call failures are fatal to their chunk only; the affected
/// leads simply import unverified. Store failures are fatal to the batch
/// and converted into a failed [`ImportResult`], never propagated.
pub struct Importer<S, V, T> {
    store: S,
    verifier: V,
    throttle: T,
}

impl<S: LeadStore, V: VerificationClient, T: Throttle> Importer<S, V, T> {
    pub fn new(store: S, verifier: V, throttle: T) -> Self {
        Self {
            store,
            verifier,
            throttle,
        }
    }

    /// Imports a batch of validated leads scoped to one tenant.
    pub fn import_leads(
        &self,
        mut leads: Vec<ValidatedLead>,
        scope_id: &str,
        skip_verification: bool,
    ) -> ImportResult {
        let total_rows = leads.len();
        if leads.is_empty() {
            return ImportResult::failure(
                0,
                vec![ValidationError::general(0, "no valid lead to import")],
                "no valid lead to import",
            );
        }

        let instance = match self.verifier.connected_instance(scope_id) {
            Ok(instance) => instance,
            Err(err) => {
                // Lookup failure is treated like an absent instance: the
                // batch still imports, just unverified.
                warn!("channel instance lookup failed: {err}");
                None
            }
        };

        let numbers: Vec<String> = leads
            .iter()
            .filter_map(|lead| lead.contact_whatsapp.clone())
            .collect();

        if let Some(instance) = instance.as_ref()
            && !skip_verification
            && !numbers.is_empty()
        {
            let checks = self.verify_in_chunks(instance, &numbers);
            for lead in &mut leads {
                if let Some(number) = lead.contact_whatsapp.as_deref()
                    && let Some(check) = checks.get(number)
                    && check.exists
                {
                    match &check.jid {
                        Some(jid) => lead.mark_verified(jid.clone()),
                        None => lead.whatsapp_verified = true,
                    }
                }
            }
        }
        let verified = leads.iter().filter(|lead| lead.whatsapp_verified).count();

        let records: Vec<LeadRecord> = leads
            .iter()
            .map(|lead| lead.to_record(scope_id))
            .collect();
        let inserted = match self.store.insert_batch(&records) {
            Ok(inserted) => inserted,
            Err(err) => {
                warn!("bulk insert failed: {err}");
                return ImportResult::failure(
                    total_rows,
                    vec![ValidationError::general(0, err.to_string())],
                    err.to_string(),
                );
            }
        };
        if inserted == 0 {
            return ImportResult::failure(
                total_rows,
                Vec::new(),
                "nothing was imported, check data and permissions",
            );
        }

        let skipped = total_rows - inserted;
        let message = summary(
            inserted,
            skipped,
            verified,
            !numbers.is_empty(),
            instance.is_some(),
            skip_verification,
        );
        debug!(imported = inserted, skipped, verified, "batch imported");
        ImportResult {
            success: true,
            total_rows,
            imported: inserted,
            skipped,
            errors: Vec::new(),
            message,
        }
    }

    /// Verifies numbers in fixed-size chunks, strictly sequentially, with
    /// a pause before every call after the first. A failed call leaves its
    /// chunk unverified and the loop continues.
    fn verify_in_chunks(
        &self,
        instance: &ChannelInstance,
        numbers: &[String],
    ) -> BTreeMap<String, NumberCheck> {
        let mut results = BTreeMap::new();
        for (index, chunk) in numbers.chunks(VERIFICATION_CHUNK_SIZE).enumerate() {
            if index > 0 {
                self.throttle.pause();
            }
            match self.verifier.check_numbers(instance, chunk) {
                Ok(checks) => {
                    for check in checks {
                        results.insert(check.number.clone(), check);
                    }
                }
                Err(err) => {
                    warn!(chunk = index + 1, "verification chunk failed: {err}");
                }
            }
        }
        results
    }
}

fn summary(
    imported: usize,
    skipped: usize,
    verified: usize,
    had_numbers: bool,
    instance_connected: bool,
    skip_requested: bool,
) -> String {
    let mut message = format!("{imported} lead(s) imported");
    if verified > 0 {
        message.push_str(&format!(", {verified} verified on WhatsApp"));
    } else if had_numbers && !instance_connected {
        message.push_str(
            "; no WhatsApp instance connected, numbers will need manual verification",
        );
    } else if had_numbers && instance_connected && !skip_requested {
        message.push_str("; some numbers could not be verified");
    }
    if skipped > 0 {
        message.push_str(&format!("; {skipped} row(s) skipped"));
    }
    message
}
