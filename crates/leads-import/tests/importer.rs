use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use leads_import::{
    ChannelInstance, ImportError, Importer, LeadStore, NumberCheck, Result, Throttle,
    VerificationClient,
};
use leads_model::{LeadRecord, ValidatedLead};

#[derive(Default)]
struct FakeStore {
    batches: Mutex<Vec<Vec<LeadRecord>>>,
    fail: bool,
    inserted_override: Option<usize>,
}

impl LeadStore for FakeStore {
    fn insert_batch(&self, records: &[LeadRecord]) -> Result<usize> {
        if self.fail {
            return Err(ImportError::Store("permission denied".to_string()));
        }
        self.batches.lock().unwrap().push(records.to_vec());
        Ok(self.inserted_override.unwrap_or(records.len()))
    }
}

impl FakeStore {
    fn insert_calls(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    fn last_batch(&self) -> Vec<LeadRecord> {
        self.batches.lock().unwrap().last().cloned().unwrap()
    }
}

#[derive(Default)]
struct FakeVerifier {
    instance: Option<ChannelInstance>,
    chunks: Mutex<Vec<Vec<String>>>,
    /// 1-based index of a chunk whose call should fail.
    fail_on_chunk: Option<usize>,
}

impl FakeVerifier {
    fn connected() -> Self {
        Self {
            instance: Some(ChannelInstance {
                name: "main".to_string(),
            }),
            ..Self::default()
        }
    }

    fn chunk_sizes(&self) -> Vec<usize> {
        self.chunks.lock().unwrap().iter().map(Vec::len).collect()
    }
}

impl VerificationClient for FakeVerifier {
    fn connected_instance(&self, _scope_id: &str) -> Result<Option<ChannelInstance>> {
        Ok(self.instance.clone())
    }

    fn check_numbers(&self, _instance: &ChannelInstance, numbers: &[String]) -> Result<Vec<NumberCheck>> {
        let mut chunks = self.chunks.lock().unwrap();
        chunks.push(numbers.to_vec());
        if self.fail_on_chunk == Some(chunks.len()) {
            return Err(ImportError::Verification("gateway timeout".to_string()));
        }
        Ok(numbers
            .iter()
            .map(|number| NumberCheck {
                number: number.clone(),
                exists: true,
                jid: Some(format!("{number}@s.whatsapp.net")),
            })
            .collect())
    }
}

#[derive(Default)]
struct CountingThrottle(AtomicUsize);

impl Throttle for CountingThrottle {
    fn pause(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn leads_with_numbers(count: usize) -> Vec<ValidatedLead> {
    (0..count)
        .map(|index| {
            let mut lead = ValidatedLead::named(format!("Lead {index}"));
            lead.contact_whatsapp = Some(format!("11987{index:06}"));
            lead
        })
        .collect()
}

#[test]
fn chunks_of_ten_with_pauses_between() {
    let store = FakeStore::default();
    let verifier = FakeVerifier::connected();
    let throttle = CountingThrottle::default();
    let importer = Importer::new(&store, &verifier, &throttle);

    let result = importer.import_leads(leads_with_numbers(25), "org-1", false);

    assert!(result.success);
    assert_eq!(result.imported, 25);
    assert_eq!(verifier.chunk_sizes(), vec![10, 10, 5]);
    assert_eq!(throttle.0.load(Ordering::SeqCst), 2);
    assert!(result.message.contains("25 verified"));
}

#[test]
fn empty_input_fails_without_store_io() {
    let store = FakeStore::default();
    let verifier = FakeVerifier::connected();
    let importer = Importer::new(&store, &verifier, CountingThrottle::default());

    let result = importer.import_leads(Vec::new(), "org-1", false);

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.message.contains("no valid lead"));
    assert_eq!(store.insert_calls(), 0);
}

#[test]
fn no_connected_instance_imports_unverified() {
    let store = FakeStore::default();
    let verifier = FakeVerifier::default();
    let importer = Importer::new(&store, &verifier, CountingThrottle::default());

    let result = importer.import_leads(leads_with_numbers(3), "org-1", false);

    assert!(result.success);
    assert_eq!(result.imported, 3);
    assert!(verifier.chunk_sizes().is_empty());
    assert!(result.message.contains("manual verification"));
    assert!(store.last_batch().iter().all(|record| !record.whatsapp_verified));
}

#[test]
fn failed_chunk_leaves_only_its_leads_unverified() {
    let store = FakeStore::default();
    let verifier = FakeVerifier {
        fail_on_chunk: Some(2),
        ..FakeVerifier::connected()
    };
    let importer = Importer::new(&store, &verifier, CountingThrottle::default());

    let result = importer.import_leads(leads_with_numbers(25), "org-1", false);

    assert!(result.success);
    assert_eq!(result.imported, 25);
    let batch = store.last_batch();
    let verified: Vec<bool> = batch.iter().map(|record| record.whatsapp_verified).collect();
    assert!(verified[..10].iter().all(|v| *v));
    assert!(verified[10..20].iter().all(|v| !*v));
    assert!(verified[20..].iter().all(|v| *v));
}

#[test]
fn verified_leads_carry_channel_id() {
    let store = FakeStore::default();
    let verifier = FakeVerifier::connected();
    let importer = Importer::new(&store, &verifier, CountingThrottle::default());

    let result = importer.import_leads(leads_with_numbers(1), "org-1", false);

    assert!(result.success);
    let record = &store.last_batch()[0];
    assert!(record.whatsapp_verified);
    assert!(record.remote_jid.as_deref().unwrap().ends_with("@s.whatsapp.net"));
    assert_eq!(record.organization_id, "org-1");
}

#[test]
fn skip_verification_makes_no_gateway_calls() {
    let store = FakeStore::default();
    let verifier = FakeVerifier::connected();
    let importer = Importer::new(&store, &verifier, CountingThrottle::default());

    let result = importer.import_leads(leads_with_numbers(5), "org-1", true);

    assert!(result.success);
    assert!(verifier.chunk_sizes().is_empty());
    assert!(!result.message.contains("verified"));
}

#[test]
fn zero_inserted_rows_is_a_failure() {
    let store = FakeStore {
        inserted_override: Some(0),
        ..FakeStore::default()
    };
    let verifier = FakeVerifier::default();
    let importer = Importer::new(&store, &verifier, CountingThrottle::default());

    let result = importer.import_leads(leads_with_numbers(4), "org-1", false);

    assert!(!result.success);
    assert_eq!(result.imported, 0);
    assert_eq!(result.skipped, 4);
    assert!(result.message.contains("nothing was imported"));
}

#[test]
fn store_error_becomes_failed_result() {
    let store = FakeStore {
        fail: true,
        ..FakeStore::default()
    };
    let verifier = FakeVerifier::default();
    let importer = Importer::new(&store, &verifier, CountingThrottle::default());

    let result = importer.import_leads(leads_with_numbers(2), "org-1", false);

    assert!(!result.success);
    assert!(result.message.contains("permission denied"));
    assert_eq!(result.errors.len(), 1);
}
