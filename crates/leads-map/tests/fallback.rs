use leads_map::{AiMapper, CompletionClient, HeaderMapper, MapError, Result};
use leads_model::CanonicalField;

struct Failing;

impl CompletionClient for Failing {
    fn complete(&self, _prompt: &str) -> Result<String> {
        Err(MapError::Completion("quota exceeded".to_string()))
    }
}

struct Prose;

impl CompletionClient for Prose {
    fn complete(&self, _prompt: &str) -> Result<String> {
        Ok("I'm sorry, I cannot map these columns.".to_string())
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn transport_failure_falls_back_to_heuristic() {
    let mapper = AiMapper::new(Failing);
    let mappings = mapper
        .map_headers(&headers(&["Nome", "Telefone", "cnpj"]), &[])
        .unwrap();

    assert_eq!(mappings.len(), 2);
    assert!(mappings.iter().any(|m| m.target_field == CanonicalField::Name));
    assert!(mappings.iter().any(|m| m.target_field == CanonicalField::Whatsapp));
}

#[test]
fn unparsable_completion_falls_back_to_heuristic() {
    let mapper = AiMapper::new(Prose);
    let mappings = mapper.map_headers(&headers(&["E-mail"]), &[]).unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].target_field, CanonicalField::Email);
}

#[test]
fn nothing_mappable_is_the_only_hard_failure() {
    let mapper = AiMapper::new(Prose);
    let err = mapper
        .map_headers(&headers(&["cnpj", "endereço"]), &[])
        .unwrap_err();
    assert!(matches!(err, MapError::NoFieldsMapped));
}
