//! Mapper strategy selection.

use std::sync::Arc;

use tracing::debug;

use crate::ai::AiMapper;
use crate::completion::CompletionClient;
use crate::heuristic::HeuristicMapper;
use crate::HeaderMapper;

/// Explicit runtime policy for mapper selection.
///
/// The AI path is gated to restricted runtime contexts (typically local
/// development); the host decides and passes the flag in. Never read
/// from the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperPolicy {
    /// Allow the AI-assisted strategy when a completion client exists.
    pub ai_enabled: bool,
}

impl MapperPolicy {
    #[must_use]
    pub const fn heuristic_only() -> Self {
        Self { ai_enabled: false }
    }

    #[must_use]
    pub const fn with_ai() -> Self {
        Self { ai_enabled: true }
    }
}

/// Selects a mapper implementation from policy and collaborator
/// availability.
///
/// Returns the AI-assisted mapper only when the policy allows it and a
/// completion client is actually available; otherwise the heuristic
/// mapper.
#[must_use]
pub fn select_mapper(
    policy: MapperPolicy,
    completion: Option<Arc<dyn CompletionClient>>,
) -> Box<dyn HeaderMapper> {
    match completion {
        Some(client) if policy.ai_enabled => {
            debug!("using ai-assisted header mapper");
            Box::new(AiMapper::new(SharedClient(client)))
        }
        _ => {
            debug!("using heuristic header mapper");
            Box::new(HeuristicMapper::new())
        }
    }
}

/// Adapter so a shared client can back the generic [`AiMapper`].
struct SharedClient(Arc<dyn CompletionClient>);

impl CompletionClient for SharedClient {
    fn complete(&self, prompt: &str) -> crate::error::Result<String> {
        self.0.complete(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leads_model::CanonicalField;

    struct Canned(&'static str);

    impl CompletionClient for Canned {
        fn complete(&self, _prompt: &str) -> crate::error::Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn policy_off_ignores_available_client() {
        let client: Arc<dyn CompletionClient> = Arc::new(Canned("[]"));
        let mapper = select_mapper(MapperPolicy::heuristic_only(), Some(client));
        let mappings = mapper.map_headers(&["nome".to_string()], &[]).unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].confidence, 0.9);
    }

    #[test]
    fn policy_on_uses_client() {
        let client: Arc<dyn CompletionClient> = Arc::new(Canned(
            r#"[{"sourceField":"nome","targetField":"name","confidence":0.95}]"#,
        ));
        let mapper = select_mapper(MapperPolicy::with_ai(), Some(client));
        let mappings = mapper.map_headers(&["nome".to_string()], &[]).unwrap();
        assert_eq!(mappings[0].target_field, CanonicalField::Name);
        assert!((mappings[0].confidence - 0.95).abs() < 1e-6);
    }

    #[test]
    fn policy_on_without_client_falls_back_to_heuristic() {
        let mapper = select_mapper(MapperPolicy::with_ai(), None);
        let mappings = mapper.map_headers(&["telefone".to_string()], &[]).unwrap();
        assert_eq!(mappings[0].target_field, CanonicalField::Whatsapp);
    }
}
