//! Wire payloads that are not part of the LSP base protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lsp::features::completion::data::UsageBinding;

/// Method name of the completion data notification.
pub const DID_UPDATE_COMPLETION_DATA: &str = "$/didUpdateCompletionData";

/// `initializationOptions` sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializationOptions {
    /// `"w3"` or `"stardog"`
    pub grammar: Option<String>,
}

/// Schema statistics pushed by the client; every part is optional and the
/// parts arrive independently of one another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionDataUpdate {
    pub namespaces: Option<Vec<NamespaceEntry>>,
    pub relationship_bindings: Option<Vec<Option<RelationshipBinding>>>,
    pub type_bindings: Option<Vec<Option<TypeBinding>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceEntry {
    pub prefix: Option<String>,
    /// Namespace IRI
    #[serde(alias = "iri")]
    pub name: Option<String>,
}

/// A SPARQL JSON results cell: `{ "value": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingValue {
    pub value: Option<Value>,
}

impl BindingValue {
    fn text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipBinding {
    pub relationship: Option<BindingValue>,
    pub count: Option<BindingValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeBinding {
    #[serde(rename = "type")]
    pub type_: Option<BindingValue>,
    pub count: Option<BindingValue>,
}

fn cell(value: Option<&BindingValue>) -> Option<String> {
    value.and_then(BindingValue::text)
}

impl From<Option<RelationshipBinding>> for UsageBinding {
    fn from(binding: Option<RelationshipBinding>) -> Self {
        let binding = binding.unwrap_or_default();
        UsageBinding {
            iri: cell(binding.relationship.as_ref()),
            count: cell(binding.count.as_ref()),
        }
    }
}

impl From<Option<TypeBinding>> for UsageBinding {
    fn from(binding: Option<TypeBinding>) -> Self {
        let binding = binding.unwrap_or_default();
        UsageBinding {
            iri: cell(binding.type_.as_ref()),
            count: cell(binding.count.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_accepts_partial_payloads() {
        let update: CompletionDataUpdate = serde_json::from_value(json!({
            "namespaces": [{ "prefix": "rdf", "name": "http://www.w3.org/1999/02/22-rdf-syntax-ns#" }]
        }))
        .unwrap();
        assert_eq!(update.namespaces.as_ref().map(Vec::len), Some(1));
        assert!(update.relationship_bindings.is_none());
        assert!(update.type_bindings.is_none());
    }

    #[test]
    fn test_bindings_tolerate_nulls_and_missing_cells() {
        let update: CompletionDataUpdate = serde_json::from_value(json!({
            "relationshipBindings": [
                { "relationship": { "value": "http://example.org/p" }, "count": { "value": "3" } },
                null,
                { "relationship": { "value": "http://example.org/q" } },
                { "count": { "value": 7 } }
            ],
            "typeBindings": [{ "type": { "value": "http://example.org/C" }, "count": { "value": 12 } }]
        }))
        .unwrap();

        let relationships: Vec<UsageBinding> = update
            .relationship_bindings
            .unwrap()
            .into_iter()
            .map(UsageBinding::from)
            .collect();
        assert_eq!(relationships[0].iri.as_deref(), Some("http://example.org/p"));
        assert_eq!(relationships[0].count.as_deref(), Some("3"));
        assert_eq!(relationships[1], UsageBinding::default());
        assert_eq!(relationships[2].count, None);
        assert_eq!(relationships[3].iri, None);
        assert_eq!(relationships[3].count.as_deref(), Some("7"));

        let types: Vec<UsageBinding> = update.type_bindings.unwrap().into_iter().map(UsageBinding::from).collect();
        assert_eq!(types[0].count.as_deref(), Some("12"));
    }

    #[test]
    fn test_initialization_options() {
        let options: InitializationOptions = serde_json::from_value(json!({ "grammar": "w3" })).unwrap();
        assert_eq!(options.grammar.as_deref(), Some("w3"));
        let empty: InitializationOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.grammar, None);
    }
}
