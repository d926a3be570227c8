//! Completion data store
//!
//! Holds the schema statistics pushed by the client (namespaces, predicate
//! usage, class usage) and the completion items derived from them.
//!
//! Namespaces and usage bindings arrive on independent, unordered streams.
//! Whenever either side changes, every dependent item list is rebuilt in full
//! so that abbreviations never lag behind the namespace map.

use std::cmp::Reverse;

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};
use tracing::debug;

use super::namespaces::{CommonCompletionItems, NamespaceMap, prefixed_item};
use crate::lsp::models::CompletionDataUpdate;

/// Subtracting a usage count from this yields a key that shrinks as usage grows.
pub const ARBITRARILY_LARGE_NUMBER: u64 = 100_000_000_000_000;
const RANK_WIDTH: usize = 15;

/// An (IRI, occurrence count) pair. Both parts are required for the binding to be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageBinding {
    pub iri: Option<String>,
    /// Decimal integer as text.
    pub count: Option<String>,
}

impl UsageBinding {
    pub fn new(iri: impl Into<String>, count: impl Into<String>) -> Self {
        Self {
            iri: Some(iri.into()),
            count: Some(count.into()),
        }
    }
}

/// Zero-padded inverted count; counts that are not integers rank as zero.
pub fn usage_rank(count: &str) -> String {
    let count = count.trim().parse::<u64>().unwrap_or(0);
    format!("{:0width$}", ARBITRARILY_LARGE_NUMBER.saturating_sub(count), width = RANK_WIDTH)
}

/// Completion items for usage bindings, most used first.
///
/// Each valid binding yields a `<iri>` item, plus a `prefix:local` item when
/// the namespace map can abbreviate the IRI. At equal usage the abbreviated
/// form comes first.
pub fn build_completion_items_from_data(namespaces: &NamespaceMap, bindings: &[UsageBinding]) -> Vec<CompletionItem> {
    let mut ranked: Vec<(String, Reverse<bool>, CompletionItem)> = Vec::new();
    let mut discarded = 0usize;

    for binding in bindings {
        let (Some(iri), Some(count)) = (binding.iri.as_deref(), binding.count.as_deref()) else {
            discarded += 1;
            continue;
        };
        let rank = usage_rank(count);
        let detail = format!("{} occurrences", count);

        let prefixed = namespaces.abbreviate(iri);
        if prefixed != iri {
            let item = CompletionItem {
                sort_text: Some(format!("00{}{}", rank, prefixed)),
                detail: Some(detail.clone()),
                ..prefixed_item(&prefixed, iri)
            };
            ranked.push((rank.clone(), Reverse(true), item));
        }

        let item = CompletionItem {
            label: format!("<{}>", iri),
            kind: Some(CompletionItemKind::ENUM_MEMBER),
            sort_text: Some(format!("01{}{}", rank, iri)),
            detail: Some(detail),
            ..Default::default()
        };
        ranked.push((rank, Reverse(false), item));
    }

    if discarded > 0 {
        debug!("Discarded {} usage bindings without an IRI or count", discarded);
    }

    ranked.sort_by(|(rank_a, form_a, item_a), (rank_b, form_b, item_b)| {
        (rank_a, form_a, &item_a.label).cmp(&(rank_b, form_b, &item_b.label))
    });
    ranked.into_iter().map(|(_, _, item)| item).collect()
}

#[derive(Debug, Clone, Default)]
pub struct CompletionDataStore {
    namespaces: NamespaceMap,
    common: CommonCompletionItems,
    relationship_bindings: Vec<UsageBinding>,
    type_bindings: Vec<UsageBinding>,
    relationship_items: Vec<CompletionItem>,
    type_items: Vec<CompletionItem>,
}

impl CompletionDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one notification.
    ///
    /// A binding list is rebuilt when it is part of the update, or when the
    /// namespaces changed and a non-empty list from an earlier update exists.
    pub fn apply_update(&mut self, update: CompletionDataUpdate) {
        let namespaces_changed = update.namespaces.is_some();
        if let Some(entries) = &update.namespaces {
            self.namespaces = NamespaceMap::from_entries(entries);
            self.common = CommonCompletionItems::for_namespaces(&self.namespaces);
            debug!("Namespace map replaced ({} prefixes)", self.namespaces.len());
        }

        if let Some(bindings) = update.relationship_bindings {
            self.relationship_bindings = bindings.into_iter().map(Into::into).collect();
            self.rebuild_relationships();
        } else if namespaces_changed && !self.relationship_bindings.is_empty() {
            self.rebuild_relationships();
        }

        if let Some(bindings) = update.type_bindings {
            self.type_bindings = bindings.into_iter().map(Into::into).collect();
            self.rebuild_types();
        } else if namespaces_changed && !self.type_bindings.is_empty() {
            self.rebuild_types();
        }
    }

    fn rebuild_relationships(&mut self) {
        self.relationship_items = build_completion_items_from_data(&self.namespaces, &self.relationship_bindings);
        debug!("Rebuilt {} relationship completion items", self.relationship_items.len());
    }

    fn rebuild_types(&mut self) {
        self.type_items = build_completion_items_from_data(&self.namespaces, &self.type_bindings);
        debug!("Rebuilt {} type completion items", self.type_items.len());
    }

    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    pub fn relationship_items(&self) -> &[CompletionItem] {
        &self.relationship_items
    }

    pub fn type_items(&self) -> &[CompletionItem] {
        &self.type_items
    }

    /// Usage-ranked relationships followed by well-known properties.
    pub fn relationship_completions(&self) -> impl Iterator<Item = &CompletionItem> {
        self.relationship_items.iter().chain(self.common.properties.iter())
    }

    /// Usage-ranked classes followed by well-known classes.
    pub fn class_completions(&self) -> impl Iterator<Item = &CompletionItem> {
        self.type_items.iter().chain(self.common.classes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsp::models::{BindingValue, NamespaceEntry, RelationshipBinding, TypeBinding};
    use quickcheck::quickcheck;
    use serde_json::json;

    const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    fn rdf_namespaces() -> NamespaceMap {
        let mut namespaces = NamespaceMap::new();
        namespaces.insert("rdf", RDF);
        namespaces
    }

    fn relationship(iri: &str, count: &str) -> Option<RelationshipBinding> {
        Some(RelationshipBinding {
            relationship: Some(BindingValue { value: Some(json!(iri)) }),
            count: Some(BindingValue { value: Some(json!(count)) }),
        })
    }

    #[test]
    fn test_rank_is_inverted_and_padded() {
        assert_eq!(usage_rank("42"), "099999999999958");
        assert_eq!(usage_rank("0"), "100000000000000");
        assert_eq!(usage_rank("not a number"), "100000000000000");
        assert_eq!(usage_rank("999999999999999999"), "000000000000000");
    }

    #[test]
    fn test_rdf_type_yields_prefixed_and_full_items() {
        let items = build_completion_items_from_data(&rdf_namespaces(), &[UsageBinding::new(format!("{}type", RDF), "42")]);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].label, "rdf:type");
        assert_eq!(items[0].sort_text.as_deref(), Some("00099999999999958rdf:type"));
        assert_eq!(items[0].kind, Some(CompletionItemKind::ENUM_MEMBER));
        assert_eq!(items[0].detail.as_deref(), Some("42 occurrences"));

        assert_eq!(items[1].label, format!("<{}type>", RDF));
        assert_eq!(items[1].sort_text, Some(format!("01099999999999958{}type", RDF)));
    }

    #[test]
    fn test_invalid_bindings_are_dropped() {
        let bindings = vec![
            UsageBinding::new("http://example.org/a", "1"),
            UsageBinding {
                iri: None,
                count: Some("5".to_string()),
            },
            UsageBinding {
                iri: Some("http://example.org/b".to_string()),
                count: None,
            },
        ];
        let items = build_completion_items_from_data(&NamespaceMap::new(), &bindings);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "<http://example.org/a>");
    }

    #[test]
    fn test_items_follow_descending_usage() {
        let bindings = vec![
            UsageBinding::new(format!("{}first", RDF), "2"),
            UsageBinding::new("http://example.org/popular", "900"),
            UsageBinding::new(format!("{}rest", RDF), "30"),
        ];
        let items = build_completion_items_from_data(&rdf_namespaces(), &bindings);
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "<http://example.org/popular>",
                "rdf:rest",
                "<http://www.w3.org/1999/02/22-rdf-syntax-ns#rest>",
                "rdf:first",
                "<http://www.w3.org/1999/02/22-rdf-syntax-ns#first>",
            ]
        );
    }

    #[test]
    fn test_namespace_only_update_reabbreviates_existing_bindings() {
        let mut store = CompletionDataStore::new();
        store.apply_update(CompletionDataUpdate {
            relationship_bindings: Some(vec![relationship(&format!("{}type", RDF), "42")]),
            ..Default::default()
        });
        assert_eq!(store.relationship_items().len(), 1);

        store.apply_update(CompletionDataUpdate {
            namespaces: Some(vec![NamespaceEntry {
                prefix: Some("rdf".to_string()),
                name: Some(RDF.to_string()),
            }]),
            ..Default::default()
        });
        let labels: Vec<&str> = store.relationship_items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["rdf:type", "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>"]);
        assert!(store.type_items().is_empty());
    }

    #[test]
    fn test_namespace_only_update_reabbreviates_type_bindings() {
        let mut store = CompletionDataStore::new();
        store.apply_update(CompletionDataUpdate {
            type_bindings: Some(vec![Some(TypeBinding {
                type_: Some(BindingValue { value: Some(json!(format!("{}Property", RDF))) }),
                count: Some(BindingValue { value: Some(json!("3")) }),
            })]),
            ..Default::default()
        });
        let labels: Vec<&str> = store.type_items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["<http://www.w3.org/1999/02/22-rdf-syntax-ns#Property>"]);

        store.apply_update(CompletionDataUpdate {
            namespaces: Some(vec![NamespaceEntry {
                prefix: Some("rdf".to_string()),
                name: Some(RDF.to_string()),
            }]),
            ..Default::default()
        });
        let labels: Vec<&str> = store.type_items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["rdf:Property", "<http://www.w3.org/1999/02/22-rdf-syntax-ns#Property>"]);
        assert!(store.relationship_items().is_empty());
    }

    #[test]
    fn test_bindings_after_namespaces_are_abbreviated() {
        let mut store = CompletionDataStore::new();
        store.apply_update(CompletionDataUpdate {
            namespaces: Some(vec![NamespaceEntry {
                prefix: Some("rdf".to_string()),
                name: Some(RDF.to_string()),
            }]),
            ..Default::default()
        });
        store.apply_update(CompletionDataUpdate {
            relationship_bindings: Some(vec![relationship(&format!("{}type", RDF), "7"), None]),
            ..Default::default()
        });
        assert_eq!(store.relationship_items().len(), 2);
        assert!(store.relationship_completions().any(|i| i.label == "rdf:first"));
        assert!(store.class_completions().any(|i| i.label == "rdf:Property"));
    }

    quickcheck! {
        fn prop_output_counts_valid_bindings(entries: Vec<(Option<u16>, Option<u32>)>) -> bool {
            let namespaces = rdf_namespaces();
            let bindings: Vec<UsageBinding> = entries
                .iter()
                .map(|(iri, count)| UsageBinding {
                    iri: iri.map(|n| if n % 2 == 0 { format!("{}p{}", RDF, n) } else { format!("http://x.org/a/{}", n) }),
                    count: count.map(|c| c.to_string()),
                })
                .collect();
            let expected: usize = bindings
                .iter()
                .filter_map(|b| Some((b.iri.as_deref()?, b.count.as_deref()?)))
                .map(|(iri, _)| if iri.starts_with(RDF) { 2 } else { 1 })
                .sum();
            build_completion_items_from_data(&namespaces, &bindings).len() == expected
        }
    }
}
