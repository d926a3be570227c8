//! Namespace map, IRI abbreviation and common-vocabulary suggestions.

use std::collections::BTreeMap;

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation};

use crate::lsp::models::NamespaceEntry;

const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
const OWL: &str = "http://www.w3.org/2002/07/owl#";
const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";

struct Vocabulary {
    iri: &'static str,
    classes: &'static [&'static str],
    properties: &'static [&'static str],
}

const VOCABULARIES: &[Vocabulary] = &[
    Vocabulary {
        iri: RDF,
        classes: &["Property", "Statement", "Bag", "Seq", "Alt", "List"],
        properties: &["type", "subject", "predicate", "object", "value", "first", "rest"],
    },
    Vocabulary {
        iri: RDFS,
        classes: &["Resource", "Class", "Literal", "Datatype", "Container"],
        properties: &[
            "label",
            "comment",
            "subClassOf",
            "subPropertyOf",
            "domain",
            "range",
            "seeAlso",
            "isDefinedBy",
            "member",
        ],
    },
    Vocabulary {
        iri: OWL,
        classes: &[
            "Class",
            "Thing",
            "Nothing",
            "ObjectProperty",
            "DatatypeProperty",
            "AnnotationProperty",
            "Ontology",
            "NamedIndividual",
            "Restriction",
            "TransitiveProperty",
            "FunctionalProperty",
        ],
        properties: &[
            "sameAs",
            "equivalentClass",
            "equivalentProperty",
            "inverseOf",
            "disjointWith",
            "onProperty",
            "someValuesFrom",
            "allValuesFrom",
            "imports",
            "versionInfo",
        ],
    },
    Vocabulary {
        iri: XSD,
        classes: &[
            "string", "boolean", "integer", "decimal", "double", "float", "date", "dateTime", "time",
            "anyURI",
        ],
        properties: &[],
    },
    Vocabulary {
        iri: SKOS,
        classes: &["Concept", "ConceptScheme", "Collection"],
        properties: &[
            "prefLabel",
            "altLabel",
            "broader",
            "narrower",
            "related",
            "inScheme",
            "definition",
            "notation",
        ],
    },
];

/// Prefix (without colon) to namespace IRI, ordered by prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap(BTreeMap<String, String>);

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries lacking a prefix or an IRI are skipped.
    pub fn from_entries(entries: &[NamespaceEntry]) -> Self {
        let map = entries
            .iter()
            .filter_map(|entry| {
                let prefix = entry.prefix.as_deref()?.trim_end_matches(':');
                let iri = entry.name.as_deref()?;
                Some((prefix.to_string(), iri.to_string()))
            })
            .collect();
        Self(map)
    }

    pub fn insert(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.0.insert(prefix.into(), iri.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    /// `prefix:local` for `iri` when some namespace covers it, else `iri` unchanged.
    ///
    /// The longest matching namespace wins. The local part must be non-empty
    /// and contain no `/` or `#`.
    pub fn abbreviate(&self, iri: &str) -> String {
        self.iter()
            .filter(|(_, namespace)| !namespace.is_empty())
            .filter_map(|(prefix, namespace)| {
                let local = iri.strip_prefix(namespace)?;
                let valid = !local.is_empty() && !local.contains(['/', '#']);
                valid.then_some((namespace.len(), prefix, local))
            })
            .max_by_key(|(len, _, _)| *len)
            .map_or_else(|| iri.to_string(), |(_, prefix, local)| format!("{}:{}", prefix, local))
    }
}

/// Class and property items for well-known vocabularies bound in the namespace map.
#[derive(Debug, Clone, Default)]
pub struct CommonCompletionItems {
    pub classes: Vec<CompletionItem>,
    pub properties: Vec<CompletionItem>,
}

impl CommonCompletionItems {
    pub fn for_namespaces(namespaces: &NamespaceMap) -> Self {
        let mut items = Self::default();
        for (prefix, iri) in namespaces.iter() {
            let Some(vocabulary) = VOCABULARIES.iter().find(|v| v.iri == iri) else {
                continue;
            };
            let term = |local: &str, kind: CompletionItemKind| CompletionItem {
                label: format!("{}:{}", prefix, local),
                kind: Some(kind),
                detail: Some(format!("{}{}", iri, local)),
                ..Default::default()
            };
            items
                .classes
                .extend(vocabulary.classes.iter().map(|&local| term(local, CompletionItemKind::CLASS)));
            items
                .properties
                .extend(vocabulary.properties.iter().map(|&local| term(local, CompletionItemKind::PROPERTY)));
        }
        items
    }
}

/// Item for an abbreviated IRI, documented with the full IRI.
pub fn prefixed_item(prefixed_name: &str, iri: &str) -> CompletionItem {
    CompletionItem {
        label: prefixed_name.to_string(),
        kind: Some(CompletionItemKind::ENUM_MEMBER),
        documentation: Some(Documentation::String(iri.to_string())),
        ..Default::default()
    }
}
