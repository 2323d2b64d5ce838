//! Type mapping resolution
//!
//! The OpenAPI document produced by a Corda node names its schemas after the
//! upstream namespaces (`net.corda.core.contracts.StateRef`), while the model
//! classes available to the generated client live under repackaged namespaces
//! (`org.web3j.corda.model.core.contracts.StateRef`). The resolver reconciles
//! the two so that the codegen engine references the existing classes instead
//! of emitting duplicates.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::generation::ClassInfo;

/// Namespace under which the Corda model classes are pre-generated
pub const CORDA_REPACKAGED: &str = "org.web3j.corda.model";
/// Upstream namespace of the Corda platform types
pub const CORDA_UPSTREAM: &str = "net.corda";
/// Namespace under which the Braid model classes are pre-generated
pub const BRAID_REPACKAGED: &str = "org.web3j.braid";
/// Upstream namespace of the Braid middleware types
pub const BRAID_UPSTREAM: &str = "io.bluebank.braid.corda";

/// Schema names without a package, flattened from nested generics by the node's
/// OpenAPI generator, and the classes implementing them.
pub fn default_explicit_types() -> BTreeMap<String, String> {
    [
        ("AmountCurrency", "org.web3j.corda.model.AmountCurrency"),
        ("Issued_issuer", "org.web3j.corda.model.core.contracts.Issued_issuer"),
        ("Issued", "org.web3j.corda.model.core.contracts.Issued"),
        ("Error", "org.web3j.corda.model.Error"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn default_namespace_resolvers() -> Vec<NamespaceResolver> {
    vec![
        NamespaceResolver::prefix_substitution(CORDA_REPACKAGED, CORDA_UPSTREAM),
        NamespaceResolver::prefix_substitution(BRAID_REPACKAGED, BRAID_UPSTREAM),
    ]
}

/// Maps the package of an available class to the logical package used in the
/// OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NamespaceResolver {
    /// Classes already live in their logical namespace
    Identity { namespace: String },
    /// Classes live in a vendor copy of an upstream namespace
    PrefixSubstitution { repackaged: String, upstream: String },
}

impl NamespaceResolver {
    pub fn identity<S: Into<String>>(namespace: S) -> Self {
        Self::Identity {
            namespace: namespace.into(),
        }
    }

    pub fn prefix_substitution<R: Into<String>, U: Into<String>>(repackaged: R, upstream: U) -> Self {
        Self::PrefixSubstitution {
            repackaged: repackaged.into(),
            upstream: upstream.into(),
        }
    }

    /// Logical package for `package`, or `None` when this resolver does not cover it
    pub fn logical_package(&self, package: &str) -> Option<String> {
        match self {
            Self::Identity { namespace } => {
                strip_namespace(package, namespace).map(|_| package.to_string())
            }
            Self::PrefixSubstitution {
                repackaged,
                upstream,
            } => strip_namespace(package, repackaged).map(|rest| format!("{upstream}{rest}")),
        }
    }
}

/// Remainder of `package` after `namespace`, including the leading dot.
/// Matches whole segments only, so `org.web3j.braidx` is not under `org.web3j.braid`.
fn strip_namespace<'a>(package: &'a str, namespace: &str) -> Option<&'a str> {
    let rest = package.strip_prefix(namespace)?;
    if rest.is_empty() || rest.starts_with('.') {
        Some(rest)
    } else {
        None
    }
}

/// A key registered twice with different targets; the later target won
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMappingConflict {
    pub key: String,
    pub previous: String,
    pub replacement: String,
}

/// Schema name -> fully-qualified name of an existing implementation class
#[derive(Debug, Clone, Default)]
pub struct TypeMappingTable {
    entries: BTreeMap<String, String>,
    conflicts: Vec<TypeMappingConflict>,
}

impl TypeMappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key -> target`. Last write wins; a differing earlier target
    /// is recorded as a conflict and returned.
    pub fn insert<K: Into<String>, T: Into<String>>(
        &mut self,
        key: K,
        target: T,
    ) -> Option<TypeMappingConflict> {
        let key = key.into();
        let target = target.into();

        let previous = self.entries.insert(key.clone(), target.clone())?;
        if previous == target {
            return None;
        }

        warn!(
            key = %key,
            previous = %previous,
            replacement = %target,
            "Type mapping registered twice with different targets"
        );
        let conflict = TypeMappingConflict {
            key,
            previous,
            replacement: target,
        };
        self.conflicts.push(conflict.clone());
        Some(conflict)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn conflicts(&self) -> &[TypeMappingConflict] {
        &self.conflicts
    }

    /// The table as plain overrides for the template engine
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

/// Builds the type mapping table from explicit entries and a class inventory
#[derive(Debug, Clone)]
pub struct TypeMappingResolver {
    explicit: BTreeMap<String, String>,
    resolvers: Vec<NamespaceResolver>,
}

impl TypeMappingResolver {
    pub fn new(explicit: BTreeMap<String, String>, resolvers: Vec<NamespaceResolver>) -> Self {
        Self {
            explicit,
            resolvers,
        }
    }

    pub fn resolve(&self, classes: &[ClassInfo]) -> TypeMappingTable {
        let mut table = TypeMappingTable::new();

        let available: BTreeSet<String> = classes.iter().map(ClassInfo::qualified_name).collect();
        for (name, target) in &self.explicit {
            if !available.contains(target) {
                warn!(
                    name = %name,
                    target = %target,
                    "Explicit type mapping target is not in the class inventory"
                );
            }
            table.insert(name.as_str(), target.as_str());
        }

        if classes.is_empty() && !self.resolvers.is_empty() {
            warn!(
                resolvers = self.resolvers.len(),
                "Class inventory is empty; namespaced schemas will be generated as new models"
            );
        }

        for resolver in &self.resolvers {
            let mut matched = 0usize;
            for class in classes {
                if let Some(logical) = resolver.logical_package(&class.package) {
                    table.insert(
                        format!("{logical}.{}", class.simple_name),
                        class.qualified_name(),
                    );
                    matched += 1;
                }
            }
            if matched == 0 && !classes.is_empty() {
                warn!(resolver = ?resolver, "Namespace resolver matched no class in the inventory");
            } else {
                debug!(resolver = ?resolver, matched, "Applied namespace resolver");
            }
        }

        debug!(
            entries = table.len(),
            conflicts = table.conflicts().len(),
            "Resolved type mapping table"
        );
        table
    }
}

impl Default for TypeMappingResolver {
    fn default() -> Self {
        Self::new(default_explicit_types(), default_namespace_resolvers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn class(fqn: &str) -> ClassInfo {
        ClassInfo::from_qualified_name(fqn).unwrap()
    }

    #[test]
    fn test_explicit_types_present_with_empty_inventory() {
        let table = TypeMappingResolver::default().resolve(&[]);

        assert_eq!(table.len(), 4);
        assert_eq!(
            table.get("AmountCurrency"),
            Some("org.web3j.corda.model.AmountCurrency")
        );
        assert_eq!(
            table.get("Issued"),
            Some("org.web3j.corda.model.core.contracts.Issued")
        );
        assert_eq!(
            table.get("Issued_issuer"),
            Some("org.web3j.corda.model.core.contracts.Issued_issuer")
        );
        assert_eq!(table.get("Error"), Some("org.web3j.corda.model.Error"));
        assert!(table.conflicts().is_empty());
    }

    #[test]
    fn test_prefix_substitution_maps_upstream_name_to_repackaged_class() {
        let classes = vec![
            class("org.web3j.corda.model.core.contracts.StateRef"),
            class("org.web3j.corda.model.Widget"),
            class("org.web3j.braid.services.SimpleNodeInfo"),
            class("com.example.Unrelated"),
        ];

        let table = TypeMappingResolver::default().resolve(&classes);

        assert_eq!(
            table.get("net.corda.core.contracts.StateRef"),
            Some("org.web3j.corda.model.core.contracts.StateRef")
        );
        assert_eq!(
            table.get("net.corda.Widget"),
            Some("org.web3j.corda.model.Widget")
        );
        assert_eq!(
            table.get("io.bluebank.braid.corda.services.SimpleNodeInfo"),
            Some("org.web3j.braid.services.SimpleNodeInfo")
        );
        assert!(!table.iter().any(|(_, v)| v == "com.example.Unrelated"));
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_prefix_substitution_matches_whole_segments() {
        let resolver = NamespaceResolver::prefix_substitution("org.web3j.braid", "io.bluebank");
        assert_eq!(
            resolver.logical_package("org.web3j.braid"),
            Some("io.bluebank".to_string())
        );
        assert_eq!(
            resolver.logical_package("org.web3j.braid.x"),
            Some("io.bluebank.x".to_string())
        );
        assert_eq!(resolver.logical_package("org.web3j.braidx"), None);
        assert_eq!(resolver.logical_package("org.web3j"), None);
    }

    #[test]
    fn test_identity_resolver() {
        let resolver = NamespaceResolver::identity("a.b");
        assert_eq!(resolver.logical_package("a.b"), Some("a.b".to_string()));

        let resolver = TypeMappingResolver::new(BTreeMap::new(), vec![resolver]);
        let table = resolver.resolve(&[class("a.b.C"), class("a.bc.D")]);
        assert_eq!(table.get("a.b.C"), Some("a.b.C"));
        assert!(!table.contains("a.bc.D"));
    }

    #[test]
    #[traced_test]
    fn test_conflicting_registration_last_write_wins() {
        let resolver = TypeMappingResolver::new(
            BTreeMap::new(),
            vec![
                NamespaceResolver::prefix_substitution("vendor.one", "upstream"),
                NamespaceResolver::prefix_substitution("vendor.two", "upstream"),
            ],
        );

        let table = resolver.resolve(&[class("vendor.one.Party"), class("vendor.two.Party")]);

        assert_eq!(table.get("upstream.Party"), Some("vendor.two.Party"));
        assert_eq!(
            table.conflicts(),
            &[TypeMappingConflict {
                key: "upstream.Party".to_string(),
                previous: "vendor.one.Party".to_string(),
                replacement: "vendor.two.Party".to_string(),
            }]
        );
        assert!(logs_contain("Type mapping registered twice"));
    }

    #[test]
    #[traced_test]
    fn test_empty_inventory_is_reported() {
        let table = TypeMappingResolver::default().resolve(&[]);

        assert_eq!(table.len(), 4);
        assert!(logs_contain("Class inventory is empty"));
        assert!(logs_contain(
            "Explicit type mapping target is not in the class inventory"
        ));
    }

    #[test]
    #[traced_test]
    fn test_resolver_without_matches_is_reported() {
        let resolver = TypeMappingResolver::new(
            BTreeMap::new(),
            vec![
                NamespaceResolver::prefix_substitution(CORDA_REPACKAGED, CORDA_UPSTREAM),
                NamespaceResolver::prefix_substitution(BRAID_REPACKAGED, BRAID_UPSTREAM),
            ],
        );

        let table = resolver.resolve(&[class("org.web3j.corda.model.core.identity.Party")]);

        assert_eq!(table.len(), 1);
        assert!(logs_contain("Namespace resolver matched no class in the inventory"));
        assert!(!logs_contain("Class inventory is empty"));
    }

    #[test]
    fn test_same_target_twice_is_not_a_conflict() {
        let mut table = TypeMappingTable::new();
        assert!(table.insert("Error", "org.web3j.corda.model.Error").is_none());
        assert!(table.insert("Error", "org.web3j.corda.model.Error").is_none());
        assert!(table.conflicts().is_empty());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_inventory_overrides_explicit_entry() {
        let mut explicit = BTreeMap::new();
        explicit.insert("net.corda.Amount".to_string(), "old.Amount".to_string());
        let resolver = TypeMappingResolver::new(
            explicit,
            vec![NamespaceResolver::prefix_substitution("org.web3j.corda.model", "net.corda")],
        );

        let table = resolver.resolve(&[class("org.web3j.corda.model.Amount")]);
        assert_eq!(
            table.get("net.corda.Amount"),
            Some("org.web3j.corda.model.Amount")
        );
        assert_eq!(table.conflicts().len(), 1);
    }

    #[test]
    fn test_namespace_resolver_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            namespaces: Vec<NamespaceResolver>,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"
            [[namespaces]]
            kind = "prefix_substitution"
            repackaged = "org.web3j.corda.model"
            upstream = "net.corda"

            [[namespaces]]
            kind = "identity"
            namespace = "com.example.model"
            "#,
        )
        .unwrap();

        assert_eq!(
            wrapper.namespaces,
            vec![
                NamespaceResolver::prefix_substitution("org.web3j.corda.model", "net.corda"),
                NamespaceResolver::identity("com.example.model"),
            ]
        );
    }
}
