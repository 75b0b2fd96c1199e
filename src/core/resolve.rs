//! core::resolve
//!
//! Transitive dependency closure over the role graph.
//!
//! # Algorithm
//!
//! Breadth-first traversal from the seed roles. A role is added to the
//! required set at the moment it is queued, and a role already in the set
//! is never queued again. Each role's metadata is therefore consulted at
//! most once, and an edge that points back into the visited set (a cycle)
//! is dropped.
//!
//! # Invariants
//!
//! - The result always contains every seed
//! - Traversal terminates on any graph, cyclic or not
//! - A lookup failure for one role degrades that role to zero dependencies
//!   and never fails the resolution
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use roledep::core::diag::NullDiagnostics;
//! use roledep::core::metadata::RoleMetadata;
//! use roledep::core::resolve::resolve;
//! use roledep::core::types::RoleName;
//!
//! let a = RoleName::new("a").unwrap();
//! let mut graph = HashMap::new();
//! graph.insert(a.clone(), RoleMetadata::from_names(["b"]));
//! graph.insert(RoleName::new("b").unwrap(), RoleMetadata::from_names(["a"]));
//!
//! let required = resolve(&[a], &graph, &NullDiagnostics);
//! assert_eq!(required.len(), 2);
//! ```

use std::collections::{HashSet, VecDeque};

use super::diag::Diagnostics;
use super::metadata::MetadataSource;
use super::types::{format_roles, RoleName};

/// Roles reachable from the seeds, seeds included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSet {
    roles: HashSet<RoleName>,
}

impl RequiredSet {
    /// Whether `role` is required.
    pub fn contains(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }

    /// Number of required roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether nothing is required.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleName> {
        self.roles.iter()
    }

    /// Required roles in ascending order.
    pub fn sorted(&self) -> Vec<RoleName> {
        let mut roles: Vec<RoleName> = self.roles.iter().cloned().collect();
        roles.sort();
        roles
    }
}

impl FromIterator<RoleName> for RequiredSet {
    fn from_iter<I: IntoIterator<Item = RoleName>>(iter: I) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}

/// Compute every role reachable from `seeds` through `source`.
pub fn resolve<S>(seeds: &[RoleName], source: &S, diag: &dyn Diagnostics) -> RequiredSet
where
    S: MetadataSource + ?Sized,
{
    diag.trace(&format!(
        "Finding all dependencies for roles: {}",
        format_roles(seeds)
    ));

    let mut required: HashSet<RoleName> = seeds.iter().cloned().collect();
    let mut queue: VecDeque<RoleName> = VecDeque::new();
    let mut queued: HashSet<&RoleName> = HashSet::new();
    for seed in seeds {
        // Seeds may repeat; queue each once.
        if queued.insert(seed) {
            queue.push_back(seed.clone());
        }
    }

    while let Some(role) = queue.pop_front() {
        let meta = match source.lookup(&role) {
            Ok(Some(meta)) => meta,
            Ok(None) => continue,
            Err(e) => {
                diag.warn(&format!(
                    "error getting dependencies for role {}: {}",
                    role, e
                ));
                continue;
            }
        };

        let mut deps = Vec::with_capacity(meta.dependencies.len());
        for entry in &meta.dependencies {
            match entry.name() {
                Some(name) => deps.push(name),
                None => diag.warn(&format!(
                    "unknown dependency format in role {}: {}",
                    role,
                    entry.shape()
                )),
            }
        }

        if !deps.is_empty() {
            diag.trace(&format!(
                "Found dependencies for role {}: {}",
                role,
                format_roles(&deps)
            ));
        }

        for dep in deps {
            if required.insert(dep.clone()) {
                diag.trace(&format!("Adding dependency: {}", dep));
                queue.push_back(dep);
            }
        }
    }

    let required = RequiredSet { roles: required };
    diag.trace(&format!(
        "All required roles (including dependencies): {}",
        format_roles(&required.sorted())
    ));
    required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diag::{MemoryDiagnostics, NullDiagnostics};
    use crate::core::metadata::{MetadataError, RoleMetadata};
    use crate::core::playbook::RoleRef;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn role(name: &str) -> RoleName {
        RoleName::new(name).unwrap()
    }

    fn roles(names: &[&str]) -> Vec<RoleName> {
        names.iter().map(|n| role(n)).collect()
    }

    fn sorted_names(set: &RequiredSet) -> Vec<String> {
        set.sorted().into_iter().map(String::from).collect()
    }

    /// A -> B, B -> {C, D}, D -> E, C -> A
    fn cyclic_graph() -> HashMap<RoleName, RoleMetadata> {
        let mut graph = HashMap::new();
        graph.insert(role("A"), RoleMetadata::from_names(["B"]));
        graph.insert(role("B"), RoleMetadata::from_names(["C", "D"]));
        graph.insert(role("D"), RoleMetadata::from_names(["E"]));
        graph.insert(role("C"), RoleMetadata::from_names(["A"]));
        graph
    }

    /// Wraps a source and counts lookups per role.
    struct CountingSource<S> {
        inner: S,
        calls: RefCell<HashMap<RoleName, usize>>,
    }

    impl<S> CountingSource<S> {
        fn new(inner: S) -> Self {
            Self {
                inner,
                calls: RefCell::new(HashMap::new()),
            }
        }

        fn calls(&self, name: &str) -> usize {
            self.calls.borrow().get(&role(name)).copied().unwrap_or(0)
        }
    }

    impl<S: MetadataSource> MetadataSource for CountingSource<S> {
        fn lookup(&self, role: &RoleName) -> Result<Option<RoleMetadata>, MetadataError> {
            *self.calls.borrow_mut().entry(role.clone()).or_default() += 1;
            self.inner.lookup(role)
        }
    }

    /// Fails for the listed roles, delegates otherwise.
    struct FailingSource<S> {
        inner: S,
        failing: Vec<RoleName>,
    }

    impl<S: MetadataSource> MetadataSource for FailingSource<S> {
        fn lookup(&self, role: &RoleName) -> Result<Option<RoleMetadata>, MetadataError> {
            if self.failing.contains(role) {
                return Err(MetadataError::Parse {
                    path: PathBuf::from(format!("roles/{}/meta/main.yml", role)),
                    message: "bad indentation".into(),
                });
            }
            self.inner.lookup(role)
        }
    }

    #[test]
    fn cycle_terminates_with_full_closure() {
        let required = resolve(&roles(&["A"]), &cyclic_graph(), &NullDiagnostics);
        assert_eq!(sorted_names(&required), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn different_entry_points_same_closure() {
        let graph = cyclic_graph();
        let from_b_e = resolve(&roles(&["B", "E"]), &graph, &NullDiagnostics);
        let from_c = resolve(&roles(&["C"]), &graph, &NullDiagnostics);

        assert_eq!(sorted_names(&from_b_e), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(from_b_e, from_c);
    }

    #[test]
    fn leaf_role_resolves_to_itself() {
        let required = resolve(&roles(&["E"]), &cyclic_graph(), &NullDiagnostics);
        assert_eq!(sorted_names(&required), vec!["E"]);
    }

    #[test]
    fn each_role_looked_up_once() {
        let source = CountingSource::new(cyclic_graph());
        let required = resolve(&roles(&["A", "C", "A"]), &source, &NullDiagnostics);

        assert_eq!(required.len(), 5);
        for name in ["A", "B", "C", "D", "E"] {
            assert_eq!(source.calls(name), 1, "role {} looked up more than once", name);
        }
    }

    #[test]
    fn re_resolution_is_identical() {
        let graph = cyclic_graph();
        let seeds = roles(&["D", "B"]);
        let first = resolve(&seeds, &graph, &NullDiagnostics);
        let second = resolve(&seeds, &graph, &NullDiagnostics);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_seeds_empty_result() {
        let required = resolve(&[], &cyclic_graph(), &NullDiagnostics);
        assert!(required.is_empty());
    }

    #[test]
    fn unknown_seed_kept() {
        let required = resolve(&roles(&["ghost"]), &cyclic_graph(), &NullDiagnostics);
        assert!(required.contains(&role("ghost")));
        assert_eq!(required.len(), 1);
    }

    #[test]
    fn self_dependency_terminates() {
        let mut graph = HashMap::new();
        graph.insert(role("loop"), RoleMetadata::from_names(["loop"]));
        let required = resolve(&roles(&["loop"]), &graph, &NullDiagnostics);
        assert_eq!(sorted_names(&required), vec!["loop"]);
    }

    #[test]
    fn failed_lookup_degrades_only_that_role() {
        let source = FailingSource {
            inner: cyclic_graph(),
            failing: roles(&["B"]),
        };
        let diag = MemoryDiagnostics::new();

        // B's metadata is unreadable, so C and D (and E) are not reached from A.
        let required = resolve(&roles(&["A", "D"]), &source, &diag);

        assert_eq!(sorted_names(&required), vec!["A", "B", "D", "E"]);
        let warnings = diag.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("role B"));
        assert!(warnings[0].contains("bad indentation"));
    }

    #[test]
    fn unrecognized_dependency_entries_skipped() {
        let mut graph = HashMap::new();
        graph.insert(
            role("app"),
            RoleMetadata::new(vec![
                RoleRef::Plain("common".into()),
                RoleRef::Unrecognized(serde_yaml::Value::Bool(true)),
            ]),
        );
        let diag = MemoryDiagnostics::new();

        let required = resolve(&roles(&["app"]), &graph, &diag);

        assert_eq!(sorted_names(&required), vec!["app", "common"]);
        assert_eq!(diag.warnings().len(), 1);
        assert!(diag.warnings()[0].contains("bool"));
    }

    #[test]
    fn trace_mentions_additions() {
        let diag = MemoryDiagnostics::new();
        resolve(&roles(&["A"]), &cyclic_graph(), &diag);

        assert!(diag.contains("Finding all dependencies for roles: [A]"));
        assert!(diag.contains("Found dependencies for role B: [C, D]"));
        assert!(diag.contains("Adding dependency: E"));
        assert!(diag.contains("All required roles (including dependencies): [A, B, C, D, E]"));
        // C -> A is a back edge; A is never re-added.
        assert!(!diag.contains("Adding dependency: A"));
    }
}
