//! Component tree aggregation.
//!
//! Programs compose recursively: component nodes own nested programs,
//! which may own further components. The operations here walk that tree
//! to answer whole-tree questions — which components exist, which package
//! schemas the tree needs, and what files produced it.
//!
//! Accumulators are function-local and threaded through the recursion by
//! `&mut`; callers only ever see finished maps. Distinct components are
//! identified by source directory: a directory already collected is not
//! re-entered, which caps the walk at one visit per distinct component
//! however many nodes include it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cumulus_ast::SourceFile;
use cumulus_schema::PackageSchema;

use crate::error::Result;
use crate::node::Component;
use crate::program::Program;

/// An in-memory directory in an exported source tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDirectory {
    /// Directory path, rooted at the caller-supplied base
    pub path: String,
    /// Files first, then one subdirectory per component node
    pub entries: Vec<ProgramEntry>,
}

/// One entry in an exported source tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgramEntry {
    File(SourceFile),
    Directory(ProgramDirectory),
}

impl Program {
    /// Every component reachable from this program, keyed by source
    /// directory, ascending.
    ///
    /// A component whose directory was already collected is not revisited
    /// and its nested program is not re-descended. Since a bound program
    /// strictly owns its sub-programs this also serves as the traversal's
    /// cycle guard.
    pub fn collect_components(&self) -> BTreeMap<String, &Component> {
        let mut components = BTreeMap::new();
        self.collect_components_into(&mut components);
        components
    }

    fn collect_components_into<'a>(&'a self, components: &mut BTreeMap<String, &'a Component>) {
        for node in self.nodes() {
            if let Some(component) = node.as_component() {
                if !components.contains_key(&component.source_dir) {
                    components.insert(component.source_dir.clone(), component);
                    component.program.collect_components_into(components);
                }
            }
        }
    }

    /// The union of package snapshots across the whole component tree,
    /// keyed by package name.
    ///
    /// The root program's snapshots are merged first, then each distinct
    /// component's, in ascending directory order. The first snapshot seen
    /// for a name wins; a same-named snapshot from deeper in the tree is
    /// dropped, not reconciled — a nested component pinning a different
    /// version of a package the root also uses disappears here.
    /// Fail-fast: any snapshot error aborts the call.
    pub fn collect_nested_package_snapshots(&self) -> Result<BTreeMap<String, PackageSchema>> {
        let mut seen = BTreeMap::new();
        merge_snapshots(&mut seen, self.package_snapshots()?);
        for component in self.collect_components().values() {
            merge_snapshots(&mut seen, component.program.package_snapshots()?);
        }
        Ok(seen)
    }

    /// An in-memory tree of every file that contributed to the fully
    /// expanded program: this program's own files, plus one subdirectory
    /// per component node, recursively.
    ///
    /// `directory` is the base path of the root; component subdirectories
    /// join it with their source directory.
    pub fn source_files(&self, directory: &str) -> ProgramDirectory {
        let mut entries = Vec::new();
        for file in self.files() {
            entries.push(ProgramEntry::File(file.clone()));
        }
        for node in self.nodes() {
            if let Some(component) = node.as_component() {
                let nested = join_dir(directory, &component.source_dir);
                entries.push(ProgramEntry::Directory(
                    component.program.source_files(&nested),
                ));
            }
        }
        ProgramDirectory {
            path: directory.to_string(),
            entries,
        }
    }
}

fn merge_snapshots(seen: &mut BTreeMap<String, PackageSchema>, snapshots: Vec<PackageSchema>) {
    for snapshot in snapshots {
        if !seen.contains_key(&snapshot.name) {
            seen.insert(snapshot.name.clone(), snapshot);
        }
    }
}

/// Join a base directory with a component source directory, dropping a
/// leading `./`.
fn join_dir(base: &str, sub: &str) -> String {
    let sub = sub.strip_prefix("./").unwrap_or(sub);
    if base.is_empty() {
        sub.to_string()
    } else {
        format!("{base}/{sub}")
    }
}
