//! Parameter table loading and merge resolution.
//!
//! A parameter document is a YAML mapping from parameter name to node, where
//! each node is either a plain descriptor or a merge directive referencing a
//! base descriptor plus local overrides (see [`crate::descriptor`]). This
//! module loads such documents and resolves every node into a concrete
//! [`ParameterDescriptor`], rejecting unresolved references and circular
//! merge chains at load time.
//!
//! Resolution is a pure transformation: the input table is not mutated and
//! resolving the same table twice yields identical output.
//!
//! # Examples
//!
//! ```
//! use paramref::table::ParameterTable;
//!
//! let doc = r#"
//! reserved:
//!   type: integer
//!   in: body
//!   required: true
//!   description: The amount of the resource a provider has reserved.
//! reserved_opt:
//!   base: reserved
//!   required: false
//! "#;
//!
//! let table = ParameterTable::from_str(doc)?;
//! let resolved = table.resolve()?;
//! assert!(!resolved.get("reserved_opt").unwrap().required);
//! # Ok::<(), paramref::Error>(())
//! ```

// Internal imports (std, crate)
use std::collections::HashMap;
use std::path::Path;

use crate::descriptor::{ParameterDescriptor, RawNode};
use crate::error::{Error, Result};

// External imports (alphabetized)
use indexmap::IndexMap;
use log::debug;

/// An ordered mapping of parameter name to authoring-time node.
///
/// Insertion order is preserved: documentation tables render parameters in
/// the order their authors wrote them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterTable {
    entries: IndexMap<String, RawNode>,
}

impl ParameterTable {
    /// Parse a parameter document from a YAML string
    pub fn from_str(content: &str) -> Result<Self> {
        let entries: IndexMap<String, RawNode> = serde_yaml::from_str(content)?;
        Ok(Self { entries })
    }

    /// Load a parameter document from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse parameter document at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a raw node by parameter name
    pub fn get(&self, name: &str) -> Option<&RawNode> {
        self.entries.get(name)
    }

    /// Resolve every node into a concrete descriptor.
    ///
    /// Merge directives start from the referenced node's resolved fields and
    /// apply local overrides on top, shallow and last-write-wins per field.
    /// Chains of directives resolve transitively; declaration order does not
    /// matter, so a directive may reference a base defined later in the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reference`] if a directive names a base that is not
    /// in the table, [`Error::Cycle`] if directives form a loop (including a
    /// node referencing itself), and [`Error::Descriptor`] if any record is
    /// still missing a field after resolution.
    pub fn resolve(&self) -> Result<ResolvedTable> {
        let mut memo: HashMap<String, ParameterDescriptor> =
            HashMap::with_capacity(self.entries.len());
        let mut entries = IndexMap::with_capacity(self.entries.len());
        for name in self.entries.keys() {
            let desc = self.resolve_entry(name, &mut memo, &mut Vec::new())?;
            entries.insert(name.clone(), desc);
        }
        debug!("resolved {} parameter descriptors", entries.len());
        Ok(ResolvedTable { entries })
    }

    fn resolve_entry(
        &self,
        name: &str,
        memo: &mut HashMap<String, ParameterDescriptor>,
        stack: &mut Vec<String>,
    ) -> Result<ParameterDescriptor> {
        if let Some(done) = memo.get(name) {
            return Ok(done.clone());
        }
        if let Some(pos) = stack.iter().position(|seen| seen == name) {
            let mut chain: Vec<String> = stack[pos..].to_vec();
            chain.push(name.to_string());
            return Err(Error::Cycle { chain });
        }
        let node = self
            .entries
            .get(name)
            .ok_or_else(|| Error::config(format!("unknown parameter '{}'", name)))?;

        let desc = if let Some(base_name) = &node.base {
            if !self.entries.contains_key(base_name.as_str()) {
                return Err(Error::reference(name, base_name.as_str()));
            }
            stack.push(name.to_string());
            let base = self.resolve_entry(base_name, memo, stack)?;
            stack.pop();
            ParameterDescriptor {
                name: name.to_string(),
                param_type: node.param_type.unwrap_or(base.param_type),
                location: node.location.unwrap_or(base.location),
                required: node.required.unwrap_or(base.required),
                description: node.description.clone().unwrap_or(base.description),
            }
        } else {
            ParameterDescriptor {
                name: name.to_string(),
                param_type: node
                    .param_type
                    .ok_or_else(|| Error::descriptor(name, "type"))?,
                location: node
                    .location
                    .ok_or_else(|| Error::descriptor(name, "in"))?,
                required: node
                    .required
                    .ok_or_else(|| Error::descriptor(name, "required"))?,
                description: node
                    .description
                    .clone()
                    .ok_or_else(|| Error::descriptor(name, "description"))?,
            }
        };

        // A blank doc row is an authoring mistake the build should catch.
        if desc.description.trim().is_empty() {
            return Err(Error::descriptor(name, "description"));
        }

        memo.insert(name.to_string(), desc.clone());
        Ok(desc)
    }
}

/// An ordered mapping of parameter name to fully resolved descriptor.
///
/// Immutable after construction; iteration follows the authoring order of
/// the source document.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTable {
    entries: IndexMap<String, ParameterDescriptor>,
}

impl ResolvedTable {
    /// Look up a resolved descriptor by parameter name
    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.entries.get(name)
    }

    /// Iterate descriptors in authoring order
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.entries.values()
    }

    /// Parameter names in authoring order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of resolved descriptors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no descriptors
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ParamLocation, ParamType};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const RESERVED_DOC: &str = r#"
reserved:
  type: integer
  in: body
  required: true
  description: The amount of the resource a provider has reserved for its own use.
reserved_opt:
  base: reserved
  required: false
"#;

    #[test]
    fn test_resolve_plain_descriptor() {
        let doc = r#"
resource_provider_uuid:
  type: string
  in: path
  required: true
  description: The uuid of a resource provider.
"#;
        let resolved = ParameterTable::from_str(doc).unwrap().resolve().unwrap();
        let desc = resolved.get("resource_provider_uuid").unwrap();
        assert_eq!(desc.name, "resource_provider_uuid");
        assert_eq!(desc.param_type, ParamType::String);
        assert_eq!(desc.location, ParamLocation::Path);
        assert!(desc.required);
        assert_eq!(desc.description, "The uuid of a resource provider.");
    }

    #[test]
    fn test_merge_overrides_required_and_inherits_the_rest() {
        let resolved = ParameterTable::from_str(RESERVED_DOC)
            .unwrap()
            .resolve()
            .unwrap();
        let base = resolved.get("reserved").unwrap();
        let opt = resolved.get("reserved_opt").unwrap();
        assert_eq!(opt.param_type, base.param_type);
        assert_eq!(opt.location, base.location);
        assert_eq!(opt.description, base.description);
        assert!(base.required);
        assert!(!opt.required);
    }

    #[test]
    fn test_merge_can_override_location() {
        let doc = r#"
resource_class:
  type: string
  in: path
  required: true
  description: The name of one resource class.
resource_class_query:
  base: resource_class
  in: query
  required: false
"#;
        let resolved = ParameterTable::from_str(doc).unwrap().resolve().unwrap();
        let desc = resolved.get("resource_class_query").unwrap();
        assert_eq!(desc.location, ParamLocation::Query);
        assert_eq!(desc.param_type, ParamType::String);
        assert!(!desc.required);
    }

    #[test]
    fn test_merge_chain_resolves_transitively() {
        let doc = r#"
total:
  type: integer
  in: body
  required: true
  description: The actual amount of the resource the provider can accommodate.
total_opt:
  base: total
  required: false
total_query:
  base: total_opt
  in: query
"#;
        let resolved = ParameterTable::from_str(doc).unwrap().resolve().unwrap();
        let desc = resolved.get("total_query").unwrap();
        assert_eq!(desc.param_type, ParamType::Integer);
        assert_eq!(desc.location, ParamLocation::Query);
        assert!(!desc.required);
        assert!(desc.description.starts_with("The actual amount"));
    }

    #[test]
    fn test_forward_reference_resolves() {
        let doc = r#"
min_unit_opt:
  base: min_unit
  required: false
min_unit:
  type: integer
  in: body
  required: true
  description: A minimum amount any single allocation can request.
"#;
        let resolved = ParameterTable::from_str(doc).unwrap().resolve().unwrap();
        assert!(!resolved.get("min_unit_opt").unwrap().required);
        // Authoring order survives even though the base resolved first.
        let names: Vec<&str> = resolved.names().collect();
        assert_eq!(names, vec!["min_unit_opt", "min_unit"]);
    }

    #[test]
    fn test_unresolved_reference_is_rejected() {
        let doc = "step_size_opt:\n  base: step_size\n  required: false\n";
        let err = ParameterTable::from_str(doc)
            .unwrap()
            .resolve()
            .unwrap_err();
        match err {
            Error::Reference { key, target } => {
                assert_eq!(key, "step_size_opt");
                assert_eq!(target, "step_size");
            }
            other => panic!("expected Reference error, got: {other}"),
        }
    }

    #[test]
    fn test_cycle_of_length_two_is_rejected() {
        let doc = r#"
allocation_ratio:
  base: allocation_ratio_opt
allocation_ratio_opt:
  base: allocation_ratio
"#;
        let err = ParameterTable::from_str(doc)
            .unwrap()
            .resolve()
            .unwrap_err();
        match err {
            Error::Cycle { chain } => {
                assert_eq!(
                    chain,
                    vec![
                        "allocation_ratio".to_string(),
                        "allocation_ratio_opt".to_string(),
                        "allocation_ratio".to_string(),
                    ]
                );
            }
            other => panic!("expected Cycle error, got: {other}"),
        }
    }

    #[test]
    fn test_self_reference_is_rejected_as_cycle() {
        let doc = "inventories:\n  base: inventories\n";
        let err = ParameterTable::from_str(doc)
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, Error::Cycle { .. }));
    }

    #[test]
    fn test_partial_plain_record_is_rejected() {
        let doc = "max_unit:\n  type: integer\n  in: body\n  description: x\n";
        let err = ParameterTable::from_str(doc)
            .unwrap()
            .resolve()
            .unwrap_err();
        match err {
            Error::Descriptor { key, field } => {
                assert_eq!(key, "max_unit");
                assert_eq!(field, "required");
            }
            other => panic!("expected Descriptor error, got: {other}"),
        }
    }

    #[test]
    fn test_blank_description_is_rejected() {
        let doc = "max_unit:\n  type: integer\n  in: body\n  required: true\n  description: \"  \"\n";
        let err = ParameterTable::from_str(doc)
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Descriptor {
                field: "description",
                ..
            }
        ));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let table = ParameterTable::from_str(RESERVED_DOC).unwrap();
        let first = table.resolve().unwrap();
        let second = table.resolve().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parameters.yaml");
        std::fs::write(&path, RESERVED_DOC).unwrap();
        let table = ParameterTable::from_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get("reserved_opt").unwrap().is_merge());
    }

    #[test]
    fn test_from_file_reports_path_on_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parameters.yaml");
        std::fs::write(&path, "not: [valid\n").unwrap();
        let err = ParameterTable::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("parameters.yaml"));
    }
}
