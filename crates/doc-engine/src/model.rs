//! Documentation data model
//!
//! These types are the JSON artifact consumed by the reference site. They are
//! produced once per build and never mutated afterwards, so every record is a
//! plain value with camelCase field names on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A documented exported function (declaration or arrow-function binding)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDoc {
    pub name: String,
    /// Grouping label derived from the source location (e.g. "array")
    pub category: String,
    pub description: String,
    /// Rebuilt call signature, e.g. `chunk<T>(array: T[], size: number): T[][]`
    pub syntax: String,
    pub params: Vec<ParamDoc>,
    pub returns: ReturnDoc,
    pub example: String,
    pub since: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Path relative to the project root, forward slashes
    pub source_file: String,
    /// 1-based line of the declaration
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDoc {
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

/// A documented exported constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantDoc {
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Whitespace-collapsed preview of the initializer
    pub value: String,
    pub since: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    pub source_file: String,
    pub line: u32,
}

/// A documented exported interface or type alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDoc {
    pub name: String,
    pub category: String,
    pub description: String,
    /// The declaration text as written, without `export`
    pub definition: String,
    pub properties: Vec<PropertyDoc>,
    pub since: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    pub source_file: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
    pub optional: bool,
    pub readonly: bool,
}

/// Package metadata taken from the manifest. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub repository: String,
    pub license: String,
    pub homepage: String,
    pub keywords: Vec<String>,
}

/// The records contributed by a single source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDocs {
    pub functions: Vec<FunctionDoc>,
    pub constants: Vec<ConstantDoc>,
    pub types: Vec<TypeDoc>,
}

impl FileDocs {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.constants.is_empty() && self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.functions.len() + self.constants.len() + self.types.len()
    }
}

/// The complete documentation snapshot written to the JSON artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsData {
    pub functions: Vec<FunctionDoc>,
    pub constants: Vec<ConstantDoc>,
    pub types: Vec<TypeDoc>,
    pub package_info: PackageInfo,
}

/// Which record list an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Function,
    Constant,
    Type,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Function => "fn",
            EntryKind::Constant => "const",
            EntryKind::Type => "type",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EntryKind::Function => "Function",
            EntryKind::Constant => "Constant",
            EntryKind::Type => "Type",
        }
    }
}

/// A search result pointing at one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: EntryKind,
    pub name: String,
    pub category: String,
}

impl DocsData {
    pub fn new(package_info: PackageInfo) -> Self {
        DocsData {
            package_info,
            ..Self::default()
        }
    }

    /// Append the records of one file, keeping their source order.
    pub fn push_file(&mut self, file: FileDocs) {
        self.functions.extend(file.functions);
        self.constants.extend(file.constants);
        self.types.extend(file.types);
    }

    pub fn len(&self) -> usize {
        self.functions.len() + self.constants.len() + self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionDoc> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn find_constant(&self, name: &str) -> Option<&ConstantDoc> {
        self.constants.iter().find(|c| c.name == name)
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDoc> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Case-insensitive search over names, categories and descriptions.
    ///
    /// Functions come first, then constants, then types; each list keeps its
    /// artifact order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        let matches = |name: &str, category: &str, description: &str| {
            needle.is_empty()
                || name.to_lowercase().contains(&needle)
                || category.to_lowercase().contains(&needle)
                || description.to_lowercase().contains(&needle)
        };

        let functions = self
            .functions
            .iter()
            .filter(|f| matches(&f.name, &f.category, &f.description))
            .map(|f| (EntryKind::Function, &f.name, &f.category));
        let constants = self
            .constants
            .iter()
            .filter(|c| matches(&c.name, &c.category, &c.description))
            .map(|c| (EntryKind::Constant, &c.name, &c.category));
        let types = self
            .types
            .iter()
            .filter(|t| matches(&t.name, &t.category, &t.description))
            .map(|t| (EntryKind::Type, &t.name, &t.category));

        functions
            .chain(constants)
            .chain(types)
            .map(|(kind, name, category)| SearchHit {
                kind,
                name: name.clone(),
                category: category.clone(),
            })
            .collect()
    }

    /// Group entry names by category, for navigation and summaries.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<(EntryKind, &str)>> {
        let mut groups: BTreeMap<&str, Vec<(EntryKind, &str)>> = BTreeMap::new();
        for f in &self.functions {
            groups
                .entry(f.category.as_str())
                .or_default()
                .push((EntryKind::Function, f.name.as_str()));
        }
        for c in &self.constants {
            groups
                .entry(c.category.as_str())
                .or_default()
                .push((EntryKind::Constant, c.name.as_str()));
        }
        for t in &self.types {
            groups
                .entry(t.category.as_str())
                .or_default()
                .push((EntryKind::Type, t.name.as_str()));
        }
        groups
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
