//! Flattening a tree into a table keyed by property path and contexts.
//!
//! Every property of a file gets an entry under its path, qualified by the
//! union of the contexts of the context blocks and contextual statements
//! around it. A property whose value is a literal is recorded as a scalar,
//! one whose value is a reference or an invocation as an unknown entry, and
//! any other property as a mapping entry.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};

use amper_tree::visitor::{AmperVisitor, ElementVisitor, VisitResult, walk_children};
use amper_tree::{
    AstElement, ContextBlock, ContextualElement, ContextualStatement, File, Invocation, Literal,
    Location, Object, ObjectMember, Property, Reference, StaleNodeError, TreeNode,
};
use tracing::{debug, trace};

use crate::{FrontendError, Pointer, ReaderOptions};

/// Table key: a property path plus the contexts it applies under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyWithContext {
    pub key: Pointer,
    pub contexts: BTreeSet<String>,
}

impl KeyWithContext {
    pub fn new(key: Pointer, contexts: BTreeSet<String>) -> Self {
        Self { key, contexts }
    }

    /// Key applying under no context.
    pub fn plain(key: Pointer) -> Self {
        Self::new(key, BTreeSet::new())
    }
}

impl fmt::Display for KeyWithContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if !self.contexts.is_empty() {
            let contexts: Vec<&str> = self.contexts.iter().map(String::as_str).collect();
            write!(f, "@{}", contexts.join("+"))?;
        }
        Ok(())
    }
}

/// What a table entry points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueEntry {
    /// A property whose value is structured or absent.
    MappingEntry(Property),
    /// The literal value of a property.
    Scalar(Literal),
    /// A value the table cannot interpret on its own.
    Unknown(TreeNode),
}

impl ValueEntry {
    pub fn syntax(&self) -> &TreeNode {
        match self {
            ValueEntry::MappingEntry(property) => property.syntax(),
            ValueEntry::Scalar(literal) => literal.syntax(),
            ValueEntry::Unknown(node) => node,
        }
    }

    /// Unquoted text of a scalar entry.
    pub fn scalar_text(&self) -> Result<Option<String>, StaleNodeError> {
        match self {
            ValueEntry::Scalar(literal) => literal.value().map(Some),
            _ => Ok(None),
        }
    }
}

/// Entries of one file, ordered by key.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    entries: BTreeMap<KeyWithContext, ValueEntry>,
}

impl ValueTable {
    pub fn get(&self, key: &Pointer, contexts: &BTreeSet<String>) -> Option<&ValueEntry> {
        self.entries
            .get(&KeyWithContext::new(key.clone(), contexts.clone()))
    }

    /// Unquoted scalar at `key`, if the entry there is a scalar.
    pub fn scalar(
        &self,
        key: &Pointer,
        contexts: &BTreeSet<String>,
    ) -> Result<Option<String>, FrontendError> {
        match self.get(key, contexts) {
            Some(entry) => Ok(entry.scalar_text()?),
            None => Ok(None),
        }
    }

    /// Where in `source` the entry at `key` was written.
    pub fn locate(
        &self,
        key: &Pointer,
        contexts: &BTreeSet<String>,
        source: &str,
    ) -> Result<Option<Location>, FrontendError> {
        match self.get(key, contexts) {
            Some(entry) => Ok(Some(entry.syntax().location(source)?)),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyWithContext, &ValueEntry)> {
        self.entries.iter()
    }

    /// Keys at or below `prefix` that apply when all of `contexts` are active.
    pub fn keys_under<'a>(
        &'a self,
        prefix: &'a Pointer,
        contexts: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = &'a KeyWithContext> + 'a {
        self.entries.keys().filter(move |entry| {
            entry.key.starts_with(prefix) && entry.contexts.is_superset(contexts)
        })
    }

    /// One line per entry: key, entry kind and scalar text.
    pub fn dump(&self) -> Result<String, FrontendError> {
        let mut out = String::new();
        for (key, entry) in &self.entries {
            let _ = write!(out, "{key} = ");
            match entry {
                ValueEntry::MappingEntry(_) => out.push_str("mapping"),
                ValueEntry::Scalar(literal) => {
                    let _ = write!(out, "scalar {:?}", literal.value()?);
                }
                ValueEntry::Unknown(node) => {
                    let _ = write!(out, "unknown {}", node.kind());
                }
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// Reads the tree under `root` into a [`ValueTable`].
///
/// Fails if the tree is replaced while it is being read.
pub fn read_value_table(
    root: &TreeNode,
    options: &ReaderOptions,
) -> Result<ValueTable, FrontendError> {
    let mut reader = TableReader::new(options);
    root.accept(&mut reader)?;
    debug!(root = %root.kind(), entries = reader.entries.len(), "read value table");
    Ok(ValueTable {
        entries: reader.entries,
    })
}

struct TableReader<'o> {
    options: &'o ReaderOptions,
    positions: Vec<String>,
    contexts: Vec<BTreeSet<String>>,
    entries: BTreeMap<KeyWithContext, ValueEntry>,
}

impl<'o> TableReader<'o> {
    fn new(options: &'o ReaderOptions) -> Self {
        Self {
            options,
            positions: Vec::new(),
            contexts: Vec::new(),
            entries: BTreeMap::new(),
        }
    }

    fn position(&self) -> Pointer {
        self.positions.iter().cloned().collect()
    }

    fn context(&self) -> BTreeSet<String> {
        self.contexts.iter().flatten().cloned().collect()
    }

    fn record(&mut self, entry: ValueEntry) {
        let key = KeyWithContext::new(self.position(), self.context());
        trace!(%key, kind = %entry.syntax().kind(), "recording entry");
        self.entries.insert(key, entry);
    }

    fn with_contexts(&mut self, element: ContextualElement) -> VisitResult {
        self.contexts.push(element.contexts()?);
        let result = walk_children(self, element.syntax());
        self.contexts.pop();
        result
    }

    fn segment(&self, property: &Property) -> Result<String, StaleNodeError> {
        let name = property.name()?;
        if let Some(index) = duplicate_index(property, name.as_deref())? {
            return Ok(index.to_string());
        }
        Ok(self.options.segment_for(name.as_deref()).to_string())
    }

    /// Records `value` if it is the value of its parent property.
    fn record_property_value(&mut self, value: &TreeNode, entry: ValueEntry) -> VisitResult {
        let Some(property) = value.parent()?.and_then(Property::cast) else {
            return Ok(());
        };
        if property.value()?.is_some_and(|v| v.syntax() == value) {
            self.record(entry);
        }
        Ok(())
    }
}

/// Index of `property` among the properties of its enclosing object or file,
/// if a namesake shares its context set.
///
/// Properties nested in context blocks and contextual statements belong to
/// the same object, so they are counted too. The index is the position in
/// that flattened, source-ordered list.
fn duplicate_index(
    property: &Property,
    name: Option<&str>,
) -> Result<Option<usize>, StaleNodeError> {
    let Some(members) = enclosing_members(property.syntax())? else {
        return Ok(None);
    };
    let mut scoped = Vec::new();
    collect_properties(members, &BTreeSet::new(), &mut scoped)?;

    let mut groups: BTreeMap<&BTreeSet<String>, usize> = BTreeMap::new();
    for (sibling, contexts) in &scoped {
        if sibling.name()?.as_deref() == name {
            *groups.entry(contexts).or_default() += 1;
        }
    }
    if groups.values().all(|&count| count < 2) {
        return Ok(None);
    }
    Ok(scoped.iter().position(|(sibling, _)| sibling == property))
}

/// Members of the object or file that owns `node`, looking through any
/// contextual elements in between.
fn enclosing_members(node: &TreeNode) -> Result<Option<Vec<ObjectMember>>, StaleNodeError> {
    let mut current = node.parent()?;
    while let Some(parent) = current {
        if let Some(object) = Object::cast(parent.clone()) {
            return object.elements().map(Some);
        }
        if let Some(file) = File::cast(parent.clone()) {
            return file.elements().map(Some);
        }
        if ContextualElement::cast(parent.clone()).is_none() {
            return Ok(None);
        }
        current = parent.parent()?;
    }
    Ok(None)
}

fn collect_properties(
    members: Vec<ObjectMember>,
    contexts: &BTreeSet<String>,
    out: &mut Vec<(Property, BTreeSet<String>)>,
) -> Result<(), StaleNodeError> {
    for member in members {
        match member {
            ObjectMember::Property(property) => out.push((property, contexts.clone())),
            ObjectMember::ContextBlock(block) => {
                let inner = &ContextualElement::Block(block.clone()).contexts()? | contexts;
                collect_properties(block.elements()?, &inner, out)?;
            }
            ObjectMember::ContextualStatement(statement) => {
                let inner =
                    &ContextualElement::Statement(statement.clone()).contexts()? | contexts;
                if let Some(property) = statement.property()? {
                    out.push((property, inner));
                }
            }
        }
    }
    Ok(())
}

impl ElementVisitor for TableReader<'_> {
    fn as_amper_visitor(&mut self) -> Option<&mut dyn AmperVisitor> {
        Some(self)
    }

    fn visit_element(&mut self, node: &TreeNode) -> VisitResult {
        walk_children(self, node)
    }
}

impl AmperVisitor for TableReader<'_> {
    fn visit_context_block(&mut self, node: &ContextBlock) -> VisitResult {
        self.with_contexts(ContextualElement::Block(node.clone()))
    }

    fn visit_contextual_statement(&mut self, node: &ContextualStatement) -> VisitResult {
        self.with_contexts(ContextualElement::Statement(node.clone()))
    }

    fn visit_property(&mut self, node: &Property) -> VisitResult {
        let segment = self.segment(node)?;
        self.positions.push(segment);
        self.record(ValueEntry::MappingEntry(node.clone()));
        let result = walk_children(self, node.syntax());
        self.positions.pop();
        result
    }

    fn visit_literal(&mut self, node: &Literal) -> VisitResult {
        self.record_property_value(node.syntax(), ValueEntry::Scalar(node.clone()))
    }

    // Arguments and targets are not entries of their own.
    fn visit_reference(&mut self, node: &Reference) -> VisitResult {
        self.record_property_value(node.syntax(), ValueEntry::Unknown(node.syntax().clone()))
    }

    fn visit_invocation(&mut self, node: &Invocation) -> VisitResult {
        self.record_property_value(node.syntax(), ValueEntry::Unknown(node.syntax().clone()))
    }
}
