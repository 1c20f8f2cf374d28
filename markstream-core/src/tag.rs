//! Tag hierarchies for grammar collaborators.
//!
//! Tags live in an index-based arena so a child can refer to its parent
//! without owning it and without reference cycles.
//!
//! ```
//! use markstream_core::{MarkupNode, TagTable};
//!
//! let mut tags = TagTable::new();
//! let html = tags.insert(None, "html").unwrap();
//! let body = tags.insert(Some(html), "body").unwrap();
//! tags.set_children(body, Some(MarkupNode::Tag), None);
//!
//! assert_eq!(tags.path(body), vec!["html", "body"]);
//! ```

use crate::event::MarkupNode;

/// Index into a [`TagTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u32);

impl TagId {
    fn new(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(TagId)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node-kind descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    parent: Option<TagId>,
    name: String,
    /// Kind expected for this tag's children.
    pub children_kind: Option<MarkupNode>,
    /// Grammar-specific type name expected for this tag's children.
    pub children_type: Option<String>,
}

impl Tag {
    pub fn parent(&self) -> Option<TagId> {
        self.parent
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Arena of tags.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    tags: Vec<Tag>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag under `parent` (or as a root).
    ///
    /// Returns `None` if `parent` does not belong to this table or the
    /// table is out of ids.
    pub fn insert(&mut self, parent: Option<TagId>, name: impl Into<String>) -> Option<TagId> {
        if parent.is_some_and(|p| p.index() >= self.tags.len()) {
            return None;
        }
        let id = TagId::new(self.tags.len())?;
        self.tags.push(Tag {
            parent,
            name: name.into(),
            children_kind: None,
            children_type: None,
        });
        Some(id)
    }

    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(id.index())
    }

    pub fn get_mut(&mut self, id: TagId) -> Option<&mut Tag> {
        self.tags.get_mut(id.index())
    }

    pub fn parent(&self, id: TagId) -> Option<TagId> {
        self.get(id)?.parent
    }

    /// Record what the children of `id` are expected to be.
    /// Returns `false` if `id` is unknown.
    pub fn set_children(&mut self, id: TagId, kind: Option<MarkupNode>, type_name: Option<&str>) -> bool {
        match self.get_mut(id) {
            Some(tag) => {
                tag.children_kind = kind;
                tag.children_type = type_name.map(str::to_owned);
                true
            }
            None => false,
        }
    }

    /// Proper ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: TagId) -> impl Iterator<Item = TagId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Names from the root down to `id`. Empty if `id` is unknown.
    pub fn path(&self, id: TagId) -> Vec<&str> {
        let Some(tag) = self.get(id) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .ancestors(id)
            .filter_map(|a| self.get(a).map(Tag::name))
            .collect();
        names.reverse();
        names.push(tag.name());
        names
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
