//! Shape table describing the child layout of every node kind.
//!
//! Each kind declares an ordered list of named slots. A single routine,
//! [`assign_slots`], matches a child kind sequence against those slots; the
//! tree builder uses it to validate input and the typed views use it to find
//! their sub-nodes. Adding a kind means adding a row here, nothing else.

use std::ops::Range;

use crate::error::ShapeMismatch;
use crate::kind::{Category, NodeKind};

/// How many children a slot takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    Optional,
    Many,
    OneOrMore,
}

/// Which child kinds a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepts {
    Kind(NodeKind),
    Category(Category),
    /// Properties and contextual elements.
    ObjectMember,
}

impl Accepts {
    #[inline]
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            Accepts::Kind(expected) => kind == expected,
            Accepts::Category(category) => kind.category() == category,
            Accepts::ObjectMember => kind.is_object_member(),
        }
    }
}

/// A named position in a kind's child layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub name: &'static str,
    pub accepts: Accepts,
    pub arity: Arity,
}

/// Static description of one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindShape {
    pub kind: NodeKind,
    pub name: &'static str,
    pub slots: &'static [Slot],
}

impl KindShape {
    pub fn slot_index(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }
}

const fn slot(name: &'static str, accepts: Accepts, arity: Arity) -> Slot {
    Slot {
        name,
        accepts,
        arity,
    }
}

const MEMBERS: Slot = slot("elements", Accepts::ObjectMember, Arity::Many);
const CONTEXTS: Slot = slot(
    "contexts",
    Accepts::Kind(NodeKind::ContextName),
    Arity::OneOrMore,
);

static SHAPES: [KindShape; NodeKind::ALL.len()] = [
    KindShape {
        kind: NodeKind::File,
        name: "File",
        slots: &[MEMBERS],
    },
    KindShape {
        kind: NodeKind::Object,
        name: "Object",
        slots: &[MEMBERS],
    },
    KindShape {
        kind: NodeKind::Property,
        name: "Property",
        slots: &[
            slot("name", Accepts::Kind(NodeKind::Identifier), Arity::Optional),
            slot("value", Accepts::Category(Category::Value), Arity::Optional),
        ],
    },
    KindShape {
        kind: NodeKind::ContextBlock,
        name: "ContextBlock",
        slots: &[CONTEXTS, MEMBERS],
    },
    KindShape {
        kind: NodeKind::ContextualStatement,
        name: "ContextualStatement",
        slots: &[
            CONTEXTS,
            slot("property", Accepts::Kind(NodeKind::Property), Arity::One),
        ],
    },
    KindShape {
        kind: NodeKind::ContextName,
        name: "ContextName",
        slots: &[],
    },
    KindShape {
        kind: NodeKind::Identifier,
        name: "Identifier",
        slots: &[],
    },
    KindShape {
        kind: NodeKind::Literal,
        name: "Literal",
        slots: &[],
    },
    KindShape {
        kind: NodeKind::Reference,
        name: "Reference",
        slots: &[slot(
            "target",
            Accepts::Kind(NodeKind::Identifier),
            Arity::One,
        )],
    },
    KindShape {
        kind: NodeKind::Invocation,
        name: "Invocation",
        slots: &[
            slot("callee", Accepts::Kind(NodeKind::Identifier), Arity::One),
            slot("arguments", Accepts::Category(Category::Value), Arity::Many),
        ],
    },
];

impl NodeKind {
    /// Shape table row for this kind.
    #[inline]
    pub fn shape(self) -> &'static KindShape {
        &SHAPES[self as usize]
    }
}

/// Child index ranges, one per slot of the matched shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    ranges: Vec<Range<usize>>,
}

impl SlotLayout {
    /// Range of child indices occupied by slot `index`. Absent optional slots
    /// yield an empty range.
    pub fn range(&self, index: usize) -> Range<usize> {
        self.ranges.get(index).cloned().unwrap_or(0..0)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Matches `children` against the slots of `kind`.
///
/// Slots are filled greedily in declaration order. Every child must land in
/// some slot and every required slot must be filled.
pub fn assign_slots(kind: NodeKind, children: &[NodeKind]) -> Result<SlotLayout, ShapeMismatch> {
    let shape = kind.shape();
    let mut ranges = Vec::with_capacity(shape.slots.len());
    let mut pos = 0;

    let accepts_at = |pos: usize, slot: &Slot| {
        children
            .get(pos)
            .is_some_and(|child| slot.accepts.matches(*child))
    };

    for slot in shape.slots {
        let start = pos;
        match slot.arity {
            Arity::One | Arity::OneOrMore if !accepts_at(pos, slot) => {
                return Err(ShapeMismatch::MissingSlot {
                    kind,
                    slot: slot.name,
                    index: pos,
                });
            }
            Arity::One => pos += 1,
            Arity::Optional => {
                if accepts_at(pos, slot) {
                    pos += 1;
                }
            }
            Arity::Many | Arity::OneOrMore => {
                while accepts_at(pos, slot) {
                    pos += 1;
                }
            }
        }
        ranges.push(start..pos);
    }

    if let Some(found) = children.get(pos) {
        return Err(ShapeMismatch::UnexpectedChild {
            kind,
            found: *found,
            index: pos,
        });
    }

    Ok(SlotLayout { ranges })
}
