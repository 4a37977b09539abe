//! Choices collected from the links found while walking the story.
use core::fmt;

use crate::{action::ActionKind, document::NodeId};

/// A link of the story presented to the player as a choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceEntry {
    /// The text presented to the player for this choice.
    pub text: String,
    /// The link element this choice was collected from.
    pub node: NodeId,
    /// What selecting the choice does, computed when the link was visited.
    pub action: ActionKind,
}

impl ChoiceEntry {
    pub fn new(text: String, node: NodeId, action: ActionKind) -> ChoiceEntry {
        ChoiceEntry { text, node, action }
    }
}

impl fmt::Display for ChoiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Ordered list of choices. Entries are appended in document order during a
/// pass; afterwards they can only be removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChoiceRegistry {
    entries: Vec<ChoiceEntry>,
}

impl ChoiceRegistry {
    pub fn new() -> ChoiceRegistry {
        ChoiceRegistry::default()
    }

    pub fn push(&mut self, entry: ChoiceEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry collected from `node`, keeping the order of the rest.
    /// Returns `true` if there was one.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let len = self.entries.len();
        self.entries.retain(|e| e.node != node);

        self.entries.len() != len
    }

    pub fn entries(&self) -> &[ChoiceEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ChoiceEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }
}
