//! Classification of link elements into story actions.
use strum::Display;

use crate::document::{Document, NodeId};

pub const LINK_TAG: &str = "a";
pub const SECTION_CLASS: &str = "link-section";
pub const PASSAGE_CLASS: &str = "link-passage";
pub const SECTION_ATTR: &str = "data-section";
pub const PASSAGE_ATTR: &str = "data-passage";
pub const HREF_ATTR: &str = "href";

/// The kind of action an element performs when selected, with its
/// destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Jumps to a section, invalidating every other pending choice.
    Section(String),
    /// Reveals a passage of the current section; other choices stay valid.
    Passage(String),
    /// Plain link to an external resource.
    ExternalLink(String),
    /// The element is not a choice.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ActionType {
    Section,
    Passage,
    External,
}

impl ActionKind {
    /// Classifies `node`. A link with an action class but without its
    /// destination attribute is not a choice.
    pub fn of(doc: &Document, node: NodeId) -> ActionKind {
        let n = doc.get(node);

        if !n.is_element(LINK_TAG) {
            return ActionKind::None;
        }

        if n.has_class(SECTION_CLASS) {
            return match n.attr(SECTION_ATTR) {
                Some(section) => ActionKind::Section(section.to_string()),
                None => {
                    tracing::debug!(%node, "section link without {} ignored", SECTION_ATTR);
                    ActionKind::None
                }
            };
        }

        if n.has_class(PASSAGE_CLASS) {
            return match n.attr(PASSAGE_ATTR) {
                Some(passage) => ActionKind::Passage(passage.to_string()),
                None => {
                    tracing::debug!(%node, "passage link without {} ignored", PASSAGE_ATTR);
                    ActionKind::None
                }
            };
        }

        match n.attr(HREF_ATTR) {
            Some(href) => ActionKind::ExternalLink(href.to_string()),
            None => ActionKind::None,
        }
    }

    pub fn is_action(&self) -> bool {
        !matches!(self, ActionKind::None)
    }

    pub fn action_type(&self) -> Option<ActionType> {
        match self {
            ActionKind::Section(_) => Some(ActionType::Section),
            ActionKind::Passage(_) => Some(ActionType::Passage),
            ActionKind::ExternalLink(_) => Some(ActionType::External),
            ActionKind::None => None,
        }
    }

    /// Section or passage name, or the URL of an external link.
    pub fn destination(&self) -> Option<&str> {
        match self {
            ActionKind::Section(d) | ActionKind::Passage(d) | ActionKind::ExternalLink(d) => {
                Some(d.as_str())
            }
            ActionKind::None => None,
        }
    }
}
