use crate::{action::ActionKind, document::NodeId, story_error::StoryError};

/// Defines what happens when the player selects a link: the equivalent of
/// clicking it in the story document.
pub trait ActionHandler {
    fn activate(&mut self, node: NodeId, action: &ActionKind) -> Result<(), StoryError>;
}
