//! [`Story`] is the entry point to load and run a compiled Squiffy story.
use crate::{
    document::{Document, NodeId},
    json_read,
    session::Session,
    story_error::StoryError,
};

use self::content::StoryContent;

mod content;
mod progress;

pub use content::{DISABLED_CLASS, LAST_PASSAGE, PASSAGE_CONTAINER_CLASS, SECTION_CONTAINER_CLASS};

/// The current version of the compiled story file format.
pub const STORY_VERSION_CURRENT: i32 = 1;
/// The minimum legacy version of compiled stories that can be loaded by the
/// current version of the code.
pub const STORY_VERSION_MINIMUM_COMPATIBLE: i32 = 1;

/// A `Story` owns the story document and the reading session walking it.
pub struct Story {
    content: StoryContent,
    session: Session,
}

impl Story {
    /// Construct a `Story` out of a compiled story JSON string. The start
    /// section is added to the document, ready to be read with
    /// [`cont`](Story::cont).
    pub fn new(json_string: &str) -> Result<Self, StoryError> {
        let definition = json_read::load_from_string(json_string)?;

        let mut content = StoryContent::new(definition);
        content.begin()?;

        let session = Session::new(content.root);

        Ok(Story { content, session })
    }

    pub fn get_title(&self) -> Option<&str> {
        self.content.title()
    }

    /// The document built so far.
    pub fn get_document(&self) -> &Document {
        &self.content.document
    }

    /// The container every section is added to.
    pub fn get_root(&self) -> NodeId {
        self.content.root
    }

    /// Name of the last section entered.
    pub fn get_current_section(&self) -> Option<&str> {
        self.content.current_section()
    }

    /// Whether the section or passage `name` has been shown.
    pub fn seen(&self, name: &str) -> bool {
        self.content.seen(name)
    }

    /// Creates a string representing the hierarchy of the story document,
    /// marking where the next walk resumes.
    pub fn build_string_of_hierarchy(&self) -> String {
        self.content
            .document
            .build_string_of_hierarchy(self.content.root, self.session.position())
    }
}
