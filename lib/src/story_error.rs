//! Errors raised while loading a compiled story or reading it.
use core::fmt;

/// What went wrong loading or reading a [`Story`](crate::story::Story).
///
/// Only [`BadJson`](StoryError::BadJson) is returned by
/// [`Story::new`](crate::story::Story::new); the rest come from the
/// read/choose loop.
#[derive(Debug)]
pub enum StoryError {
    /// The session was asked to do something its phase doesn't allow:
    /// continuing while a choice is pending, or choosing after the end.
    InvalidStoryState(String),
    /// A selected link names a section, or a passage of the current section,
    /// that the story doesn't have. The pending choices are kept.
    UnknownDestination(String),
    /// The compiled story file can't be read: malformed JSON, unsupported
    /// `storyVersion` or content that isn't a node.
    BadJson(String),
    /// Out of range choice index or a node that can't take a child.
    BadArgument(String),
}

impl StoryError {
    pub(crate) fn get_message(&self) -> &str {
        match self {
            StoryError::InvalidStoryState(msg)
            | StoryError::UnknownDestination(msg)
            | StoryError::BadJson(msg)
            | StoryError::BadArgument(msg) => msg.as_str(),
        }
    }
}

impl std::error::Error for StoryError {}

impl std::convert::From<serde_json::Error> for StoryError {
    fn from(err: serde_json::Error) -> StoryError {
        StoryError::BadJson(err.to_string())
    }
}

impl fmt::Display for StoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoryError::InvalidStoryState(desc) => write!(f, "Invalid story state: {}", desc),
            StoryError::UnknownDestination(desc) => write!(f, "Unknown destination: {}", desc),
            StoryError::BadJson(desc) => write!(f, "Error parsing JSON: {}", desc),
            StoryError::BadArgument(arg) => write!(f, "Bad argument: {}", arg),
        }
    }
}
