//! Runtime for [Squiffy](https://github.com/textadventures/squiffy) stories.
//!
//! A compiled story is loaded into a document tree. The document is walked
//! in reading order: text is output as it's found and links are collected as
//! choices. Selecting a choice adds new content to the document and the walk
//! resumes right after the point where the previous one stopped.
//!
//! ```
//! use squiffyrt::story::Story;
//!
//! let json = r#"{
//!     "storyVersion": 1,
//!     "sections": {
//!         "_default": {
//!             "content": [
//!                 {"tag": "p", "children": ["Hello"]},
//!                 {"tag": "a", "class": "link-section", "attrs": {"data-section": "end"},
//!                  "children": ["Leave"]}
//!             ]
//!         },
//!         "end": {"content": [{"tag": "p", "children": ["Bye"]}]}
//!     }
//! }"#;
//!
//! let mut story = Story::new(json).unwrap();
//! assert_eq!("\nHello\n", story.cont().unwrap());
//! assert_eq!("Leave", story.get_current_choices()[0].text);
//!
//! story.choose_choice_index(0).unwrap();
//! assert_eq!("\nBye\n", story.cont().unwrap());
//! assert!(story.is_ended());
//! ```

pub mod action;
pub mod choice;
pub mod document;
mod json_read;
pub mod render;
pub mod session;
pub mod story;
pub mod story_callbacks;
pub mod story_error;
pub mod traversal;

pub use json_read::DEFAULT_SECTION;
