use std::collections::HashSet;

use crate::{
    action::{ActionKind, LINK_TAG, PASSAGE_ATTR, PASSAGE_CLASS, SECTION_ATTR, SECTION_CLASS},
    document::{Document, NodeId},
    json_read::{StoryDefinition, Template},
    story_callbacks::ActionHandler,
    story_error::StoryError,
};

pub const SECTION_CONTAINER_CLASS: &str = "squiffy-section";
pub const PASSAGE_CONTAINER_CLASS: &str = "squiffy-passage";
pub const DISABLED_CLASS: &str = "disabled";
/// Passage shown once all the other passages of its section have been seen.
pub const LAST_PASSAGE: &str = "@last";

/// The story document plus what's needed to add sections and passages to it
/// when their links are selected.
pub(crate) struct StoryContent {
    pub(crate) document: Document,
    pub(crate) root: NodeId,
    definition: StoryDefinition,
    current_section: Option<String>,
    section_container: NodeId,
    seen: HashSet<String>,
    seen_passages: HashSet<(String, String)>,
}

impl StoryContent {
    /// Creates the document with an empty root container.
    pub(crate) fn new(definition: StoryDefinition) -> StoryContent {
        let mut document = Document::new();
        let root = document.create_element("div");

        StoryContent {
            document,
            root,
            definition,
            current_section: None,
            section_container: root,
            seen: HashSet::new(),
            seen_passages: HashSet::new(),
        }
    }

    /// Adds the start section to the document.
    pub(crate) fn begin(&mut self) -> Result<(), StoryError> {
        let start = self.definition.start.clone();
        self.show_section(&start)
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.definition.title.as_deref()
    }

    pub(crate) fn current_section(&self) -> Option<&str> {
        self.current_section.as_deref()
    }

    pub(crate) fn seen(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    fn show_section(&mut self, name: &str) -> Result<(), StoryError> {
        let section = self.definition.sections.get(name).ok_or_else(|| {
            StoryError::UnknownDestination(format!("section '{}' not found", name))
        })?;

        let container = self.document.create_element("div");
        self.document.add_class(container, SECTION_CONTAINER_CLASS);
        self.document.set_attr(container, SECTION_ATTR, name);
        self.document.append_child(self.root, container)?;

        instantiate(&mut self.document, container, &section.content)?;

        tracing::debug!(section = name, "section shown");

        self.section_container = container;
        self.current_section = Some(name.to_string());
        self.seen.insert(name.to_string());

        Ok(())
    }

    fn show_passage(&mut self, name: &str) -> Result<(), StoryError> {
        let section_name = self.current_section.clone().unwrap_or_default();

        let section = self
            .definition
            .sections
            .get(&section_name)
            .ok_or_else(|| {
                StoryError::UnknownDestination(format!("section '{}' not found", section_name))
            })?;

        let passage = section.passages.get(name).ok_or_else(|| {
            StoryError::UnknownDestination(format!(
                "passage '{}' not found in section '{}'",
                name, section_name
            ))
        })?;

        let container = self.document.create_element("div");
        self.document.add_class(container, PASSAGE_CONTAINER_CLASS);
        self.document.set_attr(container, PASSAGE_ATTR, name);
        self.document.append_child(self.section_container, container)?;

        instantiate(&mut self.document, container, &passage.content)?;

        tracing::debug!(section = %section_name, passage = name, "passage shown");

        self.seen.insert(name.to_string());
        self.seen_passages
            .insert((section_name.clone(), name.to_string()));

        let last_key = (section_name.clone(), LAST_PASSAGE.to_string());
        let show_last = section.passages.contains_key(LAST_PASSAGE)
            && !self.seen_passages.contains(&last_key)
            && section
                .passages
                .keys()
                .filter(|p| !p.starts_with('@'))
                .all(|p| self.seen_passages.contains(&(section_name.clone(), p.clone())));

        if show_last {
            self.show_passage(LAST_PASSAGE)?;
        }

        Ok(())
    }

    /// Links can't be selected again once their section has been left.
    fn disable_all_links(&mut self) {
        let links = self.document.find_all(self.root, |n| {
            n.is_element(LINK_TAG) && (n.has_class(SECTION_CLASS) || n.has_class(PASSAGE_CLASS))
        });

        for link in links {
            self.document.add_class(link, DISABLED_CLASS);
        }
    }
}

impl ActionHandler for StoryContent {
    fn activate(&mut self, node: NodeId, action: &ActionKind) -> Result<(), StoryError> {
        match action {
            ActionKind::Section(section) => {
                self.disable_all_links();
                self.show_section(section)
            }
            ActionKind::Passage(passage) => {
                self.document.add_class(node, DISABLED_CLASS);
                self.show_passage(passage)
            }
            ActionKind::ExternalLink(_) | ActionKind::None => Ok(()),
        }
    }
}

/// Adds the nodes described by `templates` as children of `parent`.
fn instantiate(
    document: &mut Document,
    parent: NodeId,
    templates: &[Template],
) -> Result<(), StoryError> {
    for t in templates {
        let node = match t {
            Template::Text(text) => document.create_text(text),
            Template::Element {
                tag,
                classes,
                attributes,
                children,
            } => {
                let element = document.create_element(tag);

                for c in classes {
                    document.add_class(element, c);
                }

                for (k, v) in attributes {
                    document.set_attr(element, k, v);
                }

                instantiate(document, element, children)?;

                element
            }
        };

        document.append_child(parent, node)?;
    }

    Ok(())
}
