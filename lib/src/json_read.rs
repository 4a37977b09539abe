use std::collections::HashMap;

use serde::Deserialize;

use crate::{
    action::{LINK_TAG, PASSAGE_ATTR, PASSAGE_CLASS, SECTION_ATTR, SECTION_CLASS},
    story::{STORY_VERSION_CURRENT, STORY_VERSION_MINIMUM_COMPATIBLE},
    story_error::StoryError,
};

/// Name of the section that holds the text before the first section of a
/// story. Used as start when the story doesn't declare one.
pub const DEFAULT_SECTION: &str = "_default";

/// Content of a section or passage, before it's added to the document.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Template {
    Text(String),
    Element {
        tag: String,
        classes: Vec<String>,
        attributes: Vec<(String, String)>,
        children: Vec<Template>,
    },
}

#[derive(Debug, Default)]
pub(crate) struct PassageDef {
    pub content: Vec<Template>,
}

#[derive(Debug, Default)]
pub(crate) struct SectionDef {
    pub content: Vec<Template>,
    pub passages: HashMap<String, PassageDef>,
}

#[derive(Debug)]
pub(crate) struct StoryDefinition {
    pub title: Option<String>,
    pub start: String,
    pub sections: HashMap<String, SectionDef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonStory {
    title: Option<String>,
    start: Option<String>,
    sections: HashMap<String, JsonSection>,
}

#[derive(Deserialize)]
struct JsonSection {
    #[serde(default)]
    content: Vec<serde_json::Value>,
    #[serde(default)]
    passages: HashMap<String, JsonPassage>,
}

#[derive(Deserialize)]
struct JsonPassage {
    #[serde(default)]
    content: Vec<serde_json::Value>,
}

pub(crate) fn load_from_string(s: &str) -> Result<StoryDefinition, StoryError> {
    let root: serde_json::Value = serde_json::from_str(s)?;

    let version = match root.get("storyVersion").and_then(|v| v.as_i64()) {
        Some(v) => v,
        None => {
            return Err(StoryError::BadJson(
                "story version number not found. Are you sure it's a valid compiled story file?"
                    .to_owned(),
            ))
        }
    };

    if version > STORY_VERSION_CURRENT as i64 {
        return Err(StoryError::BadJson(
            "Version of the compiler used to build story was newer than the current version of the engine"
                .to_owned(),
        ));
    } else if version < STORY_VERSION_MINIMUM_COMPATIBLE as i64 {
        return Err(StoryError::BadJson(
            "Version of the compiler used to build story is too old to be loaded by this version of the engine"
                .to_owned(),
        ));
    }

    let json: JsonStory = serde_json::from_value(root)?;

    let mut sections = HashMap::with_capacity(json.sections.len());

    for (name, section) in json.sections {
        let mut passages = HashMap::with_capacity(section.passages.len());

        for (passage_name, passage) in section.passages {
            passages.insert(
                passage_name,
                PassageDef {
                    content: jarray_to_templates(&passage.content)?,
                },
            );
        }

        sections.insert(
            name,
            SectionDef {
                content: jarray_to_templates(&section.content)?,
                passages,
            },
        );
    }

    let start = json.start.unwrap_or_else(|| DEFAULT_SECTION.to_owned());

    if !sections.contains_key(&start) {
        return Err(StoryError::BadJson(format!(
            "start section '{}' not found",
            start
        )));
    }

    let definition = StoryDefinition {
        title: json.title,
        start,
        sections,
    };

    warn_dangling_links(&definition);

    Ok(definition)
}

fn jarray_to_templates(tokens: &[serde_json::Value]) -> Result<Vec<Template>, StoryError> {
    tokens.iter().map(jtoken_to_template).collect()
}

pub(crate) fn jtoken_to_template(token: &serde_json::Value) -> Result<Template, StoryError> {
    match token {
        serde_json::Value::String(text) => Ok(Template::Text(text.clone())),
        serde_json::Value::Object(obj) => {
            let tag = match obj.get("tag").and_then(|t| t.as_str()) {
                Some(tag) if !tag.is_empty() => tag.to_ascii_lowercase(),
                _ => {
                    return Err(StoryError::BadJson(format!(
                        "Element without tag: {}",
                        token
                    )))
                }
            };

            let classes = match obj.get("class") {
                None => Vec::new(),
                Some(serde_json::Value::String(c)) => {
                    c.split_whitespace().map(|c| c.to_string()).collect()
                }
                Some(serde_json::Value::Array(a)) => a
                    .iter()
                    .map(|c| {
                        c.as_str().map(|c| c.to_string()).ok_or_else(|| {
                            StoryError::BadJson(format!("Class name must be a string: {}", c))
                        })
                    })
                    .collect::<Result<Vec<String>, StoryError>>()?,
                Some(other) => {
                    return Err(StoryError::BadJson(format!(
                        "Invalid class value: {}",
                        other
                    )))
                }
            };

            let mut attributes = Vec::new();

            if let Some(attrs) = obj.get("attrs") {
                let attrs = attrs.as_object().ok_or_else(|| {
                    StoryError::BadJson(format!("Attributes must be an object: {}", attrs))
                })?;

                for (k, v) in attrs {
                    let value = match v {
                        serde_json::Value::String(s) => s.clone(),
                        serde_json::Value::Number(n) => n.to_string(),
                        serde_json::Value::Bool(b) => b.to_string(),
                        _ => {
                            return Err(StoryError::BadJson(format!(
                                "Invalid value for attribute '{}': {}",
                                k, v
                            )))
                        }
                    };

                    attributes.push((k.clone(), value));
                }
            }

            let children = match obj.get("children") {
                None => Vec::new(),
                Some(serde_json::Value::Array(a)) => jarray_to_templates(a)?,
                Some(other) => {
                    return Err(StoryError::BadJson(format!(
                        "Children must be an array: {}",
                        other
                    )))
                }
            };

            Ok(Template::Element {
                tag,
                classes,
                attributes,
                children,
            })
        }
        _ => Err(StoryError::BadJson(format!(
            "Failed to convert token to story content: {}",
            token
        ))),
    }
}

impl Template {
    fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Template::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            Template::Text(_) => None,
        }
    }

    fn has_class(&self, class: &str) -> bool {
        match self {
            Template::Element { classes, .. } => classes.iter().any(|c| c == class),
            Template::Text(_) => false,
        }
    }

    /// Calls `f` for this template and all its descendants.
    fn walk<F: FnMut(&Template)>(&self, f: &mut F) {
        f(self);

        if let Template::Element { children, .. } = self {
            for c in children {
                c.walk(f);
            }
        }
    }
}

/// Links to sections or passages that don't exist will fail when selected.
fn warn_dangling_links(definition: &StoryDefinition) {
    for (section_name, section) in &definition.sections {
        let contents = std::iter::once(&section.content)
            .chain(section.passages.values().map(|p| &p.content));

        for content in contents {
            for t in content {
                t.walk(&mut |t| {
                    let is_link = matches!(t, Template::Element { tag, .. } if tag == LINK_TAG);

                    if !is_link {
                        return;
                    }

                    if t.has_class(SECTION_CLASS) {
                        if let Some(target) = t.attr(SECTION_ATTR) {
                            if !definition.sections.contains_key(target) {
                                tracing::warn!(
                                    section = %section_name,
                                    "link to unknown section '{}'",
                                    target
                                );
                            }
                        }
                    } else if t.has_class(PASSAGE_CLASS) {
                        if let Some(target) = t.attr(PASSAGE_ATTR) {
                            if !section.passages.contains_key(target) {
                                tracing::warn!(
                                    section = %section_name,
                                    "link to unknown passage '{}'",
                                    target
                                );
                            }
                        }
                    }
                });
            }
        }
    }
}
