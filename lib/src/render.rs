//! Decides what each visited node contributes to the output.
use std::str::FromStr;

use strum::EnumString;

use crate::{
    action::ActionKind,
    choice::ChoiceEntry,
    document::{Document, NodeId},
};

/// Tags whose text is printed on its own line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BlockTag {
    Address,
    Blockquote,
    Center,
    Dir,
    Div,
    Dl,
    Fieldset,
    Form,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Isindex,
    Menu,
    Noframes,
    Noscript,
    Ol,
    P,
    Pre,
    Table,
    Ul,
}

/// Element whose text is shown as a boxed message instead of story text.
pub const ALERT_TAG: &str = "alert";

pub fn is_block_level(tag: &str) -> bool {
    BlockTag::from_str(tag).is_ok()
}

/// What a visited node contributes to a pass.
#[derive(Debug, PartialEq)]
pub enum Render {
    /// Text to print. `block` text goes on its own line.
    Text { text: String, block: bool },
    /// A link to offer as a choice. Its children are not visited.
    Collect(ChoiceEntry),
    /// A boxed message. Its children are not visited.
    Alert(String),
    Ignore,
}

pub fn classify(doc: &Document, node: NodeId) -> Render {
    let n = doc.get(node);

    if n.is_text() {
        return match n.text() {
            Some(text) if !text.is_empty() => Render::Text {
                text: text.to_string(),
                block: is_block_parent(doc, node),
            },
            _ => Render::Ignore,
        };
    }

    if n.is_element(ALERT_TAG) {
        return Render::Alert(doc.text_content(node));
    }

    let action = ActionKind::of(doc, node);

    if action.is_action() {
        Render::Collect(ChoiceEntry::new(doc.text_content(node), node, action))
    } else {
        Render::Ignore
    }
}

fn is_block_parent(doc: &Document, node: NodeId) -> bool {
    doc.parent(node)
        .and_then(|p| doc.get(p).tag())
        .is_some_and(is_block_level)
}

/// A piece of output produced while walking the story.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Text { text: String, block: bool },
    /// Label of a collected link, shown inline as it's found.
    Choice(String),
    Alert(String),
}

impl Fragment {
    /// The text as printed: block text is surrounded by newlines.
    pub fn to_plain_string(&self) -> String {
        match self {
            Fragment::Text { text, block: true } => format!("\n{}\n", text),
            Fragment::Text { text, block: false } => text.clone(),
            Fragment::Choice(text) => text.clone(),
            Fragment::Alert(message) => {
                let border = alert_border(message);
                format!("{border} |  {message}  | \n{border}")
            }
        }
    }
}

/// Top and bottom line of the box drawn around an alert `message`.
pub fn alert_border(message: &str) -> String {
    format!("  {}  \n", "-".repeat(message.chars().count() + 4))
}

/// All the fragments of one pass, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassOutput {
    pub fragments: Vec<Fragment>,
}

impl PassOutput {
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Story text of the pass and its alerts, without the inline link
    /// labels.
    pub fn plain_text(&self) -> String {
        let mut sb = String::new();

        for f in &self.fragments {
            if !matches!(f, Fragment::Choice(_)) {
                sb.push_str(&f.to_plain_string());
            }
        }

        sb
    }
}
