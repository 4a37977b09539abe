//! The read/choose loop over a story document.
//!
//! A [`Session`] remembers where the last walk stopped and which choices are
//! still pending. Each call to [`Session::continue_story`] walks the
//! document from that point to its end, and [`Session::choose`] applies the
//! player selection before the next walk.
use strum::Display;

use crate::{
    action::ActionKind,
    choice::{ChoiceEntry, ChoiceRegistry},
    document::{Document, NodeId},
    render::{self, Fragment, PassOutput, Render},
    story_callbacks::ActionHandler,
    story_error::StoryError,
    traversal,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Phase {
    /// The next call must walk the document.
    Rendering,
    /// Waiting for the player to select one of the current choices.
    AwaitingChoice,
    /// The last walk found no choices: the story is over.
    Ended,
}

/// What the caller must do after a selection has been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Continue,
    /// Open the URL with the host default handler. The story continues
    /// without waiting for it.
    OpenResource(String),
}

/// Result of one walk over the document.
#[derive(Debug)]
pub struct Pass {
    pub output: PassOutput,
    /// Last visited node, where the next walk resumes.
    pub position: Option<NodeId>,
    pub menu: ChoiceRegistry,
}

/// Walks the document from `position`, streaming the output to `sink`, and
/// returns the last visited node with the choices found, appended to
/// `carried`.
///
/// `position` itself is not output again. Its children are only visited if it
/// isn't a link or an alert, since their whole text was already shown.
pub fn render_pass_with<F>(
    doc: &Document,
    position: Option<NodeId>,
    carried: Option<ChoiceRegistry>,
    mut sink: F,
) -> (Option<NodeId>, ChoiceRegistry)
where
    F: FnMut(&Fragment),
{
    let mut menu = carried.unwrap_or_default();

    let last = traversal::traverse(doc, position, |node| {
        let render = render::classify(doc, node);

        if Some(node) == position {
            return matches!(render, Render::Collect(_) | Render::Alert(_));
        }

        match render {
            Render::Text { text, block } => {
                sink(&Fragment::Text { text, block });
                false
            }
            Render::Collect(entry) => {
                sink(&Fragment::Choice(entry.text.clone()));
                menu.push(entry);
                true
            }
            Render::Alert(message) => {
                sink(&Fragment::Alert(message));
                true
            }
            Render::Ignore => false,
        }
    });

    (last, menu)
}

/// Same as [`render_pass_with`] but collecting the output.
pub fn render_pass(
    doc: &Document,
    position: Option<NodeId>,
    carried: Option<ChoiceRegistry>,
) -> Pass {
    let mut output = PassOutput::default();

    let (position, menu) =
        render_pass_with(doc, position, carried, |f| output.push(f.clone()));

    Pass {
        output,
        position,
        menu,
    }
}

/// Computes the effect of selecting `menu[index]` and the choices to carry
/// to the next walk:
/// - a passage removes itself and keeps the rest,
/// - a section discards every choice,
/// - anything else asks to open its URL and keeps the menu as it was.
pub fn apply_selection(
    menu: &ChoiceRegistry,
    index: usize,
) -> Result<(Effect, Option<ChoiceRegistry>), StoryError> {
    let selected = menu
        .get(index)
        .ok_or_else(|| StoryError::BadArgument("choice out of range".to_owned()))?;

    Ok(match &selected.action {
        ActionKind::Passage(_) => {
            let mut carried = menu.clone();
            carried.remove_node(selected.node);
            (Effect::Continue, Some(carried))
        }
        ActionKind::Section(_) => (Effect::Continue, None),
        ActionKind::ExternalLink(href) => {
            (Effect::OpenResource(href.clone()), Some(menu.clone()))
        }
        ActionKind::None => (Effect::Continue, Some(menu.clone())),
    })
}

/// The state of one reading of a story.
#[derive(Debug)]
pub struct Session {
    position: Option<NodeId>,
    choices: Option<ChoiceRegistry>,
    phase: Phase,
}

impl Session {
    /// Creates a session that starts walking at `root`. The root itself is
    /// never output.
    pub fn new(root: NodeId) -> Session {
        Session {
            position: Some(root),
            choices: None,
            phase: Phase::Rendering,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> Option<NodeId> {
        self.position
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// The choices offered to the player, empty until the document has been
    /// walked.
    pub fn current_choices(&self) -> &[ChoiceEntry] {
        match (&self.phase, &self.choices) {
            (Phase::AwaitingChoice, Some(choices)) => choices.entries(),
            _ => &[],
        }
    }

    /// Walks the document from the current position, streaming the output to
    /// `sink`. Returns the choices to present; when there are none the
    /// session is ended.
    pub fn continue_story<F>(
        &mut self,
        doc: &Document,
        sink: F,
    ) -> Result<&[ChoiceEntry], StoryError>
    where
        F: FnMut(&Fragment),
    {
        if self.phase != Phase::Rendering {
            return Err(StoryError::InvalidStoryState(format!(
                "can't continue the story while {}",
                self.phase
            )));
        }

        let (last, menu) = render_pass_with(doc, self.position, self.choices.take(), sink);

        if last.is_some() {
            self.position = last;
        }

        tracing::debug!(
            position = ?self.position,
            choices = menu.len(),
            "pass finished"
        );

        self.phase = if menu.is_empty() {
            Phase::Ended
        } else {
            Phase::AwaitingChoice
        };
        self.choices = Some(menu);

        Ok(self.current_choices())
    }

    /// Activates the choice at `index` through `handler` and prepares the
    /// next walk.
    pub fn choose(
        &mut self,
        handler: &mut dyn ActionHandler,
        index: usize,
    ) -> Result<Effect, StoryError> {
        if self.phase != Phase::AwaitingChoice {
            return Err(StoryError::InvalidStoryState(format!(
                "can't choose while {}",
                self.phase
            )));
        }

        let menu = match self.choices.take() {
            Some(menu) if index < menu.len() => menu,
            other => {
                self.choices = other;
                return Err(StoryError::BadArgument("choice out of range".to_owned()));
            }
        };
        let selected = &menu.entries()[index];

        tracing::debug!(
            node = %selected.node,
            text = %selected.text,
            action = ?selected.action.action_type(),
            destination = selected.action.destination(),
            "choice selected"
        );

        if let Err(e) = handler.activate(selected.node, &selected.action) {
            self.choices = Some(menu);
            return Err(e);
        }

        let (effect, carried) = apply_selection(&menu, index)?;

        self.choices = carried;
        self.phase = Phase::Rendering;

        Ok(effect)
    }
}
