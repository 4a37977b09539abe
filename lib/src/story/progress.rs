use crate::{
    choice::ChoiceEntry,
    render::Fragment,
    session::{Effect, Phase},
    story::Story,
    story_error::StoryError,
};

/// # Story Progress
/// Methods to move the story forwards.
impl Story {
    /// `true` if the story is not waiting for the player to choose and has
    /// not ended.
    pub fn can_continue(&self) -> bool {
        self.session.phase() == Phase::Rendering
    }

    /// `true` once a walk found no choices left.
    pub fn is_ended(&self) -> bool {
        self.session.is_ended()
    }

    /// Walks the new content of the story passing each piece of output to
    /// `sink` as it's found. Returns the choices the player can select.
    pub fn cont_with<F>(&mut self, sink: F) -> Result<&[ChoiceEntry], StoryError>
    where
        F: FnMut(&Fragment),
    {
        self.session.continue_story(&self.content.document, sink)
    }

    /// Walks the new content of the story and returns its text. Block text
    /// is surrounded by newlines and alerts are boxed; link labels are not
    /// included.
    pub fn cont(&mut self) -> Result<String, StoryError> {
        let mut sb = String::new();

        self.cont_with(|f| {
            if !matches!(f, Fragment::Choice(_)) {
                sb.push_str(&f.to_plain_string());
            }
        })?;

        Ok(sb)
    }

    /// The choices found by the last walk, in document order.
    pub fn get_current_choices(&self) -> &[ChoiceEntry] {
        self.session.current_choices()
    }

    /// Selects the choice with the given index from
    /// [`get_current_choices`](Story::get_current_choices), adding its
    /// section or passage to the story. The returned [`Effect`] tells if an
    /// external resource must be opened.
    pub fn choose_choice_index(&mut self, choice_index: usize) -> Result<Effect, StoryError> {
        self.session.choose(&mut self.content, choice_index).map_err(|e| {
            tracing::warn!("choice {} failed: {}", choice_index, e.get_message());
            e
        })
    }
}
