use squiffyrt::{session::Effect, story::DISABLED_CLASS, story_error::StoryError};

mod common;

#[test]
fn passage_removes_only_itself_test() -> Result<(), StoryError> {
    let mut story = common::load_story("tests/data/hello.json")?;
    story.cont()?;

    let north = story.get_current_choices()[0].node;
    assert_eq!(Effect::Continue, story.choose_choice_index(0)?);
    assert!(story
        .get_document()
        .get(north)
        .has_class(DISABLED_CLASS));

    assert_eq!("\nCold wind.\n", story.cont()?);
    assert_eq!(vec!["Go south"], common::choice_texts(&story));
    assert!(story.seen("north"));
    assert!(!story.seen("south"));

    story.choose_choice_index(0)?;
    assert_eq!("\nWarm sand.\n", story.cont()?);
    assert!(story.is_ended());

    Ok(())
}

#[test]
fn last_passage_test() -> Result<(), StoryError> {
    let mut story = common::load_story("tests/data/cave.json")?;

    assert_eq!(
        "\nThe Cave\n\nIt is dark. You could light the \n\n or tie the \n\n.\n",
        story.cont()?
    );
    assert_eq!(vec!["torch", "rope"], common::choice_texts(&story));

    story.choose_choice_index(0)?;
    assert_eq!("\nThe walls glitter.\n", story.cont()?);
    assert_eq!(vec!["rope"], common::choice_texts(&story));
    assert!(!story.seen("@last"));

    story.choose_choice_index(0)?;
    assert_eq!("\nThe rope holds.\n\nYou can \n\n.\n", story.cont()?);
    assert_eq!(vec!["climb down"], common::choice_texts(&story));
    assert!(story.seen("@last"));

    Ok(())
}

#[test]
fn section_clears_choices_test() -> Result<(), StoryError> {
    let mut story = common::load_story("tests/data/cave.json")?;
    story.cont()?;
    story.choose_choice_index(0)?;
    story.cont()?;
    story.choose_choice_index(0)?;
    story.cont()?;

    let climb = story.get_current_choices()[0].node;
    story.choose_choice_index(0)?;

    assert_eq!(Some("deeper"), story.get_current_section());
    assert_eq!("\nA map is carved in the rock.\n", story.cont()?);
    assert_eq!(vec!["Look at the map", "Leave"], common::choice_texts(&story));
    assert!(story.get_document().get(climb).has_class(DISABLED_CLASS));

    Ok(())
}

#[test]
fn external_link_keeps_choices_test() -> Result<(), StoryError> {
    let mut story = common::load_story("tests/data/cave.json")?;
    for _ in 0..3 {
        story.cont()?;
        story.choose_choice_index(0)?;
    }
    story.cont()?;
    let before = story.get_current_choices().to_vec();

    let effect = story.choose_choice_index(0)?;
    assert_eq!(
        Effect::OpenResource("https://example.com/map".to_owned()),
        effect
    );

    assert_eq!("", story.cont()?);
    assert_eq!(before, story.get_current_choices());

    story.choose_choice_index(1)?;
    assert_eq!("\nYou are out.\n", story.cont()?);
    assert!(story.is_ended());
    assert!(story.seen("end"));

    Ok(())
}

#[test]
fn full_run_test() -> Result<(), StoryError> {
    let text = common::run_story("tests/data/cave.json", &[1, 0, 0, 1])?;

    assert!(text.starts_with("\nThe Cave\n"));
    assert!(text.contains("The rope holds."));
    assert!(text.contains("The walls glitter."));
    assert!(text.ends_with("\nYou are out.\n"));

    Ok(())
}

#[test]
fn choice_out_of_range_test() -> Result<(), StoryError> {
    let mut story = common::load_story("tests/data/hello.json")?;
    story.cont()?;

    assert!(matches!(
        story.choose_choice_index(2),
        Err(StoryError::BadArgument(_))
    ));
    assert_eq!(2, story.get_current_choices().len());

    Ok(())
}
