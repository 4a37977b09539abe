#![allow(dead_code)]

use std::{error::Error, fs, path::Path};

use squiffyrt::{story::Story, story_error::StoryError};

pub fn get_json_string(filename: &str) -> Result<String, Box<dyn Error>> {
    let mut path = Path::new(filename).to_path_buf();

    // Due to a bug with Cargo workspaces, for Release mode the current folder is the crate folder and for Debug mode the current folder is the root folder.
    if !path.exists() {
        path = Path::new("lib").join(path);
    }

    let json = fs::read_to_string(path)?;
    Ok(json)
}

pub fn load_story(filename: &str) -> Result<Story, StoryError> {
    let json = get_json_string(filename).unwrap();

    Story::new(&json)
}

pub fn choice_texts(story: &Story) -> Vec<String> {
    story
        .get_current_choices()
        .iter()
        .map(|c| c.text.clone())
        .collect()
}

/// Plays the story choosing the given indexes, returns all the text.
pub fn run_story(filename: &str, choice_list: &[usize]) -> Result<String, StoryError> {
    let mut story = load_story(filename)?;
    let mut text = String::new();
    let mut choices = choice_list.iter();

    loop {
        text.push_str(&story.cont()?);

        if story.is_ended() {
            break;
        }

        match choices.next() {
            Some(i) => {
                story.choose_choice_index(*i)?;
            }
            None => break,
        }
    }

    Ok(text)
}
