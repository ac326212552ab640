//! Operations over the options, rows and columns of a question's metadata.
//!
//! Like the question-list operations these return new metadata and leave
//! their input alone. Targeting a list the question kind does not carry
//! (options of a grid, rows of a dropdown) is a no-op.

use crate::{Choice, IdGenerator, ItemId, OptionList, QuestionKind, SurveyError};

/// Append an entry labelled `"<label> <n+1>"`, where `n` is the current length.
pub fn add_option(
    kind: &QuestionKind,
    list: OptionList,
    label: &str,
    ids: &IdGenerator,
) -> QuestionKind {
    let mut next = kind.clone();
    match next.choice_list_mut(list) {
        Some(choices) => {
            let text = format!("{label} {}", choices.len() + 1);
            choices.push(Choice::new(ids.next_id(), text));
        }
        None => log::trace!("add: question kind has no {list}"),
    }
    next
}

/// Insert a copy of an entry right after it, with a fresh id and `" (copy)"` appended.
pub fn duplicate_option(
    kind: &QuestionKind,
    option: ItemId,
    list: OptionList,
    ids: &IdGenerator,
) -> QuestionKind {
    let mut next = kind.clone();
    let Some(choices) = next.choice_list_mut(list) else {
        log::trace!("duplicate: question kind has no {list}");
        return next;
    };
    let Some(index) = choices.position(option) else {
        log::trace!("duplicate: no entry {option} in {list}");
        return next;
    };
    let copy = Choice::new(
        ids.next_id(),
        format!("{} (copy)", choices.as_slice()[index].text),
    );
    choices.insert(index + 1, copy);
    next
}

/// Remove an entry.
///
/// A list never becomes empty through this call: removing its only entry
/// fails with [`SurveyError::LastOption`]. A missing id is a no-op.
pub fn remove_option(
    kind: &QuestionKind,
    option: ItemId,
    list: OptionList,
) -> Result<QuestionKind, SurveyError> {
    let mut next = kind.clone();
    let Some(choices) = next.choice_list_mut(list) else {
        log::trace!("remove: question kind has no {list}");
        return Ok(next);
    };
    if choices.position(option).is_none() {
        log::trace!("remove: no entry {option} in {list}");
        return Ok(next);
    }
    if choices.len() == 1 {
        return Err(SurveyError::LastOption { list });
    }
    choices.remove(option);
    Ok(next)
}

/// Change the text of an entry.
pub fn update_option_text(
    kind: &QuestionKind,
    option: ItemId,
    text: &str,
    list: OptionList,
) -> QuestionKind {
    let mut next = kind.clone();
    match next
        .choice_list_mut(list)
        .and_then(|choices| choices.get_mut(option))
    {
        Some(choice) => choice.text = text.to_string(),
        None => log::trace!("update: no entry {option} in {list}"),
    }
    next
}

/// Move the entry at `from` so it ends up at `to`.
///
/// Equal or out-of-range indices leave the order unchanged.
pub fn move_option(kind: &QuestionKind, list: OptionList, from: usize, to: usize) -> QuestionKind {
    let mut next = kind.clone();
    if let Some(choices) = next.choice_list_mut(list) {
        choices.relocate(from, to);
    }
    next
}
