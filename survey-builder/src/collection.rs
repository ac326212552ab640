//! Operations over the ordered question list of a survey.
//!
//! Every operation takes the current list and returns a new one; the input
//! is never modified. Lookups of an id that is not in the list are silent
//! no-ops and return an unchanged copy.

use crate::{
    IdGenerator, ItemId, Question, QuestionKind, QuestionTypeId, QuestionTypeRegistry, SurveyError,
};

/// Position of the question with the given id.
pub fn position(questions: &[Question], id: ItemId) -> Option<usize> {
    questions.iter().position(|q| q.id() == id)
}

/// Append a blank question with a fresh id.
pub fn add_question(questions: &[Question], ids: &IdGenerator) -> Vec<Question> {
    append_question(questions, Question::new(ids.next_id()))
}

/// Append an already built question.
pub fn append_question(questions: &[Question], question: Question) -> Vec<Question> {
    log::debug!("adding question {}", question.id());
    let mut next = questions.to_vec();
    next.push(question);
    next
}

/// Insert a copy of the question right after the original.
///
/// The copy gets fresh ids for itself and all of its choices, and
/// `" (copy)"` is appended to its text.
pub fn duplicate_question(questions: &[Question], id: ItemId, ids: &IdGenerator) -> Vec<Question> {
    let Some(index) = position(questions, id) else {
        log::trace!("duplicate: no question {id}");
        return questions.to_vec();
    };
    let copy = questions[index].duplicate(ids);
    log::debug!("duplicating question {id} as {}", copy.id());
    let mut next = questions.to_vec();
    next.insert(index + 1, copy);
    next
}

/// Remove the question with the given id.
pub fn delete_question(questions: &[Question], id: ItemId) -> Vec<Question> {
    if position(questions, id).is_none() {
        log::trace!("delete: no question {id}");
        return questions.to_vec();
    }
    log::debug!("deleting question {id}");
    questions.iter().filter(|q| q.id() != id).cloned().collect()
}

/// Change a question's type.
///
/// Metadata is kept when the new type shares the old one's shape and reset
/// to the new type's defaults otherwise. An id the registry does not know
/// leaves the question without metadata.
pub fn update_question_type(
    questions: &[Question],
    id: ItemId,
    type_id: QuestionTypeId,
    registry: &QuestionTypeRegistry,
) -> Vec<Question> {
    update(questions, id, |question| {
        let name = registry.known_name_of(type_id);
        let kind = question.kind().clone().retyped(name);
        log::debug!("question {id} is now type {type_id} ({name:?})");
        question.with_type(type_id, kind)
    })
}

/// Change a question's prompt text.
pub fn update_question_text(questions: &[Question], id: ItemId, text: &str) -> Vec<Question> {
    update(questions, id, |question| question.with_text(text))
}

/// Mark a question as required or optional.
pub fn update_question_required(
    questions: &[Question],
    id: ItemId,
    required: bool,
) -> Vec<Question> {
    update(questions, id, |question| question.with_required(required))
}

/// Replace a question's metadata wholesale.
///
/// Callers merge the fields they did not touch into `kind` before calling.
/// `kind` must be the shape the registry assigns to the question's type;
/// anything else is rejected and the list is left as it was.
pub fn update_question_metadata(
    questions: &[Question],
    id: ItemId,
    kind: QuestionKind,
    registry: &QuestionTypeRegistry,
) -> Result<Vec<Question>, SurveyError> {
    if let Some(question) = questions.iter().find(|q| q.id() == id) {
        let expected = registry.known_name_of(question.type_id());
        let found = kind.type_name();
        if expected != found {
            log::debug!("question {id} is {expected:?}, refusing {found:?} metadata");
            return Err(SurveyError::MetadataMismatch { expected, found });
        }
    }
    Ok(update(questions, id, |question| question.with_kind(kind)))
}

/// Move the question at `from` so it ends up at `to`.
///
/// Equal indices and an out-of-range `from` leave the order unchanged; a
/// `to` past the end moves the question to the end. All other questions
/// keep their relative order.
pub fn move_question(questions: &[Question], from: usize, to: usize) -> Vec<Question> {
    if from == to || from >= questions.len() {
        return questions.to_vec();
    }
    let mut next = questions.to_vec();
    let question = next.remove(from);
    let to = to.min(next.len());
    log::debug!("moving question {} from {from} to {to}", question.id());
    next.insert(to, question);
    next
}

fn update(
    questions: &[Question],
    id: ItemId,
    change: impl FnOnce(Question) -> Question,
) -> Vec<Question> {
    let Some(index) = position(questions, id) else {
        log::trace!("update: no question {id}");
        return questions.to_vec();
    };
    let mut next = questions.to_vec();
    let question = next.remove(index);
    next.insert(index, change(question));
    next
}
