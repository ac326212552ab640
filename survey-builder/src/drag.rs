use crate::Question;
use crate::collection::move_question;

/// Tracks a pointer-drag gesture across the question list.
///
/// A committed drop always relocates exactly one question (remove, then
/// insert); it never swaps two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragReorder {
    dragged_index: Option<usize>,
    drag_over_index: Option<usize>,
}

impl DragReorder {
    /// Create a controller with no gesture in progress.
    pub const fn new() -> Self {
        Self {
            dragged_index: None,
            drag_over_index: None,
        }
    }

    /// Index of the question being dragged.
    pub fn dragged_index(&self) -> Option<usize> {
        self.dragged_index
    }

    /// Index of the question currently hovered as a drop target.
    pub fn drag_over_index(&self) -> Option<usize> {
        self.drag_over_index
    }

    /// Check if a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragged_index.is_some()
    }

    /// The pointer picked up the question at `index`.
    pub fn drag_start(&mut self, index: usize) {
        self.dragged_index = Some(index);
        self.drag_over_index = None;
    }

    /// The pointer hovers over the question at `index`.
    ///
    /// Hovering over the dragged question itself clears the highlight.
    /// Ignored when no gesture is in progress.
    pub fn drag_over(&mut self, index: usize) {
        if self.dragged_index.is_none() {
            return;
        }
        self.drag_over_index = (self.dragged_index != Some(index)).then_some(index);
    }

    /// The pointer released over the question at `index`.
    ///
    /// Returns the reordered list, or `None` when nothing moves: no gesture
    /// in progress, a drop onto the origin, or an index outside `questions`.
    /// A successful drop ends the gesture.
    pub fn drop_on(&mut self, index: usize, questions: &[Question]) -> Option<Vec<Question>> {
        let from = self.dragged_index?;
        if from == index || from >= questions.len() || index >= questions.len() {
            return None;
        }
        let reordered = move_question(questions, from, index);
        self.clear();
        Some(reordered)
    }

    /// The gesture ended, dropped or cancelled.
    pub fn drag_end(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.dragged_index = None;
        self.drag_over_index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdGenerator, ItemId};

    fn questions(n: u64) -> Vec<Question> {
        let ids = IdGenerator::new();
        (0..n)
            .map(|i| Question::new(ids.next_id()).with_text(format!("q{i}")))
            .collect()
    }

    fn order(questions: &[Question]) -> Vec<ItemId> {
        questions.iter().map(Question::id).collect()
    }

    #[test]
    fn hovering_the_origin_clears_the_highlight() {
        let mut drag = DragReorder::new();
        drag.drag_start(1);
        drag.drag_over(2);
        assert_eq!(drag.drag_over_index(), Some(2));
        drag.drag_over(1);
        assert_eq!(drag.drag_over_index(), None);
    }

    #[test]
    fn hovering_without_a_gesture_highlights_nothing() {
        let mut drag = DragReorder::new();
        drag.drag_over(2);
        assert_eq!(drag.drag_over_index(), None);
        assert_eq!(drag, DragReorder::new());
    }

    #[test]
    fn drop_relocates_and_resets() {
        let list = questions(4);
        let mut drag = DragReorder::new();
        drag.drag_start(3);
        drag.drag_over(0);

        let reordered = drag.drop_on(0, &list).unwrap();
        assert_eq!(
            order(&reordered),
            [list[3].id(), list[0].id(), list[1].id(), list[2].id()]
        );
        assert_eq!(drag, DragReorder::new());
    }

    #[test]
    fn drop_without_gesture_or_on_origin_does_nothing() {
        let list = questions(3);
        let mut drag = DragReorder::new();
        assert!(drag.drop_on(1, &list).is_none());

        drag.drag_start(1);
        assert!(drag.drop_on(1, &list).is_none());
        assert!(drag.is_dragging());
    }

    #[test]
    fn drop_outside_the_list_does_nothing() {
        let list = questions(3);
        let mut drag = DragReorder::new();
        drag.drag_start(0);
        assert!(drag.drop_on(9, &list).is_none());
    }

    #[test]
    fn drag_end_cancels() {
        let mut drag = DragReorder::new();
        drag.drag_start(2);
        drag.drag_over(0);
        drag.drag_end();
        assert!(!drag.is_dragging());
        assert_eq!(drag.drag_over_index(), None);
    }
}
