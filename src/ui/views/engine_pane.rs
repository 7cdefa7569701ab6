//! Engine suggestion lines in the footer.

use crate::ui::view_models::Frame;

pub fn engine_lines(frame: &Frame) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(suggestion) = &frame.suggestion {
        lines.push(suggestion.clone());
    }
    if let Some(evaluation) = &frame.evaluation {
        lines.push(evaluation.clone());
    }
    lines
}
