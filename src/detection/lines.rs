use crate::models::{ReadError, Rect};

/// Partitions digit boxes into horizontal reading lines.
///
/// Boxes are walked top to bottom; a box joins the current line while its top
/// edge starts above the line anchor plus the box's own height, which lets a
/// mildly tilted row still cluster together. When a box falls outside that
/// band the current line is finalized left-to-right and the anchor resets to
/// the new box. The final partial line is always emitted.
pub fn group_into_lines(mut boxes: Vec<Rect>) -> Result<Vec<Vec<Rect>>, ReadError> {
    boxes.sort_by_key(|bounds| bounds.y);
    let mut anchor_y = boxes.first().ok_or(ReadError::SortFailure)?.y;

    let mut grouped: Vec<Vec<Rect>> = Vec::new();
    let mut current: Vec<Rect> = Vec::new();
    for bounds in boxes {
        if bounds.y < anchor_y + bounds.height {
            current.push(bounds);
        } else {
            current.sort_by_key(|member| member.x);
            grouped.push(current);
            current = vec![bounds];
            anchor_y = bounds.y;
        }
    }
    current.sort_by_key(|member| member.x);
    grouped.push(current);

    Ok(grouped)
}
