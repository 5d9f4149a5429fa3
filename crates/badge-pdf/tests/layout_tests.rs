use badge_pdf::{
    BadgeError, PdfOffset, SheetLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};

const BADGE_W: f32 = 75.0;
const BADGE_H: f32 = 30.0;

#[test]
fn default_badge_grid_is_two_by_six() {
    let layout = SheetLayout::plan(BADGE_W, BADGE_H, 100).unwrap();
    assert_eq!(layout.columns, 2);
    assert_eq!(layout.capacity, 12);
}

#[test]
fn placed_count_is_min_of_rows_and_capacity() {
    let small = SheetLayout::plan(BADGE_W, BADGE_H, 5).unwrap();
    assert_eq!(small.slots.len(), 5);

    let overflow = SheetLayout::plan(BADGE_W, BADGE_H, 40).unwrap();
    assert_eq!(overflow.slots.len(), overflow.capacity);
}

#[test]
fn slots_run_left_to_right_then_top_to_bottom() {
    let layout = SheetLayout::plan(BADGE_W, BADGE_H, 4).unwrap();
    let slots = &layout.slots;

    assert_eq!(slots[0].y_mm, slots[1].y_mm);
    assert!(slots[1].x_mm > slots[0].x_mm);
    assert!(slots[2].y_mm < slots[0].y_mm);
    assert_eq!(slots[2].x_mm, slots[0].x_mm);
}

#[test]
fn full_grid_is_centered_on_the_page() {
    let layout = SheetLayout::plan(BADGE_W, BADGE_H, 12).unwrap();

    let min_x = layout.slots.iter().map(|s| s.x_mm).fold(f32::MAX, f32::min);
    let max_x = layout
        .slots
        .iter()
        .map(|s| s.x_mm + BADGE_W)
        .fold(f32::MIN, f32::max);
    assert!((min_x + max_x - PAGE_WIDTH_MM).abs() < 1e-3);

    let min_y = layout.slots.iter().map(|s| s.y_mm).fold(f32::MAX, f32::min);
    let max_y = layout
        .slots
        .iter()
        .map(|s| s.y_mm + BADGE_H)
        .fold(f32::MIN, f32::max);
    assert!((min_y + max_y - PAGE_HEIGHT_MM).abs() < 1e-3);
}

#[test]
fn planning_is_deterministic() {
    let a = SheetLayout::plan(BADGE_W, BADGE_H, 7).unwrap();
    let b = SheetLayout::plan(BADGE_W, BADGE_H, 7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn pdf_offset_translates_slots_only() {
    let layout = SheetLayout::plan(BADGE_W, BADGE_H, 6).unwrap();
    let offset = PdfOffset {
        x_offset: 1.25,
        y_offset: -0.75,
    };

    for slot in &layout.slots {
        let moved = slot.offset_by(&offset);
        assert!((moved.x_mm - slot.x_mm - 1.25).abs() < 1e-6);
        assert!((moved.y_mm - slot.y_mm + 0.75).abs() < 1e-6);
    }

    // registration marks and badge centers don't move with the offset
    assert_eq!(
        SheetLayout::registration_marks(),
        [[105.0, 287.0], [35.0, 10.0], [175.0, 10.0]]
    );
    let centers = layout.centers();
    assert_eq!(centers.len(), 6);
    assert!((centers[0][0] - layout.slots[0].x_mm - BADGE_W / 2.0).abs() < 1e-6);
}

#[test]
fn oversized_badge_is_rejected() {
    let result = SheetLayout::plan(200.0, 30.0, 1);
    assert!(matches!(result, Err(BadgeError::Layout(_))));

    let result = SheetLayout::plan(75.0, 260.0, 1);
    assert!(matches!(result, Err(BadgeError::Layout(_))));
}

#[test]
fn single_column_layout_still_plans() {
    // a badge wider than half the usable width forces one column
    let layout = SheetLayout::plan(120.0, 40.0, 3).unwrap();
    assert_eq!(layout.columns, 1);
    assert_eq!(layout.slots.len(), 3);
    for pair in layout.slots.windows(2) {
        assert!(pair[1].y_mm < pair[0].y_mm);
    }
}
