//! Parallax drift for decorative background shapes

/// Vertical offset of shape `index` (0-based) at the given scroll offset.
/// Each successive shape moves one `base_speed` step faster.
pub fn shape_offset(scroll: f32, index: usize, base_speed: f32) -> f32 {
    scroll * base_speed * (index as f32 + 1.0)
}

/// Offsets for `count` shapes, in shape order
pub fn shape_offsets(scroll: f32, count: usize, base_speed: f32) -> Vec<f32> {
    (0..count)
        .map(|i| shape_offset(scroll, i, base_speed))
        .collect()
}
