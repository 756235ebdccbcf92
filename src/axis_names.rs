// src/axis_names.rs
//
// Spatial axis naming shared by the marker samples, the HTR columns and the CSV exporters.

/// Number of spatial axes carried by a marker sample or a sign-correction vector.
pub const AXIS_COUNT: usize = 3;

/// Get the axis name for a given index
///
/// # Arguments
/// * `index` - Axis index (0=X, 1=Y, 2=Z)
///
/// # Panics
/// Panics if index is greater than 2
pub fn axis_name(index: usize) -> &'static str {
    match index {
        0 => "X",
        1 => "Y",
        2 => "Z",
        _ => panic!(
            "Invalid axis index: {}. Expected 0 (X), 1 (Y), or 2 (Z)",
            index
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_name() {
        assert_eq!(axis_name(0), "X");
        assert_eq!(axis_name(1), "Y");
        assert_eq!(axis_name(2), "Z");
    }

    #[test]
    #[should_panic(expected = "Invalid axis index")]
    fn test_axis_name_panic() {
        axis_name(3);
    }

    #[test]
    fn test_axis_count_matches_names() {
        let names: Vec<&str> = (0..AXIS_COUNT).map(axis_name).collect();
        assert_eq!(names, ["X", "Y", "Z"]);
    }
}
