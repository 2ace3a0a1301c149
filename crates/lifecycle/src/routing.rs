//! Category → department routing.
//!
//! A static, exact-match lookup.  Unknown categories fall through to the
//! catch-all administration bucket.  The routing decision made at report
//! creation is logged, not persisted; persistent assignment happens through
//! the explicit assign-department operation.

/// Department that handles reports of unrecognised categories.
pub const DEFAULT_DEPARTMENT: &str = "General Administration";

/// Resolve the department responsible for a report category.
pub fn department_for(category: &str) -> &'static str {
    match category {
        "Pothole" => "Roads & Bridges",
        "Garbage" => "Sanitation",
        "Street Light" => "Electrical",
        "Water Leak" => "Water Supply",
        _ => DEFAULT_DEPARTMENT,
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_route_to_their_departments() {
        assert_eq!(department_for("Pothole"), "Roads & Bridges");
        assert_eq!(department_for("Garbage"), "Sanitation");
        assert_eq!(department_for("Street Light"), "Electrical");
        assert_eq!(department_for("Water Leak"), "Water Supply");
    }

    #[test]
    fn unknown_category_falls_back_to_general_administration() {
        assert_eq!(department_for("Stray Cattle"), DEFAULT_DEPARTMENT);
        assert_eq!(department_for(""), DEFAULT_DEPARTMENT);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        // Clients send canonical category names; "pothole" is not one of them.
        assert_eq!(department_for("pothole"), DEFAULT_DEPARTMENT);
    }
}
