//! Tests for the editing session: declaration in, key presses, form out.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod tests {
    use std::collections::HashMap;

    use dimtable::declaration::TableDeclaration;
    use dimtable::editor::{EditSession, InputConfig, InputSpec, TextInputFactory};
    use dimtable::DimtableError;

    // ================================================================
    // Test helpers
    // ================================================================

    /// Hidden fields as the host page publishes them for a 2 x 3 table.
    fn hidden_fields() -> HashMap<String, String> {
        [
            ("table_rdim_dimN", "1"),
            ("table_rdim_length_0", "2"),
            ("table_cdim_dimN", "1"),
            ("table_cdim_length_0", "3"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Session for the 2 x 3 table with the first column read-only,
    /// like a column of row labels.
    fn session_with_label_column() -> EditSession {
        let fields = hidden_fields();
        let decl = TableDeclaration::from_fields("table", |n| fields.get(n).cloned()).unwrap();
        let mut session = EditSession::new(&decl).unwrap();
        session.set_editable(0, false).unwrap();
        session.set_editable(3, false).unwrap();
        session
    }

    // ================================================================
    // Navigation through the session
    // ================================================================

    #[test]
    fn test_tab_skips_label_cells() {
        let mut s = session_with_label_column();
        s.open(2).unwrap();
        let outcome = s.handle_key("Tab", false).unwrap();
        assert!(outcome.consumed);
        assert_eq!(outcome.target, Some(4));
        assert_eq!(outcome.input.unwrap().name, "table_cell_4");
    }

    #[test]
    fn test_shift_tab_skips_label_cells() {
        let mut s = session_with_label_column();
        s.open(4).unwrap();
        let outcome = s.handle_key("Tab", true).unwrap();
        assert_eq!(outcome.target, Some(2));
    }

    #[test]
    fn test_left_into_label_column_stops_at_edge() {
        let mut s = session_with_label_column();
        s.open(1).unwrap();
        let outcome = s.handle_key("ArrowLeft", false).unwrap();
        assert!(outcome.consumed);
        assert_eq!(outcome.target, None);
        assert_eq!(s.focused(), Some(1));
    }

    #[test]
    fn test_returning_to_open_cell_does_not_recreate_field() {
        let mut s = session_with_label_column();
        s.open(1).unwrap();
        assert!(s.handle_key("ArrowRight", false).unwrap().input.is_some());
        let back = s.handle_key("ArrowLeft", false).unwrap();
        assert_eq!(back.target, Some(1));
        assert!(back.input.is_none());
    }

    #[test]
    fn test_handle_key_at_rejects_foreign_cell() {
        let mut s = session_with_label_column();
        assert!(matches!(
            s.handle_key_at(42, "ArrowUp", false),
            Err(DimtableError::IndexOutOfRange { index: 42, .. })
        ));
    }

    // ================================================================
    // Inputs and form submission
    // ================================================================

    #[test]
    fn test_configured_input_size() {
        let decl = TableDeclaration::new(vec![2], vec![3]);
        let factory = TextInputFactory::new(InputConfig {
            size: 5,
            max_length: 6,
        });
        let mut s = EditSession::with_factory(&decl, Box::new(factory)).unwrap();
        let input = s.open(0).unwrap().unwrap();
        assert_eq!((input.size, input.max_length), (5, 6));
    }

    #[test]
    fn test_closure_factory() {
        let decl = TableDeclaration::new(vec![1], vec![2]);
        let factory = |value: &str, name: &str| InputSpec {
            value: value.to_uppercase(),
            name: name.to_string(),
            size: 10,
            max_length: 10,
            class: "detect-keys wide".to_string(),
        };
        let mut s = EditSession::with_factory(&decl, Box::new(factory)).unwrap();
        s.set_value(1, "abc").unwrap();
        let input = s.open(1).unwrap().unwrap();
        assert_eq!(input.value, "ABC");
        assert_eq!(input.name, "table_cell_1");
    }

    #[test]
    fn test_form_fields_after_editing() {
        let mut s = session_with_label_column();
        s.set_value(1, "7").unwrap();
        s.open(1).unwrap();
        s.handle_key("ArrowDown", false).unwrap();
        s.set_value(4, "9").unwrap();

        assert_eq!(
            s.form_fields(),
            vec![
                ("table_cell_1".to_string(), "7".to_string()),
                ("table_cell_4".to_string(), "9".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_declaration() {
        let decl = TableDeclaration::new(vec![2, 0], vec![3]);
        assert!(matches!(
            EditSession::new(&decl),
            Err(DimtableError::MalformedSpec(_))
        ));
    }
}
