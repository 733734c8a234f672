use serde::Serialize;

use crate::catalog::Catalog;
use crate::render::view::Selection;

/// One entry of the role multi-select.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleOption {
    pub name: String,
    pub selected: bool,
}

/// Options in document order; the first one starts selected.
pub fn role_options(catalog: &Catalog) -> Vec<RoleOption> {
    catalog
        .role_names()
        .enumerate()
        .map(|(i, name)| RoleOption {
            name: name.to_string(),
            selected: i == 0,
        })
        .collect()
}

/// The selection the page opens with: the first role, if any.
pub fn default_selection(catalog: &Catalog) -> Selection {
    Selection::new(catalog.role_names().take(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;

    #[test]
    fn test_options_follow_document_order() {
        let options = role_options(&sample_catalog());
        let names: Vec<_> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_only_first_option_selected() {
        let options = role_options(&sample_catalog());
        let selected: Vec<_> = options.iter().map(|o| o.selected).collect();
        assert_eq!(selected, vec![true, false, false]);
        assert_eq!(default_selection(&sample_catalog()).roles(), ["A"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(role_options(&catalog).is_empty());
        assert!(default_selection(&catalog).is_empty());
    }
}
