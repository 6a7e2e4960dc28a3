//! Presentation helpers for guide lists: search, grouping by family, and the
//! loading / error / empty / ready state a list view renders from.

use crate::models::Variety;

/// Bucket name for guides without a family.
pub const UNKNOWN_FAMILY: &str = "Unknown Family";

/// Case-insensitive substring match on the guide name.
///
/// A blank query returns every guide in its original order.
pub fn search<'a>(guides: &'a [Variety], query: &str) -> Vec<&'a Variety> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return guides.iter().collect();
    }
    guides
        .iter()
        .filter(|g| g.variety_name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct FamilyGroup {
    pub family_name: String,
    pub guides: Vec<Variety>,
}

/// Group guides by family name, groups and members both alphabetical.
pub fn group_by_family<'a>(guides: impl IntoIterator<Item = &'a Variety>) -> Vec<FamilyGroup> {
    let mut groups: Vec<FamilyGroup> = Vec::new();
    for guide in guides {
        let name = guide.family_name().unwrap_or(UNKNOWN_FAMILY);
        match groups.iter_mut().find(|g| g.family_name == name) {
            Some(group) => group.guides.push(guide.clone()),
            None => groups.push(FamilyGroup {
                family_name: name.to_string(),
                guides: vec![guide.clone()],
            }),
        }
    }
    groups.sort_by_key(|g| g.family_name.to_lowercase());
    for group in &mut groups {
        group.guides.sort_by_key(|g| g.variety_name.to_lowercase());
    }
    groups
}

/// Number of guides the user has marked active.
pub fn active_count(guides: &[Variety]) -> usize {
    guides.iter().filter(|g| g.is_active).count()
}

/// What a list view should render.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<T> {
    Loading,
    Error(String),
    Empty,
    Ready(Vec<T>),
}

impl<T> ListState<T> {
    /// An empty successful response is `Empty`, never `Error`.
    pub fn from_result(result: Result<Vec<T>, String>) -> Self {
        match result {
            Ok(items) if items.is_empty() => ListState::Empty,
            Ok(items) => ListState::Ready(items),
            Err(message) => ListState::Error(message),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListState::Ready(items) => items,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::guide;

    fn names(guides: &[&Variety]) -> Vec<String> {
        guides.iter().map(|g| g.variety_name.clone()).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let guides = vec![
            guide("1", "Spring Onions", Some("Allium")),
            guide("2", "Heirloom Carrots", Some("Apiaceae")),
        ];
        assert_eq!(names(&search(&guides, "Spring")), vec!["Spring Onions"]);
        assert_eq!(names(&search(&guides, "carr")), vec!["Heirloom Carrots"]);
        assert!(search(&guides, "tomato").is_empty());
    }

    #[test]
    fn clearing_search_restores_all() {
        let guides = vec![
            guide("1", "Spring Onions", Some("Allium")),
            guide("2", "Heirloom Carrots", Some("Apiaceae")),
        ];
        assert_eq!(search(&guides, "").len(), 2);
        assert_eq!(search(&guides, "   ").len(), 2);
    }

    #[test]
    fn groups_sorted_by_family_then_name() {
        let guides = vec![
            guide("1", "Courgette", Some("Cucurbitaceae")),
            guide("2", "Spring Onions", Some("Allium")),
            guide("3", "Leeks", Some("Allium")),
            guide("4", "Butternut Squash", Some("Cucurbitaceae")),
        ];
        let groups = group_by_family(&guides);
        let families: Vec<_> = groups.iter().map(|g| g.family_name.as_str()).collect();
        assert_eq!(families, vec!["Allium", "Cucurbitaceae"]);

        let allium: Vec<_> = groups[0].guides.iter().map(|g| g.variety_name.as_str()).collect();
        assert_eq!(allium, vec!["Leeks", "Spring Onions"]);
        let cucurbits: Vec<_> = groups[1].guides.iter().map(|g| g.variety_name.as_str()).collect();
        assert_eq!(cucurbits, vec!["Butternut Squash", "Courgette"]);
    }

    #[test]
    fn guides_without_family_land_in_unknown_bucket() {
        let guides = vec![
            guide("1", "Mystery Bean", None),
            guide("2", "Spring Onions", Some("Allium")),
        ];
        let groups = group_by_family(&guides);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].family_name, UNKNOWN_FAMILY);
        assert_eq!(groups[1].guides[0].variety_name, "Mystery Bean");
    }

    #[test]
    fn grouping_filtered_guides() {
        let guides = vec![
            guide("1", "Spring Onions", Some("Allium")),
            guide("2", "Courgette", Some("Cucurbitaceae")),
        ];
        let groups = group_by_family(search(&guides, "courg"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].family_name, "Cucurbitaceae");
    }

    #[test]
    fn active_count_allows_multiple() {
        let mut guides = vec![
            guide("1", "Spring Onions", Some("Allium")),
            guide("2", "Courgette", Some("Cucurbitaceae")),
            guide("3", "Leeks", Some("Allium")),
        ];
        guides[0].is_active = true;
        guides[2].is_active = true;
        assert_eq!(active_count(&guides), 2);
    }

    #[test]
    fn empty_response_is_empty_state_not_error() {
        let state = ListState::<Variety>::from_result(Ok(vec![]));
        assert_eq!(state, ListState::Empty);
        assert!(state.error().is_none());

        let failed = ListState::<Variety>::from_result(Err("Failed to fetch".into()));
        assert_eq!(failed.error(), Some("Failed to fetch"));
        assert_ne!(failed, ListState::Empty);
    }
}
