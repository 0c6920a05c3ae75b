//! Entity-specific list filters and the staged filter panel

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::models::{Availability, OrderStatus};

/// Value of a single filter entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Single(String),
    Multi(BTreeSet<String>),
    Flag(bool),
    Range { min: Option<i64>, max: Option<i64> },
}

impl FilterValue {
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::Multi(values.into_iter().map(Into::into).collect())
    }

    /// A value that selects nothing is the same as no filter
    pub fn is_unset(&self) -> bool {
        match self {
            FilterValue::Single(v) => v.trim().is_empty(),
            FilterValue::Multi(values) => values.is_empty(),
            FilterValue::Flag(_) => false,
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
        }
    }
}

/// Filter name to value, in the order filters were first set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(IndexMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace one entry; unset values remove it
    pub fn set(&mut self, name: impl Into<String>, value: FilterValue) {
        let name = name.into();
        if value.is_unset() {
            self.0.shift_remove(&name);
        } else {
            self.0.insert(name, value);
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<FilterValue> {
        self.0.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Query string pairs: multi values repeat the name, ranges expand to
    /// `{name}Min` / `{name}Max`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in &self.0 {
            match value {
                FilterValue::Single(v) => pairs.push((name.clone(), v.clone())),
                FilterValue::Multi(values) => {
                    pairs.extend(values.iter().map(|v| (name.clone(), v.clone())))
                }
                FilterValue::Flag(b) => pairs.push((name.clone(), b.to_string())),
                FilterValue::Range { min, max } => {
                    if let Some(min) = min {
                        pairs.push((format!("{}Min", name), min.to_string()));
                    }
                    if let Some(max) = max {
                        pairs.push((format!("{}Max", name), max.to_string()));
                    }
                }
            }
        }
        pairs
    }
}

/// Filter edits held until the user confirms them.
///
/// Only the staged copy lives here; the applied set belongs to the query
/// and is passed in when committing or rolling back.
#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    staged: Filters,
}

impl FilterPanel {
    pub fn new(applied: &Filters) -> Self {
        Self {
            staged: applied.clone(),
        }
    }

    pub fn stage(&mut self, name: impl Into<String>, value: FilterValue) {
        self.staged.set(name, value);
    }

    pub fn unstage(&mut self, name: &str) {
        self.staged.remove(name);
    }

    /// Commit staged edits into `applied`; returns whether it changed
    pub fn apply(&self, applied: &mut Filters) -> bool {
        let changed = *applied != self.staged;
        *applied = self.staged.clone();
        changed
    }

    /// Drop staged edits, showing `applied` again
    pub fn rollback(&mut self, applied: &Filters) {
        self.staged = applied.clone();
    }

    pub fn clear(&mut self) {
        self.staged.clear();
    }

    pub fn staged(&self) -> &Filters {
        &self.staged
    }

    pub fn is_dirty(&self, applied: &Filters) -> bool {
        *applied != self.staged
    }
}

// ---------------------------------------------------------------------------
// Entity presets
// ---------------------------------------------------------------------------

/// Filters offered by the books list
#[derive(Debug, Clone, Default)]
pub struct BookFilters {
    pub language_ids: Vec<String>,
    pub category_ids: Vec<String>,
    pub availability: Option<Availability>,
    pub kabat_number: Option<String>,
    pub pages: (Option<i64>, Option<i64>),
    pub year: (Option<i64>, Option<i64>),
}

impl BookFilters {
    pub const LANGUAGE_IDS: &'static str = "languageIds";
    pub const CATEGORY_IDS: &'static str = "categoryIds";
    pub const AVAILABILITY: &'static str = "availability";
    pub const KABAT_NUMBER: &'static str = "kabatNumber";
    pub const PAGES: &'static str = "pages";
    pub const YEAR: &'static str = "year";
}

impl From<BookFilters> for Filters {
    fn from(f: BookFilters) -> Self {
        Filters::new()
            .with(BookFilters::LANGUAGE_IDS, FilterValue::multi(f.language_ids))
            .with(BookFilters::CATEGORY_IDS, FilterValue::multi(f.category_ids))
            .with(
                BookFilters::AVAILABILITY,
                FilterValue::Single(f.availability.map(|a| a.as_str().to_string()).unwrap_or_default()),
            )
            .with(BookFilters::KABAT_NUMBER, FilterValue::Single(f.kabat_number.unwrap_or_default()))
            .with(BookFilters::PAGES, FilterValue::Range { min: f.pages.0, max: f.pages.1 })
            .with(BookFilters::YEAR, FilterValue::Range { min: f.year.0, max: f.year.1 })
    }
}

/// Filters offered by the orders list
#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    pub statuses: Vec<OrderStatus>,
    pub cities: Vec<String>,
    pub states: Vec<String>,
}

impl OrderFilters {
    pub const STATUS: &'static str = "status";
    pub const CITY: &'static str = "city";
    pub const STATE: &'static str = "state";
}

impl From<OrderFilters> for Filters {
    fn from(f: OrderFilters) -> Self {
        Filters::new()
            .with(
                OrderFilters::STATUS,
                FilterValue::multi(f.statuses.iter().map(|s| s.as_str().to_string())),
            )
            .with(OrderFilters::CITY, FilterValue::multi(f.cities))
            .with(OrderFilters::STATE, FilterValue::multi(f.states))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let filters = Filters::new()
            .with("status", FilterValue::multi(["shipped", "pending"]))
            .with("inStock", FilterValue::Flag(false))
            .with("pages", FilterValue::Range { min: Some(100), max: None });

        assert_eq!(
            filters.to_query_pairs(),
            vec![
                ("status".to_string(), "pending".to_string()),
                ("status".to_string(), "shipped".to_string()),
                ("inStock".to_string(), "false".to_string()),
                ("pagesMin".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_unset_values_remove_entry() {
        let mut filters = Filters::new().with("city", FilterValue::multi(["Kraków"]));
        filters.set("city", FilterValue::multi(Vec::<String>::new()));
        assert!(filters.is_empty());

        filters.set("kabatNumber", FilterValue::Single("  ".to_string()));
        assert!(filters.get("kabatNumber").is_none());
    }

    #[test]
    fn test_panel_rollback_restores_applied() {
        let applied = Filters::new().with("state", FilterValue::multi(["MA"]));
        let mut panel = FilterPanel::new(&applied);
        panel.stage("state", FilterValue::multi(["NY", "NJ"]));
        panel.stage("city", FilterValue::multi(["Newark"]));
        assert!(panel.is_dirty(&applied));

        panel.rollback(&applied);
        assert!(!panel.is_dirty(&applied));
        assert_eq!(panel.staged(), &applied);
        assert_eq!(panel.staged().get("state"), Some(&FilterValue::multi(["MA"])));
    }

    #[test]
    fn test_panel_apply_reports_change() {
        let mut applied = Filters::new();
        let mut panel = FilterPanel::default();
        assert!(!panel.apply(&mut applied));
        panel.stage("status", FilterValue::multi(["pending"]));
        assert!(panel.apply(&mut applied));
        assert_eq!(applied.len(), 1);
        assert!(!panel.is_dirty(&applied));
    }

    #[test]
    fn test_book_preset() {
        let filters: Filters = BookFilters {
            language_ids: vec!["pl".to_string()],
            availability: Some(Availability::Available),
            year: (Some(1900), Some(1950)),
            ..Default::default()
        }
        .into();

        assert_eq!(filters.len(), 3);
        let pairs = filters.to_query_pairs();
        assert!(pairs.contains(&("availability".to_string(), "available".to_string())));
        assert!(pairs.contains(&("yearMin".to_string(), "1900".to_string())));
        assert!(pairs.contains(&("yearMax".to_string(), "1950".to_string())));
    }

    #[test]
    fn test_order_preset() {
        let filters: Filters = OrderFilters {
            statuses: vec![OrderStatus::Pending, OrderStatus::Delivered],
            cities: vec!["Boston".to_string()],
            states: vec![],
        }
        .into();

        assert_eq!(filters.get(OrderFilters::STATUS), Some(&FilterValue::multi(["pending", "delivered"])));
        assert!(filters.get(OrderFilters::STATE).is_none());
    }
}
