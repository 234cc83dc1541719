//! Category reference data and merchant classification.
//!
//! Categories are shared across users and identified by UUID. The resolver
//! maps ids to display names and assigns a category to free-text merchant
//! names through an ordered keyword table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::{Uuid, uuid};

use crate::util::normalize_text;

/// Label returned for category ids that are not in the reference table.
pub const FALLBACK_CATEGORY_NAME: &str = "Other";

/// Category assigned to an expense when no keyword matches its merchant.
pub const DEFAULT_EXPENSE_CATEGORY_ID: Uuid = uuid!("1e5d4e32-9b42-493a-af2e-dfa17d290255");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// A keyword rule: any keyword contained in the merchant text selects
/// `category_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordRule {
    pub category_id: Uuid,
    pub name: String,
    keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new<I, S>(category_id: Uuid, name: &str, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| normalize_text(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            category_id,
            name: name.to_string(),
            keywords,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn matches(&self, normalized_merchant: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_merchant.contains(keyword.as_str()))
    }
}

/// The built-in merchant keyword table, in priority order.
pub fn default_keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            uuid!("47823c77-f9b8-4387-a76d-54e07c0bf227"),
            "DiningOut",
            ["restaurant", "dine", "food", "eat", "bar", "cafe"],
        ),
        KeywordRule::new(
            uuid!("4f8297b0-4e5b-4a18-b4bd-331f7a8b8825"),
            "Groceries",
            ["grocery", "supermarket", "mart", "store", "market"],
        ),
        KeywordRule::new(
            uuid!("52c6cc86-78c2-4848-8f4a-ca934fe90ca1"),
            "Healthcare",
            ["clinic", "hospital", "pharmacy", "health"],
        ),
        KeywordRule::new(
            uuid!("5730e5b8-68bc-4e22-8d5d-0707493f3643"),
            "Entertainment",
            ["cinema", "theater", "games", "movies", "concert"],
        ),
        KeywordRule::new(
            uuid!("5d98b586-fbb9-4c4b-bed5-ff739eba3ea5"),
            "Travel",
            ["flight", "airline", "hotel", "motel", "travel"],
        ),
        KeywordRule::new(
            uuid!("6e902b19-5934-4e2b-8500-bfce77c03f60"),
            "Shopping",
            ["mall", "boutique", "shop", "fashion"],
        ),
        KeywordRule::new(
            uuid!("89c2317b-f4cd-431e-9ac9-0c67ef8f2211"),
            "Savings",
            ["bank", "deposit", "investment", "savings"],
        ),
        KeywordRule::new(
            uuid!("abcb1f77-525e-4e2e-8b5d-d7db98bdf8f5"),
            "Utilities",
            ["electric", "water", "gas", "utility", "internet"],
        ),
        KeywordRule::new(
            uuid!("b4f223cc-6718-4d07-b9a9-feac65bca509"),
            "Rent",
            ["rent", "landlord", "apartment"],
        ),
        KeywordRule::new(
            uuid!("de8d5f42-77c6-4b29-9cdd-6bfc4daf3593"),
            "Transportation",
            ["taxi", "uber", "bus", "train", "transport", "cab"],
        ),
        KeywordRule::new(
            uuid!("fda7e783-f9ba-44d5-94e7-8aedc5f29181"),
            "Education",
            ["school", "college", "university", "course"],
        ),
    ]
}

/// Maps category ids to names and merchants to category ids.
#[derive(Clone, Debug)]
pub struct CategoryResolver {
    categories: Vec<Category>,
    names: HashMap<Uuid, String>,
    rules: Vec<KeywordRule>,
    fallback: String,
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CategoryResolver {
    /// Builds a resolver over the reference rows with the default keyword
    /// table. Later rows win on duplicate ids.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let categories: Vec<Category> = categories.into_iter().collect();
        let names = categories
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();
        Self {
            categories,
            names,
            rules: default_keyword_rules(),
            fallback: FALLBACK_CATEGORY_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Vec<KeywordRule>) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, label: &str) -> Self {
        self.fallback = label.to_string();
        self
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Name for `category_id`, or the fallback label on a miss.
    pub fn resolve(&self, category_id: &Uuid) -> &str {
        self.names
            .get(category_id)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }

    pub fn contains(&self, category_id: &Uuid) -> bool {
        self.names.contains_key(category_id)
    }

    /// Case-insensitive reverse lookup of a category name.
    pub fn id_for_name(&self, name: &str) -> Option<Uuid> {
        let wanted = normalize_text(name);
        self.categories
            .iter()
            .find(|c| normalize_text(&c.name) == wanted)
            .map(|c| c.id)
    }

    /// First rule, in table order, with a keyword contained in the merchant.
    pub fn classify_merchant(&self, merchant: &str) -> Option<Uuid> {
        let normalized = normalize_text(merchant);
        if normalized.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.category_id)
    }

    /// Like [`classify_merchant`](Self::classify_merchant) with a caller
    /// supplied default.
    pub fn classify_merchant_or(&self, merchant: &str, default: Uuid) -> Uuid {
        self.classify_merchant(merchant).unwrap_or(default)
    }
}
