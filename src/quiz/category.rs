#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FoodAndDrink,
    Geography,
    GeneralKnowledge,
    History,
    ArtAndLiterature,
    Movies,
    Music,
    Science,
    SocietyAndCulture,
    SportAndLeisure,
    // Catch-all for whatever the provider sends that we don't recognise.
    // Never goes into a request.
    Unknown,
}

impl Category {
    /// Every queryable category, in menu order.
    pub const ALL: [Category; 10] = [
        Category::FoodAndDrink,
        Category::Geography,
        Category::GeneralKnowledge,
        Category::History,
        Category::ArtAndLiterature,
        Category::Movies,
        Category::Music,
        Category::Science,
        Category::SocietyAndCulture,
        Category::SportAndLeisure,
    ];

    /// Key used in provider query strings.
    pub fn key(&self) -> &'static str {
        match self {
            Category::FoodAndDrink => "food_and_drink",
            Category::Geography => "geography",
            Category::GeneralKnowledge => "general_knowledge",
            Category::History => "history",
            Category::ArtAndLiterature => "literature",
            Category::Movies => "movies",
            Category::Music => "music",
            Category::Science => "science",
            Category::SocietyAndCulture => "society_and_culture",
            Category::SportAndLeisure => "sport_and_leisure",
            Category::Unknown => "-",
        }
    }

    /// Label shown to the player.
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndDrink => "Food and Drink",
            Category::Geography => "Geography",
            Category::GeneralKnowledge => "General Knowledge",
            Category::History => "History",
            Category::ArtAndLiterature => "Art and Literature",
            Category::Movies => "Movies",
            Category::Music => "Music",
            Category::Science => "Science",
            Category::SocietyAndCulture => "Society and Culture",
            Category::SportAndLeisure => "Sport and Leisure",
            Category::Unknown => "-",
        }
    }

    pub fn from_key(key: &str) -> Category {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .unwrap_or(Category::Unknown)
    }

    pub fn from_label(label: &str) -> Category {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .unwrap_or(Category::Unknown)
    }

    pub fn labels() -> Vec<&'static str> {
        Category::ALL.iter().map(|c| c.label()).collect()
    }

    pub fn keys() -> Vec<&'static str> {
        Category::ALL.iter().map(|c| c.key()).collect()
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key_and_label() {
        assert_eq!(Category::from_key("literature"), Category::ArtAndLiterature);
        assert_eq!(Category::from_label("Art and Literature"), Category::ArtAndLiterature);
        assert_eq!(Category::from_key("science"), Category::Science);
        assert_eq!(Category::from_label("Sport and Leisure"), Category::SportAndLeisure);
    }

    #[test]
    fn unmatched_lookups_fall_back_to_unknown() {
        assert_eq!(Category::from_key("astrology"), Category::Unknown);
        assert_eq!(Category::from_label("science"), Category::Unknown);
        assert_eq!(Category::from_label(""), Category::Unknown);
        // the sentinel's own text is not a catalog entry either
        assert_eq!(Category::from_key("-"), Category::Unknown);
    }

    #[test]
    fn listings_skip_unknown_and_keep_declaration_order() {
        let labels = Category::labels();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels.first(), Some(&"Food and Drink"));
        assert_eq!(labels.last(), Some(&"Sport and Leisure"));
        assert!(!labels.contains(&"-"));

        let keys = Category::keys();
        assert_eq!(keys[4], "literature");
        assert!(!keys.contains(&"-"));
    }

    #[test]
    fn every_label_maps_back_to_its_key() {
        for label in Category::labels() {
            let category = Category::from_label(label);
            assert_eq!(Category::from_key(category.key()), category);
        }
    }
}
