use super::new_id;

/// Symbolic icon names a category can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Utensils,
    BusFront,
    Home,
    ShoppingCart,
    HeartPulse,
    Film,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utensils => "Utensils",
            Self::BusFront => "BusFront",
            Self::Home => "Home",
            Self::ShoppingCart => "ShoppingCart",
            Self::HeartPulse => "HeartPulse",
            Self::Film => "Film",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|icon| icon.as_str().eq_ignore_ascii_case(s))
    }

    pub fn all() -> &'static [Icon] {
        &[
            Self::Utensils,
            Self::BusFront,
            Self::Home,
            Self::ShoppingCart,
            Self::HeartPulse,
            Self::Film,
        ]
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Utensils => "🍴",
            Self::BusFront => "🚌",
            Self::Home => "🏠",
            Self::ShoppingCart => "🛒",
            Self::HeartPulse => "💓",
            Self::Film => "🎬",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Symbolic icon name, e.g. "Utensils". Unknown names render without a glyph.
    pub icon: String,
}

impl Category {
    pub fn new(name: String, icon: String) -> Self {
        Self {
            id: new_id(),
            name,
            icon,
        }
    }

    /// Terminal glyph for the category's icon, or "" when the icon is unknown.
    pub fn glyph(&self) -> &'static str {
        Icon::parse(&self.icon).map(|i| i.glyph()).unwrap_or("")
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }

    /// Resolve user input that may be either a category ID or a name.
    pub fn resolve<'a>(categories: &'a [Category], input: &str) -> Option<&'a Category> {
        Self::find_by_id(categories, input).or_else(|| Self::find_by_name(categories, input))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
