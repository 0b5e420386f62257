use entities::trip::Category;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    static ref FOOD: Regex = keywords("dinner|lunch|breakfast|food|wine|coffee|tour");
    static ref REST: Regex =
        keywords("hotel|flight|transfer|travel|check in|check out|arrive|depart");
    static ref CAFE: Regex = keywords("cafe|espresso|latte");
}

fn keywords(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("category keyword regex to compile")
}

/// First matching keyword list wins. The food list claims "coffee" ahead of
/// the cafe list; cafe-sounding text that mentions coffee lands in `Food`.
pub fn categorize(text: &str) -> Category {
    if FOOD.is_match(text) {
        Category::Food
    } else if REST.is_match(text) {
        Category::Rest
    } else if CAFE.is_match(text) {
        Category::Coffee
    } else {
        Category::Sights
    }
}
