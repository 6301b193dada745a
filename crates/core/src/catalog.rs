//! Catalog module - static content the content generators deal from
//!
//! [`Catalog::builtin`] holds the eco-themed content shipped with the engine.
//! Hosts can replace any section by loading a JSON catalog; missing sections
//! fall back to the built-in content. A catalog is checked with
//! [`Catalog::validate_for`] before a session of that kind is created, so the
//! game modules can rely on well-formed content.

use serde::{Deserialize, Serialize};

use crate::types::{ConfigError, GameKind, PUZZLE_SLOTS};

/// Waste bins of the sorting game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    Recyclable,
    Organic,
    Hazardous,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub name: String,
    pub emoji: String,
    pub category: WasteCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub category: WasteCategory,
    pub name: String,
    pub emoji: String,
}

/// One face of the memory deck; `pair` is the id of the card it matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCardSpec {
    pub id: u32,
    pub emoji: String,
    pub text: String,
    pub pair: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
}

/// An everyday habit and its sustainable replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoicePair {
    pub item: String,
    pub alternative: String,
    pub item_emoji: String,
    pub alternative_emoji: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzlePieceSpec {
    pub name: String,
    pub emoji: String,
    pub correct_slot: usize,
}

/// Snake food; good food has positive points, bad food negative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSpec {
    pub name: String,
    pub emoji: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotPatternSpec {
    pub name: String,
    pub emoji: String,
    /// Grid positions, indexed by dot number
    pub dots: Vec<(i16, i16)>,
    /// Dot index pairs, in the order they must be drawn
    pub connections: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub clue: String,
    pub emoji: String,
}

/// All game content, one section per module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    pub sorting_items: Vec<SortItem>,
    pub bins: Vec<Bin>,
    pub memory_cards: Vec<MemoryCardSpec>,
    pub quiz_questions: Vec<QuizQuestion>,
    pub choice_pairs: Vec<ChoicePair>,
    pub puzzle_pieces: Vec<PuzzlePieceSpec>,
    pub good_foods: Vec<FoodSpec>,
    pub bad_foods: Vec<FoodSpec>,
    pub dot_patterns: Vec<DotPatternSpec>,
    pub words: Vec<WordEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn s(v: &str) -> String {
    v.to_string()
}

impl Catalog {
    /// Parse a (possibly partial) catalog document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that the section used by `kind` can produce a playable game
    pub fn validate_for(&self, kind: GameKind) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidContent { kind, reason };
        let empty = |section: &'static str| ConfigError::EmptyContent { kind, section };

        match kind {
            GameKind::Sorting => {
                if self.sorting_items.is_empty() {
                    return Err(empty("sortingItems"));
                }
                if self.bins.is_empty() {
                    return Err(empty("bins"));
                }
                if let Some(item) = self
                    .sorting_items
                    .iter()
                    .find(|item| !self.bins.iter().any(|b| b.category == item.category))
                {
                    return Err(invalid(format!("no bin accepts '{}'", item.name)));
                }
            }
            GameKind::MemoryMatch => {
                if self.memory_cards.is_empty() {
                    return Err(empty("memoryCards"));
                }
                for (i, card) in self.memory_cards.iter().enumerate() {
                    if self.memory_cards[..i].iter().any(|c| c.id == card.id) {
                        return Err(invalid(format!("duplicate card id {}", card.id)));
                    }
                    let partner = self.memory_cards.iter().find(|c| c.id == card.pair);
                    match partner {
                        Some(p) if card.pair != card.id && p.pair == card.id => {}
                        Some(_) => {
                            return Err(invalid(format!(
                                "card {} pairs with {}, which does not pair back",
                                card.id, card.pair
                            )))
                        }
                        None => {
                            return Err(invalid(format!(
                                "card {} names missing partner {}",
                                card.id, card.pair
                            )))
                        }
                    }
                }
            }
            GameKind::Quiz => {
                if self.quiz_questions.is_empty() {
                    return Err(empty("quizQuestions"));
                }
                if let Some(q) = self
                    .quiz_questions
                    .iter()
                    .find(|q| q.correct >= q.options.len())
                {
                    return Err(invalid(format!(
                        "answer {} out of range for '{}'",
                        q.correct, q.question
                    )));
                }
            }
            GameKind::ChoiceMatch => {
                if self.choice_pairs.is_empty() {
                    return Err(empty("choicePairs"));
                }
            }
            GameKind::Puzzle => {
                if self.puzzle_pieces.len() != PUZZLE_SLOTS {
                    return Err(invalid(format!(
                        "expected {} pieces, found {}",
                        PUZZLE_SLOTS,
                        self.puzzle_pieces.len()
                    )));
                }
                let mut seen = [false; PUZZLE_SLOTS];
                for piece in &self.puzzle_pieces {
                    match seen.get_mut(piece.correct_slot) {
                        Some(slot) if !*slot => *slot = true,
                        _ => {
                            return Err(invalid(format!(
                                "slot {} of '{}' is out of range or taken",
                                piece.correct_slot, piece.name
                            )))
                        }
                    }
                }
            }
            GameKind::Snake => {
                if self.good_foods.is_empty() {
                    return Err(empty("goodFoods"));
                }
                if self.bad_foods.is_empty() {
                    return Err(empty("badFoods"));
                }
                if let Some(food) = self.good_foods.iter().find(|f| f.points < 0) {
                    return Err(invalid(format!("good food '{}' has negative points", food.name)));
                }
                if let Some(food) = self.bad_foods.iter().find(|f| f.points > 0) {
                    return Err(invalid(format!("bad food '{}' has positive points", food.name)));
                }
            }
            GameKind::ConnectDots => {
                if self.dot_patterns.is_empty() {
                    return Err(empty("dotPatterns"));
                }
                for pattern in &self.dot_patterns {
                    if pattern.connections.is_empty() {
                        return Err(invalid(format!("pattern '{}' has no connections", pattern.name)));
                    }
                    let dots = pattern.dots.len();
                    if let Some((a, b)) = pattern
                        .connections
                        .iter()
                        .find(|(a, b)| a == b || *a >= dots || *b >= dots)
                    {
                        return Err(invalid(format!(
                            "pattern '{}' connects {} to {}",
                            pattern.name, a, b
                        )));
                    }
                }
            }
            GameKind::WordGuess => {
                if self.words.is_empty() {
                    return Err(empty("words"));
                }
                if let Some(entry) = self
                    .words
                    .iter()
                    .find(|w| w.word.is_empty() || !w.word.chars().all(|c| c.is_ascii_alphabetic()))
                {
                    return Err(invalid(format!("'{}' is not a plain word", entry.word)));
                }
            }
        }
        Ok(())
    }

    /// Eco-themed content shipped with the engine
    pub fn builtin() -> Self {
        use WasteCategory::*;

        let item = |name: &str, emoji: &str, category| SortItem {
            name: s(name),
            emoji: s(emoji),
            category,
        };
        let card = |id, emoji: &str, text: &str, pair| MemoryCardSpec {
            id,
            emoji: s(emoji),
            text: s(text),
            pair,
        };
        let question = |question: &str, options: [&str; 4], correct, explanation: &str| QuizQuestion {
            question: s(question),
            options: options.iter().map(|o| s(o)).collect(),
            correct,
            explanation: s(explanation),
        };
        let choice = |item: &str, alternative: &str, item_emoji: &str, alternative_emoji: &str| ChoicePair {
            item: s(item),
            alternative: s(alternative),
            item_emoji: s(item_emoji),
            alternative_emoji: s(alternative_emoji),
        };
        let piece = |name: &str, emoji: &str, correct_slot| PuzzlePieceSpec {
            name: s(name),
            emoji: s(emoji),
            correct_slot,
        };
        let food = |name: &str, emoji: &str, points| FoodSpec {
            name: s(name),
            emoji: s(emoji),
            points,
        };
        let word = |word: &str, clue: &str, emoji: &str| WordEntry {
            word: s(word),
            clue: s(clue),
            emoji: s(emoji),
        };

        Self {
            sorting_items: vec![
                item("Plastic Bottle", "🍼", Recyclable),
                item("Banana Peel", "🍌", Organic),
                item("Glass Jar", "🫙", Recyclable),
                item("Apple Core", "🍎", Organic),
                item("Paper", "📄", Recyclable),
                item("Battery", "🔋", Hazardous),
                item("Tin Can", "🥫", Recyclable),
                item("Coffee Grounds", "☕", Organic),
            ],
            bins: vec![
                Bin { category: Recyclable, name: s("Recyclable"), emoji: s("♻️") },
                Bin { category: Organic, name: s("Organic"), emoji: s("🌱") },
                Bin { category: Hazardous, name: s("Hazardous"), emoji: s("⚠️") },
            ],
            memory_cards: vec![
                card(1, "🚗", "Car", 2),
                card(2, "🚴", "Bike", 1),
                card(3, "🥩", "Beef", 4),
                card(4, "🥕", "Vegetables", 3),
                card(5, "💡", "LED Bulb", 6),
                card(6, "🔆", "Incandescent", 5),
                card(7, "🛒", "Local Food", 8),
                card(8, "✈️", "Imported Food", 7),
            ],
            quiz_questions: vec![
                question(
                    "What percentage of plastic waste is actually recycled globally?",
                    ["9%", "25%", "45%", "60%"],
                    0,
                    "Only about 9% of all plastic ever produced has been recycled. Most ends up in landfills or the environment.",
                ),
                question(
                    "Which transportation method has the lowest carbon footprint?",
                    ["Electric car", "Public bus", "Bicycle", "Walking"],
                    3,
                    "Walking has zero carbon emissions and is the most environmentally friendly way to travel.",
                ),
                question(
                    "How much water does it take to produce one hamburger?",
                    ["50 gallons", "200 gallons", "660 gallons", "1000 gallons"],
                    2,
                    "It takes approximately 660 gallons of water to produce one hamburger, including water for the cow, feed production, and processing.",
                ),
                question(
                    "What is the most effective way to reduce your carbon footprint?",
                    ["Recycle more", "Use LED bulbs", "Eat less meat", "Drive less"],
                    2,
                    "Reducing meat consumption, especially beef, is one of the most impactful individual actions for reducing carbon footprint.",
                ),
                question(
                    "Which renewable energy source is growing fastest globally?",
                    ["Solar", "Wind", "Hydroelectric", "Geothermal"],
                    0,
                    "Solar energy is the fastest-growing renewable energy source, with costs dropping dramatically in recent years.",
                ),
            ],
            choice_pairs: vec![
                choice("Plastic bags", "Reusable bags", "🛍️", "♻️"),
                choice("Paper towels", "Cloth towels", "🧻", "🧽"),
                choice("Disposable bottles", "Reusable bottles", "🍼", "🚰"),
                choice("Fast fashion", "Thrift shopping", "👕", "👔"),
                choice("Driving alone", "Public transport", "🚗", "🚌"),
                choice("Food waste", "Composting", "🗑️", "🌱"),
            ],
            puzzle_pieces: vec![
                piece("Earth", "🌍", 0),
                piece("Tree", "🌳", 1),
                piece("Sun", "☀️", 2),
                piece("Ocean", "🌊", 3),
                piece("Butterfly", "🦋", 4),
                piece("Blossom", "🌸", 5),
            ],
            good_foods: vec![
                food("Apple", "🍎", 10),
                food("Carrot", "🥕", 15),
                food("Sprout", "🌱", 20),
                food("Recycle", "♻️", 25),
            ],
            bad_foods: vec![food("Trash", "🗑️", -5), food("Pollution", "💨", -10)],
            dot_patterns: vec![
                DotPatternSpec {
                    name: s("Flower"),
                    emoji: s("🌸"),
                    dots: vec![(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)],
                    connections: vec![(0, 2), (1, 2), (2, 3), (2, 4)],
                },
                DotPatternSpec {
                    name: s("Tree"),
                    emoji: s("🌳"),
                    dots: vec![(1, 0), (0, 1), (1, 1), (2, 1), (1, 2), (1, 3)],
                    connections: vec![(0, 2), (1, 2), (2, 3), (2, 4), (4, 5)],
                },
            ],
            words: vec![
                word("TREE", "It grows tall and gives us oxygen", "🌳"),
                word("SUN", "Bright star that gives us energy", "☀️"),
                word("FISH", "Lives in water and swims", "🐠"),
                word("BIRD", "Flies in the sky with wings", "🐦"),
            ],
        }
    }
}
