//! Built-in challenge presets, one per game kind.

use crate::types::{GameConfig, GameKind};

/// (id, title, description, kind, points, time limit s, min score)
const PRESETS: [(&str, &str, &str, GameKind, u32, u32, u32); 8] = [
    (
        "waste-sorting-game",
        "Waste Sorting Master",
        "Learn proper waste sorting through an interactive game",
        GameKind::Sorting,
        60,
        300,
        80,
    ),
    (
        "carbon-memory-game",
        "Carbon Footprint Memory",
        "Match eco-friendly alternatives with their high-carbon counterparts",
        GameKind::MemoryMatch,
        70,
        600,
        70,
    ),
    (
        "renewable-energy-quiz",
        "Renewable Energy Challenge",
        "Test your knowledge about renewable energy sources",
        GameKind::Quiz,
        80,
        900,
        75,
    ),
    (
        "sustainable-living-match",
        "Sustainable Living Choices",
        "Match sustainable practices with their benefits",
        GameKind::ChoiceMatch,
        65,
        480,
        85,
    ),
    (
        "earth-puzzle-adventure",
        "Earth Puzzle Adventure",
        "Complete beautiful nature puzzles by placing pieces in the right spots!",
        GameKind::Puzzle,
        100,
        900,
        80,
    ),
    (
        "green-snake-adventure",
        "Green Snake Adventure",
        "Guide your eco-friendly snake to eat healthy foods and avoid pollution!",
        GameKind::Snake,
        120,
        1200,
        100,
    ),
    (
        "connect-eco-dots",
        "Connect the Eco Dots",
        "Draw beautiful nature patterns by connecting dots in the right order!",
        GameKind::ConnectDots,
        80,
        720,
        60,
    ),
    (
        "eco-word-builder",
        "Eco Word Builder",
        "Guess the eco-friendly words by choosing the right letters!",
        GameKind::WordGuess,
        90,
        900,
        70,
    ),
];

/// All built-in challenges
pub fn challenge_presets() -> Vec<GameConfig> {
    PRESETS
        .iter()
        .map(|&(id, title, description, kind, points, limit, min_score)| {
            GameConfig::new(id, title, kind)
                .with_description(description)
                .with_points(points)
                .with_time_limit(limit)
                .with_min_score(min_score)
        })
        .collect()
}

/// Preset by id, or the preset for a game kind name
pub fn find_preset(name: &str) -> Option<GameConfig> {
    let presets = challenge_presets();
    let name = name.trim();
    if let Some(found) = presets.iter().find(|c| c.id == name) {
        return Some(found.clone());
    }
    let kind = GameKind::from_str(name)?;
    presets.into_iter().find(|c| c.kind == kind)
}
