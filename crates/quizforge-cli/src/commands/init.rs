//! The `quizforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizforge.toml
    if std::path::Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
    } else {
        std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
        println!("Created quizforge.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizforge validate --bank banks/example.toml");
    println!("  2. Run: quizforge play --bank banks/example.toml");
    println!("  3. Run: quizforge ranking --topic landforms");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

# Directory where leaderboard data is stored.
data_dir = "./quizforge-data"

# Default number of leaderboard rows to show.
ranking_limit = 10
"#;

const EXAMPLE_BANK: &str = r#"[topic]
id = "landforms"
title = "Landforms of the Earth"
description = "Shapes of the land and the forces that carve them"

[[questions]]
id = "landforms-q1"
type = "multipleChoice"
difficulty = "easy"
prompt = "What is a mountain range?"
options = [
    "A connected group of large mountains",
    "A single mountain of low height",
    "A flat, elevated surface",
    "An eroded basin between two highlands",
]
correct_index = 0
explanation = "A mountain range is a connected group of large mountains."

[[questions]]
id = "landforms-q2"
type = "trueFalse"
difficulty = "easy"
prompt = "A plateau is a flat, elevated landform."
answer = true
explanation = "Plateaus are flat but stand well above the surrounding land."

[[questions]]
id = "landforms-q3"
type = "fillBlanks"
difficulty = "easy"
prompt = "An ___ is land completely surrounded by water."
blanks = [["island", "isle"]]
explanation = "An island is surrounded by water on all sides."

[[questions]]
id = "landforms-q4"
type = "multipleChoice"
difficulty = "easy"
prompt = "Which is the largest ocean on the planet?"
options = [
    "Atlantic Ocean",
    "Pacific Ocean",
    "Indian Ocean",
    "Arctic Ocean",
]
correct_index = 1
explanation = "The Pacific covers nearly a third of the Earth's surface."

[[questions]]
id = "landforms-q5"
type = "trueFalse"
difficulty = "medium"
prompt = "A delta forms where a river deposits sediment as it meets the sea."
answer = true
explanation = "Deltas build up from sediment dropped at a river's mouth."

[[questions]]
id = "landforms-q6"
type = "fillBlanks"
difficulty = "medium"
prompt = "A group of islands is called an ___."
blanks = [["archipelago"]]
explanation = "The Canary Islands, for example, form an archipelago."

[[questions]]
id = "landforms-q7"
type = "matching"
difficulty = "medium"
prompt = "Match each continent with its trait:"
pairs = [
    { left = "Asia", right = "Largest continent (30% of land)" },
    { left = "Oceania", right = "Smallest continent (6% of land)" },
    { left = "Europe", right = "Second smallest continent (7% of land)" },
]
explanation = "Asia holds almost a third of the emerged land; Oceania the least."

[[questions]]
id = "landforms-q8"
type = "classify"
difficulty = "medium"
prompt = "Classify these landforms by where they occur:"
categories = ["Inland relief", "Coastal relief"]
explanation = "Mountains and valleys shape the interior; beaches and cliffs the coast."

[[questions.items]]
id = "item-1"
text = "Mountain"
category = "Inland relief"

[[questions.items]]
id = "item-2"
text = "Beach"
category = "Coastal relief"

[[questions.items]]
id = "item-3"
text = "Valley"
category = "Inland relief"

[[questions.items]]
id = "item-4"
text = "Cliff"
category = "Coastal relief"

[[questions]]
id = "landforms-q9"
type = "fillBlanks"
difficulty = "hard"
prompt = "Erosion wears the land down, ___ deposits the material elsewhere, and the breakdown of rock in place is called ___."
blanks = [["sedimentation", "deposition"], ["weathering"]]
explanation = "Erosion, sedimentation and weathering together model the relief."

[[questions]]
id = "landforms-q10"
type = "matching"
difficulty = "hard"
prompt = "Match each agent with the relief it carves:"
pairs = [
    { left = "River", right = "V-shaped valley" },
    { left = "Glacier", right = "U-shaped valley" },
    { left = "Wind", right = "Dune field" },
]
explanation = "Water, ice and wind each leave a distinct signature on the land."
"#;
