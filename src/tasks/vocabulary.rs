//! Fixed word lists the prompt composer samples from, and the system
//! instruction that pins down the response format.
//!
//! Repeated entries are intentional: they weight the uniform draw.

pub const TOPICS: &[&str] = &[
    "daily life",
    "weekend fun",
    "office work",
    "family time",
    "school days",
    "fitness",
    "food",
    "friends",
    "gaming",
    "travel",
    "music",
    "shopping",
    "pets",
    "technology",
    "nature",
    "aliens",
    "cats",
    "office life",
    "dreams",
    "memes",
    "time travel",
    "robots",
    "ghosts",
    "school days",
    "superheroes",
];

pub const ACTIONS: &[&str] = &[
    "generate",
    "list",
    "come up with",
    "suggest",
    "make a list of",
    "create",
    "invent",
    "list",
    "create",
    "imagine",
    "design",
    "describe",
];

pub const VIBES: &[&str] = &[
    "funny",
    "random",
    "unexpected",
    "casual",
    "weird but doable",
    "timepass",
    "light-hearted",
    "pointless",
    "creative",
    "funny",
    "weird",
    "useless",
    "pointless",
    "random",
    "chaotic",
    "silly",
];

pub const OUTPUTS: &[&str] = &[
    "tasks",
    "to-dos",
    "things to try",
    "activities",
    "mini challenges",
    "errands",
    "hobbies",
    "jobs",
    "rituals",
    "missions",
    "life tips",
];

pub const SYSTEM_INSTRUCTION: &str = r#"You are a task generator.

Rules:
- Respond ONLY with a JSON array.
- Do not include any explanations, text, or formatting outside JSON.
- The JSON must be valid and directly parsable.

Example format:
[
  { "title": "Crazy Painter", "description": "Paint a masterpiece using only your feet." },
  { "title": "Time Traveler", "description": "Travel back in time and meet your ancestors." }
]"#;
