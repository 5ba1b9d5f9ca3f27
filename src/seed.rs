use crate::models::{Category, VocabEntry};

/// Lesson range offered by the lesson picker when the store holds no entries
/// yet (the Minna no Nihongo beginner volume spans 25 lessons).
pub const DEFAULT_LESSON_RANGE: std::ops::RangeInclusive<u32> = 1..=25;

fn entry(
    id: &str,
    kanji: &str,
    reading: &str,
    meaning: &str,
    category: Category,
    lesson: u32,
) -> VocabEntry {
    VocabEntry {
        id: id.to_string(),
        kanji: kanji.to_string(),
        reading: reading.to_string(),
        meaning: meaning.to_string(),
        category,
        lesson,
    }
}

/// The bundled seed set. Used on first load and restored verbatim by
/// `reset_to_seed`.
pub fn initial_vocab() -> Vec<VocabEntry> {
    vec![
        entry("seed-1", "私", "わたし", "I, me", Category::Kanji, 1),
        entry("seed-2", "先生", "せんせい", "teacher", Category::Kanji, 1),
        entry("seed-3", "学生", "がくせい", "student", Category::Kanji, 1),
        entry("seed-4", "会社員", "かいしゃいん", "company employee", Category::General, 1),
        entry("seed-5", "本", "ほん", "book", Category::Kanji, 2),
        entry("seed-6", "傘", "かさ", "umbrella", Category::Kanji, 2),
        entry("seed-7", "時計", "とけい", "clock, watch", Category::General, 2),
        entry("seed-8", "鞄", "かばん", "bag", Category::General, 2),
        entry("seed-9", "食べる", "たべる", "to eat", Category::Verb, 6),
        entry("seed-10", "飲む", "のむ", "to drink", Category::Verb, 6),
        entry("seed-11", "行く", "いく", "to go", Category::Verb, 5),
        entry("seed-12", "来る", "くる", "to come", Category::Verb, 5),
        entry("seed-13", "見る", "みる", "to see, to watch", Category::Verb, 6),
        entry("seed-14", "買う", "かう", "to buy", Category::Verb, 6),
        entry("seed-15", "猫", "ねこ", "cat", Category::General, 10),
        entry("seed-16", "犬", "いぬ", "dog", Category::General, 10),
        entry("seed-17", "水", "みず", "water", Category::Kanji, 6),
        entry("seed-18", "映画", "えいが", "movie", Category::General, 6),
        entry("seed-19", "駅", "えき", "station", Category::Kanji, 5),
        entry("seed-20", "電車", "でんしゃ", "train", Category::General, 5),
    ]
}
