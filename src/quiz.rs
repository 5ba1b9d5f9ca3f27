use crate::audio::{AudioHandle, Utterance, QUIZ_CUE_DELAY};
use crate::logger;
use crate::models::{AnswerFeedback, Question, VocabEntry};
use rand::seq::SliceRandom;
use rand::Rng;

pub const POINTS_PER_CORRECT: u32 = 10;
pub const MAX_OPTIONS: usize = 4;

/// Multiple-choice quiz state machine. Per question:
/// Unanswered -> Answered(correct|incorrect) -> discarded on the next round.
///
/// The RNG is injected so distractor selection is reproducible under test;
/// the audio cue is fire-and-forget through the mailbox handle.
#[derive(Debug, Default)]
pub struct QuizEngine {
    question: Option<Question>,
    feedback: Option<AnswerFeedback>,
    score: u32,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    pub fn answered(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Discards the active question, for example when the working set
    /// changes under it. Score is kept: it belongs to the session, not the
    /// round.
    pub fn clear(&mut self) {
        self.question = None;
        self.feedback = None;
    }

    /// Produces a fresh question from the working set, or clears the active
    /// one when the set is empty (the "no data" state, not an error).
    ///
    /// The target is drawn uniformly; distractors are rejection-sampled from
    /// the same set, skipping ids already picked, until the option set holds
    /// `min(4, n)` entries. With a single-entry set the options are just the
    /// target; with 2-3 entries every member appears.
    pub fn generate<R: Rng>(
        &mut self,
        working_set: &[VocabEntry],
        rng: &mut R,
        audio: Option<&AudioHandle>,
    ) -> Option<&Question> {
        self.feedback = None;

        if working_set.is_empty() {
            self.question = None;
            return None;
        }

        let target = working_set[rng.gen_range(0..working_set.len())].clone();

        let mut options = vec![target.clone()];
        while options.len() < MAX_OPTIONS.min(working_set.len()) {
            let draw = &working_set[rng.gen_range(0..working_set.len())];
            if !options.iter().any(|o| o.id == draw.id) {
                options.push(draw.clone());
            }
        }
        options.shuffle(rng);

        if let Some(audio) = audio {
            audio.speak_after(Utterance::reading(target.reading.clone()), QUIZ_CUE_DELAY);
        }

        logger::log(&format!("Generated question for entry {}", target.id));
        self.question = Some(Question { target, options });
        self.question.as_ref()
    }

    /// Grades the chosen option. No-op while no question is active or after
    /// the round is already answered; the first verdict stands.
    pub fn submit_answer(&mut self, option_id: &str) -> Option<&AnswerFeedback> {
        let question = self.question.as_ref()?;
        if self.feedback.is_some() {
            return self.feedback.as_ref();
        }

        if option_id == question.target.id {
            self.score += POINTS_PER_CORRECT;
            self.feedback = Some(AnswerFeedback {
                correct: true,
                message: "Correct!".to_string(),
            });
        } else {
            self.feedback = Some(AnswerFeedback {
                correct: false,
                message: format!("Wrong! The answer is: {}", question.target.meaning),
            });
        }
        self.feedback.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(id: &str, kanji: &str, reading: &str, meaning: &str) -> VocabEntry {
        VocabEntry {
            id: id.to_string(),
            kanji: kanji.to_string(),
            reading: reading.to_string(),
            meaning: meaning.to_string(),
            category: Category::General,
            lesson: 1,
        }
    }

    fn working_set(n: usize) -> Vec<VocabEntry> {
        (0..n)
            .map(|i| {
                entry(
                    &format!("id-{}", i),
                    &format!("字{}", i),
                    "よみ",
                    &format!("meaning {}", i),
                )
            })
            .collect()
    }

    #[test]
    fn test_generate_empty_set_yields_no_question() {
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(engine.generate(&[], &mut rng, None).is_none());
        assert!(engine.question().is_none());
    }

    #[test]
    fn test_options_contain_target_exactly_once() {
        let ws = working_set(10);
        let mut engine = QuizEngine::new();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = engine.generate(&ws, &mut rng, None).unwrap();
            let hits = question
                .options
                .iter()
                .filter(|o| o.id == question.target.id)
                .count();
            assert_eq!(hits, 1, "seed {}", seed);
        }
    }

    #[test]
    fn test_option_count_is_min_of_four_and_set_size() {
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(3);
        for (n, expected) in [(1, 1), (2, 2), (3, 3), (4, 4), (9, 4)] {
            let ws = working_set(n);
            let question = engine.generate(&ws, &mut rng, None).unwrap();
            assert_eq!(question.options.len(), expected);
        }
    }

    #[test]
    fn test_options_have_distinct_ids() {
        let ws = working_set(6);
        let mut engine = QuizEngine::new();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = engine.generate(&ws, &mut rng, None).unwrap();
            let mut ids: Vec<_> = question.options.iter().map(|o| o.id.clone()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), question.options.len());
        }
    }

    #[test]
    fn test_single_entry_set_options_are_just_target() {
        let ws = working_set(1);
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(0);
        let question = engine.generate(&ws, &mut rng, None).unwrap();
        assert_eq!(question.options.len(), 1);
        assert_eq!(question.options[0].id, question.target.id);
    }

    #[test]
    fn test_two_entry_set_contains_both() {
        let ws = vec![
            entry("1", "猫", "ねこ", "cat"),
            entry("2", "犬", "いぬ", "dog"),
        ];
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(11);
        let question = engine.generate(&ws, &mut rng, None).unwrap();
        assert_eq!(question.options.len(), 2);
        assert!(question.options.iter().any(|o| o.id == "1"));
        assert!(question.options.iter().any(|o| o.id == "2"));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let ws = working_set(8);
        let mut a = QuizEngine::new();
        let mut b = QuizEngine::new();
        let qa = a
            .generate(&ws, &mut StdRng::seed_from_u64(42), None)
            .unwrap()
            .clone();
        let qb = b
            .generate(&ws, &mut StdRng::seed_from_u64(42), None)
            .unwrap()
            .clone();
        assert_eq!(qa.target.id, qb.target.id);
        let ids_a: Vec<_> = qa.options.iter().map(|o| &o.id).collect();
        let ids_b: Vec<_> = qb.options.iter().map(|o| &o.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_correct_answer_scores_ten() {
        let ws = working_set(4);
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(5);
        let target_id = engine
            .generate(&ws, &mut rng, None)
            .unwrap()
            .target
            .id
            .clone();

        let feedback = engine.submit_answer(&target_id).unwrap();
        assert!(feedback.correct);
        assert_eq!(engine.score(), POINTS_PER_CORRECT);
    }

    #[test]
    fn test_wrong_answer_reports_correct_meaning_and_keeps_score() {
        let ws = working_set(4);
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(5);
        let question = engine.generate(&ws, &mut rng, None).unwrap();
        let target = question.target.clone();
        let wrong = question
            .options
            .iter()
            .find(|o| o.id != target.id)
            .unwrap()
            .id
            .clone();

        let feedback = engine.submit_answer(&wrong).unwrap().clone();
        assert!(!feedback.correct);
        assert!(feedback.message.contains(&target.meaning));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_submit_answer_is_idempotent() {
        let ws = working_set(4);
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(9);
        let question = engine.generate(&ws, &mut rng, None).unwrap();
        let target_id = question.target.id.clone();
        let wrong = question
            .options
            .iter()
            .find(|o| o.id != target_id)
            .unwrap()
            .id
            .clone();

        engine.submit_answer(&target_id);
        assert_eq!(engine.score(), POINTS_PER_CORRECT);

        // Further submissions, right or wrong, change nothing.
        let second = engine.submit_answer(&wrong).unwrap().clone();
        assert!(second.correct);
        engine.submit_answer(&target_id);
        assert_eq!(engine.score(), POINTS_PER_CORRECT);
    }

    #[test]
    fn test_submit_without_question_is_noop() {
        let mut engine = QuizEngine::new();
        assert!(engine.submit_answer("anything").is_none());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_next_round_discards_feedback_but_keeps_score() {
        let ws = working_set(4);
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(13);
        let target_id = engine
            .generate(&ws, &mut rng, None)
            .unwrap()
            .target
            .id
            .clone();
        engine.submit_answer(&target_id);

        engine.generate(&ws, &mut rng, None);
        assert!(engine.feedback().is_none());
        assert!(!engine.answered());
        assert_eq!(engine.score(), POINTS_PER_CORRECT);
    }

    #[test]
    fn test_generate_schedules_audio_cue_for_target_reading() {
        use crate::audio::{spawn_audio_worker, test_support::RecordingSpeaker};

        let speaker = RecordingSpeaker::default();
        let spoken = speaker.spoken.clone();
        let (handle, join) = spawn_audio_worker(Box::new(speaker));

        let ws = vec![entry("1", "駅", "えき", "station")];
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(1);
        engine.generate(&ws, &mut rng, Some(&handle));

        drop(handle);
        join.join().unwrap();

        let spoken = spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "えき");
    }
}
