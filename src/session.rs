use crate::ai::{ExplanationProvider, ImageProvider, SuggestionProvider};
use crate::audio::{AudioHandle, Utterance};
use crate::editor::{self, Draft};
use crate::error::StudyError;
use crate::models::{AnswerFeedback, Category, Explanation, Question, Tab, VocabEntry};
use crate::quiz::QuizEngine;
use crate::selector::SessionSelector;
use crate::store::{KvStore, VocabStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Explicit session context: the store, the scope selection, the quiz state
/// and the score all live here instead of in ambient globals. The
/// persistence backend, RNG and audio sink are injected.
pub struct StudySession {
    store: VocabStore,
    selector: SessionSelector,
    quiz: QuizEngine,
    rng: StdRng,
    audio: Option<AudioHandle>,
    tab: Tab,
}

impl StudySession {
    pub fn new(kv: Box<dyn KvStore>) -> Result<Self, StudyError> {
        Self::with_rng(kv, StdRng::from_entropy())
    }

    /// Seeded constructor so quiz rounds are reproducible under test.
    pub fn with_rng(kv: Box<dyn KvStore>, rng: StdRng) -> Result<Self, StudyError> {
        Ok(Self {
            store: VocabStore::load(kv)?,
            selector: SessionSelector::new(),
            quiz: QuizEngine::new(),
            rng,
            audio: None,
            tab: Tab::Flashcards,
        })
    }

    pub fn with_audio(mut self, audio: AudioHandle) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn entries(&self) -> &[VocabEntry] {
        self.store.entries()
    }

    pub fn score(&self) -> u32 {
        self.quiz.score()
    }

    pub fn question(&self) -> Option<&Question> {
        self.quiz.question()
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.quiz.feedback()
    }

    pub fn selector(&self) -> &SessionSelector {
        &self.selector
    }

    pub fn working_set(&self) -> Vec<VocabEntry> {
        self.selector.working_set(self.store.entries())
    }

    pub fn available_lessons(&self) -> Vec<u32> {
        self.selector.available_lessons(self.store.entries())
    }

    /// The flip card under the cursor, if the working set is non-empty.
    pub fn current_card(&self) -> Option<VocabEntry> {
        self.working_set().get(self.selector.cursor()).cloned()
    }

    /// Switches tabs. Entering the quiz starts a round; leaving it silences
    /// any in-flight audio.
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if tab == Tab::Quiz {
            self.next_question();
        } else if let Some(audio) = &self.audio {
            audio.cancel();
        }
    }

    pub fn select_lesson(&mut self, lesson: u32) {
        self.selector.select_lesson(lesson);
        self.on_scope_changed();
    }

    pub fn select_all(&mut self) {
        self.selector.select_all();
        self.on_scope_changed();
    }

    /// Back to the lesson picker.
    pub fn clear_selection(&mut self) {
        self.selector.clear_selection();
        self.on_scope_changed();
    }

    fn on_scope_changed(&mut self) {
        self.quiz.clear();
        if self.tab == Tab::Quiz {
            self.next_question();
        }
    }

    pub fn next_card(&mut self) {
        let len = self.working_set().len();
        self.selector.advance(len);
    }

    pub fn prev_card(&mut self) {
        self.selector.retreat();
    }

    /// Starts a fresh quiz round over the current working set. Returns
    /// whether a question could be produced; an empty working set is the
    /// "no data" state the caller must surface.
    pub fn next_question(&mut self) -> bool {
        let working_set = self.working_set();
        self.quiz
            .generate(&working_set, &mut self.rng, self.audio.as_ref())
            .is_some()
    }

    pub fn answer(&mut self, option_id: &str) -> Option<&AnswerFeedback> {
        self.quiz.submit_answer(option_id)
    }

    /// Replays the reading of the active question on demand.
    pub fn replay_reading(&self) {
        if let (Some(question), Some(audio)) = (self.quiz.question(), &self.audio) {
            audio.speak(Utterance::reading(question.target.reading.clone()));
        }
    }

    /// Validates and appends a new dictionary entry. The collection change
    /// invalidates cursor and question state like any other.
    pub fn add_entry(&mut self, draft: &Draft) -> Result<VocabEntry, StudyError> {
        let entry = editor::submit(&mut self.store, draft)?;
        self.on_collection_changed();
        Ok(entry)
    }

    /// Discards user-added entries and restores the seed set.
    pub fn reset_to_seed(&mut self) -> Result<(), StudyError> {
        self.store.reset_to_seed()?;
        self.selector.clear_selection();
        self.on_collection_changed();
        Ok(())
    }

    fn on_collection_changed(&mut self) {
        self.selector.on_collection_changed();
        self.quiz.clear();
        if self.tab == Tab::Quiz {
            self.next_question();
        }
    }

    pub fn search(&self, query: &str, category: Option<Category>) -> Vec<VocabEntry> {
        self.selector.search(self.store.entries(), query, category)
    }

    pub async fn request_suggestion(
        &self,
        provider: &dyn SuggestionProvider,
        draft: &mut Draft,
    ) -> Result<(), StudyError> {
        editor::request_suggestion(provider, draft).await
    }

    pub async fn explain(
        &self,
        text_provider: &dyn ExplanationProvider,
        image_provider: &dyn ImageProvider,
        entry: &VocabEntry,
    ) -> Explanation {
        crate::ai::explain_entry(text_provider, image_provider, entry).await
    }
}
