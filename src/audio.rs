use crate::logger;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub const DEFAULT_LANG: &str = "ja-JP";
pub const DEFAULT_RATE: f32 = 0.85;

/// Delay before the quiz cue fires, giving the question time to settle on
/// screen before the reading is spoken.
pub const QUIZ_CUE_DELAY: Duration = Duration::from_millis(500);

/// One speech request for the audio collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
}

impl Utterance {
    pub fn reading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: DEFAULT_LANG.to_string(),
            rate: DEFAULT_RATE,
        }
    }
}

/// The audio collaborator. `speak` blocks for the duration of playback;
/// `cancel` stops an in-flight utterance.
pub trait Speaker: Send {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), String>;
    fn cancel(&mut self);
}

#[derive(Debug)]
enum AudioCommand {
    Speak { utterance: Utterance, delay: Duration },
    Cancel,
}

/// Handle to the audio worker. Playback is fire-and-forget with no
/// backpressure: a new request supersedes any pending one.
#[derive(Debug, Clone)]
pub struct AudioHandle {
    tx: Sender<AudioCommand>,
}

impl AudioHandle {
    pub fn speak(&self, utterance: Utterance) {
        self.speak_after(utterance, Duration::ZERO);
    }

    pub fn speak_after(&self, utterance: Utterance, delay: Duration) {
        let _ = self.tx.send(AudioCommand::Speak { utterance, delay });
    }

    pub fn cancel(&self) {
        let _ = self.tx.send(AudioCommand::Cancel);
    }
}

/// Collapses everything sitting in the channel onto the newest command, so
/// the mailbox behaves as a single slot with last-request-wins semantics.
fn drain_to_latest(rx: &Receiver<AudioCommand>, mut current: AudioCommand) -> AudioCommand {
    while let Ok(newer) = rx.try_recv() {
        current = newer;
    }
    current
}

pub fn spawn_audio_worker(mut speaker: Box<dyn Speaker>) -> (AudioHandle, thread::JoinHandle<()>) {
    let (tx, rx) = unbounded::<AudioCommand>();

    let handle = thread::Builder::new()
        .name("vocab-trainer::audio_worker".to_string())
        .spawn(move || {
            loop {
                let Ok(command) = rx.recv() else {
                    // Channel disconnected, exit worker
                    logger::log("Audio worker channel disconnected, exiting");
                    break;
                };

                match drain_to_latest(&rx, command) {
                    AudioCommand::Cancel => speaker.cancel(),
                    AudioCommand::Speak { utterance, delay } => {
                        if !delay.is_zero() {
                            thread::sleep(delay);
                        }
                        // A request may have arrived while we slept; it wins.
                        match drain_to_latest(
                            &rx,
                            AudioCommand::Speak {
                                utterance,
                                delay: Duration::ZERO,
                            },
                        ) {
                            AudioCommand::Cancel => speaker.cancel(),
                            AudioCommand::Speak { utterance, .. } => {
                                speaker.cancel();
                                if let Err(e) = speaker.speak(&utterance) {
                                    logger::log(&format!("Audio playback failed: {}", e));
                                }
                            }
                        }
                    }
                }
            }
        })
        .expect("Failed to spawn audio worker thread");

    (AudioHandle { tx }, handle)
}
