//! Live editing session.
//!
//! A [`Session`] drives two pipelines from one event stream:
//!
//! - annotations are rebuilt immediately on every text change or setting
//!   change,
//! - aggregate statistics are debounced and computed at most once per burst
//!   of edits, when [`Session::poll`] is called after the quiet period.
//!
//! Time is always passed in by the caller, so the session never reads a
//! clock itself.

use std::time::{Duration, Instant};

use crate::annotate::{AnalysisContext, AnnotationSet, build_annotations};
use crate::config::{AnalysisSettings, TargetGrade};
use crate::dictionaries::easy_words::EasyWordSet;
use crate::document::Document;
use crate::error::EasyWordsError;
use crate::readability::{ReadabilityReport, check_readability};

/// Single-slot deadline timer.
///
/// Scheduling replaces any pending deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create an idle debouncer with the given quiet period.
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Quiet period.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending deadline and schedule a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending deadline.
    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pending deadline, if any.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Something that happened to the document or the settings.
#[derive(Debug)]
pub enum Event {
    /// The editing surface produced a new snapshot.
    DocumentChanged {
        /// The new snapshot.
        document: Document,
        /// False for selection-only or metadata changes.
        text_changed: bool,
    },
    /// The writer picked a different target grade.
    TargetGradeChanged(TargetGrade),
    /// Hard-word flagging was switched on or off.
    ShowHardWordsChanged(bool),
    /// The external easy-word list finished loading.
    EasyWordsLoaded(Result<EasyWordSet, EasyWordsError>),
}

/// Owns the current snapshot and everything derived from it.
#[derive(Debug)]
pub struct Session {
    document: Document,
    settings: AnalysisSettings,
    easy_words: EasyWordSet,
    annotations: AnnotationSet,
    stats: Option<ReadabilityReport>,
    stats_runs: u64,
    debouncer: Debouncer,
}

impl Session {
    /// Start a session over an empty document with the seed easy-word set.
    pub fn new(settings: AnalysisSettings, stats_debounce: Duration) -> Self {
        Self {
            document: Document::default(),
            settings,
            easy_words: EasyWordSet::seed(),
            annotations: AnnotationSet::default(),
            stats: None,
            stats_runs: 0,
            debouncer: Debouncer::new(stats_debounce),
        }
    }

    /// Apply one event.
    ///
    /// Returns `true` when the annotation set was rebuilt.
    #[tracing::instrument(skip_all)]
    pub fn handle(&mut self, event: Event, now: Instant) -> bool {
        match event {
            Event::DocumentChanged {
                document,
                text_changed,
            } => {
                self.document = document;
                if !text_changed {
                    return false;
                }
                self.debouncer.schedule(now);
            }
            Event::TargetGradeChanged(grade) => {
                tracing::debug!(target_grade = grade.as_u8(), "target grade changed");
                self.settings.target_grade = grade;
            }
            Event::ShowHardWordsChanged(show) => {
                tracing::debug!(show_hard_words = show, "hard-word flagging toggled");
                self.settings.show_hard_words = show;
            }
            Event::EasyWordsLoaded(Ok(words)) => {
                tracing::debug!(words = words.len(), "easy-word list replaced");
                self.easy_words = words;
            }
            Event::EasyWordsLoaded(Err(error)) => {
                tracing::warn!(%error, "easy-word list unavailable, keeping current set");
                return false;
            }
        }
        self.rebuild();
        true
    }

    /// Run the debounced statistics computation if its deadline has passed.
    ///
    /// Returns the fresh report when one was computed.
    pub fn poll(&mut self, now: Instant) -> Option<&ReadabilityReport> {
        if !self.debouncer.take_due(now) {
            return None;
        }
        self.stats_runs += 1;
        // an empty document has no statistics to report
        self.stats = check_readability(&self.document.plain_text(), false, None).ok();
        tracing::debug!(runs = self.stats_runs, "statistics recomputed");
        self.stats.as_ref()
    }

    fn rebuild(&mut self) {
        let ctx = AnalysisContext::new(&self.settings, &self.easy_words);
        self.annotations = build_annotations(&self.document, &ctx);
    }

    /// When statistics are next due, for event-loop timeouts.
    pub const fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Quiet period before statistics are recomputed.
    pub const fn stats_debounce(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Current annotation set.
    pub const fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Last statistics report.
    pub const fn stats(&self) -> Option<&ReadabilityReport> {
        self.stats.as_ref()
    }

    /// How many times statistics have been computed.
    pub const fn stats_runs(&self) -> u64 {
        self.stats_runs
    }

    /// Current snapshot.
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Current settings.
    pub const fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Current easy-word set.
    pub const fn easy_words(&self) -> &EasyWordSet {
        &self.easy_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionaries::easy_words::EasyWordSource;

    const DELAY: Duration = Duration::from_millis(250);

    fn session() -> Session {
        Session::new(
            AnalysisSettings {
                target_grade: TargetGrade::Six,
                ..AnalysisSettings::default()
            },
            DELAY,
        )
    }

    fn edit(text: &str) -> Event {
        Event::DocumentChanged {
            document: Document::from_plain_text(text),
            text_changed: true,
        }
    }

    #[test]
    fn debouncer_reschedules_and_fires_once() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        assert_eq!(debouncer.delay(), DELAY);
        debouncer.schedule(t0);
        debouncer.schedule(t0 + Duration::from_millis(100));
        assert!(!debouncer.take_due(t0 + DELAY));
        assert!(debouncer.take_due(t0 + Duration::from_millis(350)));
        assert!(!debouncer.take_due(t0 + Duration::from_secs(5)));
        debouncer.schedule(t0);
        debouncer.cancel();
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn session_reports_its_stats_debounce() {
        assert_eq!(session().stats_debounce(), DELAY);
    }

    #[test]
    fn burst_of_edits_computes_stats_once() {
        let t0 = Instant::now();
        let mut session = session();
        let texts = ["We", "We utilize", "We utilize it.", "We utilize it. Yes."];
        for (i, text) in texts.iter().enumerate() {
            let now = t0 + Duration::from_millis(50 * i as u64);
            assert!(session.handle(edit(text), now));
            assert!(session.poll(now).is_none());
        }
        // annotations kept up with every edit
        assert_eq!(session.annotations().word_count(), 1);

        let last_edit = t0 + Duration::from_millis(150);
        assert!(session.poll(last_edit + DELAY - Duration::from_millis(1)).is_none());
        let report = session.poll(last_edit + DELAY).expect("stats due");
        assert_eq!(report.words, 4);
        assert_eq!(report.sentences, 2);
        assert!(session.poll(last_edit + DELAY * 4).is_none());
        assert_eq!(session.stats_runs(), 1);
    }

    #[test]
    fn non_text_change_does_not_rebuild_or_schedule() {
        let t0 = Instant::now();
        let mut session = session();
        assert!(!session.handle(
            Event::DocumentChanged {
                document: Document::from_plain_text("We utilize it."),
                text_changed: false,
            },
            t0,
        ));
        assert!(session.annotations().is_empty());
        assert_eq!(session.deadline(), None);
    }

    #[test]
    fn setting_changes_rebuild_immediately() {
        let t0 = Instant::now();
        let mut session = session();
        session.handle(edit("We utilize it."), t0);
        assert_eq!(session.annotations().word_count(), 1);

        session.handle(Event::ShowHardWordsChanged(false), t0);
        assert!(session.annotations().is_empty());

        session.handle(Event::ShowHardWordsChanged(true), t0);
        // "utilize" has 3 syllables: under the grade 10 threshold
        session.handle(Event::TargetGradeChanged(TargetGrade::Ten), t0);
        assert!(session.annotations().is_empty());
        assert_eq!(session.settings().target_grade, TargetGrade::Ten);
    }

    #[test]
    fn failed_easy_word_load_keeps_seed() {
        let t0 = Instant::now();
        let mut session = session();
        session.handle(edit("We utilize it."), t0);
        let before = session.annotations().clone();

        let failure = EasyWordSet::from_json("{}").unwrap_err();
        assert!(!session.handle(Event::EasyWordsLoaded(Err(failure)), t0));
        assert_eq!(session.easy_words().source(), EasyWordSource::Seed);
        assert_eq!(session.annotations(), &before);
    }

    #[test]
    fn loaded_easy_words_replace_seed_and_rebuild() {
        let t0 = Instant::now();
        let mut session = session();
        session.handle(edit("We utilize it."), t0);
        assert_eq!(session.annotations().word_count(), 1);

        let words = EasyWordSet::from_words(["utilize"]);
        assert!(session.handle(Event::EasyWordsLoaded(Ok(words)), t0));
        assert_eq!(session.easy_words().source(), EasyWordSource::Loaded);
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn empty_document_reports_no_stats() {
        let t0 = Instant::now();
        let mut session = session();
        session.handle(edit("   "), t0);
        assert!(session.poll(t0 + DELAY).is_none());
        assert!(session.stats().is_none());
        assert_eq!(session.stats_runs(), 1);
    }
}
