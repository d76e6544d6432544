//! Muted autoplay for the home video. Browsers may refuse `play()` until
//! the user interacts, so every attempt is repeated on the next gesture
//! or when the tab becomes visible again.

use crate::utils::dom::{self, ListenOptions};
use crate::utils::error::{describe_js, SiteError};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, HtmlVideoElement, Window};

pub const VIDEO_SELECTOR: &str = ".home-video__video";

/// Playback counts as running above `HAVE_CURRENT_DATA`.
const HAVE_CURRENT_DATA: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    AlreadyPlaying,
    Started,
    /// Rejected by the browser; retried on the next qualifying event.
    Deferred,
    Unsupported,
}

impl PlaybackOutcome {
    pub fn wants_retry(self) -> bool {
        self == PlaybackOutcome::Deferred
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlaybackSnapshot {
    pub paused: bool,
    pub ended: bool,
    pub ready_state: u16,
}

impl PlaybackSnapshot {
    fn of(video: &HtmlVideoElement) -> Self {
        Self { paused: video.paused(), ended: video.ended(), ready_state: video.ready_state() }
    }

    pub fn is_playing(&self) -> bool {
        !self.paused && !self.ended && self.ready_state > HAVE_CURRENT_DATA
    }
}

pub async fn try_play(doc: &Document) -> PlaybackOutcome {
    let Some(video) = dom::query(doc, VIDEO_SELECTOR)
        .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
    else {
        return PlaybackOutcome::Unsupported;
    };
    if PlaybackSnapshot::of(&video).is_playing() {
        return PlaybackOutcome::AlreadyPlaying;
    }
    video.set_muted(true);
    let promise = match video.play() {
        Ok(promise) => promise,
        Err(e) => {
            log::debug!("video.play() threw: {}", describe_js(&e));
            return PlaybackOutcome::Unsupported;
        }
    };
    match JsFuture::from(promise).await {
        Ok(_) => PlaybackOutcome::Started,
        Err(e) => {
            log::debug!("autoplay deferred: {}", describe_js(&e));
            PlaybackOutcome::Deferred
        }
    }
}

/// Remembers whether the video got going. Gesture listeners stay attached
/// and keep retrying until it does.
#[derive(Debug, Default)]
pub struct AutoplayGate {
    settled: Cell<bool>,
    pending: Cell<bool>,
}

impl AutoplayGate {
    pub fn should_attempt(&self) -> bool {
        !self.settled.get() && !self.pending.get()
    }

    /// Claims the next attempt; `false` if one is running or playback started.
    pub fn begin(&self) -> bool {
        if !self.should_attempt() {
            return false;
        }
        self.pending.set(true);
        true
    }

    pub fn record(&self, outcome: PlaybackOutcome) {
        self.pending.set(false);
        match outcome {
            PlaybackOutcome::Started | PlaybackOutcome::AlreadyPlaying => self.settled.set(true),
            // The element may be inserted later, so keep trying.
            PlaybackOutcome::Deferred | PlaybackOutcome::Unsupported => {}
        }
    }
}

fn kick(doc: Document, gate: Rc<AutoplayGate>, reason: &'static str) {
    if !gate.begin() {
        return;
    }
    spawn_local(async move {
        let outcome = try_play(&doc).await;
        gate.record(outcome);
        if outcome.wants_retry() {
            log::debug!("home video deferred on {}, waiting for next gesture", reason);
        } else if outcome != PlaybackOutcome::Unsupported {
            log::debug!("home video on {}: {:?}", reason, outcome);
        }
    });
}

pub fn install(window: &Window, doc: &Document) -> Result<(), SiteError> {
    let gate = Rc::new(AutoplayGate::default());
    {
        let doc = doc.clone();
        let gate = Rc::clone(&gate);
        dom::on_window_load(move || kick(doc, gate, "load"))?;
    }
    for event in ["click", "touchstart", "scroll"] {
        let doc = doc.clone();
        let gate = Rc::clone(&gate);
        dom::listen(window, event, ListenOptions::PASSIVE, move |_| {
            kick(doc.clone(), Rc::clone(&gate), event)
        })?;
    }
    let d = doc.clone();
    dom::listen(doc, "visibilitychange", ListenOptions::PASSIVE, move |_| {
        if !d.hidden() {
            kick(d.clone(), Rc::clone(&gate), "visibilitychange");
        }
    })
}
