//! Sequential chord playback with preemption
//!
//! A dedicated thread plays one chord after another. Every call to
//! [`PlaybackEngine::play`] takes a new generation number; the thread checks
//! the generation before each chord and while waiting, so starting a new
//! sequence abandons whatever was still scheduled from the old one.

use crate::playback::config::PlaybackConfig;
use crate::playback::midi::MidiSink;
use crate::playback::sink::ChordSink;
use anyhow::{anyhow, Result};
use chordwalk_core::types::{AbsoluteNote, PositionedChordProgression, TRIAD_SIZE};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

pub type ChordPitches = [AbsoluteNote; TRIAD_SIZE];

/// Commands sent to the playback thread
enum PlaybackCommand {
    Play {
        generation: u64,
        chords: Vec<ChordPitches>,
        config: PlaybackConfig,
    },
    Stop,
    ConnectMidi {
        port_name: String,
        reply: Sender<Result<String>>,
    },
    UseSink(Box<dyn ChordSink + Send>),
    Shutdown,
}

/// Handle to the playback thread
pub struct PlaybackEngine {
    command_tx: Sender<PlaybackCommand>,
    generation: Arc<AtomicU64>,
    is_playing: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackEngine {
    /// Start the playback thread, sounding chords through `sink`
    pub fn new(sink: Box<dyn ChordSink + Send>) -> Self {
        let (tx, rx) = unbounded();
        let generation = Arc::new(AtomicU64::new(0));
        let is_playing = Arc::new(AtomicBool::new(false));

        let worker_generation = generation.clone();
        let worker_is_playing = is_playing.clone();
        // The loop is built on its own thread so sinks it opens later (MIDI) never cross threads
        let thread = thread::spawn(move || {
            PlaybackLoop {
                sink,
                command_rx: rx,
                generation: worker_generation,
                is_playing: worker_is_playing,
                current: None,
            }
            .run()
        });

        PlaybackEngine {
            command_tx: tx,
            generation,
            is_playing,
            thread: Some(thread),
        }
    }

    /// Play `chords` in order, cancelling any sequence already in flight
    pub fn play(&self, chords: Vec<ChordPitches>, config: PlaybackConfig) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.is_playing.store(true, Ordering::SeqCst);
        self.send(PlaybackCommand::Play {
            generation,
            chords,
            config,
        })
    }

    /// Realize a positioned progression above `config.root` and play it
    pub fn play_progression(
        &self,
        progression: &PositionedChordProgression,
        config: PlaybackConfig,
    ) -> Result<()> {
        self.play(progression.realize(config.root), config)
    }

    /// Stop playback and silence the output
    pub fn stop(&self) -> Result<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.is_playing.store(false, Ordering::SeqCst);
        self.send(PlaybackCommand::Stop)
    }

    /// Open a MIDI port on the playback thread; returns the full port name
    pub fn connect_midi(&self, port_name: &str) -> Result<String> {
        let (reply_tx, reply_rx) = bounded(1);
        self.send(PlaybackCommand::ConnectMidi {
            port_name: port_name.to_string(),
            reply: reply_tx,
        })?;
        reply_rx
            .recv()
            .map_err(|_| anyhow!("Playback thread stopped"))?
    }

    /// Replace the output, e.g. to fall back from MIDI to the terminal
    pub fn use_sink(&self, sink: Box<dyn ChordSink + Send>) -> Result<()> {
        self.send(PlaybackCommand::UseSink(sink))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::SeqCst)
    }

    fn send(&self, command: PlaybackCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|e| anyhow!("Failed to send command: {}", e))
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.command_tx.send(PlaybackCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// A sequence being played
struct ActiveSequence {
    generation: u64,
    chords: Vec<ChordPitches>,
    next_chord: usize,
    config: PlaybackConfig,
}

enum LoopAction {
    Continue,
    Shutdown,
}

struct PlaybackLoop {
    sink: Box<dyn ChordSink>,
    command_rx: Receiver<PlaybackCommand>,
    generation: Arc<AtomicU64>,
    is_playing: Arc<AtomicBool>,
    current: Option<ActiveSequence>,
}

impl PlaybackLoop {
    fn run(mut self) {
        loop {
            let action = if self.current.is_some() {
                self.play_next_chord()
            } else {
                match self.command_rx.recv() {
                    Ok(cmd) => self.handle_command(cmd),
                    Err(_) => LoopAction::Shutdown,
                }
            };

            if let LoopAction::Shutdown = action {
                break;
            }
        }

        if let Err(e) = self.sink.stop() {
            warn!("Failed to silence output: {}", e);
        }
        self.is_playing.store(false, Ordering::SeqCst);
    }

    fn handle_command(&mut self, cmd: PlaybackCommand) -> LoopAction {
        match cmd {
            PlaybackCommand::Play {
                generation,
                chords,
                config,
            } => {
                debug!("starting sequence {} ({} chords)", generation, chords.len());
                self.current = Some(ActiveSequence {
                    generation,
                    chords,
                    next_chord: 0,
                    config,
                });
            }
            PlaybackCommand::Stop => {
                self.current = None;
                self.silence();
            }
            PlaybackCommand::ConnectMidi { port_name, reply } => {
                let result = MidiSink::connect(&port_name).map(|sink| {
                    let name = sink.name();
                    self.replace_sink(Box::new(sink));
                    name
                });
                let _ = reply.send(result);
            }
            PlaybackCommand::UseSink(sink) => self.replace_sink(sink),
            PlaybackCommand::Shutdown => return LoopAction::Shutdown,
        }
        LoopAction::Continue
    }

    fn replace_sink(&mut self, sink: Box<dyn ChordSink>) {
        self.silence();
        info!("playback output: {}", sink.name());
        self.sink = sink;
    }

    fn silence(&mut self) {
        if let Err(e) = self.sink.stop() {
            warn!("Failed to silence output: {}", e);
        }
    }

    fn play_next_chord(&mut self) -> LoopAction {
        let Some(sequence) = self.current.as_mut() else {
            return LoopAction::Continue;
        };

        // A newer play or stop request makes this sequence stale
        let latest = self.generation.load(Ordering::SeqCst);
        if sequence.generation != latest {
            debug!("sequence {} preempted by {}", sequence.generation, latest);
            self.current = None;
            return LoopAction::Continue;
        }

        let Some(chord) = sequence.chords.get(sequence.next_chord).copied() else {
            // Let the final chord ring for its full duration before silencing
            let generation = sequence.generation;
            self.current = None;
            self.silence();
            if self.generation.load(Ordering::SeqCst) == generation {
                self.is_playing.store(false, Ordering::SeqCst);
            }
            return LoopAction::Continue;
        };
        sequence.next_chord += 1;

        let mut pitches = chord;
        pitches.sort_unstable();
        let config = sequence.config.clone();
        if let Err(e) = self.sink.play_chord(&pitches, &config) {
            warn!("Failed to play chord {:?}: {}", pitches, e);
        }

        self.wait_with_command_check(Instant::now() + config.chord_delay)
    }

    /// Wait until `deadline`, handling commands that arrive meanwhile
    fn wait_with_command_check(&mut self, deadline: Instant) -> LoopAction {
        loop {
            match self.command_rx.recv_deadline(deadline) {
                Ok(cmd) => {
                    let preempts =
                        matches!(cmd, PlaybackCommand::Play { .. } | PlaybackCommand::Stop);
                    if let LoopAction::Shutdown = self.handle_command(cmd) {
                        return LoopAction::Shutdown;
                    }
                    if preempts {
                        return LoopAction::Continue;
                    }
                }
                Err(RecvTimeoutError::Timeout) => return LoopAction::Continue,
                Err(RecvTimeoutError::Disconnected) => return LoopAction::Shutdown,
            }
        }
    }
}
