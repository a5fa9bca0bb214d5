use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use crate::error::PlaybackError;
use crate::player::DeviceEvent;

use super::sink::create_sink_at;
use super::types::{AudioCmd, Clock};

/// The source currently held by the audio thread.
struct Loaded {
    sink: Sink,
    path: PathBuf,
    generation: u64,
    duration: Option<Duration>,
    clock: Clock,
    /// `Ended` already reported for this load.
    ended: bool,
}

impl Loaded {
    fn elapsed(&self) -> Duration {
        let elapsed = self.clock.elapsed();
        self.duration.map_or(elapsed, |d| elapsed.min(d))
    }
}

/// Spawn the thread owning the output stream.
///
/// `ready` receives exactly one message: whether the default output device
/// could be opened. On failure the thread exits right after.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<DeviceEvent>,
    ready: SyncSender<Result<(), PlaybackError>>,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(PlaybackError::NoOutput(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut current: Option<Loaded> = None;
        let mut volume = 1.0_f32;

        fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(from * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Load {
                    path,
                    generation,
                    duration,
                }) => {
                    if let Some(old) = current.take() {
                        old.sink.stop();
                    }
                    match create_sink_at(&stream, &path, Duration::ZERO) {
                        Ok(sink) => {
                            sink.set_volume(volume);
                            current = Some(Loaded {
                                sink,
                                path,
                                generation,
                                duration,
                                clock: Clock::default(),
                                ended: false,
                            });
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "audio thread failed to load source");
                            let _ = events.send(DeviceEvent::Error {
                                generation,
                                detail: e.to_string(),
                            });
                        }
                    }
                }

                Ok(AudioCmd::Play) => {
                    if let Some(cur) = current.as_mut() {
                        cur.sink.play();
                        cur.clock.start();
                    }
                }

                Ok(AudioCmd::Pause) => {
                    if let Some(cur) = current.as_mut() {
                        cur.sink.pause();
                        cur.clock.pause();
                    }
                }

                Ok(AudioCmd::Seek(position)) => {
                    // Scrubbing: rebuild the current sink and skip into the file.
                    let Some(cur) = current.as_mut() else {
                        continue;
                    };
                    cur.sink.stop();

                    match create_sink_at(&stream, &cur.path, position) {
                        Ok(sink) => {
                            sink.set_volume(volume);
                            if cur.clock.is_running() {
                                sink.play();
                            }
                            cur.sink = sink;
                            cur.clock.reset(position);
                            cur.ended = false;
                        }
                        Err(e) => {
                            let generation = cur.generation;
                            current = None;
                            let _ = events.send(DeviceEvent::Error {
                                generation,
                                detail: e.to_string(),
                            });
                        }
                    }
                }

                Ok(AudioCmd::SetVolume(v)) => {
                    volume = v;
                    if let Some(cur) = current.as_ref() {
                        cur.sink.set_volume(v);
                    }
                }

                Ok(AudioCmd::Stop) => {
                    if let Some(cur) = current.take() {
                        cur.sink.stop();
                    }
                }

                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if let Some(cur) = current.take() {
                        // Fade out gently before stopping.
                        if cur.clock.is_running() {
                            fade_out_sink(&cur.sink, volume, fade_out_ms);
                        }
                        cur.sink.stop();
                    }
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    let Some(cur) = current.as_mut() else {
                        continue;
                    };

                    if cur.clock.is_running() && !cur.ended && cur.sink.empty() {
                        cur.ended = true;
                        cur.clock.pause();
                        let _ = events.send(DeviceEvent::Ended {
                            generation: cur.generation,
                        });
                        continue;
                    }

                    let update = DeviceEvent::TimeUpdate {
                        generation: cur.generation,
                        elapsed: cur.elapsed(),
                        duration: cur.duration,
                    };
                    if events.send(update).is_err() {
                        break;
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
