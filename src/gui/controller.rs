use std::time::Instant;

use kiss3d::event::{Event, WindowEvent};
use tracing::{debug, info};

// Stands in for the display-refresh scheduler: it owns the clock the frame
// updater is driven by, and keeps some bookkeeping about frames and window
// events.
pub struct Controller {
    started: Instant,
    frames: u64,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    /// Returns true when a new value was just computed.
    pub fn increment(&mut self) -> bool {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
            true
        } else {
            false
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            started: Instant::now(),
            frames: 0,
            fps_counter: FpsCounter::new(5000),
        }
    }

    /// Milliseconds since startup; what the frame updater gets each frame.
    pub fn elapsed_millis(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn process_event(&mut self, event: Event) {
        // Camera input is handled by the camera itself; kiss3d forwards
        // events to it before we get to see them.
        match event.value {
            WindowEvent::FramebufferSize(w, h) => {
                info!(width = w, height = h, "viewport resized");
            }
            WindowEvent::Close => {
                info!(frames = self.frames, "window closed");
            }
            _ => {}
        }
    }

    pub fn increment_frame_counter(&mut self) {
        self.frames += 1;
        if self.fps_counter.increment() {
            debug!(fps = self.fps(), frames = self.frames, "frame rate");
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
