use serde::Serialize;
use thiserror::Error;

pub const PRESETS_MINUTES: [u32; 4] = [15, 25, 45, 60];
pub const DEFAULT_PRESET_MINUTES: u32 = 25;
pub const BREAK_SECONDS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Work,
    Break,
}

/// Emitted by `FocusTimer::tick` when a countdown runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    WorkFinished { sessions: u32 },
    BreakFinished,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported preset {0} minutes")]
pub struct InvalidPreset(pub u32);

#[derive(Debug, Clone)]
pub struct FocusTimer {
    mode: TimerMode,
    remaining: u32,
    running: bool,
    preset_minutes: u32,
    sessions: u32,
}

#[derive(Debug, Serialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub remaining_seconds: u32,
    pub clock: String,
    pub running: bool,
    pub preset_minutes: u32,
    pub sessions: u32,
    /// Completed sessions times the current preset.
    pub focus_minutes: u32,
    pub progress: u8,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_PRESET_MINUTES)
    }
}

impl FocusTimer {
    pub fn new(preset_minutes: u32) -> Self {
        Self {
            mode: TimerMode::Work,
            remaining: preset_minutes * 60,
            running: false,
            preset_minutes,
            sessions: 0,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Length of the current mode in seconds.
    pub fn duration(&self) -> u32 {
        match self.mode {
            TimerMode::Work => self.preset_minutes * 60,
            TimerMode::Break => BREAK_SECONDS,
        }
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.mode = TimerMode::Work;
        self.remaining = self.preset_minutes * 60;
    }

    pub fn select_preset(&mut self, minutes: u32) -> Result<(), InvalidPreset> {
        if !PRESETS_MINUTES.contains(&minutes) {
            return Err(InvalidPreset(minutes));
        }
        self.preset_minutes = minutes;
        self.reset();
        Ok(())
    }

    /// Advances a running timer by one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        self.running = false;
        match self.mode {
            TimerMode::Work => {
                self.sessions += 1;
                self.mode = TimerMode::Break;
                self.remaining = BREAK_SECONDS;
                Some(TimerEvent::WorkFinished {
                    sessions: self.sessions,
                })
            }
            TimerMode::Break => {
                self.mode = TimerMode::Work;
                self.remaining = self.preset_minutes * 60;
                Some(TimerEvent::BreakFinished)
            }
        }
    }

    pub fn progress(&self) -> u8 {
        let duration = self.duration();
        if duration == 0 {
            return 0;
        }
        let elapsed = duration.saturating_sub(self.remaining);
        (u64::from(elapsed) * 100 / u64::from(duration)) as u8
    }

    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            remaining_seconds: self.remaining,
            clock: self.clock(),
            running: self.running,
            preset_minutes: self.preset_minutes,
            sessions: self.sessions,
            focus_minutes: self.sessions * self.preset_minutes,
            progress: self.progress(),
        }
    }
}
