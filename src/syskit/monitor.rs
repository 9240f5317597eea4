use crate::utils::error::{KitError, Result};
use parking_lot::Mutex;
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_bytes: u64,
    pub memory_percent: f32,
    pub peak_memory_bytes: u64,
    pub elapsed: Duration,
}

/// Samples CPU and memory of the current process.
///
/// CPU usage is relative to the previous sample, so the first one reads 0.
pub struct ProcessMonitor {
    system: Mutex<System>,
    pid: Pid,
    started: Instant,
    peak_memory: Mutex<u64>,
}

impl ProcessMonitor {
    pub fn new() -> Result<Self> {
        let pid = sysinfo::get_current_pid().map_err(|e| KitError::CommandError {
            message: format!("current pid unavailable: {}", e),
        })?;
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        Ok(Self {
            system: Mutex::new(system),
            pid,
            started: Instant::now(),
            peak_memory: Mutex::new(0),
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid.as_u32()
    }

    pub fn snapshot(&self) -> Option<ProcessStats> {
        let mut system = self.system.lock();
        system.refresh_memory();
        system.refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);

        let process = system.process(self.pid)?;
        let memory = process.memory();
        let total = system.total_memory();
        let memory_percent = if total > 0 {
            memory as f32 / total as f32 * 100.0
        } else {
            0.0
        };

        let mut peak = self.peak_memory.lock();
        *peak = (*peak).max(memory);

        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_bytes: memory,
            memory_percent,
            peak_memory_bytes: *peak,
            elapsed: self.started.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.snapshot() {
            tracing::info!(
                "{} - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_bytes / 1024 / 1024,
                stats.memory_percent,
                stats.peak_memory_bytes / 1024 / 1024,
                stats.elapsed
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_tracks_peak() {
        let monitor = ProcessMonitor::new().unwrap();
        assert_eq!(monitor.pid(), std::process::id());

        let first = monitor.snapshot().unwrap();
        assert!(first.memory_bytes > 0);
        assert!(first.peak_memory_bytes >= first.memory_bytes);

        let second = monitor.snapshot().unwrap();
        assert!(second.peak_memory_bytes >= first.peak_memory_bytes);
        assert!(second.elapsed >= first.elapsed);
    }
}
