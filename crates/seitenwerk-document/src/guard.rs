// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-flight guard — at most one document operation runs at a time.

use std::cell::Cell;

use seitenwerk_core::error::{Result, SeitenwerkError};

/// Tracks whether an operation is in flight.
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: Cell<bool>,
}

/// Held for the duration of one operation; releases the slot on drop.
#[derive(Debug)]
pub struct FlightPermit<'a> {
    busy: &'a Cell<bool>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or fail with `Busy` if an operation is already running.
    pub fn acquire(&self) -> Result<FlightPermit<'_>> {
        if self.busy.replace(true) {
            return Err(SeitenwerkError::Busy);
        }
        Ok(FlightPermit { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_busy_until_release() {
        let flight = SingleFlight::new();
        let permit = flight.acquire().unwrap();
        assert!(flight.is_busy());
        assert!(matches!(flight.acquire(), Err(SeitenwerkError::Busy)));
        drop(permit);
        assert!(!flight.is_busy());
        assert!(flight.acquire().is_ok());
    }
}
