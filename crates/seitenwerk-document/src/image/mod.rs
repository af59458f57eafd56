// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — encoding rendered page frames for re-embedding.

pub mod jpeg;

pub use jpeg::{EncodedPage, encode_frame};
