// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render error types.

use thiserror::Error;

use crate::context::CtxId;

/// Precondition failures that abort a render call.
///
/// Geometric degeneracies are not errors: they recover locally inside the
/// pipeline and never surface here.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// The context's canvas surface has no drawable area.
    #[error("context {ctx:?} has no drawable canvas surface ({width}x{height})")]
    CanvasUnavailable {
        /// The offending context.
        ctx: CtxId,
        /// Canvas width in pixels.
        width: f64,
        /// Canvas height in pixels.
        height: f64,
    },
}
