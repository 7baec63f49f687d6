// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin GLSL symbol definitions
//!
//! Variables are grouped by the stage that declares them; functions are
//! visible everywhere.

pub mod functions;
pub mod variables;
