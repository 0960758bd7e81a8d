// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! HTTP middleware.

pub mod auth;
pub mod security;
