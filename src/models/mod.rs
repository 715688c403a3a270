// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models for measurements and saved job records.

pub mod dimension;
pub mod draft;
pub mod record;
