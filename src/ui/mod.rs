// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the flooring notes application.

pub mod form;
pub mod record_list;
pub mod toolbar;
