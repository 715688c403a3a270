// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: key-value persistence, PDF reports and backups.

pub mod persistence;
pub mod report;
pub mod serialization;
pub mod storage;
