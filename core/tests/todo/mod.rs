// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Record-model integration tests.

mod grouping;
mod schedule;
mod status;
mod trash;
