/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::time::Duration;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_PAGE_SIZE: u64 = 256;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
