// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    zero          = { 0,       "00:00:00" },
    seconds       = { 59,      "00:00:59" },
    one_minute    = { 60,      "00:01:00" },
    mixed         = { 3_723,   "01:02:03" },
    one_day       = { 86_400,  "24:00:00" },
    past_99_hours = { 360_000, "100:00:00" },
)]
fn format_hms_cases(secs: u64, expected: &str) {
    assert_eq!(format_hms(secs), expected);
}
