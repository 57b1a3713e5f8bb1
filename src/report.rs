/*
 * This file is part of psumon.
 *
 * Copyright (C) 2025 psumon contributors
 *
 * psumon is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * psumon is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with psumon. If not, see <https://www.gnu.org/licenses/>.
 */

//! Text rendering of PSU snapshots

use std::collections::BTreeMap;
use std::fmt::Write;

use psu_core::{PsuSnapshot, Quantity, SystemSnapshot};

/// Format an optional reading with its unit, `--` when unavailable
pub fn format_reading(value: Option<f64>, precision: usize, quantity: Quantity) -> String {
    match value {
        Some(v) => format!("{:.*} {}", precision, v, quantity.unit()),
        None => format!("-- {}", quantity.unit()),
    }
}

pub fn format_rpm_optional(rpm: Option<u32>) -> String {
    match rpm {
        Some(r) => format!("{} RPM", r),
        None => "-- RPM".to_string(),
    }
}

fn yes_no(v: bool) -> &'static str {
    if v {
        "yes"
    } else {
        "no"
    }
}

/// Multi-line description of one PSU
pub fn render_psu(psu: &PsuSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (slot {})", psu.name, psu.position_in_parent);
    let _ = writeln!(out, "  present:      {}", yes_no(psu.presence));
    let _ = writeln!(out, "  power good:   {}", yes_no(psu.powergood));
    let _ = writeln!(out, "  replaceable:  {}", yes_no(psu.replaceable));
    let _ = writeln!(out, "  model:        {}", psu.model);
    let _ = writeln!(out, "  serial:       {}", psu.serial);
    let _ = writeln!(out, "  revision:     {}", psu.revision);
    let _ = writeln!(
        out,
        "  voltage:      {} (low {}, high {})",
        format_reading(psu.voltage, 3, Quantity::Voltage),
        format_reading(psu.voltage_low_threshold, 3, Quantity::Voltage),
        format_reading(psu.voltage_high_threshold, 3, Quantity::Voltage),
    );
    let _ = writeln!(out, "  current:      {}", format_reading(psu.current, 3, Quantity::Current));
    let _ = writeln!(
        out,
        "  power:        {} (max {})",
        format_reading(psu.power, 3, Quantity::Power),
        format_reading(psu.max_supplied_power, 1, Quantity::Power),
    );
    let _ = writeln!(
        out,
        "  temperature:  {} (high {})",
        format_reading(psu.temperature, 1, Quantity::Temperature),
        format_reading(psu.temperature_high_threshold, 1, Quantity::Temperature),
    );
    for fan in &psu.fans {
        let _ = writeln!(
            out,
            "  {}:    {}{}",
            fan.name,
            format_rpm_optional(fan.speed_rpm),
            if fan.presence { "" } else { " (absent)" }
        );
    }
    out
}

/// Full status report, optionally restricted to one PSU index
pub fn render_status(snapshot: &SystemSnapshot, index: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Platform: {}",
        snapshot.platform.as_deref().unwrap_or("unknown")
    );
    for psu in snapshot
        .psus
        .iter()
        .filter(|p| index.map_or(true, |i| p.index == i))
    {
        out.push('\n');
        out.push_str(&render_psu(psu));
    }
    out
}

/// `KEY = VALUE` lines, sorted by key
pub fn render_vpd(entries: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        let _ = writeln!(out, "{} = {}", key, value);
    }
    out
}
