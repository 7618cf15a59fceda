use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use crate::reliability::TimeUnit;

const HOUR: f64 = 3600.0;
const DAY: f64 = 24.0 * HOUR;

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Renders a duration as seconds/minutes/hours/days, whichever reads best.
pub fn human_duration(value: f64, unit: TimeUnit) -> String {
    let seconds = match unit {
        TimeUnit::Seconds => value,
        TimeUnit::Minutes => value * 60.0,
    };

    if seconds < 60.0 {
        format!("{seconds:.0}s")
    } else if seconds < HOUR {
        format!("{:.1}min", seconds / 60.0)
    } else if seconds < DAY {
        format!("{:.1}h", seconds / HOUR)
    } else {
        format!("{:.1}d", seconds / DAY)
    }
}

pub fn color_coded_repair_cell(value: f64, unit: TimeUnit) -> Cell {
    let text = human_duration(value, unit);
    let seconds = match unit {
        TimeUnit::Seconds => value,
        TimeUnit::Minutes => value * 60.0,
    };

    if seconds <= HOUR {
        Cell::new(text).fg(TableColor::Green)
    } else if seconds <= DAY {
        Cell::new(text).fg(TableColor::Yellow)
    } else {
        Cell::new(text).fg(TableColor::Red)
    }
}
