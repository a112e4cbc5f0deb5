use crate::model::{ConnectionRecord, DisplayRow};

/// Shown instead of port 0 (unbound or wildcard).
pub const WILDCARD_PORT: &str = "*";

/// Filler slots in the reference layout. Its padding loop ran `0..=25`,
/// which is why the default floor is one more than this.
pub const FILLER_SLOTS: usize = 25;

/// Default padding floor for the table.
pub const DEFAULT_MIN_ROWS: usize = FILLER_SLOTS + 1;

pub fn format_port(port: u16) -> String {
    if port == 0 {
        WILDCARD_PORT.to_string()
    } else {
        port.to_string()
    }
}

pub fn format(record: &ConnectionRecord) -> DisplayRow {
    [
        record.protocol.to_uppercase(),
        format!("{}:{}", record.local_address, format_port(record.local_port)),
        format!("{}:{}", record.remote_address, format_port(record.remote_port)),
        record.state.clone(),
    ]
}

pub fn filler_row() -> DisplayRow {
    [
        "---".to_string(),
        "---.---.---.---".to_string(),
        "---.---.---.---".to_string(),
        "<---->".to_string(),
    ]
}

/// Appends filler rows until there are at least `min_count` rows.
/// Never truncates.
pub fn pad_to(mut rows: Vec<DisplayRow>, min_count: usize) -> Vec<DisplayRow> {
    let missing = min_count.saturating_sub(rows.len());
    rows.extend(std::iter::repeat_with(filler_row).take(missing));
    rows
}
