use crate::model::{ConnectionRecord, FilterMode};

/// Keeps the records whose state matches `mode`, in their original order.
///
/// States are compared exactly as the source reported them.
pub fn apply(records: Vec<ConnectionRecord>, mode: FilterMode) -> Vec<ConnectionRecord> {
    match mode {
        FilterMode::Any => records,
        _ => records.into_iter().filter(|r| r.state == mode.as_str()).collect(),
    }
}
