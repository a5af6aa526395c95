// ============================================================
// SESSION STORE
// ============================================================
// Session-scoped export buffers for the download endpoint

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::error::AppError;
use crate::domain::table::Table;

const NO_DATA_HINT: &str = "no duplicate rows available for download. Upload a CSV file first.";

/// Key-value store of serialized duplicate subsets, keyed by session id.
/// Each capture replaces the session's previous buffer; an upload without
/// duplicates clears it. Export reads the buffer without consuming it.
#[derive(Clone, Default)]
pub struct SessionStore {
    buffers: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // The map stays consistent across a panicking holder (every write is a
    // single insert or remove), so a poisoned lock is safe to recover.
    fn buffers(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.buffers.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot the duplicate subset for a session. Returns whether the
    /// session now has duplicates available for download.
    pub fn capture(&self, session_id: &str, subset: &Table) -> Result<bool, AppError> {
        if subset.is_empty() {
            self.clear(session_id);
            return Ok(false);
        }

        let snapshot = serde_json::to_string(subset).map_err(|e| {
            AppError::Internal(format!("Failed to serialize duplicate rows: {}", e))
        })?;
        self.buffers().insert(session_id.to_string(), snapshot);
        tracing::debug!(session_id, rows = subset.row_count(), "Export buffer captured");
        Ok(true)
    }

    /// Rebuild the captured subset for a session
    pub fn export(&self, session_id: &str) -> Result<Table, AppError> {
        let buffers = self.buffers();
        let snapshot = buffers
            .get(session_id)
            .ok_or_else(|| AppError::NoData(NO_DATA_HINT.to_string()))?;
        serde_json::from_str(snapshot).map_err(|e| {
            AppError::Internal(format!("Failed to deserialize duplicate rows: {}", e))
        })
    }

    /// Drop the buffer for a session, if any
    pub fn clear(&self, session_id: &str) {
        self.buffers().remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;

    fn subset() -> Table {
        Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![CellValue::Int(1), CellValue::Float(2.5)],
                vec![CellValue::Text("x".to_string()), CellValue::Missing],
            ],
        )
    }

    #[test]
    fn test_capture_then_export_round_trips() {
        let store = SessionStore::new();
        let table = subset();

        assert!(store.capture("sid-1", &table).unwrap());
        let exported = store.export("sid-1").unwrap();
        assert_eq!(exported, table);
    }

    #[test]
    fn test_export_without_capture_fails() {
        let store = SessionStore::new();
        assert!(matches!(store.export("sid-1"), Err(AppError::NoData(_))));
    }

    #[test]
    fn test_empty_subset_clears_previous_buffer() {
        let store = SessionStore::new();
        store.capture("sid-1", &subset()).unwrap();

        let empty = Table::empty(vec!["a".to_string(), "b".to_string()]);
        assert!(!store.capture("sid-1", &empty).unwrap());
        assert!(matches!(store.export("sid-1"), Err(AppError::NoData(_))));
    }

    #[test]
    fn test_capture_overwrites_not_merges() {
        let store = SessionStore::new();
        store.capture("sid-1", &subset()).unwrap();

        let replacement = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![CellValue::Int(9), CellValue::Int(9)]],
        );
        store.capture("sid-1", &replacement).unwrap();

        let exported = store.export("sid-1").unwrap();
        assert_eq!(exported, replacement);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        store.capture("sid-1", &subset()).unwrap();
        assert!(matches!(store.export("sid-2"), Err(AppError::NoData(_))));
    }

    #[test]
    fn test_store_survives_a_poisoned_lock() {
        let store = SessionStore::new();
        let table = subset();
        store.capture("sid-1", &table).unwrap();

        // Poison the mutex by panicking while holding the guard
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.buffers.lock().unwrap();
            panic!("poison the session store lock");
        })
        .join();

        let exported = store.export("sid-1").unwrap();
        assert_eq!(exported, table);
        assert!(store.capture("sid-2", &table).unwrap());
    }

    #[test]
    fn test_export_does_not_consume_buffer() {
        let store = SessionStore::new();
        let table = subset();
        store.capture("sid-1", &table).unwrap();

        store.export("sid-1").unwrap();
        let again = store.export("sid-1").unwrap();
        assert_eq!(again, table);
    }
}
