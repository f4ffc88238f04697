//! Local record store backed by a JSON file
//!
//! Keeps every request in memory behind a lock and rewrites
//! `data/requests.json` atomically after each mutation. Ids are UUID v4 and
//! `created_at` is stamped on insert, mirroring what the hosted store does.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use crate::error::{BuzzPayError, BuzzPayResult};
use crate::models::{NewPaymentRequest, PaymentRequest, RequestId, RequestUpdate};

use super::file_io::{read_json, write_json_atomic};
use super::RecordStore;

/// Serializable file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RequestData {
    requests: Vec<PaymentRequest>,
}

pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<HashMap<RequestId, PaymentRequest>>,
}

impl JsonFileStore {
    /// Open the store, loading any existing file
    pub fn open(path: PathBuf) -> BuzzPayResult<Self> {
        let store = Self {
            path,
            data: RwLock::new(HashMap::new()),
        };
        store.load()?;
        Ok(store)
    }

    /// Reload from disk
    pub fn load(&self) -> BuzzPayResult<()> {
        let file_data: RequestData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            BuzzPayError::Store(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for request in file_data.requests {
            data.insert(request.id.clone(), request);
        }

        debug!(count = data.len(), path = %self.path.display(), "loaded requests");
        Ok(())
    }

    fn save(&self, data: &HashMap<RequestId, PaymentRequest>) -> BuzzPayResult<()> {
        let requests = sorted_newest_first(data.values().cloned().collect());
        write_json_atomic(&self.path, &RequestData { requests })
    }
}

fn sorted_newest_first(mut requests: Vec<PaymentRequest>) -> Vec<PaymentRequest> {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    requests
}

impl RecordStore for JsonFileStore {
    fn create(&self, new: &NewPaymentRequest) -> BuzzPayResult<PaymentRequest> {
        let mut data = self.data.write().map_err(|e| {
            BuzzPayError::Store(format!("Failed to acquire write lock: {}", e))
        })?;

        let request = PaymentRequest::from_new(RequestId::generate(), new.clone(), Utc::now());
        data.insert(request.id.clone(), request.clone());

        if let Err(e) = self.save(&data) {
            data.remove(&request.id);
            return Err(e);
        }
        Ok(request)
    }

    fn get(&self, id: &RequestId) -> BuzzPayResult<PaymentRequest> {
        let data = self.data.read().map_err(|e| {
            BuzzPayError::Store(format!("Failed to acquire read lock: {}", e))
        })?;

        data.get(id)
            .cloned()
            .ok_or_else(|| BuzzPayError::request_not_found(id.as_str()))
    }

    fn update(&self, id: &RequestId, update: &RequestUpdate) -> BuzzPayResult<PaymentRequest> {
        let mut data = self.data.write().map_err(|e| {
            BuzzPayError::Store(format!("Failed to acquire write lock: {}", e))
        })?;

        let previous = data
            .get(id)
            .cloned()
            .ok_or_else(|| BuzzPayError::request_not_found(id.as_str()))?;

        let mut updated = previous.clone();
        updated.apply(update);
        data.insert(id.clone(), updated.clone());

        if let Err(e) = self.save(&data) {
            data.insert(id.clone(), previous);
            return Err(e);
        }
        Ok(updated)
    }

    fn list(&self) -> BuzzPayResult<Vec<PaymentRequest>> {
        let data = self.data.read().map_err(|e| {
            BuzzPayError::Store(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(sorted_newest_first(data.values().cloned().collect()))
    }
}
