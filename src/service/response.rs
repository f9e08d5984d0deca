//! Framework-agnostic response envelopes.
//!
//! Every body carries `success`. Transports only pick the status code and
//! serialize `body`.

use serde_json::{json, Value};

use crate::ingest::IngestResult;
use crate::store::Record;

use super::error::ServiceError;
use super::record_service::Listing;

/// A status code and JSON body ready for any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// `200 { success, data, total, offset, limit }`
    pub fn listing(listing: &Listing) -> Self {
        Self {
            status: 200,
            body: json!({
                "success": true,
                "data": listing.records,
                "total": listing.total,
                "offset": listing.offset,
                "limit": listing.limit,
            }),
        }
    }

    /// `201 { success, data }`
    pub fn created(record: &Record) -> Self {
        Self {
            status: 201,
            body: json!({ "success": true, "data": record }),
        }
    }

    /// `200 { success, processedCount, rejectedCount, createdNames, updatedNames }`
    pub fn ingested(result: &IngestResult) -> Self {
        Self {
            status: 200,
            body: json!({
                "success": true,
                "processedCount": result.accepted,
                "rejectedCount": result.rejected,
                "createdNames": result.created_names,
                "updatedNames": result.updated_names,
            }),
        }
    }

    /// `{ success: false, error }` with the error's status code.
    pub fn from_error(err: &ServiceError) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "success": false, "error": err.to_string() }),
        }
    }

    /// Static liveness body.
    pub fn health() -> Self {
        Self {
            status: 200,
            body: json!({ "ok": true }),
        }
    }
}
